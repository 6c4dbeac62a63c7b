mod remediation_todos;

pub use remediation_todos::{RemediationTodos, TODO_DEFAULT_TEXT};
