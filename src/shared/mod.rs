/// Shared kernel: error taxonomy, result alias and path/size guards
pub mod error;
pub mod result;
pub mod security;

pub use error::LicenseInfoError;
pub use result::Result;
