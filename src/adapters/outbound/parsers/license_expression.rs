//! SPDX license expression splitting
//!
//! Only the set of license identifiers matters for license info, so the
//! expression structure (`AND`/`OR`, parentheses) is flattened. A `WITH`
//! exception stays attached to the license it modifies.

const NO_LICENSE_VALUES: [&str; 2] = ["NONE", "NOASSERTION"];

/// True for the SPDX placeholders meaning "nothing" or "not determined"
pub fn is_no_assertion(value: &str) -> bool {
    let value = value.trim();
    value.is_empty()
        || NO_LICENSE_VALUES
            .iter()
            .any(|placeholder| value.eq_ignore_ascii_case(placeholder))
}

fn tokenize(expression: &str) -> Vec<String> {
    expression
        .replace('(', " ( ")
        .replace(')', " ) ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// License identifiers referenced by `expression`, in order of appearance,
/// without duplicates
///
/// `GPL-2.0-only WITH Classpath-exception-2.0 OR (MIT AND NONE)` yields
/// `["GPL-2.0-only WITH Classpath-exception-2.0", "MIT"]`.
pub fn license_ids(expression: &str) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    let mut tokens = tokenize(expression).into_iter();

    while let Some(token) = tokens.next() {
        if token == "(" || token == ")" {
            continue;
        }
        if token.eq_ignore_ascii_case("AND") || token.eq_ignore_ascii_case("OR") {
            continue;
        }
        if token.eq_ignore_ascii_case("WITH") {
            if let (Some(last), Some(exception)) = (ids.last_mut(), tokens.next()) {
                last.push_str(" WITH ");
                last.push_str(&exception);
            }
            continue;
        }
        if is_no_assertion(&token) {
            continue;
        }
        if !ids.contains(&token) {
            ids.push(token);
        }
    }

    ids
}

/// Identifier without a trailing `WITH` exception
pub fn base_license_id(id: &str) -> &str {
    id.split(" WITH ").next().unwrap_or(id)
}
