use std::sync::OnceLock;

const DEFAULT_HEADER_TEMPLATE: &str = include_str!("../../../resources/DefaultLicenseInfoHeader.txt");

static DEFAULT_HEADER_TEXT: OnceLock<String> = OnceLock::new();

/// Default license info header, loaded from the bundled template on first use
pub fn default_license_info_header() -> &'static str {
    DEFAULT_HEADER_TEXT.get_or_init(|| strip_comment_lines(DEFAULT_HEADER_TEMPLATE))
}

/// Removes every line whose first non-space character is `#`
fn strip_comment_lines(template: &str) -> String {
    template
        .split_inclusive('\n')
        .filter(|line| !line.trim_start().starts_with('#'))
        .collect::<String>()
        .trim_end()
        .to_string()
}
