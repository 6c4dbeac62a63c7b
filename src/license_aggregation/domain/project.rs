use serde::{Deserialize, Serialize};

/// The project a license information file is generated for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    name: String,
    license_info_header_text: Option<String>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            license_info_header_text: None,
        }
    }

    /// Overrides the default license info header for this project
    pub fn with_license_info_header_text(mut self, header_text: impl Into<String>) -> Self {
        self.license_info_header_text = Some(header_text.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn license_info_header_text(&self) -> Option<&str> {
        self.license_info_header_text.as_deref()
    }
}

/// The requesting user, handed through to stores and parsers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    email: String,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}
