use serde::{Deserialize, Serialize};

/// The form's notification area: a deduplicated list of error texts and at
/// most one success text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notices {
    errors: Vec<String>,
    success: Option<String>,
}

impl Notices {
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    #[must_use]
    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn push_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        if !self.errors.contains(&message) {
            self.errors.push(message);
        }
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.success = Some(message.into());
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    pub fn clear_success(&mut self) {
        self.success = None;
    }

    pub fn clear(&mut self) {
        self.clear_errors();
        self.clear_success();
    }
}
