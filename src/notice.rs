#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// A dismissible message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub title: &'static str,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl ToString) -> Self {
        Self {
            severity: Severity::Info,
            title: "Twit-Twat",
            message: message.to_string(),
        }
    }

    pub fn error(message: impl ToString) -> Self {
        Self {
            severity: Severity::Error,
            title: "An error occurred",
            message: message.to_string(),
        }
    }

    pub fn titled(self, title: &'static str) -> Self {
        Self { title, ..self }
    }
}
