use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("lookup {host}: {message}")]
    Resolution { host: String, message: String },

    #[error("Invalid host name: {0:?}")]
    InvalidHostName(String),
}

impl DomainError {
    pub fn resolution(host: impl Into<String>, message: impl ToString) -> Self {
        Self::Resolution {
            host: host.into(),
            message: message.to_string(),
        }
    }
}
