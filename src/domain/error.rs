//! Domain error types.

/// Top-level error type for restconfig.
#[derive(Debug, thiserror::Error)]
pub enum RestConfigError {
    #[error("no such section [{section}]")]
    NoSuchSection { section: String },

    #[error("no such option [{section}] {option}")]
    NoSuchOption { section: String, option: String },

    #[error("unexpected response from config API: {reason}")]
    Protocol { reason: String },

    #[cfg(feature = "client")]
    #[error("config API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid {target} value for [{section}] {option}: {value:?}")]
    Parse {
        section: String,
        option: String,
        value: String,
        target: &'static str,
    },

    #[error("config load error in {file}: {reason}")]
    ConfigLoad { file: String, reason: String },

    #[error("invalid header {name:?}")]
    InvalidHeader { name: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RestConfigError {
    pub fn protocol(reason: impl Into<String>) -> Self {
        Self::Protocol {
            reason: reason.into(),
        }
    }

    /// True for the two "absent" errors, the only ones a fallback may replace.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RestConfigError::NoSuchSection { .. } | RestConfigError::NoSuchOption { .. }
        )
    }
}

impl From<&RestConfigError> for std::process::ExitCode {
    fn from(err: &RestConfigError) -> Self {
        let code: u8 = match err {
            RestConfigError::Io(_) => 1,
            #[cfg(feature = "client")]
            RestConfigError::Transport(_) => 1,
            RestConfigError::ConfigLoad { .. } => 2,
            RestConfigError::NoSuchSection { .. } | RestConfigError::NoSuchOption { .. } => 3,
            RestConfigError::Protocol { .. } => 4,
            RestConfigError::Parse { .. } => 5,
            RestConfigError::InvalidHeader { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}
