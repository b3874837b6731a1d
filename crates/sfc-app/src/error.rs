//! Error types for the sfc-app host layer.

/// Host-side error type shared by sessions, scenario replay and the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] sfc_config::ConfigError),

    #[error("Controller construction failed: {0}")]
    Controls(#[from] sfc_controls::ControlError),

    #[error("Scenario error: {0}")]
    Scenario(#[from] serde_yaml::Error),

    #[error("Invalid scenario frame {index}: {reason}")]
    InvalidFrame { index: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
