use thiserror::Error;

pub type SfcResult<T> = Result<T, SfcError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SfcError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
