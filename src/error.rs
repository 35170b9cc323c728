use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModuleError {
    #[error("Communication error: {0}")]
    Communication(String),

    #[error("Timed out waiting for reply: {0}")]
    Timeout(String),

    #[error("Malformed frame: {0}")]
    Frame(String),

    #[error("Discovery error: {0}")]
    Discovery(String),

    #[error("Device is not open: {0}")]
    InvalidDevice(String),
}

pub type ModuleResult<T> = std::result::Result<T, ModuleError>;
