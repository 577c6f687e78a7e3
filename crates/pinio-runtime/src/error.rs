use pinio_core::PinIoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("pin I/O task is not running")]
    Closed,

    #[error(transparent)]
    PinIo(#[from] PinIoError),
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
