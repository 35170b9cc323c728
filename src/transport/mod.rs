pub mod serialport;

use std::time::Duration;

use crate::constants::DEFAULT_READ_TIMEOUT_MS;
use crate::error::ModuleResult;

pub use self::serialport::SerialPortTransport;

/// Byte level access to one module.
///
/// Implementations own their handle exclusively. A transport that failed to
/// open is still a value, it just reports `is_valid() == false`.
pub trait ModuleTransport {
    /// Whether the handle is open and usable
    fn is_valid(&self) -> bool;

    /// Device node this transport was opened on
    fn path(&self) -> &str;

    /// Issue a single write. A short write is returned as-is, not retried
    fn write(&mut self, bytes: &[u8]) -> ModuleResult<usize>;

    /// Issue a single read of at most `expected_size` bytes
    fn read(&mut self, expected_size: usize) -> ModuleResult<Vec<u8>>;

    /// Release the handle, the transport is invalid afterwards
    fn close(&mut self);
}

/// Line parameters other than the timeout are fixed by the firmware
/// (115200 baud, 8N1, no flow control)
#[derive(Debug, Clone)]
pub struct SerialParams {
    /// Upper bound on how long a read waits for a reply
    pub read_timeout: Duration,
}

impl Default for SerialParams {
    fn default() -> Self {
        SerialParams {
            read_timeout: Duration::from_millis(DEFAULT_READ_TIMEOUT_MS),
        }
    }
}
