use std::io::{Read, Write};

use serialport::{ClearBuffer, DataBits, FlowControl, Parity, SerialPort, StopBits};
use tracing::{debug, info, trace, warn};

use super::{ModuleTransport, SerialParams};
use crate::constants::BAUD_RATE;
use crate::error::{ModuleError, ModuleResult};

/// Serial port transport layer.
///
/// Opening goes through `serialport`, which opens the tty non-blocking so a
/// device that isn't ready for modem control can't hang us, clears
/// `O_NONBLOCK` again and puts the line in raw mode. On unix we additionally
/// take exclusive access. Stale bytes are discarded once the line is set up.
pub struct SerialPortTransport {
    path: String,
    serial_port: Option<Box<dyn SerialPort>>,
}

impl SerialPortTransport {
    /// Open `path`. Failure is logged and yields an invalid transport
    pub fn open(path: &str, params: &SerialParams) -> SerialPortTransport {
        let serial_port = match Self::configure(path, params) {
            Ok(port) => {
                info!("Opened input module on {}", path);
                Some(port)
            }
            Err(e) => {
                warn!("Could not open {}: {}", path, e);
                None
            }
        };

        SerialPortTransport {
            path: path.to_owned(),
            serial_port,
        }
    }

    fn configure(path: &str, params: &SerialParams) -> ModuleResult<Box<dyn SerialPort>> {
        let builder = serialport::new(path, BAUD_RATE)
            .data_bits(DataBits::Eight)
            .stop_bits(StopBits::One)
            .parity(Parity::None)
            .flow_control(FlowControl::None)
            .timeout(params.read_timeout);

        let serial_port = Self::open_exclusive(builder)?;

        serial_port.clear(ClearBuffer::All).map_err(|e| {
            ModuleError::Communication(format!("Failed to flush stale buffers: {}", e))
        })?;

        Ok(serial_port)
    }

    #[cfg(unix)]
    fn open_exclusive(builder: serialport::SerialPortBuilder) -> ModuleResult<Box<dyn SerialPort>> {
        let mut serial_port = builder
            .open_native()
            .map_err(|e| ModuleError::Communication(format!("{:?}", e)))?;

        // Refuse to share the module with another process
        serial_port.set_exclusive(true).map_err(|e| {
            ModuleError::Communication(format!("Failed to get exclusive access: {}", e))
        })?;

        Ok(Box::new(serial_port))
    }

    #[cfg(not(unix))]
    fn open_exclusive(builder: serialport::SerialPortBuilder) -> ModuleResult<Box<dyn SerialPort>> {
        // COM ports are always opened for exclusive access
        builder
            .open()
            .map_err(|e| ModuleError::Communication(format!("{:?}", e)))
    }

    fn port_mut(&mut self) -> ModuleResult<&mut Box<dyn SerialPort>> {
        self.serial_port
            .as_mut()
            .ok_or_else(|| ModuleError::InvalidDevice(self.path.clone()))
    }
}

impl ModuleTransport for SerialPortTransport {
    fn is_valid(&self) -> bool {
        self.serial_port.is_some()
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn write(&mut self, bytes: &[u8]) -> ModuleResult<usize> {
        let written = self
            .port_mut()?
            .write(bytes)
            .map_err(|e| ModuleError::Communication(format!("{:?}", e)))?;

        if written < bytes.len() {
            debug!("Short write on {}: {}/{} bytes", self.path, written, bytes.len());
        }
        trace!("Sent bytes {:02x?}", &bytes[..written]);
        Ok(written)
    }

    fn read(&mut self, expected_size: usize) -> ModuleResult<Vec<u8>> {
        let mut buffer = vec![0; expected_size];

        let size = self.port_mut()?.read(&mut buffer).map_err(|e| {
            if e.kind() == std::io::ErrorKind::TimedOut {
                ModuleError::Timeout(format!("No reply from {}", self.path))
            } else {
                ModuleError::Communication(format!("{:?}", e))
            }
        })?;

        // Return a buffer with the actual length
        buffer.truncate(size);
        trace!("Received bytes {:02x?}", buffer);
        Ok(buffer)
    }

    fn close(&mut self) {
        // Dropping the port releases exclusive access and closes the descriptor
        if self.serial_port.take().is_some() {
            info!("Closed input module on {}", self.path);
        }
    }
}

impl Drop for SerialPortTransport {
    fn drop(&mut self) {
        self.close();
    }
}
