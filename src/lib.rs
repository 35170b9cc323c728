//! Host-side driver for Framework input modules.
//!
//! Modules are found with [`InputModuleManager::discover`], then driven with
//! typed payloads from [`protocol`]:
//!
//! ```no_run
//! use inputmodule::{InputModuleManager, ModuleType, protocol::Brightness};
//!
//! let mut manager = InputModuleManager::discover()?;
//! if let Some(matrix) = manager.input_module_mut(ModuleType::LedMatrix, 0) {
//!     if matrix.is_valid() {
//!         matrix.send(&Brightness { brightness: 30 })?;
//!         println!("firmware {}", matrix.version());
//!     }
//! }
//! # Ok::<(), inputmodule::error::ModuleError>(())
//! ```

pub use device::InputModule;
pub use manager::InputModuleManager;
pub use module_type::ModuleType;
pub use transport::{ModuleTransport, SerialParams, SerialPortTransport};

pub(crate) mod constants;
pub mod device;
pub mod error;
pub mod manager;
pub mod module_type;
pub mod protocol;
pub mod transport;
