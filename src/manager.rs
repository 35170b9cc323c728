use std::collections::HashMap;

use serialport::{SerialPortInfo, SerialPortType};
use tracing::{debug, info, trace};

use crate::device::InputModule;
use crate::error::{ModuleError, ModuleResult};
use crate::module_type::ModuleType;
use crate::transport::SerialParams;

const MACOS_DIAL_IN_PREFIX: &str = "/dev/tty.";

/// Owns every input module found on the host, grouped by type.
///
/// The registry is built once during discovery and never rescanned. Indices
/// are positions in the order the host enumerated the serial ports, they are
/// not tied to a physical USB slot and can change between runs.
#[derive(Debug, Default)]
pub struct InputModuleManager {
    modules: HashMap<ModuleType, Vec<InputModule>>,
}

impl InputModuleManager {
    /// Discover all input modules using default line parameters
    pub fn discover() -> ModuleResult<Self> {
        Self::discover_with(&SerialParams::default())
    }

    pub fn discover_with(params: &SerialParams) -> ModuleResult<Self> {
        let ports = serialport::available_ports().map_err(|e| {
            ModuleError::Discovery(format!("Could not get available ports. Err {:?}", e))
        })?;

        Ok(Self::from_ports(ports, params))
    }

    /// Build the registry from an already enumerated list of ports
    pub fn from_ports(ports: Vec<SerialPortInfo>, params: &SerialParams) -> Self {
        Self::from_ports_with(ports, |module_type, path| {
            InputModule::open(module_type, path, params)
        })
    }

    /// Like [`InputModuleManager::from_ports`], with a custom way of opening
    /// each matching device
    pub fn from_ports_with<F>(ports: Vec<SerialPortInfo>, mut open: F) -> Self
    where
        F: FnMut(ModuleType, &str) -> InputModule,
    {
        let mut modules: HashMap<ModuleType, Vec<InputModule>> = HashMap::new();

        for port in ports {
            let Some(module_type) = classify_port(&port) else {
                continue;
            };

            if port.port_name.is_empty() {
                debug!("Skipping {} without a device node", module_type);
                continue;
            }

            // macOS lists every USB modem as both /dev/cu.* and /dev/tty.*
            if port.port_name.starts_with(MACOS_DIAL_IN_PREFIX) {
                debug!("Skipping dial-in duplicate {}", port.port_name);
                continue;
            }

            info!("Found {} on {}", module_type, port.port_name);
            modules
                .entry(module_type)
                .or_default()
                .push(open(module_type, &port.port_name));
        }

        InputModuleManager { modules }
    }

    /// Module of the given type at `index`, if there is one
    pub fn input_module(&self, module_type: ModuleType, index: usize) -> Option<&InputModule> {
        self.modules.get(&module_type)?.get(index)
    }

    pub fn input_module_mut(
        &mut self,
        module_type: ModuleType,
        index: usize,
    ) -> Option<&mut InputModule> {
        self.modules.get_mut(&module_type)?.get_mut(index)
    }

    /// All modules of a type, for driving each from its own thread
    pub fn input_modules_mut(&mut self, module_type: ModuleType) -> &mut [InputModule] {
        match self.modules.get_mut(&module_type) {
            Some(modules) => modules.as_mut_slice(),
            None => &mut [],
        }
    }

    /// Number of modules of the given type that were discovered
    pub fn is_type_available(&self, module_type: ModuleType) -> usize {
        self.modules.get(&module_type).map_or(0, Vec::len)
    }
}

/// Module type of a serial port, or `None` when it isn't one of ours
fn classify_port(port: &SerialPortInfo) -> Option<ModuleType> {
    let SerialPortType::UsbPort(info) = &port.port_type else {
        trace!("Ignoring non-USB port {}", port.port_name);
        return None;
    };

    let Some(serial_number) = info.serial_number.as_deref() else {
        trace!("Ignoring {} without a serial number", port.port_name);
        return None;
    };

    let module_type = ModuleType::from_serial_number(serial_number);
    if module_type.is_none() {
        trace!(
            "Ignoring {} with unrecognised serial number {}",
            port.port_name, serial_number
        );
    }
    module_type
}
