use std::fmt;

use crate::constants::{LED_MATRIX_SERIAL_PREFIX, VENDOR_SERIAL_PREFIX};

/// Product families that speak the input module protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleType {
    /// 9x34 LED matrix
    LedMatrix,

    /// B1 secondary display
    B1Display,

    /// C1 minimal module with a single RGB LED
    C1MinimalModule,
}

impl ModuleType {
    pub const ALL: [ModuleType; 3] = [
        ModuleType::LedMatrix,
        ModuleType::B1Display,
        ModuleType::C1MinimalModule,
    ];

    /// Classify a device from its USB short serial number.
    ///
    /// Only the LED matrix prefix is recognised for now. B1 display and C1
    /// minimal module firmware don't report a usable product code, so those
    /// families are never returned here.
    pub fn from_serial_number(serial_number: &str) -> Option<ModuleType> {
        if !serial_number.starts_with(VENDOR_SERIAL_PREFIX) {
            return None;
        }

        if serial_number.starts_with(LED_MATRIX_SERIAL_PREFIX) {
            return Some(ModuleType::LedMatrix);
        }

        None
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModuleType::LedMatrix => "LED Matrix",
            ModuleType::B1Display => "B1 Display",
            ModuleType::C1MinimalModule => "C1 Minimal Module",
        };
        f.write_str(name)
    }
}
