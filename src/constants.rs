pub(crate) const MAGIC_1: u8 = 0x32;
pub(crate) const MAGIC_2: u8 = 0xAC;

pub(crate) const BAUD_RATE: u32 = 115200;
pub(crate) const DEFAULT_READ_TIMEOUT_MS: u64 = 1000;

/// Every reply frame is this long, whatever the logical reply size
pub(crate) const RESPONSE_SIZE: usize = 32;

// Serial number layout:
//   FRA      - Framework
//   KDE      - C1 LED Matrix
//   BZ       - BizLink
//   01       - SKU, default configuration
//   00000000 - device identifier
pub(crate) const VENDOR_SERIAL_PREFIX: &str = "FRA";
pub(crate) const LED_MATRIX_SERIAL_PREFIX: &str = "FRAKDEBZ";

pub(crate) const LED_MATRIX_WIDTH: usize = 9;
pub(crate) const LED_MATRIX_HEIGHT: usize = 34;
