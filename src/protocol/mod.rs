//! Wire format of the input module protocol.
//!
//! Every frame sent to a module starts with a 3 byte [`PayloadHeader`]
//! (`0x32 0xAC <code>`) followed by a fixed-size body that depends on the
//! command. Commands that solicit a reply are answered with a frame of
//! exactly [`RESPONSE_SIZE`] bytes, of which only a short prefix is meaningful.

use std::fmt;

use crate::constants::{MAGIC_1, MAGIC_2};
use crate::error::{ModuleError, ModuleResult};
use crate::module_type::ModuleType;

pub mod payloads;
pub mod replies;

pub use payloads::*;
pub use replies::*;

pub const HEADER_LEN: usize = 3;
pub const RESPONSE_SIZE: usize = crate::constants::RESPONSE_SIZE;

/// Command codes understood by the firmware.
///
/// Set and get variants of the same setting share a byte. The firmware tells
/// them apart by whether a body follows the header, so the get codes are
/// aliases (see [`CommandCode::GET_SLEEP`] and friends) rather than variants.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandCode {
    /// Set (or get) the brightness (L | M)
    Brightness = 0x00,
    /// Display a built-in pattern (L)
    Pattern = 0x01,
    /// Jump to the bootloader (L | D | M)
    Bootloader = 0x02,
    /// Set (or get) the sleep state (L | D | M)
    Sleep = 0x03,
    /// Set (or get) whether the pattern scrolls (L)
    Animate = 0x04,
    /// Crash the firmware on purpose (L | D | M)
    Panic = 0x05,
    /// Draw a black and white image (L)
    DrawBw = 0x06,
    /// Stage a grayscale column (L)
    StageCol = 0x07,
    /// Draw all staged columns (L)
    FlushCol = 0x08,
    /// Deprecated by the firmware, no payload is provided for it (L)
    SetText = 0x09,
    /// Start an embedded game (L)
    StartGame = 0x10,
    /// Send input to the running game (L)
    GameControl = 0x11,
    /// Query the game status, unfinished in firmware (L)
    GameStatus = 0x12,
    /// Set the LED color (M)
    SetColor = 0x13,
    /// Turn the display on or off (D)
    DisplayOn = 0x14,
    /// Invert the screen (D)
    InvertScreen = 0x15,
    /// Set a column of pixels (D)
    SetPxColor = 0x16,
    /// Flush the framebuffer (D)
    FlushFb = 0x17,
    /// Select the PWM frequency of the LED driver (L)
    PwmFreq = 0x1E,
    /// Get the firmware version (L | D | M)
    Version = 0x20,
}

impl CommandCode {
    pub const GET_BRIGHTNESS: CommandCode = CommandCode::Brightness;
    pub const GET_SLEEP: CommandCode = CommandCode::Sleep;
    pub const GET_ANIMATE: CommandCode = CommandCode::Animate;

    pub const ALL: [CommandCode; 20] = [
        CommandCode::Brightness,
        CommandCode::Pattern,
        CommandCode::Bootloader,
        CommandCode::Sleep,
        CommandCode::Animate,
        CommandCode::Panic,
        CommandCode::DrawBw,
        CommandCode::StageCol,
        CommandCode::FlushCol,
        CommandCode::SetText,
        CommandCode::StartGame,
        CommandCode::GameControl,
        CommandCode::GameStatus,
        CommandCode::SetColor,
        CommandCode::DisplayOn,
        CommandCode::InvertScreen,
        CommandCode::SetPxColor,
        CommandCode::FlushFb,
        CommandCode::PwmFreq,
        CommandCode::Version,
    ];

    /// Whether the firmware of the given family accepts this command
    pub fn is_supported_by(self, module: ModuleType) -> bool {
        match self {
            Self::Bootloader | Self::Sleep | Self::Panic | Self::Version => true,
            Self::Brightness => {
                matches!(module, ModuleType::LedMatrix | ModuleType::C1MinimalModule)
            }
            Self::Pattern
            | Self::Animate
            | Self::DrawBw
            | Self::StageCol
            | Self::FlushCol
            | Self::SetText
            | Self::StartGame
            | Self::GameControl
            | Self::GameStatus
            | Self::PwmFreq => module == ModuleType::LedMatrix,
            Self::SetColor => module == ModuleType::C1MinimalModule,
            Self::DisplayOn | Self::InvertScreen | Self::SetPxColor | Self::FlushFb => {
                module == ModuleType::B1Display
            }
        }
    }
}

impl From<CommandCode> for u8 {
    fn from(code: CommandCode) -> u8 {
        code as u8
    }
}

impl TryFrom<u8> for CommandCode {
    type Error = ModuleError;

    fn try_from(value: u8) -> ModuleResult<Self> {
        CommandCode::ALL
            .into_iter()
            .find(|code| *code as u8 == value)
            .ok_or_else(|| ModuleError::Frame(format!("Unknown command code {:#04x}", value)))
    }
}

/// Magic bytes and command code that prefix every outgoing frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadHeader {
    pub code: CommandCode,
}

impl PayloadHeader {
    pub const MAGIC: [u8; 2] = [MAGIC_1, MAGIC_2];

    pub fn new(code: CommandCode) -> Self {
        PayloadHeader { code }
    }

    pub fn to_bytes(self) -> [u8; HEADER_LEN] {
        [MAGIC_1, MAGIC_2, self.code as u8]
    }

    /// Parse the header at the start of a frame, checking the magic bytes
    pub fn decode(frame: &[u8]) -> ModuleResult<Self> {
        if frame.len() < HEADER_LEN {
            return Err(ModuleError::Frame(format!(
                "Frame of {} bytes is shorter than the {} byte header",
                frame.len(),
                HEADER_LEN
            )));
        }

        if frame[..2] != Self::MAGIC {
            return Err(ModuleError::Frame(format!(
                "Bad magic bytes {:#04x} {:#04x}",
                frame[0], frame[1]
            )));
        }

        Ok(PayloadHeader {
            code: CommandCode::try_from(frame[2])?,
        })
    }
}

/// A command payload with a fixed body layout.
///
/// The header is derived from `CODE`, so a payload type can't be sent with
/// some other command's code.
pub trait Command {
    const CODE: CommandCode;
    const BODY_LEN: usize;

    /// Append exactly `BODY_LEN` bytes to `body`
    fn write_body(&self, body: &mut Vec<u8>);

    fn header(&self) -> PayloadHeader {
        PayloadHeader::new(Self::CODE)
    }

    fn body(&self) -> Vec<u8> {
        let mut body = Vec::with_capacity(Self::BODY_LEN);
        self.write_body(&mut body);
        body
    }

    /// Header followed by the body, without any padding
    fn encode(&self) -> Vec<u8> {
        let mut frame = Vec::with_capacity(HEADER_LEN + Self::BODY_LEN);
        frame.extend_from_slice(&self.header().to_bytes());
        self.write_body(&mut frame);
        debug_assert_eq!(frame.len(), HEADER_LEN + Self::BODY_LEN);
        frame
    }
}

/// A command the firmware answers with a reply frame
pub trait Query: Command {
    type Reply: Reply;
}

/// Typed view of the meaningful prefix of a reply frame.
///
/// `Default` must be the all-zero reply.
pub trait Reply: Default + Sized {
    const LEN: usize;

    /// Decode from the first `LEN` bytes, the rest of the frame is padding
    fn decode(frame: &[u8; RESPONSE_SIZE]) -> Self;
}

/// Free-form command for one-off set commands without a dedicated payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommand {
    pub code: CommandCode,
    pub body: Vec<u8>,
}

impl RawCommand {
    pub fn new(code: CommandCode, body: Vec<u8>) -> Self {
        RawCommand { code, body }
    }

    /// Pack arguments positionally into the body
    pub fn from_args<I, A>(code: CommandCode, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<u8>,
    {
        RawCommand {
            code,
            body: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let header = PayloadHeader::new(self.code).to_bytes();
        [header.as_slice(), self.body.as_slice()].concat()
    }
}

impl fmt::Display for RawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:02x?}", self.code, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_codes_alias_set_codes() {
        assert_eq!(CommandCode::GET_SLEEP as u8, 0x03);
        assert_eq!(CommandCode::GET_ANIMATE as u8, 0x04);
        assert_eq!(CommandCode::GET_BRIGHTNESS as u8, 0x00);
    }

    #[test]
    fn command_code_from_byte() {
        for code in CommandCode::ALL {
            assert_eq!(CommandCode::try_from(code as u8).unwrap(), code);
        }
        assert!(CommandCode::try_from(0x0A).is_err());
        assert!(CommandCode::try_from(0xFF).is_err());
    }

    #[test]
    fn header_rejects_bad_frames() {
        assert!(PayloadHeader::decode(&[0x32, 0xAC]).is_err());
        assert!(PayloadHeader::decode(&[0x32, 0xAD, 0x00]).is_err());
        assert!(PayloadHeader::decode(&[0x32, 0xAC, 0x0B]).is_err());
        assert_eq!(
            PayloadHeader::decode(&[0x32, 0xAC, 0x20, 0xFF]).unwrap().code,
            CommandCode::Version
        );
    }

    #[test]
    fn raw_command_prefixes_header_only() {
        let raw = RawCommand::from_args(CommandCode::Pattern, [0x00u8, 42]);
        assert_eq!(raw.encode(), vec![0x32, 0xAC, 0x01, 0x00, 42]);

        let empty = RawCommand::new(CommandCode::Bootloader, vec![]);
        assert_eq!(empty.encode(), vec![0x32, 0xAC, 0x02]);

        let flag = RawCommand::from_args(CommandCode::Sleep, [true]);
        assert_eq!(flag.encode().len(), HEADER_LEN + 1);
    }

    #[test]
    fn module_support_matrix() {
        assert!(CommandCode::Version.is_supported_by(ModuleType::B1Display));
        assert!(CommandCode::Brightness.is_supported_by(ModuleType::C1MinimalModule));
        assert!(!CommandCode::Brightness.is_supported_by(ModuleType::B1Display));
        assert!(CommandCode::SetPxColor.is_supported_by(ModuleType::B1Display));
        assert!(!CommandCode::DrawBw.is_supported_by(ModuleType::C1MinimalModule));
    }
}
