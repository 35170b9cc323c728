use super::{Command, CommandCode, Query};
use super::replies::{AnimateReply, BrightnessReply, SleepReply, VersionReply};
use crate::constants::{LED_MATRIX_HEIGHT, LED_MATRIX_WIDTH};

/// Bytes needed for a 1 bit per pixel image of the LED matrix
pub const DRAW_BW_LEN: usize = (LED_MATRIX_WIDTH * LED_MATRIX_HEIGHT).div_ceil(8);
pub const STAGE_COL_PIXELS: usize = LED_MATRIX_HEIGHT;
pub const SET_PX_COLOR_LEN: usize = 49;

/// Commands without a body
macro_rules! header_only {
    ($(#[$meta:meta])* $name:ident => $code:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;

        impl Command for $name {
            const CODE: CommandCode = $code;
            const BODY_LEN: usize = 0;

            fn write_body(&self, _body: &mut Vec<u8>) {}
        }
    };
}

header_only!(
    /// Reboot into the bootloader
    Bootloader => CommandCode::Bootloader
);
header_only!(Panic => CommandCode::Panic);
header_only!(
    /// Draw the columns staged with [`StageCol`]
    FlushCol => CommandCode::FlushCol
);
header_only!(GameStatus => CommandCode::GameStatus);
header_only!(FlushFb => CommandCode::FlushFb);
header_only!(Version => CommandCode::Version);
header_only!(GetBrightness => CommandCode::GET_BRIGHTNESS);
header_only!(GetSleep => CommandCode::GET_SLEEP);
header_only!(GetAnimate => CommandCode::GET_ANIMATE);

impl Query for Version {
    type Reply = VersionReply;
}

impl Query for GetBrightness {
    type Reply = BrightnessReply;
}

impl Query for GetSleep {
    type Reply = SleepReply;
}

impl Query for GetAnimate {
    type Reply = AnimateReply;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brightness {
    /// The firmware may clamp this
    pub brightness: u8,
}

impl Command for Brightness {
    const CODE: CommandCode = CommandCode::Brightness;
    const BODY_LEN: usize = 1;

    fn write_body(&self, body: &mut Vec<u8>) {
        body.push(self.brightness);
    }
}

/// Built-in patterns of the LED matrix
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternType {
    /// Fill the given percentage of rows, takes the extra parameter
    Percentage = 0x00,
    /// Brightness gradient from top to bottom
    Gradient = 0x01,
    /// Gradient from the middle to top and bottom
    DoubleGradient = 0x02,
    DisplayLotusHorizontal = 0x03,
    ZigZag = 0x04,
    /// Every LED on at full brightness
    FullBrightness = 0x05,
    DisplayPanic = 0x06,
    DisplayLotusVertical = 0x07,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub pattern: PatternType,
    /// Only meaningful for [`PatternType::Percentage`]
    pub extra: u8,
}

impl Pattern {
    pub fn new(pattern: PatternType) -> Self {
        Pattern { pattern, extra: 0 }
    }

    pub fn percentage(percent: u8) -> Self {
        Pattern {
            pattern: PatternType::Percentage,
            extra: percent,
        }
    }
}

impl Command for Pattern {
    const CODE: CommandCode = CommandCode::Pattern;
    const BODY_LEN: usize = 2;

    fn write_body(&self, body: &mut Vec<u8>) {
        body.push(self.pattern as u8);
        body.push(self.extra);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sleep {
    pub sleep: bool,
}

impl Command for Sleep {
    const CODE: CommandCode = CommandCode::Sleep;
    const BODY_LEN: usize = 1;

    fn write_body(&self, body: &mut Vec<u8>) {
        body.push(self.sleep.into());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Animate {
    pub animate: bool,
}

impl Command for Animate {
    const CODE: CommandCode = CommandCode::Animate;
    const BODY_LEN: usize = 1;

    fn write_body(&self, body: &mut Vec<u8>) {
        body.push(self.animate.into());
    }
}

/// Black and white image for the whole LED matrix.
///
/// Pixels are packed row-major, least significant bit first: pixel `(x, y)`
/// is bit `(y * 9 + x) % 8` of byte `(y * 9 + x) / 8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawBw {
    pub bits: [u8; DRAW_BW_LEN],
}

impl Default for DrawBw {
    fn default() -> Self {
        DrawBw {
            bits: [0; DRAW_BW_LEN],
        }
    }
}

impl DrawBw {
    pub fn new(bits: [u8; DRAW_BW_LEN]) -> Self {
        DrawBw { bits }
    }

    /// Build from a grid indexed as `grid[y][x]`
    pub fn from_pixels(grid: &[[bool; LED_MATRIX_WIDTH]; LED_MATRIX_HEIGHT]) -> Self {
        let mut image = DrawBw::default();
        for (y, row) in grid.iter().enumerate() {
            for (x, on) in row.iter().enumerate() {
                image.set_pixel(x, y, *on);
            }
        }
        image
    }

    /// Coordinates outside the 9x34 matrix are ignored
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        if x >= LED_MATRIX_WIDTH || y >= LED_MATRIX_HEIGHT {
            return;
        }
        let index = y * LED_MATRIX_WIDTH + x;
        let mask = 1 << (index % 8);
        if on {
            self.bits[index / 8] |= mask;
        } else {
            self.bits[index / 8] &= !mask;
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= LED_MATRIX_WIDTH || y >= LED_MATRIX_HEIGHT {
            return false;
        }
        let index = y * LED_MATRIX_WIDTH + x;
        self.bits[index / 8] & (1 << (index % 8)) != 0
    }
}

impl Command for DrawBw {
    const CODE: CommandCode = CommandCode::DrawBw;
    const BODY_LEN: usize = DRAW_BW_LEN;

    fn write_body(&self, body: &mut Vec<u8>) {
        body.extend_from_slice(&self.bits);
    }
}

/// One column of grayscale values, shown after [`FlushCol`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageCol {
    pub col: u8,
    pub pixels: [u8; STAGE_COL_PIXELS],
}

impl Command for StageCol {
    const CODE: CommandCode = CommandCode::StageCol;
    const BODY_LEN: usize = 1 + STAGE_COL_PIXELS;

    fn write_body(&self, body: &mut Vec<u8>) {
        body.push(self.col);
        body.extend_from_slice(&self.pixels);
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Game {
    Snake = 0x00,
    Pong = 0x01,
    Tetris = 0x02,
    GameOfLife = 0x03,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartGame {
    pub game: Game,
    /// Start configuration, only read by [`Game::GameOfLife`]
    pub param: u8,
}

impl StartGame {
    pub fn new(game: Game) -> Self {
        StartGame { game, param: 0 }
    }
}

impl Command for StartGame {
    const CODE: CommandCode = CommandCode::StartGame;
    const BODY_LEN: usize = 2;

    fn write_body(&self, body: &mut Vec<u8>) {
        body.push(self.game as u8);
        body.push(self.param);
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameControlArg {
    Up = 0x00,
    Down = 0x01,
    Left = 0x02,
    Right = 0x03,
    Quit = 0x04,
    /// Second player, used by pong
    Left2 = 0x05,
    Right2 = 0x06,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameControl {
    pub control: GameControlArg,
}

impl Command for GameControl {
    const CODE: CommandCode = CommandCode::GameControl;
    const BODY_LEN: usize = 1;

    fn write_body(&self, body: &mut Vec<u8>) {
        body.push(self.control as u8);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Command for SetColor {
    const CODE: CommandCode = CommandCode::SetColor;
    const BODY_LEN: usize = 3;

    fn write_body(&self, body: &mut Vec<u8>) {
        body.extend_from_slice(&[self.r, self.g, self.b]);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOn {
    pub on: bool,
}

impl Command for DisplayOn {
    const CODE: CommandCode = CommandCode::DisplayOn;
    const BODY_LEN: usize = 1;

    fn write_body(&self, body: &mut Vec<u8>) {
        body.push(self.on.into());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvertScreen {
    pub invert: bool,
}

impl Command for InvertScreen {
    const CODE: CommandCode = CommandCode::InvertScreen;
    const BODY_LEN: usize = 1;

    fn write_body(&self, body: &mut Vec<u8>) {
        body.push(self.invert.into());
    }
}

/// Pixel data for one column of the B1 display, shown after [`FlushFb`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetPxColor {
    pub col: u8,
    pub data: [u8; SET_PX_COLOR_LEN],
}

impl Command for SetPxColor {
    const CODE: CommandCode = CommandCode::SetPxColor;
    const BODY_LEN: usize = 1 + SET_PX_COLOR_LEN;

    fn write_body(&self, body: &mut Vec<u8>) {
        body.push(self.col);
        body.extend_from_slice(&self.data);
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PwmFrequency {
    Hz29000 = 0x00,
    Hz3600 = 0x01,
    Hz1800 = 0x02,
    Hz900 = 0x03,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwmFreq {
    pub freq: PwmFrequency,
}

impl Command for PwmFreq {
    const CODE: CommandCode = CommandCode::PwmFreq;
    const BODY_LEN: usize = 1;

    fn write_body(&self, body: &mut Vec<u8>) {
        body.push(self.freq as u8);
    }
}
