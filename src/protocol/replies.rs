use std::fmt;

use super::{RESPONSE_SIZE, Reply};

/// Firmware version, `minor_patch` holds minor in the high nibble and patch in
/// the low nibble
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VersionReply {
    pub major: u8,
    pub minor_patch: u8,
    pub pre_release: u8,
}

impl VersionReply {
    pub fn major(&self) -> u8 {
        self.major
    }

    pub fn minor(&self) -> u8 {
        self.minor_patch >> 4
    }

    pub fn patch(&self) -> u8 {
        self.minor_patch & 0x0F
    }

    pub fn is_pre_release(&self) -> bool {
        self.pre_release != 0
    }
}

impl Reply for VersionReply {
    const LEN: usize = 3;

    fn decode(frame: &[u8; RESPONSE_SIZE]) -> Self {
        VersionReply {
            major: frame[0],
            minor_patch: frame[1],
            pre_release: frame[2],
        }
    }
}

impl fmt::Display for VersionReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major(), self.minor(), self.patch())?;
        if self.is_pre_release() {
            f.write_str("-pre")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SleepReply {
    pub sleeping: bool,
}

impl Reply for SleepReply {
    const LEN: usize = 1;

    fn decode(frame: &[u8; RESPONSE_SIZE]) -> Self {
        SleepReply {
            sleeping: frame[0] != 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimateReply {
    pub animating: bool,
}

impl Reply for AnimateReply {
    const LEN: usize = 1;

    fn decode(frame: &[u8; RESPONSE_SIZE]) -> Self {
        AnimateReply {
            animating: frame[0] != 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrightnessReply {
    pub brightness: u8,
}

impl Reply for BrightnessReply {
    const LEN: usize = 1;

    fn decode(frame: &[u8; RESPONSE_SIZE]) -> Self {
        BrightnessReply {
            brightness: frame[0],
        }
    }
}
