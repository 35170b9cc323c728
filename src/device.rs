use tracing::{debug, warn};

use crate::error::{ModuleError, ModuleResult};
use crate::module_type::ModuleType;
use crate::protocol::{
    Animate, Brightness, Command, CommandCode, GetAnimate, GetBrightness, GetSleep, Pattern,
    PatternType, Query, RESPONSE_SIZE, RawCommand, Reply, Sleep, Version, VersionReply,
};
use crate::transport::{ModuleTransport, SerialParams, SerialPortTransport};

/// One physical input module and the transport used to reach it.
///
/// Every command requires a valid transport. Sending to a module that failed
/// to open is a programming error and panics, check [`InputModule::is_valid`]
/// first when that can happen.
pub struct InputModule {
    module_type: ModuleType,
    transport: Box<dyn ModuleTransport + Send>,
}

impl InputModule {
    pub fn new(module_type: ModuleType, transport: Box<dyn ModuleTransport + Send>) -> Self {
        InputModule {
            module_type,
            transport,
        }
    }

    /// Open a module over its serial device node
    pub fn open(module_type: ModuleType, path: &str, params: &SerialParams) -> Self {
        Self::new(module_type, Box::new(SerialPortTransport::open(path, params)))
    }

    pub fn module_type(&self) -> ModuleType {
        self.module_type
    }

    pub fn is_valid(&self) -> bool {
        self.transport.is_valid()
    }

    pub fn path(&self) -> &str {
        self.transport.path()
    }

    /// Release the underlying handle. The module is invalid afterwards
    pub fn close(&mut self) {
        self.transport.close();
    }

    fn assert_valid(&self) {
        assert!(
            self.is_valid(),
            "command issued to invalid {} on {}",
            self.module_type,
            self.path()
        );
    }

    fn check_support(&self, code: CommandCode) {
        if !code.is_supported_by(self.module_type) {
            debug!("{:?} is not supported by {}, sending anyway", code, self.module_type);
        }
    }

    /// Send a command that has no reply, returning the number of bytes written
    pub fn send<C: Command>(&mut self, command: &C) -> ModuleResult<usize> {
        self.assert_valid();
        self.check_support(C::CODE);
        self.transport.write(&command.encode())
    }

    /// Send a command with a free-form body packed from `args`
    pub fn send_raw<I, A>(&mut self, code: CommandCode, args: I) -> ModuleResult<usize>
    where
        I: IntoIterator<Item = A>,
        A: Into<u8>,
    {
        self.assert_valid();
        self.check_support(code);
        let command = RawCommand::from_args(code, args);
        debug!("Sending raw command {}", command);
        self.transport.write(&command.encode())
    }

    /// Send a query and read back its reply frame.
    ///
    /// A reply shorter than the frame is zero-padded before decoding, an
    /// empty one is an error. The read is only issued once the whole query
    /// frame was written.
    ///
    /// Exactly one read is issued. If a reply arrives split across several
    /// USB packets, the remainder stays queued on the port and the next query
    /// decodes it instead of its own reply, so the exchange can get out of
    /// sync until the stale bytes are drained.
    pub fn try_query<Q: Query>(&mut self, query: &Q) -> ModuleResult<Q::Reply> {
        self.assert_valid();
        self.check_support(Q::CODE);

        let request = query.encode();
        let written = self.transport.write(&request)?;
        if written < request.len() {
            return Err(ModuleError::Communication(format!(
                "Short write of {:?} to {}: {}/{} bytes",
                Q::CODE,
                self.path(),
                written,
                request.len()
            )));
        }

        let response = self.transport.read(RESPONSE_SIZE)?;

        if response.is_empty() {
            return Err(ModuleError::Communication(format!(
                "Empty reply to {:?} from {}",
                Q::CODE,
                self.path()
            )));
        }
        if response.len() < <Q::Reply as Reply>::LEN {
            debug!(
                "Short reply to {:?}: {} of {} bytes",
                Q::CODE,
                response.len(),
                <Q::Reply as Reply>::LEN
            );
        }

        let mut frame = [0u8; RESPONSE_SIZE];
        let size = response.len().min(RESPONSE_SIZE);
        frame[..size].copy_from_slice(&response[..size]);
        Ok(<Q::Reply as Reply>::decode(&frame))
    }

    /// Best-effort query: any failure yields the all-zero reply.
    ///
    /// A zeroed reply is indistinguishable from a device that actually
    /// answered with zeros; use [`InputModule::try_query`] when that matters.
    pub fn query<Q: Query>(&mut self, query: &Q) -> Q::Reply {
        self.try_query(query).unwrap_or_else(|e| {
            warn!("{:?} query to {} failed: {}", Q::CODE, self.path(), e);
            <Q::Reply>::default()
        })
    }

    pub fn version(&mut self) -> VersionReply {
        self.query(&Version)
    }

    pub fn set_brightness(&mut self, brightness: u8) -> ModuleResult<usize> {
        self.send(&Brightness { brightness })
    }

    pub fn brightness(&mut self) -> u8 {
        self.query(&GetBrightness).brightness
    }

    pub fn set_sleep(&mut self, sleep: bool) -> ModuleResult<usize> {
        self.send(&Sleep { sleep })
    }

    pub fn is_sleeping(&mut self) -> bool {
        self.query(&GetSleep).sleeping
    }

    pub fn set_animate(&mut self, animate: bool) -> ModuleResult<usize> {
        self.send(&Animate { animate })
    }

    pub fn is_animating(&mut self) -> bool {
        self.query(&GetAnimate).animating
    }

    pub fn pattern(&mut self, pattern: PatternType) -> ModuleResult<usize> {
        self.send(&Pattern::new(pattern))
    }

    /// Light up the given percentage of the LED matrix
    pub fn percentage(&mut self, percent: u8) -> ModuleResult<usize> {
        self.send(&Pattern::percentage(percent))
    }
}

impl std::fmt::Debug for InputModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputModule")
            .field("module_type", &self.module_type)
            .field("path", &self.path())
            .field("valid", &self.is_valid())
            .finish()
    }
}
