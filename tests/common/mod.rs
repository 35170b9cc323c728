#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use inputmodule::ModuleTransport;
use inputmodule::error::{ModuleError, ModuleResult};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// What the mock transport saw, shared with the test
#[derive(Default)]
pub struct Log {
    pub written: Vec<Vec<u8>>,
    pub reads: Vec<usize>,
}

/// Transport double that records frames and plays back canned replies
pub struct MockTransport {
    path: String,
    open: bool,
    write_limit: Option<usize>,
    fail_writes: bool,
    replies: VecDeque<ModuleResult<Vec<u8>>>,
    log: Arc<Mutex<Log>>,
}

impl MockTransport {
    pub fn new(path: &str) -> (Self, Arc<Mutex<Log>>) {
        let log = Arc::new(Mutex::new(Log::default()));
        let transport = MockTransport {
            path: path.to_string(),
            open: true,
            write_limit: None,
            fail_writes: false,
            replies: VecDeque::new(),
            log: Arc::clone(&log),
        };
        (transport, log)
    }

    pub fn closed(path: &str) -> Self {
        let (mut transport, _) = Self::new(path);
        transport.open = false;
        transport
    }

    pub fn reply(mut self, bytes: &[u8]) -> Self {
        self.replies.push_back(Ok(bytes.to_vec()));
        self
    }

    pub fn reply_timeout(mut self) -> Self {
        self.replies
            .push_back(Err(ModuleError::Timeout("mock".to_string())));
        self
    }

    pub fn write_limit(mut self, limit: usize) -> Self {
        self.write_limit = Some(limit);
        self
    }

    pub fn fail_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }
}

impl ModuleTransport for MockTransport {
    fn is_valid(&self) -> bool {
        self.open
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn write(&mut self, bytes: &[u8]) -> ModuleResult<usize> {
        if self.fail_writes {
            return Err(ModuleError::Communication("mock write failure".to_string()));
        }
        let written = self.write_limit.map_or(bytes.len(), |l| l.min(bytes.len()));
        self.log.lock().unwrap().written.push(bytes[..written].to_vec());
        Ok(written)
    }

    fn read(&mut self, expected_size: usize) -> ModuleResult<Vec<u8>> {
        self.log.lock().unwrap().reads.push(expected_size);
        self.replies.pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    fn close(&mut self) {
        self.open = false;
    }
}
