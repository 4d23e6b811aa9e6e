use std::{
    io::{self, Write},
    sync::{Arc, Mutex},
};

/// Cloneable in-memory `io::Write`, for asserting what a handler logged.
///
/// All clones share the same buffer; hand one clone to the handler and keep
/// another for assertions.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    /// The buffer contents decoded as UTF-8.
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().expect("buffer mutex poisoned");
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// The buffer contents split into lines.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .expect("buffer mutex poisoned")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
