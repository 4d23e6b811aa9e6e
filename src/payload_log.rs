use std::future::Future;
use std::io::{self, Write};

use crate::{Delivery, Handler, Result};

/// The shipped handler: writes each event's payload to a log sink.
///
/// One line per invocation, containing the textual representation of the
/// event's `data` attribute (absent data renders as `null`). No schema is
/// validated and no state is kept between invocations; the payload is
/// accepted as-is.
///
/// The sink is any `io::Write`, defaulting to stdout via
/// [`PayloadLog::stdout`]. Tests inject an in-memory buffer (see
/// [`crate::testing::SharedBuffer`]).
pub struct PayloadLog<W: Write + Send + 'static> {
    writer: W,
}

impl PayloadLog<io::Stdout> {
    /// Log payloads to the process's standard output stream.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + 'static> PayloadLog<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn log(&mut self, delivery: &Delivery) -> Result<()> {
        writeln!(self.writer, "{}", delivery.event.data_json())?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write + Send + 'static> Handler for PayloadLog<W> {
    fn handle(&mut self, delivery: &Delivery) -> impl Future<Output = Result<()>> + Send {
        let res = self.log(delivery);
        async move { res }
    }
}
