use std::fmt::Display;
use std::io::{self, BufRead, Lines, Write};
use tracing::instrument;

/// A line based io interface.
#[derive(Debug)]
pub struct Io<W, R> {
    writer: W,
    reader: Lines<R>,
}

impl<W: Write, R: BufRead> Io<W, R> {
    pub fn new(writer: W, reader: R) -> Self {
        Io {
            writer,
            reader: reader.lines(),
        }
    }

    /// Receive the next line that is not blank, trimmed of surrounding whitespace.
    ///
    /// Returns `None` once the input is exhausted.
    #[instrument(level = "trace", skip(self), ret, err)]
    pub fn recv(&mut self) -> io::Result<Option<String>> {
        for line in &mut self.reader {
            match line?.trim() {
                "" => continue,
                l => return Ok(Some(l.to_string())),
            }
        }

        Ok(None)
    }

    /// Send a message.
    #[instrument(level = "trace", skip(self, msg), err, fields(%msg))]
    pub fn send<T: Display>(&mut self, msg: T) -> io::Result<()> {
        writeln!(&mut self.writer, "{}", msg)
    }

    /// Flush the internal buffers.
    #[instrument(level = "trace", skip(self), err)]
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
