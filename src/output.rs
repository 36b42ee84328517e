use std::io::{self, Write};

use crate::line::Line;

/// Writes selected lines verbatim, counting them as it goes.
///
/// A line is written with its original terminator. Only the final line of an input may lack
/// one; it gets a `\n` so it never runs into whatever is written after it.
pub struct LineSink<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> LineSink<W> {
    pub fn new(writer: W) -> LineSink<W> {
        LineSink { writer, written: 0 }
    }

    pub fn write_line(&mut self, line: &Line) -> io::Result<()> {
        self.writer.write_all(&line.text)?;
        if !line.has_terminator() {
            self.writer.write_all(b"\n")?;
        }
        self.written += 1;
        Ok(())
    }

    pub fn write_all<'a>(&mut self, lines: impl IntoIterator<Item = &'a Line>) -> io::Result<()> {
        for line in lines {
            self.write_line(line)?;
        }
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
