use std::io::{self, BufRead};

/// A single line of input together with its 0-based position in the stream.
///
/// `text` holds the raw bytes exactly as read, including the `\n` (or `\r\n`)
/// terminator when one was present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub ordinal: usize,
    pub text: Vec<u8>,
}

impl Line {
    pub fn new(ordinal: usize, text: impl Into<Vec<u8>>) -> Line {
        Line {
            ordinal,
            text: text.into(),
        }
    }

    pub fn has_terminator(&self) -> bool {
        self.text.last() == Some(&b'\n')
    }
}

/// Lazily reads lines from a `BufRead`, numbering them as they arrive.
///
/// The source is single pass: once it yields `None` or an error it stays exhausted.
pub struct LineSource<R> {
    reader: R,
    next_ordinal: usize,
    done: bool,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> LineSource<R> {
        LineSource {
            reader,
            next_ordinal: 0,
            done: false,
        }
    }

    /// Number of lines handed out so far.
    pub fn lines_read(&self) -> usize {
        self.next_ordinal
    }
}

impl<R: BufRead> Iterator for LineSource<R> {
    type Item = io::Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut text = Vec::new();
        match self.reader.read_until(b'\n', &mut text) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => {
                let line = Line::new(self.next_ordinal, text);
                self.next_ordinal += 1;
                Some(Ok(line))
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor, Read};

    #[test]
    fn numbers_lines_and_keeps_terminators() {
        let source = LineSource::new(Cursor::new("a\nb\r\n\nc"));
        let lines = source.collect::<io::Result<Vec<_>>>().unwrap();

        assert_eq!(
            lines,
            vec![
                Line::new(0, "a\n"),
                Line::new(1, "b\r\n"),
                Line::new(2, "\n"),
                Line::new(3, "c"),
            ]
        );
        assert!(lines[1].has_terminator());
        assert!(!lines[3].has_terminator());
    }

    #[test]
    fn empty_input_yields_nothing() {
        let mut source = LineSource::new(Cursor::new(""));
        assert!(source.next().is_none());
        assert_eq!(source.lines_read(), 0);
    }

    #[test]
    fn accepts_non_utf8_bytes() {
        let mut source = LineSource::new(Cursor::new(vec![0xff, 0xfe, b'\n']));
        let line = source.next().unwrap().unwrap();
        assert_eq!(line.text, vec![0xff, 0xfe, b'\n']);
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    #[test]
    fn stops_after_an_error() {
        let mut source = LineSource::new(BufReader::new(FailingReader));
        assert!(source.next().unwrap().is_err());
        assert!(source.next().is_none());
    }
}
