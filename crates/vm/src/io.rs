//! Input and output capabilities consumed by READ and WRITE.
//!
//! The engine only needs to request a typed value and to emit text; where
//! the characters come from and go to is up to the caller.

use std::io::{self, BufRead, Write};

use ippcode_common::literal;

/// Source of values for READ. `None` means no value (end of input or
/// unparsable), which READ stores as nil.
pub trait InputSource {
    fn read_int(&mut self) -> Option<i64>;
    fn read_bool(&mut self) -> Option<bool>;
    fn read_string(&mut self) -> Option<String>;

    fn read_float(&mut self) -> Option<f64> {
        self.read_string()
            .and_then(|line| literal::parse_float(line.trim()))
    }
}

/// Sink for WRITE. Text is appended in call order.
pub trait OutputSink {
    fn write(&mut self, text: &str) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Line-oriented input: every read consumes one line.
#[derive(Debug)]
pub struct LineInput<R> {
    reader: R,
}

impl<R: BufRead> LineInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    fn next_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                Some(line)
            }
        }
    }
}

impl<R: BufRead> InputSource for LineInput<R> {
    fn read_int(&mut self) -> Option<i64> {
        self.next_line()
            .and_then(|line| literal::parse_int(line.trim()))
    }

    /// `true` in any letter case reads as true; every other line is false.
    fn read_bool(&mut self) -> Option<bool> {
        self.next_line()
            .map(|line| line.trim().eq_ignore_ascii_case("true"))
    }

    fn read_string(&mut self) -> Option<String> {
        self.next_line()
    }
}

/// Output to any [`io::Write`].
#[derive(Debug)]
pub struct WriterOutput<W> {
    writer: W,
}

impl<W: Write> WriterOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for WriterOutput<W> {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Captures output in memory.
impl OutputSink for String {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.push_str(text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_one_line_per_request() {
        let mut input = LineInput::new("12\nhello world\ntrue\n".as_bytes());
        assert_eq!(input.read_int(), Some(12));
        assert_eq!(input.read_string(), Some("hello world".to_string()));
        assert_eq!(input.read_bool(), Some(true));
        assert_eq!(input.read_string(), None);
    }

    #[test]
    fn malformed_int_is_absent_but_consumed() {
        let mut input = LineInput::new("twelve\n7\n".as_bytes());
        assert_eq!(input.read_int(), None);
        assert_eq!(input.read_int(), Some(7));
    }

    #[test]
    fn bool_reading_is_lenient() {
        let mut input = LineInput::new("TRUE\nyes\n\n".as_bytes());
        assert_eq!(input.read_bool(), Some(true));
        assert_eq!(input.read_bool(), Some(false));
        assert_eq!(input.read_bool(), Some(false));
        assert_eq!(input.read_bool(), None);
    }

    #[test]
    fn crlf_and_missing_final_newline() {
        let mut input = LineInput::new("a\r\nb".as_bytes());
        assert_eq!(input.read_string(), Some("a".to_string()));
        assert_eq!(input.read_string(), Some("b".to_string()));
        assert_eq!(input.read_string(), None);
    }

    #[test]
    fn empty_line_is_an_empty_string() {
        let mut input = LineInput::new("\n".as_bytes());
        assert_eq!(input.read_string(), Some(String::new()));
    }

    #[test]
    fn float_default_parses_line() {
        let mut input = LineInput::new("0x1.8p+1\n2.5\nx\n".as_bytes());
        assert_eq!(input.read_float(), Some(3.0));
        assert_eq!(input.read_float(), Some(2.5));
        assert_eq!(input.read_float(), None);
    }

    #[test]
    fn writer_output_appends() {
        let mut out = WriterOutput::new(Vec::new());
        out.write("ab").unwrap();
        out.write("c").unwrap();
        out.flush().unwrap();
        assert_eq!(out.into_inner(), b"abc");
    }

    #[test]
    fn string_output_appends() {
        let mut out = String::new();
        OutputSink::write(&mut out, "x").unwrap();
        OutputSink::write(&mut out, "y").unwrap();
        assert_eq!(out, "xy");
    }
}
