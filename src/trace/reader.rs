//! Trace parsing.
//!
//! A trace holds one memory reference per line:
//! ```text
//! 0041f7a0 R
//! 13f5e2c0 W
//! ```
//! The first field is a hexadecimal virtual address (an optional `0x`
//! prefix is accepted), the second the operation letter. Blank lines and
//! lines starting with `#` are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::common::{Access, AccessKind, Error, PageId, Result};

/// Parse one trace line. Returns `Ok(None)` for lines carrying no access.
///
/// `line_no` is 1-based and only used in error messages.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<Access>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut fields = line.split_whitespace();
    let address = fields.next().ok_or_else(|| malformed(line_no, "missing address"))?;
    let kind = fields
        .next()
        .ok_or_else(|| malformed(line_no, "missing access kind"))?;
    if fields.next().is_some() {
        return Err(malformed(line_no, "trailing fields"));
    }

    let digits = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address);
    let address = u64::from_str_radix(digits, 16)
        .map_err(|e| malformed(line_no, format!("bad address {:?}: {}", address, e)))?;

    let kind = kind
        .parse::<AccessKind>()
        .map_err(|_| Error::UnknownAccessKind {
            line: line_no,
            kind: kind.to_string(),
        })?;

    Ok(Some(Access {
        kind,
        page: PageId::from_address(address),
    }))
}

fn malformed(line: usize, reason: impl Into<String>) -> Error {
    Error::MalformedTrace {
        line,
        reason: reason.into(),
    }
}

/// Iterator over the accesses in a trace.
///
/// Stops at the first error; a malformed line is reported rather than
/// skipped so a bad trace never reaches an engine half-applied.
///
/// # Example
/// ```
/// use vmsim::{Access, PageId, TraceReader};
///
/// let text = "00001000 R\n00002abc W\n";
/// let accesses: Vec<Access> = TraceReader::new(text.as_bytes())
///     .collect::<vmsim::Result<_>>()
///     .unwrap();
///
/// assert_eq!(accesses, vec![Access::read(PageId::new(1)), Access::write(PageId::new(2))]);
/// ```
pub struct TraceReader<R> {
    reader: R,
    line: String,
    line_no: usize,
    failed: bool,
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            line_no: 0,
            failed: false,
        }
    }

    /// Number of lines consumed so far.
    pub fn lines_read(&self) -> usize {
        self.line_no
    }
}

impl TraceReader<BufReader<File>> {
    /// Open a trace file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<Access>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e.into()));
                }
            }
            self.line_no += 1;

            match parse_line(&self.line, self.line_no) {
                Ok(Some(access)) => return Some(Ok(access)),
                Ok(None) => continue,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Read and parse a whole trace file.
pub fn load_trace<P: AsRef<Path>>(path: P) -> Result<Vec<Access>> {
    TraceReader::open(path)?.collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_read_and_write() {
        assert_eq!(
            parse_line("0041f7a0 R", 1).unwrap(),
            Some(Access::read(PageId::new(0x41f)))
        );
        assert_eq!(
            parse_line("0x0041F7A0 w\n", 1).unwrap(),
            Some(Access::write(PageId::new(0x41f)))
        );
    }

    #[test]
    fn test_parse_skips_blank_and_comments() {
        assert_eq!(parse_line("", 1).unwrap(), None);
        assert_eq!(parse_line("   \t", 1).unwrap(), None);
        assert_eq!(parse_line("# header", 1).unwrap(), None);
    }

    #[test]
    fn test_parse_missing_kind() {
        match parse_line("0041f7a0", 4) {
            Err(Error::MalformedTrace { line: 4, reason }) => {
                assert_eq!(reason, "missing access kind")
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_bad_address() {
        assert!(matches!(
            parse_line("zzzz R", 2),
            Err(Error::MalformedTrace { line: 2, .. })
        ));
    }

    #[test]
    fn test_parse_trailing_fields() {
        assert!(matches!(
            parse_line("1000 R extra", 5),
            Err(Error::MalformedTrace { line: 5, .. })
        ));
    }

    #[test]
    fn test_parse_unknown_kind() {
        match parse_line("1000 X", 7) {
            Err(Error::UnknownAccessKind { line: 7, kind }) => assert_eq!(kind, "X"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_reader_counts_lines_and_stops_on_error() {
        let text = "1000 R\n\n# note\n2000 W\nbogus\n3000 R\n";
        let mut reader = TraceReader::new(text.as_bytes());

        assert_eq!(reader.next().unwrap().unwrap(), Access::read(PageId::new(1)));
        assert_eq!(reader.next().unwrap().unwrap(), Access::write(PageId::new(2)));
        assert_eq!(reader.lines_read(), 4);

        assert!(matches!(
            reader.next(),
            Some(Err(Error::MalformedTrace { line: 5, .. }))
        ));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_load_trace_missing_file() {
        assert!(matches!(
            load_trace("/nonexistent/vmsim/trace.txt"),
            Err(Error::Io(_))
        ));
    }
}
