use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, SignerError};

/// Ordered lines of a delimited text file.
///
/// Lines are raw bytes; no particular text encoding is assumed. Every line
/// has at most one trailing carriage return removed on construction so that
/// CRLF and LF files compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    lines: Vec<Vec<u8>>,
}

impl RecordSet {
    pub fn from_lines<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Vec<u8>>,
    {
        let lines = lines
            .into_iter()
            .map(|line| strip_carriage_return(line.into()))
            .collect();
        Self { lines }
    }

    /// Split raw file bytes into lines.
    ///
    /// A terminating `\n` does not produce an extra empty line, so
    /// `"a\nb\n"` and `"a\nb"` both hold two lines. Empty input holds none.
    pub fn parse(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self::default();
        }
        let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
        Self::from_lines(body.split(|b| *b == b'\n').map(<[u8]>::to_vec))
    }

    pub fn read(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| SignerError::io(path, e))?;
        let records = Self::parse(&bytes);
        debug!(path = %path.display(), lines = records.len(), "read record set");
        Ok(records)
    }

    /// Serialize with a `\n` after every line, including the last.
    pub fn to_bytes(&self) -> Vec<u8> {
        let capacity = self.lines.iter().map(|l| l.len() + 1).sum();
        let mut out = Vec::with_capacity(capacity);
        for line in &self.lines {
            out.extend_from_slice(line);
            out.push(b'\n');
        }
        out
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_bytes()).map_err(|e| SignerError::io(path, e))?;
        debug!(path = %path.display(), lines = self.len(), "wrote record set");
        Ok(())
    }

    pub fn lines(&self) -> &[Vec<u8>] {
        &self.lines
    }

    pub fn last(&self) -> Option<&[u8]> {
        self.lines.last().map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn push(&mut self, line: impl Into<Vec<u8>>) {
        self.lines.push(strip_carriage_return(line.into()));
    }

    pub fn pop(&mut self) -> Option<Vec<u8>> {
        self.lines.pop()
    }
}

fn strip_carriage_return(mut line: Vec<u8>) -> Vec<u8> {
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_lf_and_crlf_identically() {
        let lf = RecordSet::parse(b"a\nb\n");
        let crlf = RecordSet::parse(b"a\r\nb\r\n");
        assert_eq!(lf, crlf);
        assert_eq!(lf.lines(), &[b"a".to_vec(), b"b".to_vec()]);
    }

    #[test]
    fn missing_final_newline_is_same_content() {
        assert_eq!(RecordSet::parse(b"a\nb"), RecordSet::parse(b"a\nb\n"));
    }

    #[test]
    fn empty_input_has_no_lines() {
        assert!(RecordSet::parse(b"").is_empty());
    }

    #[test]
    fn lone_newline_is_one_empty_line() {
        let records = RecordSet::parse(b"\n");
        assert_eq!(records.lines(), &[Vec::<u8>::new()]);
    }

    #[test]
    fn blank_lines_in_the_middle_are_kept() {
        let records = RecordSet::parse(b"a\n\nb\n");
        assert_eq!(records.len(), 3);
        assert_eq!(records.lines()[1], b"");
    }

    #[test]
    fn only_one_carriage_return_is_stripped() {
        let records = RecordSet::parse(b"a\r\r\n");
        assert_eq!(records.lines(), &[b"a\r".to_vec()]);
    }

    #[test]
    fn non_utf8_bytes_are_preserved() {
        let records = RecordSet::parse(b"\xa6W\xba\xd9,\xff\n");
        assert_eq!(records.lines(), &[b"\xa6W\xba\xd9,\xff".to_vec()]);
    }

    #[test]
    fn to_bytes_terminates_every_line() {
        let records = RecordSet::from_lines(["x", "y"]);
        assert_eq!(records.to_bytes(), b"x\ny\n");
    }

    #[test]
    fn from_lines_strips_carriage_returns() {
        let records = RecordSet::from_lines(["a\r", "b"]);
        assert_eq!(records, RecordSet::from_lines(["a", "b"]));
    }

    #[test]
    fn read_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RecordSet::read(&dir.path().join("absent.csv")).unwrap_err();
        assert_eq!(err.kind(), "io");
    }

    #[test]
    fn write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let records = RecordSet::from_lines(["h1,h2", "1,2"]);
        records.write(&path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"h1,h2\n1,2\n");
        assert_eq!(RecordSet::read(&path).unwrap(), records);
    }
}
