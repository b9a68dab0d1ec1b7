//! Line source for the extractor.
//!
//! Reads one line at a time, numbering from 1. Input that is not valid
//! UTF-8 is decoded lossily so a stray Latin-1 byte never stops a run.

use crate::error::{DocuError, Result};
use crate::model::Line;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

pub struct LineReader<R> {
    inner: R,
    path: PathBuf,
    number: usize,
    buf: Vec<u8>,
}

impl LineReader<BufReader<File>> {
    /// Open `path` for reading. A path that does not exist is reported as
    /// [`DocuError::InputNotFound`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DocuError::InputNotFound(path.to_path_buf()));
        }
        let file = File::open(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => DocuError::InputNotFound(path.to_path_buf()),
            _ => DocuError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        Ok(Self::from_reader(BufReader::new(file), path))
    }
}

impl<R: BufRead> LineReader<R> {
    /// Wrap an already open reader. `name` is only used in error messages.
    pub fn from_reader(inner: R, name: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            path: name.into(),
            number: 0,
            buf: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the next line, or `None` at end of input.
    pub fn next_line(&mut self) -> Result<Option<Line>> {
        self.buf.clear();
        let read = self
            .inner
            .read_until(b'\n', &mut self.buf)
            .map_err(|source| DocuError::Io {
                path: self.path.clone(),
                source,
            })?;
        if read == 0 {
            return Ok(None);
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }
        self.number += 1;
        let text = String::from_utf8_lossy(&self.buf).into_owned();
        Ok(Some(Line::new(self.number, text)))
    }
}

impl<R: BufRead + Seek> LineReader<R> {
    /// Go back to the first line.
    pub fn rewind(&mut self) -> Result<()> {
        self.inner
            .seek(SeekFrom::Start(0))
            .map_err(|source| DocuError::Io {
                path: self.path.clone(),
                source,
            })?;
        self.number = 0;
        Ok(())
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(input: &[u8]) -> LineReader<Cursor<Vec<u8>>> {
        LineReader::from_reader(Cursor::new(input.to_vec()), "test.py")
    }

    #[test]
    fn numbers_lines_from_one() {
        let lines: Vec<Line> = reader(b"a\nb\n").map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec![Line::new(1, "a"), Line::new(2, "b")]);
    }

    #[test]
    fn strips_crlf_and_keeps_last_unterminated_line() {
        let lines: Vec<String> = reader(b"a\r\nb")
            .map(|l| l.unwrap().text)
            .collect();
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn keeps_blank_lines() {
        let lines: Vec<String> = reader(b"\n\nx\n").map(|l| l.unwrap().text).collect();
        assert_eq!(lines, vec!["", "", "x"]);
    }

    #[test]
    fn decodes_invalid_utf8_lossily() {
        let line = reader(b"caf\xe9\n").next().unwrap().unwrap();
        assert_eq!(line.text, "caf\u{fffd}");
    }

    #[test]
    fn rewind_restarts_numbering() {
        let mut r = reader(b"one\ntwo\n");
        r.next_line().unwrap();
        r.next_line().unwrap();
        r.rewind().unwrap();
        assert_eq!(r.next_line().unwrap(), Some(Line::new(1, "one")));
    }

    #[test]
    fn open_missing_file_is_input_not_found() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("nope.py");
        match LineReader::open(&missing) {
            Err(DocuError::InputNotFound(p)) => assert_eq!(p, missing),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected an error"),
        }
    }

    #[test]
    fn open_existing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("mod.py");
        std::fs::write(&path, "x = 1\n").unwrap();
        let mut r = LineReader::open(&path).unwrap();
        assert_eq!(r.path(), path.as_path());
        assert_eq!(r.next_line().unwrap(), Some(Line::new(1, "x = 1")));
        assert_eq!(r.next_line().unwrap(), None);
    }
}
