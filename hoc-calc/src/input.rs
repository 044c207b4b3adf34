//! # Input sources
//!
//! A [`Source`] is the character stream the [`Scanner`](crate::Scanner) reads
//! from. It either *borrows* a reader owned by the caller (standard input, a
//! test buffer) or *owns* one it was built from (a string, an opened file).
//! Owned readers are dropped exactly once: when the scanner switches to
//! another source or is itself dropped.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::Path;

/// A borrowed or owned line-oriented reader.
///
/// # Example
/// ```rust
/// # use hoc_calc::Source;
/// # use std::io::Cursor;
/// let mut line = String::new();
///
/// let mut owned = Source::text("1 + 2\n3");
/// assert!(owned.is_owned());
/// owned.read_line(&mut line).unwrap();
/// assert_eq!(line, "1 + 2\n");
///
/// let mut buf = Cursor::new("x = 4");
/// let mut borrowed = Source::borrowed(&mut buf);
/// assert!(!borrowed.is_owned());
/// line.clear();
/// borrowed.read_line(&mut line).unwrap();
/// assert_eq!(line, "x = 4");
/// ```
pub enum Source<'a> {
    /// A reader the caller keeps ownership of.
    Borrowed(&'a mut dyn BufRead),
    /// A reader released together with the source.
    Owned(Box<dyn BufRead + 'a>),
}

impl<'a> Source<'a> {
    /// Borrows a reader owned elsewhere, e.g. a locked standard input.
    pub fn borrowed(reader: &'a mut dyn BufRead) -> Self {
        Source::Borrowed(reader)
    }

    /// Takes ownership of a reader.
    pub fn owned(reader: impl BufRead + 'a) -> Self {
        Source::Owned(Box::new(reader))
    }

    /// An owned source reading the given text.
    pub fn text(text: impl Into<String>) -> Self {
        Self::owned(Cursor::new(text.into()))
    }

    /// Opens a file for reading.
    ///
    /// # Errors
    /// Returns the I/O error if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path.as_ref())?;
        log::debug!("opened {:?}", path.as_ref());
        Ok(Self::owned(BufReader::new(file)))
    }

    /// Returns `true` if dropping this source releases its reader.
    pub fn is_owned(&self) -> bool {
        matches!(self, Source::Owned(_))
    }

    fn reader(&mut self) -> &mut (dyn BufRead + 'a) {
        match self {
            Source::Borrowed(r) => &mut **r,
            Source::Owned(r) => r.as_mut(),
        }
    }

    /// Appends the next line, including its `\n` if present, to `buf`.
    ///
    /// Returns the number of bytes read; `0` means end of input.
    pub fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        self.reader().read_line(buf)
    }
}

impl fmt::Debug for Source<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Borrowed(_) => f.write_str("Source::Borrowed"),
            Source::Owned(_) => f.write_str("Source::Owned"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    /// Reader that lets the test observe when it is dropped.
    struct Tracked {
        inner: Cursor<&'static str>,
        _alive: Rc<()>,
    }

    impl io::Read for Tracked {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.inner.read(buf)
        }
    }

    impl BufRead for Tracked {
        fn fill_buf(&mut self) -> io::Result<&[u8]> {
            self.inner.fill_buf()
        }
        fn consume(&mut self, amt: usize) {
            self.inner.consume(amt)
        }
    }

    #[test]
    fn owned_reader_is_released_with_source() {
        let alive = Rc::new(());
        let source = Source::owned(Tracked {
            inner: Cursor::new("1"),
            _alive: Rc::clone(&alive),
        });
        assert_eq!(Rc::strong_count(&alive), 2);
        drop(source);
        assert_eq!(Rc::strong_count(&alive), 1);
    }

    #[test]
    fn borrowed_reader_survives_source() {
        let mut buf = Cursor::new("a\nb\n");
        {
            let mut source = Source::borrowed(&mut buf);
            let mut line = String::new();
            source.read_line(&mut line).unwrap();
            assert_eq!(line, "a\n");
        }
        let mut rest = String::new();
        buf.read_line(&mut rest).unwrap();
        assert_eq!(rest, "b\n");
    }

    #[test]
    fn end_of_input_reads_zero_bytes() {
        let mut source = Source::text("");
        let mut line = String::new();
        assert_eq!(source.read_line(&mut line).unwrap(), 0);
        assert!(format!("{source:?}").contains("Owned"));
    }

    #[test]
    fn missing_file_fails_to_open() {
        let err = Source::open("/definitely/not/here.calc").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
