//! Document Loader
//!
//! Produces the immutable byte buffer a session decodes, from memory, any
//! `Read` source, or a file on disk.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use super::slice::SliceReader;
use crate::core::error::LoadError;
use crate::core::tokenizer::{Options, Tokenizer};

/// Loader limits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Reject documents longer than this many bytes
    pub max_len: Option<usize>,
}

impl LoaderOptions {
    fn check(&self, len: usize) -> Result<(), LoadError> {
        if len == 0 {
            return Err(LoadError::Empty);
        }
        match self.max_len {
            Some(limit) if len > limit => Err(LoadError::TooLarge { len, limit }),
            _ => Ok(()),
        }
    }
}

/// An owned, non-empty document buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    bytes: Vec<u8>,
}

impl Document {
    /// Take ownership of bytes already in memory
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, LoadError> {
        Self::from_bytes_with(bytes, LoaderOptions::default())
    }

    pub fn from_bytes_with(bytes: Vec<u8>, options: LoaderOptions) -> Result<Self, LoadError> {
        options.check(bytes.len())?;
        Ok(Document { bytes })
    }

    /// Read a whole document from a `Read` source
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, LoadError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(bytes)
    }

    /// Read a document whose length is known up front
    ///
    /// Fails with `ShortRead` when the source yields fewer than `expected`
    /// bytes; anything past `expected` is left unread.
    pub fn from_sized_reader<R: Read>(
        reader: R,
        expected: usize,
        options: LoaderOptions,
    ) -> Result<Self, LoadError> {
        options.check(expected)?;

        let mut bytes = Vec::with_capacity(expected);
        let actual = reader.take(expected as u64).read_to_end(&mut bytes)?;
        if actual != expected {
            return Err(LoadError::ShortRead { expected, actual });
        }
        Ok(Document { bytes })
    }

    /// Load a document from a file
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        Self::open_with(path, LoaderOptions::default())
    }

    pub fn open_with(path: impl AsRef<Path>, options: LoaderOptions) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let io_error = |source: std::io::Error| LoadError::Io {
            path: path.to_path_buf(),
            source,
        };

        let result = File::open(path).map_err(io_error).and_then(|file| {
            let expected = file.metadata().map_err(io_error)?.len();
            let expected = usize::try_from(expected).unwrap_or(usize::MAX);
            Self::from_sized_reader(file, expected, options).map_err(|err| match err {
                LoadError::Read(source) => io_error(source),
                other => other,
            })
        });

        match &result {
            Ok(doc) => debug!(path = %path.display(), len = doc.len(), "loaded document"),
            Err(err) => debug!(path = %path.display(), error = %err, "failed to load document"),
        }
        result
    }

    /// Length of the buffer in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false: empty buffers are rejected at load time
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Start a token session over this document
    pub fn tokenizer(&self) -> Tokenizer<'_> {
        Tokenizer::new(&self.bytes)
    }

    pub fn tokenizer_with(&self, options: Options) -> Tokenizer<'_> {
        Tokenizer::with_options(&self.bytes, options)
    }

    /// Start an element-level reader over this document
    pub fn events(&self) -> SliceReader<'_> {
        SliceReader::new(&self.bytes)
    }
}

impl AsRef<[u8]> for Document {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tokenizer::Token;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("binxml-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_from_bytes() {
        let doc = Document::from_bytes(b"\x03hi\0\xff".to_vec()).unwrap();
        assert_eq!(doc.len(), 5);
        let mut tok = doc.tokenizer();
        assert_eq!(tok.next_token(), Ok(Token::Text(b"hi")));
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(Document::from_bytes(Vec::new()), Err(LoadError::Empty)));
        assert!(matches!(
            Document::from_reader(Cursor::new(Vec::new())),
            Err(LoadError::Empty)
        ));
    }

    #[test]
    fn test_limit() {
        let options = LoaderOptions { max_len: Some(2) };
        assert!(matches!(
            Document::from_bytes_with(vec![3, b'a', 0, 0xff], options),
            Err(LoadError::TooLarge { len: 4, limit: 2 })
        ));
    }

    #[test]
    fn test_from_reader() {
        let doc = Document::from_reader(Cursor::new(b"\xff".to_vec())).unwrap();
        assert_eq!(doc.as_bytes(), b"\xff");
    }

    #[test]
    fn test_open_file() {
        let path = temp_path("open.bxml");
        std::fs::write(&path, b"\x01a\0\x00\x02a\0\xff").unwrap();

        let doc = Document::open(&path).unwrap();
        let events: Vec<_> = doc.events().collect::<Result<_, _>>().unwrap();
        assert_eq!(events.len(), 2);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_sized_reader_short_read() {
        let err = Document::from_sized_reader(Cursor::new(vec![3, b'a']), 4, LoaderOptions::default())
            .unwrap_err();
        assert!(matches!(err, LoadError::ShortRead { expected: 4, actual: 2 }));
    }

    #[test]
    fn test_sized_reader_ignores_trailing_bytes() {
        let doc = Document::from_sized_reader(Cursor::new(b"\xff\x7f".to_vec()), 1, LoaderOptions::default())
            .unwrap();
        assert_eq!(doc.into_bytes(), vec![0xff]);
    }

    #[test]
    fn test_sized_reader_zero_length() {
        let err = Document::from_sized_reader(Cursor::new(vec![0xff]), 0, LoaderOptions::default())
            .unwrap_err();
        assert!(matches!(err, LoadError::Empty));
    }

    #[test]
    fn test_open_with_limit() {
        let path = temp_path("limit.bxml");
        std::fs::write(&path, b"\x01a\0\x00\x02a\0\xff").unwrap();

        let options = LoaderOptions { max_len: Some(1) };
        assert!(matches!(
            Document::open_with(&path, options),
            Err(LoadError::TooLarge { len: 8, limit: 1 })
        ));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_tokenizer_with_options() {
        let doc = Document::from_bytes(b"\xff".to_vec()).unwrap();
        let mut tok = doc.tokenizer_with(Options { repeat_eof: true });
        assert_eq!(tok.next_token(), Ok(Token::Eof));
        assert_eq!(tok.next_token(), Ok(Token::Eof));
    }

    #[test]
    fn test_open_missing_file() {
        let path = temp_path("missing.bxml");
        let err = Document::open(&path).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("missing.bxml"));
    }

    #[test]
    fn test_open_empty_file() {
        let path = temp_path("empty.bxml");
        std::fs::write(&path, b"").unwrap();
        assert!(matches!(Document::open(&path), Err(LoadError::Empty)));
        std::fs::remove_file(&path).unwrap();
    }
}
