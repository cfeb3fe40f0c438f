use std::io;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised while decoding an archive. Every error aborts the
/// archive being constructed; no partial archive is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("expected {expected} more bytes; the file might be corrupted (unexpected end of file)")]
    TruncatedInput { expected: usize },

    #[error("invalid archive signature")]
    InvalidSignature,

    #[error("unsupported compression method `{0}`")]
    UnsupportedCompressionMethod(u8),

    #[error("end of string not found")]
    UnterminatedString,

    #[error("header checksum mismatch (stored: {}, computed: {computed})", stored(.expected))]
    ChecksumMismatch { expected: Option<u64>, computed: u64 },

    #[error("declared size {declared} does not match decompressed size {actual}")]
    SizeMismatch { declared: u32, actual: usize },

    #[error("invalid octal number in `{field}` field: {text:?}")]
    InvalidNumber { field: &'static str, text: String },

    #[error("cannot seek to offset {offset} in a buffer of {length} bytes")]
    SeekOutOfBounds { offset: i64, length: usize },

    #[error("cannot inflate compressed payload")]
    Inflate(#[source] io::Error),
}

fn stored(value: &Option<u64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "<invalid>".into(),
    }
}

impl Error {
    pub fn is_truncated(&self) -> bool {
        matches!(self, Error::TruncatedInput { .. })
    }
}

impl From<Error> for io::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::TruncatedInput { .. } => io::Error::new(io::ErrorKind::UnexpectedEof, e),
            Error::Inflate(source) => source,
            _ => io::Error::new(io::ErrorKind::InvalidData, e),
        }
    }
}
