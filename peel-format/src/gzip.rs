//! Single-member gzip decoding (RFC 1952 framing only).
//!
//! The header and footer are parsed here; the DEFLATE payload goes to a
//! caller-supplied [`Inflate`] implementation. Only the first member of a
//! multi-member stream is decoded.

use crate::{ByteCursor, Error, Inflate, Result};

pub const SIGNATURE: &[u8; 2] = b"\x1f\x8b";

// Fixed header (10) + footer (8).
pub const MIN_LENGTH: usize = 18;

pub const COMPRESSION_DEFLATE: u8 = 8;

pub(crate) const FLAG_HCRC: u8 = 0x01;
pub(crate) const FLAG_EXTRA: u8 = 0x04;
pub(crate) const FLAG_NAME: u8 = 0x08;
pub(crate) const FLAG_COMMENT: u8 = 0x10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    entries: Vec<Entry>,
}

impl Archive {
    /// Decodes `data`, inflating the member payload with `inflater`.
    pub fn new<I: Inflate + ?Sized>(data: &[u8], inflater: &I) -> Result<Archive> {
        let cursor = ByteCursor::new(data);
        if cursor.len() < MIN_LENGTH || cursor.peek(SIGNATURE.len())? != SIGNATURE {
            return Err(Error::InvalidSignature);
        }

        let entry = Entry::parse(cursor, inflater)?;
        Ok(Archive {
            entries: vec![entry],
        })
    }

    /// Decodes `data` with the bundled `flate2` inflater.
    #[cfg(feature = "flate2")]
    pub fn open(data: &[u8]) -> Result<Archive> {
        Archive::new(data, &crate::RawInflater)
    }

    #[inline(always)]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[inline(always)]
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Archive {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    name: Option<String>,
    data: Vec<u8>,
}

impl Entry {
    fn parse<I: Inflate + ?Sized>(mut cursor: ByteCursor<'_>, inflater: &I) -> Result<Entry> {
        if cursor.remaining() < SIGNATURE.len() || cursor.read(SIGNATURE.len())? != SIGNATURE {
            return Err(Error::InvalidSignature);
        }

        let method = cursor.byte()?;
        if method != COMPRESSION_DEFLATE {
            return Err(Error::UnsupportedCompressionMethod(method));
        }

        let flags = cursor.byte()?;
        cursor.skip(4)?; // mtime
        cursor.skip(1)?; // extra flags
        cursor.skip(1)?; // os

        if flags & FLAG_EXTRA != 0 {
            let xlen = cursor.uint16()?;
            cursor.skip(xlen as usize)?;
        }

        let name = if flags & FLAG_NAME != 0 {
            Some(cursor.string()?)
        } else {
            None
        };

        if flags & FLAG_COMMENT != 0 {
            cursor.string()?;
        }

        if flags & FLAG_HCRC != 0 {
            cursor.uint16()?;
        }

        let header_end = cursor.position();
        let compressed = cursor.read_to_end();
        let data = inflater.inflate_raw(compressed).map_err(Error::Inflate)?;

        cursor.seek(-8)?;
        let _crc32 = cursor.uint32()?;
        let declared = cursor.uint32()?;

        if declared as usize != data.len() {
            return Err(Error::SizeMismatch {
                declared,
                actual: data.len(),
            });
        }

        tracing::debug!(
            header_end = format_args!("{:#x}", header_end),
            compressed = compressed.len(),
            decompressed = data.len(),
            flags = format_args!("{:#04x}", flags),
            name = name.as_deref().unwrap_or(""),
            "decoded gzip member"
        );

        Ok(Entry { name, data })
    }

    /// The original file name, if the FNAME flag was set.
    #[inline(always)]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline(always)]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline(always)]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}
