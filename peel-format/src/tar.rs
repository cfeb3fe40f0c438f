//! Plain (pre-POSIX) tar decoding.
//!
//! Headers are 512-byte blocks with fixed-width ASCII fields; numbers are
//! octal text. Payloads are padded to the next block boundary. Extensions
//! (pax, GNU long names, sparse files) are not interpreted: their headers
//! decode as ordinary entries.

use std::ops::Range;

use crate::{ByteCursor, Error, Result};

pub const BLOCK_SIZE: usize = 512;

/// Bytes of the header covered by the checksum field itself.
pub const CHECKSUM_RANGE: Range<usize> = 148..156;

const NAME_WIDTH: usize = 100;
const MODE_WIDTH: usize = 8;
const UID_WIDTH: usize = 8;
const GID_WIDTH: usize = 8;
const SIZE_WIDTH: usize = 12;
const MTIME_WIDTH: usize = 12;
const CHECKSUM_WIDTH: usize = 8;
const TYPEFLAG_WIDTH: usize = 1;
const LINKNAME_WIDTH: usize = 100;
const REST_WIDTH: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    entries: Vec<Entry>,
}

impl Archive {
    /// Decodes every entry in `data`.
    ///
    /// The archive ends at the first all-zero block or when less than a full
    /// block remains. A single zero block is enough; the customary second one
    /// is not required.
    pub fn new(data: &[u8]) -> Result<Archive> {
        let mut cursor = ByteCursor::new(data);
        let mut entries = Vec::new();

        while !at_end_of_archive(&cursor)? {
            entries.push(Entry::parse(&mut cursor)?);
        }

        tracing::trace!(
            position = format_args!("{:#x}", cursor.position()),
            length = cursor.len(),
            count = entries.len(),
            "end of tar archive"
        );

        Ok(Archive { entries })
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

fn at_end_of_archive(cursor: &ByteCursor<'_>) -> Result<bool> {
    if cursor.remaining() < BLOCK_SIZE {
        return Ok(true);
    }
    Ok(cursor.peek(BLOCK_SIZE)?.iter().all(|&b| b == 0))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    name: String,
    data: Vec<u8>,
}

impl Entry {
    fn parse(cursor: &mut ByteCursor<'_>) -> Result<Entry> {
        let start = cursor.position();
        let computed = checksum(cursor.peek(BLOCK_SIZE)?);

        let name = cursor.fixed_string(NAME_WIDTH)?;
        cursor.fixed_string(MODE_WIDTH)?;
        cursor.fixed_string(UID_WIDTH)?;
        cursor.fixed_string(GID_WIDTH)?;
        let size_field = cursor.fixed_string(SIZE_WIDTH)?;
        cursor.fixed_string(MTIME_WIDTH)?;
        let checksum_field = cursor.fixed_string(CHECKSUM_WIDTH)?;

        let stored = parse_octal(&checksum_field);
        if stored != Some(computed) {
            return Err(Error::ChecksumMismatch {
                expected: stored,
                computed,
            });
        }

        cursor.fixed_string(TYPEFLAG_WIDTH)?;
        cursor.fixed_string(LINKNAME_WIDTH)?;
        cursor.skip(REST_WIDTH)?;

        let size = parse_octal(&size_field).ok_or_else(|| Error::InvalidNumber {
            field: "size",
            text: size_field.clone(),
        })?;
        let size = payload_len(size, cursor.remaining())?;

        let data = cursor.read(size)?.to_vec();
        cursor.skip(padding(size))?;

        tracing::debug!(
            start = format_args!("{:#x}", start),
            end = format_args!("{:#x}", cursor.position()),
            bytes = cursor.position() - start,
            size,
            %name,
            "decoded tar entry"
        );

        Ok(Entry { name, data })
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
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

/// Unsigned sum of the header bytes, with the checksum field counted as
/// eight ASCII spaces.
pub fn checksum(header: &[u8]) -> u64 {
    header
        .iter()
        .enumerate()
        .map(|(i, &b)| {
            if CHECKSUM_RANGE.contains(&i) {
                u64::from(b' ')
            } else {
                u64::from(b)
            }
        })
        .sum()
}

/// Bytes needed after a payload of `size` bytes to reach a block boundary.
pub fn padding(size: usize) -> usize {
    match size % BLOCK_SIZE {
        0 => 0,
        rem => BLOCK_SIZE - rem,
    }
}

/// Checks a declared payload size against the bytes left in the buffer.
fn payload_len(size: u64, remaining: usize) -> Result<usize> {
    let remaining = remaining as u64;
    if size > remaining {
        return Err(Error::TruncatedInput {
            expected: usize::try_from(size - remaining).unwrap_or(usize::MAX),
        });
    }
    // Bounded by `remaining`, so it fits.
    Ok(size as usize)
}

/// Whitespace as trimmed by JavaScript's `String.prototype.trim`, restricted
/// to the characters a single header byte can map to.
fn is_field_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\x0b' | '\x0c' | '\r' | ' ' | '\u{a0}')
}

/// Parses the leading octal digits of `text` after trimming whitespace.
/// Trailing non-digits are ignored; no digits at all is `None`.
fn parse_octal(text: &str) -> Option<u64> {
    let trimmed = text.trim_matches(is_field_whitespace);
    let digits = trimmed
        .find(|c: char| !('0'..='7').contains(&c))
        .map_or(trimmed, |end| &trimmed[..end]);

    if digits.is_empty() {
        return None;
    }

    digits
        .chars()
        .try_fold(0u64, |acc, c| {
            acc.checked_mul(8)?.checked_add(u64::from(c.to_digit(8)?))
        })
}
