//! Bounded, position-tracking reads over an in-memory buffer.
//!
//! Every read either succeeds completely or fails without moving the cursor.
//! Slices are borrowed from the source buffer; the cursor never copies.

use byteorder::{ByteOrder, LittleEndian};

use crate::{Error, Result};

#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> ByteCursor<'a> {
        ByteCursor { data, position: 0 }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline(always)]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Position after advancing by `n`, or the number of bytes missing.
    fn advance(&self, n: usize) -> Result<usize> {
        match self.position.checked_add(n) {
            Some(end) if end <= self.data.len() => Ok(end),
            Some(end) => Err(Error::TruncatedInput {
                expected: end - self.data.len(),
            }),
            None => Err(Error::TruncatedInput {
                expected: n - self.remaining(),
            }),
        }
    }

    /// Returns the next `n` bytes without advancing.
    pub fn peek(&self, n: usize) -> Result<&'a [u8]> {
        let end = self.advance(n)?;
        Ok(&self.data[self.position..end])
    }

    /// Returns the next `n` bytes and advances past them.
    pub fn read(&mut self, n: usize) -> Result<&'a [u8]> {
        let slice = self.peek(n)?;
        self.position += n;
        Ok(slice)
    }

    /// Returns everything from the current position to the end of the buffer.
    pub fn read_to_end(&mut self) -> &'a [u8] {
        let slice = &self.data[self.position..];
        self.position = self.data.len();
        slice
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.position = self.advance(n)?;
        Ok(())
    }

    /// Moves to an absolute offset. Negative offsets count back from the end
    /// of the buffer, so `seek(-8)` lands on the last eight bytes.
    pub fn seek(&mut self, offset: i64) -> Result<()> {
        let length = self.data.len();
        let absolute = if offset >= 0 {
            usize::try_from(offset).ok()
        } else {
            usize::try_from(offset.unsigned_abs())
                .ok()
                .and_then(|back| length.checked_sub(back))
        };

        match absolute {
            Some(position) if position <= length => {
                self.position = position;
                Ok(())
            }
            _ => Err(Error::SeekOutOfBounds { offset, length }),
        }
    }

    pub fn byte(&mut self) -> Result<u8> {
        Ok(self.read(1)?[0])
    }

    pub fn uint16(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.read(2)?))
    }

    pub fn uint32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.read(4)?))
    }

    /// Reads up to and including the next NUL byte. Each byte maps to exactly
    /// one `char` of the same value; no multi-byte decoding takes place.
    pub fn string(&mut self) -> Result<String> {
        let rest = &self.data[self.position..];
        let end = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or(Error::UnterminatedString)?;
        let text = latin1(&rest[..end]);
        self.position += end + 1;
        Ok(text)
    }

    /// Consumes exactly `width` bytes and returns the text before the first
    /// NUL within them.
    pub fn fixed_string(&mut self, width: usize) -> Result<String> {
        let field = self.read(width)?;
        let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
        Ok(latin1(&field[..end]))
    }
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_does_not_advance() {
        let cursor = ByteCursor::new(b"abcdef");
        assert_eq!(cursor.peek(3).unwrap(), b"abc");
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn read_advances_and_reports_missing_bytes() {
        let mut cursor = ByteCursor::new(b"abcdef");
        assert_eq!(cursor.read(4).unwrap(), b"abcd");
        assert_eq!(cursor.remaining(), 2);

        match cursor.read(5) {
            Err(Error::TruncatedInput { expected }) => assert_eq!(expected, 3),
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn read_to_end_takes_the_rest() {
        let mut cursor = ByteCursor::new(b"abcdef");
        cursor.skip(2).unwrap();
        assert_eq!(cursor.read_to_end(), b"cdef");
        assert_eq!(cursor.remaining(), 0);
        assert_eq!(cursor.read_to_end(), b"");
    }

    #[test]
    fn skip_past_end_fails_in_place() {
        let mut cursor = ByteCursor::new(&[0u8; 10]);
        cursor.skip(10).unwrap();
        assert!(matches!(
            cursor.skip(1),
            Err(Error::TruncatedInput { expected: 1 })
        ));
        assert_eq!(cursor.position(), 10);

        let mut cursor = ByteCursor::new(&[0u8; 4]);
        cursor.skip(1).unwrap();
        assert!(cursor.skip(usize::MAX).unwrap_err().is_truncated());
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn seek_from_start_and_end() {
        let mut cursor = ByteCursor::new(b"0123456789");
        cursor.seek(3).unwrap();
        assert_eq!(cursor.byte().unwrap(), b'3');
        cursor.seek(-2).unwrap();
        assert_eq!(cursor.position(), 8);
        assert_eq!(cursor.read_to_end(), b"89");
        cursor.seek(10).unwrap();
        assert_eq!(cursor.remaining(), 0);
        cursor.seek(-10).unwrap();
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn seek_out_of_bounds() {
        let mut cursor = ByteCursor::new(b"0123");
        cursor.seek(1).unwrap();
        assert!(matches!(
            cursor.seek(5),
            Err(Error::SeekOutOfBounds { offset: 5, length: 4 })
        ));
        assert!(matches!(
            cursor.seek(-5),
            Err(Error::SeekOutOfBounds { offset: -5, length: 4 })
        ));
        assert!(cursor.seek(i64::MIN).is_err());
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn little_endian_integers() {
        let mut cursor = ByteCursor::new(&[0x2a, 0x34, 0x12, 0x78, 0x56, 0x34]);
        assert_eq!(cursor.byte().unwrap(), 0x2a);
        assert_eq!(cursor.uint16().unwrap(), 0x1234);
        assert!(matches!(
            cursor.uint32(),
            Err(Error::TruncatedInput { expected: 1 })
        ));
        cursor.seek(2).unwrap();
        assert_eq!(cursor.uint32().unwrap(), 0x3456_7812);
    }

    #[test]
    fn nul_terminated_string() {
        let mut cursor = ByteCursor::new(b"hello.txt\0rest");
        assert_eq!(cursor.string().unwrap(), "hello.txt");
        assert_eq!(cursor.position(), 10);
        assert!(matches!(cursor.string(), Err(Error::UnterminatedString)));
        assert_eq!(cursor.position(), 10);
    }

    #[test]
    fn bytes_map_one_to_one_onto_chars() {
        // 0xc3 0xa9 is "é" in UTF-8; here it must stay two characters.
        let mut cursor = ByteCursor::new(&[0x63, 0xc3, 0xa9, 0x00]);
        let text = cursor.string().unwrap();
        assert_eq!(text.chars().count(), 3);
        assert_eq!(text, "c\u{c3}\u{a9}");
    }

    #[test]
    fn fixed_string_consumes_whole_width() {
        let mut cursor = ByteCursor::new(b"a.txt\0\0\0xyz");
        assert_eq!(cursor.fixed_string(8).unwrap(), "a.txt");
        assert_eq!(cursor.position(), 8);
        assert_eq!(cursor.fixed_string(3).unwrap(), "xyz");
        assert!(cursor.fixed_string(1).unwrap_err().is_truncated());
    }
}
