use std::io;

/// Decompresses raw DEFLATE data (no zlib or gzip framing).
///
/// The gzip decoder only parses the container; entropy decoding is delegated
/// to whichever implementation the caller hands in. Any
/// `Fn(&[u8]) -> io::Result<Vec<u8>>` closure qualifies.
pub trait Inflate {
    fn inflate_raw(&self, compressed: &[u8]) -> io::Result<Vec<u8>>;
}

impl<F> Inflate for F
where
    F: Fn(&[u8]) -> io::Result<Vec<u8>>,
{
    fn inflate_raw(&self, compressed: &[u8]) -> io::Result<Vec<u8>> {
        self(compressed)
    }
}

/// Raw inflate backed by `flate2`. Bytes following the final DEFLATE block
/// are ignored.
#[cfg(feature = "flate2")]
#[derive(Debug, Default, Clone, Copy)]
pub struct RawInflater;

#[cfg(feature = "flate2")]
impl Inflate for RawInflater {
    fn inflate_raw(&self, compressed: &[u8]) -> io::Result<Vec<u8>> {
        use std::io::Read;

        let mut decoder = flate2::read::DeflateDecoder::new(compressed);
        let mut buf = Vec::new();
        decoder.read_to_end(&mut buf)?;
        Ok(buf)
    }
}
