//! Fixture builders shared by the integration tests.

#![allow(dead_code)]

use std::io::Write;

use flate2::{Compression, GzBuilder};
use peel_format::tar::{checksum, padding, BLOCK_SIZE, CHECKSUM_RANGE};

/// Builds a ustar-style header block with a valid checksum.
pub fn tar_header(name: &str, size: usize) -> [u8; BLOCK_SIZE] {
    let mut block = [0u8; BLOCK_SIZE];
    block[..name.len()].copy_from_slice(name.as_bytes());
    block[100..108].copy_from_slice(b"0000644\0");
    block[108..116].copy_from_slice(b"0001750\0");
    block[116..124].copy_from_slice(b"0001750\0");
    block[124..136].copy_from_slice(format!("{:011o}\0", size).as_bytes());
    block[136..148].copy_from_slice(b"14570545341\0");
    block[156] = b'0';
    block[257..263].copy_from_slice(b"ustar\0");
    block[263..265].copy_from_slice(b"00");

    let sum = checksum(&block);
    block[CHECKSUM_RANGE].copy_from_slice(format!("{:06o}\0 ", sum).as_bytes());
    block
}

/// Builds a tar archive holding `entries`, followed by `trailer_blocks`
/// zero blocks.
pub fn tar_archive(entries: &[(String, Vec<u8>)], trailer_blocks: usize) -> Vec<u8> {
    let mut buf = Vec::new();
    for (name, data) in entries {
        buf.extend_from_slice(&tar_header(name, data.len()));
        buf.extend_from_slice(data);
        buf.resize(buf.len() + padding(data.len()), 0);
    }
    buf.resize(buf.len() + trailer_blocks * BLOCK_SIZE, 0);
    buf
}

/// Gzips `data` with the real encoder, optionally recording a file name.
pub fn gzip_member(name: Option<&str>, data: &[u8]) -> Vec<u8> {
    let mut builder = GzBuilder::new().mtime(1_600_000_000);
    if let Some(name) = name {
        builder = builder.filename(name);
    }
    let mut encoder = builder.write(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}
