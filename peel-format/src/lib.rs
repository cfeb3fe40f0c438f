//! Read-only decoders for two container formats: single-member gzip streams
//! and plain tar archives.
//!
//! Both decoders take the complete archive as an in-memory buffer and eagerly
//! produce an ordered list of named, owned payloads.
//!
//! ```no_run
//! # fn main() -> peel_format::Result<()> {
//! let bytes = std::fs::read("bundle.tar").unwrap();
//! let archive = peel_format::tar::Archive::new(&bytes)?;
//! for entry in &archive {
//!     println!("{} ({} bytes)", entry.name(), entry.data().len());
//! }
//! # Ok(())
//! # }
//! ```

mod cursor;
mod error;
mod inflate;

pub mod gzip;
pub mod tar;

pub use cursor::ByteCursor;
pub use error::{Error, Result};
#[cfg(feature = "flate2")]
pub use inflate::RawInflater;
pub use inflate::Inflate;
