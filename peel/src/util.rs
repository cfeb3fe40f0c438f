use std::path::{Component, Path, PathBuf};

use peel_format::{gzip, tar};

use crate::cli::Format;
use crate::error::{Error, Result};

/// A decoded entry, independent of the container it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub data: Vec<u8>,
}

impl Item {
    pub fn is_directory(&self) -> bool {
        self.name.ends_with('/')
    }
}

/// A concrete container layout, after `Format::Auto` has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Tar,
    Gzip,
    TarGzip,
}

impl Format {
    /// Resolves `Auto` from the archive's file name.
    pub fn resolve(self, path: &Path) -> Option<Container> {
        match self {
            Format::Tar => return Some(Container::Tar),
            Format::Gzip => return Some(Container::Gzip),
            Format::Tgz => return Some(Container::TarGzip),
            Format::Auto => {}
        }

        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Some(Container::TarGzip)
        } else if name.ends_with(".tar") {
            Some(Container::Tar)
        } else if name.ends_with(".gz") {
            Some(Container::Gzip)
        } else {
            None
        }
    }
}

/// Reads and decodes the archive at `path`.
pub fn load(path: &Path, format: Format) -> Result<Vec<Item>> {
    let container = format.resolve(path).ok_or_else(|| Error::UnknownFormat {
        path: path.to_path_buf(),
    })?;

    let bytes = std::fs::read(path).map_err(|source| Error::ReadArchive {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), ?container, bytes = bytes.len(), "loaded archive");

    decode(&bytes, container, path).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })
}

fn decode(bytes: &[u8], container: Container, path: &Path) -> peel_format::Result<Vec<Item>> {
    match container {
        Container::Tar => Ok(tar_items(tar::Archive::new(bytes)?)),
        Container::Gzip => {
            let fallback = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "data".into());
            Ok(gzip::Archive::open(bytes)?
                .into_entries()
                .into_iter()
                .map(|entry| Item {
                    name: entry.name().map_or_else(|| fallback.clone(), str::to_owned),
                    data: entry.into_data(),
                })
                .collect())
        }
        Container::TarGzip => {
            let mut items = Vec::new();
            for entry in gzip::Archive::open(bytes)?.entries() {
                items.extend(tar_items(tar::Archive::new(entry.data())?));
            }
            Ok(items)
        }
    }
}

fn tar_items(archive: tar::Archive) -> Vec<Item> {
    archive
        .into_entries()
        .into_iter()
        .map(|entry| Item {
            name: entry.name().to_owned(),
            data: entry.into_data(),
        })
        .collect()
}

/// Converts an entry name to a relative path that cannot escape the output
/// directory.
pub fn safe_path(name: &str) -> Result<PathBuf> {
    let unsafe_name = || Error::UnsafeEntryName {
        name: name.to_string(),
    };

    let mut path = PathBuf::new();
    for component in Path::new(name).components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(unsafe_name())
            }
        }
    }

    if path.as_os_str().is_empty() {
        return Err(unsafe_name());
    }
    Ok(path)
}

/// Format file size in human-readable form
pub fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
