use std::path::PathBuf;

use miette::Diagnostic;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum Error {
    #[error("Cannot read archive `{}`", .path.display())]
    ReadArchive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot decode archive `{}`", .path.display())]
    #[diagnostic(help("Is this a valid tar or gzip file? Try --format to override detection."))]
    Decode {
        path: PathBuf,
        #[source]
        source: peel_format::Error,
    },

    #[error("Cannot tell the archive format of `{}`", .path.display())]
    #[diagnostic(help("Pass --format tar, --format gzip or --format tgz"))]
    UnknownFormat { path: PathBuf },

    #[error("Refusing to extract entry with unsafe name `{name}`")]
    #[diagnostic(help("Entry names must be relative and must not contain `..`"))]
    UnsafeEntryName { name: String },

    #[error("Cannot create directory `{}`", .path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write file `{}`", .path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot serialize listing")]
    Json {
        #[source]
        source: serde_json::Error,
    },
}
