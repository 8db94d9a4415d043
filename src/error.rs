use std::path::PathBuf;

use thiserror::Error;


pub type Result<T> = std::result::Result<T, ErrorKind>;

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("reading {} failed: {}", .0.display(), .1)]
    ReadingManifest(PathBuf, ErrorKind),

    #[error("parsing {} failed: {}", .0.display(), .1)]
    ParsingManifest(PathBuf, ErrorKind),

    #[error("writing {} failed: {}", .0.display(), .1)]
    WritingManifest(PathBuf, ErrorKind),

}

#[derive(Error, Debug)]
pub enum ErrorKind {
    #[error("top-level value is not a JSON object")]
    NotAnObject,

    #[error("invalid version: {}", .0)]
    Version(#[from]nodejs_semver::SemverError),

    #[error("io error: {}", .0)]
    Io(#[from]std::io::Error),

    #[error("deserializing failed: {}", .0)]
    Serde(#[from]serde_json::Error),
}
