use std::io;

use thiserror::Error;

/// Everything that can go wrong in the buffer core.
///
/// Mutating operations fail with one of these and leave the tree untouched.
/// Queries never fail, they clamp or return empty results instead.
#[derive(Debug, Error)]
pub enum BufferError {
    #[error("required reference was missing")]
    NullReference,

    #[error("allocation failed")]
    OutOfMemory,

    #[error("position out of bounds")]
    OutOfBounds,

    #[error("insertion could not be completed")]
    FailedInsertion,

    #[error("erasure could not be completed")]
    FailedErasure,

    #[error("unable to open file")]
    UnableToOpenFile(#[source] io::Error),

    #[error("unable to create file")]
    UnableToCreateFile(#[source] io::Error),

    #[error("failed to read file")]
    FailedFileRead(#[source] io::Error),

    #[error("failed to write file")]
    FailedFileWrite(#[source] io::Error),
}
