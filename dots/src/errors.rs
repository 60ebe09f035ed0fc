use structures::RecordError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DotMatrixError {
    #[error(transparent)]
    InvalidRecord(#[from] RecordError),
    #[error("surface is {actual:?} but the matrix needs at least {required:?}")]
    SurfaceTooSmall {
        required: (u64, u64),
        actual: (u32, u32),
    },
    #[error("on and off colors are the same")]
    IndistinctPalette,
    #[error("separator column {column} is not fully set")]
    MissingSeparator { column: usize },
    #[error("parity mismatch in rows {rows:#010b}")]
    ParityMismatch { rows: u8 },
}
