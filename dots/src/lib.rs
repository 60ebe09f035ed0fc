//! Printer-style tracking dots: a 22x8 matrix of colored pixels carrying a
//! timestamp, a device serial and a username, with a row parity column.

mod config;
pub mod constants;
mod dot_reader;
mod dot_writer;
mod errors;
mod matrix;
mod surface;

pub use crate::config::{DotConfig, Palette};
pub use crate::dot_reader::DotReader;
pub use crate::dot_writer::DotWriter;
pub use crate::errors::DotMatrixError;
pub use crate::matrix::{parity, DotMatrix};
pub use crate::surface::Surface;
pub use structures::{DotRecord, RecordError};

/// Writes `record` into `surface` at `config.origin`.
pub fn encode<S>(
    surface: &mut S,
    config: DotConfig<S::Pixel>,
    record: &DotRecord,
) -> Result<DotMatrix, DotMatrixError>
where
    S: Surface + ?Sized,
{
    DotWriter::new(config).write(surface, record)
}

/// Reads back the record stored at `config.origin`.
pub fn decode<S>(surface: &S, config: DotConfig<S::Pixel>) -> Result<DotRecord, DotMatrixError>
where
    S: Surface + ?Sized,
{
    DotReader::new(config).read(surface)
}
