use image::Rgb;

use crate::{
    constants::{DEFAULT_OFF_COLOR, DEFAULT_ON_COLOR, DEFAULT_ORIGIN},
    errors::DotMatrixError,
};

/// Colors for set and unset dots. `off` must differ from `on` for the matrix
/// to be readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette<P> {
    pub on: P,
    pub off: P,
}

/// Where the matrix goes and how it is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DotConfig<P> {
    /// Top-left corner of the matrix, in surface coordinates
    pub origin: (u32, u32),
    pub palette: Palette<P>,
}

impl<P> DotConfig<P> {
    pub fn new(origin: (u32, u32), on: P, off: P) -> Self {
        Self {
            origin,
            palette: Palette { on, off },
        }
    }
}

impl<P: PartialEq> DotConfig<P> {
    pub(crate) fn ensure_distinct(&self) -> Result<(), DotMatrixError> {
        if self.palette.on == self.palette.off {
            return Err(DotMatrixError::IndistinctPalette);
        }
        Ok(())
    }
}

impl Default for DotConfig<Rgb<u8>> {
    fn default() -> Self {
        Self::new(DEFAULT_ORIGIN, Rgb(DEFAULT_ON_COLOR), Rgb(DEFAULT_OFF_COLOR))
    }
}
