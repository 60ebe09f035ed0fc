use log::debug;
use structures::DotRecord;

use crate::{
    config::DotConfig,
    constants::{MATRIX_HEIGHT, MATRIX_WIDTH},
    errors::DotMatrixError,
    matrix::DotMatrix,
    surface::{ensure_fits, Surface},
};

pub struct DotReader<P> {
    config: DotConfig<P>,
}

impl<P: Copy + PartialEq> DotReader<P> {
    pub fn new(config: DotConfig<P>) -> Self {
        DotReader { config }
    }

    /// Samples the block. A dot is set only if it matches the on color exactly.
    pub fn read_matrix<S>(&self, surface: &S) -> Result<DotMatrix, DotMatrixError>
    where
        S: Surface<Pixel = P> + ?Sized,
    {
        self.config.ensure_distinct()?;
        ensure_fits(surface, self.config.origin)?;

        let (x0, y0) = self.config.origin;
        let mut columns = [0u8; MATRIX_WIDTH as usize];
        for (column, bits) in columns.iter_mut().enumerate() {
            for row in 0..MATRIX_HEIGHT {
                if surface.get_pixel(x0 + column as u32, y0 + row) == self.config.palette.on {
                    *bits |= 1 << row;
                }
            }
        }

        Ok(DotMatrix::from_columns(columns))
    }

    pub fn read<S>(&self, surface: &S) -> Result<DotRecord, DotMatrixError>
    where
        S: Surface<Pixel = P> + ?Sized,
    {
        let matrix = self.read_matrix(surface)?;
        debug!("Read dot matrix at {:?}", self.config.origin);
        matrix.decode()
    }
}
