use std::ops::{Deref, DerefMut};

use image::{ImageBuffer, Pixel};

use crate::{
    constants::{MATRIX_HEIGHT, MATRIX_WIDTH},
    errors::DotMatrixError,
};

/// A pixel buffer the matrix can be written into and read back from.
pub trait Surface {
    type Pixel: Copy + PartialEq;

    /// (width, height)
    fn dimensions(&self) -> (u32, u32);
    fn get_pixel(&self, x: u32, y: u32) -> Self::Pixel;
    fn put_pixel(&mut self, x: u32, y: u32, pixel: Self::Pixel);
}

impl<P, C> Surface for ImageBuffer<P, C>
where
    P: Pixel + PartialEq,
    C: Deref<Target = [P::Subpixel]> + DerefMut,
{
    type Pixel = P;

    fn dimensions(&self) -> (u32, u32) {
        ImageBuffer::dimensions(self)
    }

    fn get_pixel(&self, x: u32, y: u32) -> P {
        *ImageBuffer::get_pixel(self, x, y)
    }

    fn put_pixel(&mut self, x: u32, y: u32, pixel: P) {
        ImageBuffer::put_pixel(self, x, y, pixel)
    }
}

pub(crate) fn ensure_fits<S: Surface + ?Sized>(
    surface: &S,
    origin: (u32, u32),
) -> Result<(), DotMatrixError> {
    let actual = surface.dimensions();
    let required = (
        origin.0 as u64 + MATRIX_WIDTH as u64,
        origin.1 as u64 + MATRIX_HEIGHT as u64,
    );

    if (actual.0 as u64) < required.0 || (actual.1 as u64) < required.1 {
        return Err(DotMatrixError::SurfaceTooSmall { required, actual });
    }

    Ok(())
}
