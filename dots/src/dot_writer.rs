use log::{debug, trace};
use structures::DotRecord;

use crate::{
    config::DotConfig,
    constants::{MATRIX_HEIGHT, MATRIX_WIDTH},
    errors::DotMatrixError,
    matrix::DotMatrix,
    surface::{ensure_fits, Surface},
};

pub struct DotWriter<P> {
    config: DotConfig<P>,
}

impl<P: Copy + PartialEq> DotWriter<P> {
    pub fn new(config: DotConfig<P>) -> Self {
        DotWriter { config }
    }

    /// Encodes `record` into the surface. Everything is checked before the
    /// first pixel is written, so on error the surface is unchanged.
    pub fn write<S>(
        &self,
        surface: &mut S,
        record: &DotRecord,
    ) -> Result<DotMatrix, DotMatrixError>
    where
        S: Surface<Pixel = P> + ?Sized,
    {
        let matrix = DotMatrix::encode(record)?;
        self.config.ensure_distinct()?;
        ensure_fits(&*surface, self.config.origin)?;

        debug!(
            "Writing dot matrix for {}/{} at {:?}",
            record.serial, record.username, self.config.origin
        );
        self.fill(surface, &matrix);

        Ok(matrix)
    }

    /// Paints every pixel of the block, on or off. Whatever was underneath is
    /// replaced. `write` has already checked that the block fits.
    fn fill<S>(&self, surface: &mut S, matrix: &DotMatrix)
    where
        S: Surface<Pixel = P> + ?Sized,
    {
        let (x0, y0) = self.config.origin;
        let palette = &self.config.palette;

        for column in 0..MATRIX_WIDTH {
            trace!("column {:2}: {:08b}", column, matrix.columns()[column as usize]);
            for row in 0..MATRIX_HEIGHT {
                // unset dots are repainted even where the surface already held the on color
                let pixel = if matrix.is_set(column as usize, row as usize) {
                    palette.on
                } else {
                    palette.off
                };
                surface.put_pixel(x0 + column, y0 + row, pixel);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
    use rand::Rng;
    use structures::{DotRecord, RecordError};

    use super::DotWriter;
    use crate::{config::DotConfig, errors::DotMatrixError};

    const ON: Rgb<u8> = Rgb([255, 255, 0]);
    const OFF: Rgb<u8> = Rgb([255, 255, 1]);

    const GOLDEN_ROWS: [&str; 8] = [
        "#..########.##.####.##",
        "#####.####.#####..#.##",
        "#.##..#...#..#..#.#.#.",
        "#######......#..#####.",
        "#....####.######..####",
        "##....#.#...##.#....##",
        "#.....##.###.##.#####.",
        "#.....#......#......##",
    ];

    fn sample() -> DotRecord {
        DotRecord {
            minute: 42,
            hour: 14,
            day: 15,
            month: 11,
            year2: 25,
            serial: "S3CUR3".to_string(),
            username: "R3MI_X".to_string(),
        }
    }

    fn writer() -> DotWriter<Rgb<u8>> {
        env_logger::try_init().ok();
        DotWriter::new(DotConfig::default())
    }

    fn block(image: &RgbImage, origin: (u32, u32)) -> Vec<Rgb<u8>> {
        let mut pixels = Vec::new();
        for y in origin.1..origin.1 + 8 {
            for x in origin.0..origin.0 + 22 {
                pixels.push(*image.get_pixel(x, y));
            }
        }
        pixels
    }

    #[test]
    fn golden_pixels() {
        let mut image = RgbImage::new(300, 200);
        writer().write(&mut image, &sample()).unwrap();

        for (row, pattern) in GOLDEN_ROWS.iter().enumerate() {
            for (column, c) in pattern.chars().enumerate() {
                let expected = if c == '#' { ON } else { OFF };
                assert_eq!(
                    image.get_pixel(30 + column as u32, 160 + row as u32),
                    &expected,
                    "column {} row {}",
                    column,
                    row
                );
            }
        }

        // nothing outside the block is touched
        assert_eq!(image.get_pixel(29, 160), &Rgb([0, 0, 0]));
        assert_eq!(image.get_pixel(52, 167), &Rgb([0, 0, 0]));
        assert_eq!(image.get_pixel(30, 168), &Rgb([0, 0, 0]));
    }

    #[test]
    fn separators_are_always_set() {
        let mut rng = rand::thread_rng();
        let writer = writer();

        for _ in 0..32 {
            let record = DotRecord {
                minute: rng.gen_range(0..=59),
                hour: rng.gen_range(0..=23),
                day: rng.gen_range(1..=31),
                month: rng.gen_range(1..=12),
                year2: rng.gen_range(0..=99),
                serial: (0..6).map(|_| rng.gen_range(32u8..=126) as char).collect(),
                username: (0..6).map(|_| rng.gen_range(32u8..=126) as char).collect(),
            };

            let mut image = RgbImage::new(300, 200);
            writer.write(&mut image, &record).unwrap();

            for column in [0, 6, 13, 20] {
                for row in 0..8 {
                    assert_eq!(image.get_pixel(30 + column, 160 + row), &ON);
                }
            }
        }
    }

    #[test]
    fn writing_twice_is_idempotent() {
        let writer = writer();
        let mut image = RgbImage::new(300, 200);

        writer.write(&mut image, &sample()).unwrap();
        let first = image.clone();
        writer.write(&mut image, &sample()).unwrap();

        assert_eq!(first, image);
    }

    #[test]
    fn block_is_normalized_to_two_colors() {
        let mut rng = rand::thread_rng();
        let mut image = RgbImage::from_fn(300, 200, |_, _| Rgb(rng.gen()));
        // an on-colored background must not leak into the data bits
        for x in 30..52 {
            for y in 160..168 {
                if (x + y) % 3 == 0 {
                    image.put_pixel(x, y, ON);
                }
            }
        }

        writer().write(&mut image, &sample()).unwrap();

        let mut blank = RgbImage::new(300, 200);
        writer().write(&mut blank, &sample()).unwrap();

        let written = block(&image, (30, 160));
        assert!(written.iter().all(|p| *p == ON || *p == OFF));
        assert_eq!(written, block(&blank, (30, 160)));
    }

    #[test]
    fn surface_too_small_leaves_surface_untouched() {
        let mut image = RgbImage::from_pixel(20, 160, Rgb([9, 9, 9]));
        let before = image.clone();

        assert_eq!(
            writer().write(&mut image, &sample()),
            Err(DotMatrixError::SurfaceTooSmall {
                required: (52, 168),
                actual: (20, 160)
            })
        );
        assert_eq!(image, before);
    }

    #[test]
    fn invalid_records_leave_surface_untouched() {
        let writer = writer();
        let mut image = RgbImage::new(300, 200);

        let mut record = sample();
        record.serial = "ABC".to_string();
        assert_eq!(
            writer.write(&mut image, &record),
            Err(DotMatrixError::InvalidRecord(RecordError::StringLength {
                field: "serial",
                expected: 6,
                actual: 3
            }))
        );

        let mut record = sample();
        record.username = "R3M\u{7}_X".to_string();
        assert_eq!(
            writer.write(&mut image, &record),
            Err(DotMatrixError::InvalidRecord(
                RecordError::NonPrintableCharacter {
                    field: "username",
                    character: '\u{7}'
                }
            ))
        );

        let mut record = sample();
        record.hour = 24;
        assert!(matches!(
            writer.write(&mut image, &record),
            Err(DotMatrixError::InvalidRecord(RecordError::FieldRange { .. }))
        ));

        assert_eq!(image, RgbImage::new(300, 200));
    }

    #[test]
    fn identical_palette_colors_are_rejected() {
        let yellow = Rgb([255, 255, 0]);
        let writer = DotWriter::new(DotConfig::new((30, 160), yellow, yellow));
        let mut image = RgbImage::new(300, 200);

        assert_eq!(
            writer.write(&mut image, &sample()),
            Err(DotMatrixError::IndistinctPalette)
        );
        assert_eq!(image, RgbImage::new(300, 200));
    }

    #[test]
    fn other_pixel_types_and_origins() {
        let mut gray = GrayImage::new(22, 8);
        let writer = DotWriter::new(DotConfig::new((0, 0), Luma([200]), Luma([10])));
        writer.write(&mut gray, &sample()).unwrap();
        assert_eq!(gray.get_pixel(0, 7), &Luma([200]));
        assert_eq!(gray.get_pixel(1, 0), &Luma([10]));

        let mut rgba = RgbaImage::new(64, 64);
        let writer = DotWriter::new(DotConfig::new(
            (5, 50),
            Rgba([255, 255, 0, 255]),
            Rgba([255, 255, 1, 255]),
        ));
        writer.write(&mut rgba, &sample()).unwrap();
        assert_eq!(rgba.get_pixel(5 + 21, 50 + 7), &Rgba([255, 255, 0, 255]));
        assert_eq!(rgba.get_pixel(4, 50), &Rgba([0, 0, 0, 0]));
    }
}
