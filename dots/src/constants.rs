// Geometry of the matrix, in pixels. Column offsets are relative to the origin.
pub const MATRIX_WIDTH: u32 = 22;
pub const MATRIX_HEIGHT: u32 = 8;

pub const SEPARATOR_COLUMNS: [usize; 4] = [0, 6, 13, 20];
pub const DATE_COLUMN: usize = 1;
pub const SERIAL_COLUMN: usize = 7;
pub const USERNAME_COLUMN: usize = 14;
pub const PARITY_COLUMN: usize = 21;

pub const DATE_FIELD_COUNT: usize = 5;
pub const DATA_COLUMN_COUNT: usize = 17;

/// Every row of the parity column starts at 1, so each row has odd parity.
pub const PARITY_SEED: u8 = 0xff;
pub const FULL_COLUMN: u8 = 0xff;

pub const DEFAULT_ORIGIN: (u32, u32) = (30, 160);
pub const DEFAULT_ON_COLOR: [u8; 3] = [255, 255, 0];
pub const DEFAULT_OFF_COLOR: [u8; 3] = [255, 255, 1];
