use std::fmt;

use structures::DotRecord;

use crate::{
    constants::{
        DATE_COLUMN, DATE_FIELD_COUNT, FULL_COLUMN, MATRIX_HEIGHT, MATRIX_WIDTH, PARITY_COLUMN,
        PARITY_SEED, SEPARATOR_COLUMNS, SERIAL_COLUMN, USERNAME_COLUMN,
    },
    errors::DotMatrixError,
};

const WIDTH: usize = MATRIX_WIDTH as usize;
const TEXT_LEN: usize = structures::TEXT_FIELD_LEN;

/// The 22x8 bit grid. Each column is stored as one byte, bit `j` being row `j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DotMatrix {
    columns: [u8; WIDTH],
}

impl DotMatrix {
    /// Lays out a validated record, separators and parity included.
    pub fn encode(record: &DotRecord) -> Result<Self, DotMatrixError> {
        record.validate()?;

        let mut columns = [0u8; WIDTH];
        for column in SEPARATOR_COLUMNS {
            columns[column] = FULL_COLUMN;
        }

        columns[DATE_COLUMN..DATE_COLUMN + DATE_FIELD_COUNT]
            .copy_from_slice(&record.date_fields());
        // validated as printable ASCII, so one byte per character
        columns[SERIAL_COLUMN..SERIAL_COLUMN + TEXT_LEN]
            .copy_from_slice(record.serial.as_bytes());
        columns[USERNAME_COLUMN..USERNAME_COLUMN + TEXT_LEN]
            .copy_from_slice(record.username.as_bytes());

        let mut matrix = DotMatrix { columns };
        matrix.columns[PARITY_COLUMN] = parity(matrix.data_columns());
        Ok(matrix)
    }

    pub const fn from_columns(columns: [u8; WIDTH]) -> Self {
        Self { columns }
    }

    #[inline]
    pub const fn columns(&self) -> &[u8; WIDTH] {
        &self.columns
    }

    #[inline]
    pub fn is_set(&self, column: usize, row: usize) -> bool {
        (self.columns[column] >> row) & 1 != 0
    }

    /// Stored parity column.
    #[inline]
    pub const fn parity(&self) -> u8 {
        self.columns[PARITY_COLUMN]
    }

    /// The 17 data columns in order: date fields, serial, username.
    pub fn data_columns(&self) -> impl Iterator<Item = u8> + '_ {
        let date = &self.columns[DATE_COLUMN..DATE_COLUMN + DATE_FIELD_COUNT];
        let serial = &self.columns[SERIAL_COLUMN..SERIAL_COLUMN + TEXT_LEN];
        let username = &self.columns[USERNAME_COLUMN..USERNAME_COLUMN + TEXT_LEN];

        date.iter().chain(serial).chain(username).copied()
    }

    /// Checks separators and parity, then rebuilds and validates the record.
    pub fn decode(&self) -> Result<DotRecord, DotMatrixError> {
        if let Some(&column) = SEPARATOR_COLUMNS
            .iter()
            .find(|&&column| self.columns[column] != FULL_COLUMN)
        {
            return Err(DotMatrixError::MissingSeparator { column });
        }

        let rows = parity(self.data_columns()) ^ self.parity();
        if rows != 0 {
            return Err(DotMatrixError::ParityMismatch { rows });
        }

        let date = &self.columns[DATE_COLUMN..DATE_COLUMN + DATE_FIELD_COUNT];
        let record = DotRecord {
            minute: date[0],
            hour: date[1],
            day: date[2],
            month: date[3],
            year2: date[4],
            serial: text(&self.columns[SERIAL_COLUMN..SERIAL_COLUMN + TEXT_LEN]),
            username: text(&self.columns[USERNAME_COLUMN..USERNAME_COLUMN + TEXT_LEN]),
        };

        record.validate()?;
        Ok(record)
    }
}

/// Row-wise odd parity over the data columns.
pub fn parity(data: impl IntoIterator<Item = u8>) -> u8 {
    data.into_iter().fold(PARITY_SEED, |acc, column| acc ^ column)
}

// Bytes >= 0x80 map to non-ASCII chars and are rejected by validation.
fn text(columns: &[u8]) -> String {
    columns.iter().map(|&b| b as char).collect()
}

impl fmt::Display for DotMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..MATRIX_HEIGHT as usize {
            for column in 0..WIDTH {
                f.write_str(if self.is_set(column, row) { "●" } else { "·" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
