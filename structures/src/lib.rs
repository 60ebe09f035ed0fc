use chrono::{Datelike, NaiveDateTime, Timelike};
use thiserror::Error;

#[macro_use]
extern crate serde_derive;

/// Number of characters in both the serial and the username.
pub const TEXT_FIELD_LEN: usize = 6;

const PRINTABLE: std::ops::RangeInclusive<u32> = 32..=126;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum RecordError {
    #[error("{field} {value} out of range ({min}-{max})")]
    FieldRange {
        field: &'static str,
        value: u8,
        min: u8,
        max: u8,
    },
    #[error("{field} must be exactly {expected} characters (got {actual})")]
    StringLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("{field} contains non-printable ASCII character: {character:?}")]
    NonPrintableCharacter { field: &'static str, character: char },
}

/// Payload carried by one dot matrix.
#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct DotRecord {
    pub minute: u8,
    pub hour: u8,
    pub day: u8,
    pub month: u8,
    /// Last two digits of the calendar year
    pub year2: u8,
    pub serial: String,
    pub username: String,
}

impl DotRecord {
    /// Builds a record from a timestamp, keeping only the last two digits of
    /// the year. The result is validated.
    pub fn from_datetime(
        placed_at: &NaiveDateTime,
        serial: &str,
        username: &str,
    ) -> Result<Self, RecordError> {
        let record = DotRecord {
            minute: placed_at.minute() as u8,
            hour: placed_at.hour() as u8,
            day: placed_at.day() as u8,
            month: placed_at.month() as u8,
            year2: placed_at.year().rem_euclid(100) as u8,
            serial: serial.to_string(),
            username: username.to_string(),
        };

        record.validate()?;
        Ok(record)
    }

    pub fn validate(&self) -> Result<(), RecordError> {
        check_range("minute", self.minute, 0, 59)?;
        check_range("hour", self.hour, 0, 23)?;
        check_range("day", self.day, 1, 31)?;
        check_range("month", self.month, 1, 12)?;
        check_range("year", self.year2, 0, 99)?;
        validate_text("serial", &self.serial)?;
        validate_text("username", &self.username)?;
        Ok(())
    }

    /// Date and time fields in matrix order: minute, hour, day, month, year.
    pub fn date_fields(&self) -> [u8; 5] {
        [self.minute, self.hour, self.day, self.month, self.year2]
    }
}

fn check_range(field: &'static str, value: u8, min: u8, max: u8) -> Result<(), RecordError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(RecordError::FieldRange {
            field,
            value,
            min,
            max,
        })
    }
}

/// Checks that `value` is exactly six printable ASCII characters.
pub fn validate_text(field: &'static str, value: &str) -> Result<(), RecordError> {
    let actual = value.chars().count();
    if actual != TEXT_FIELD_LEN {
        return Err(RecordError::StringLength {
            field,
            expected: TEXT_FIELD_LEN,
            actual,
        });
    }

    match value.chars().find(|c| !PRINTABLE.contains(&(*c as u32))) {
        Some(character) => Err(RecordError::NonPrintableCharacter { field, character }),
        None => Ok(()),
    }
}
