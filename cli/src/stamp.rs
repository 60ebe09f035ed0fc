use std::{
    io::{Read, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use colors_transform::Color;
use dots::{DotConfig, DotMatrix, DotReader, DotRecord, DotWriter};
use image::Rgb;
use log::{error, info};
use serde_derive::Deserialize;

pub const DATETIME_FORMAT: &str = "%d/%m/%Y %H:%M";

pub fn parse_datetime(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
        .map_err(|err| format!("date/time format must be DD/MM/YYYY HH:MM ({})", err))
}

pub fn parse_serial(value: &str) -> Result<String, String> {
    structures::validate_text("serial", value)
        .map(|_| value.to_string())
        .map_err(|err| err.to_string())
}

pub fn parse_username(value: &str) -> Result<String, String> {
    structures::validate_text("username", value)
        .map(|_| value.to_string())
        .map_err(|err| err.to_string())
}

pub fn parse_color(value: &str) -> Result<Rgb<u8>, String> {
    let color = colors_transform::Rgb::from_hex_str(value)
        .map_err(|_| format!("invalid color {:?}, expected hex such as #ffff00", value))?;

    Ok(Rgb([
        color.get_red() as u8,
        color.get_green() as u8,
        color.get_blue() as u8,
    ]))
}

/// Loads `input`, writes the matrix into it and saves the result to `output`.
/// The output format follows the file extension.
pub fn stamp_file(
    input: &Path,
    output: &Path,
    record: &DotRecord,
    config: DotConfig<Rgb<u8>>,
) -> Result<DotMatrix> {
    let mut canvas = image::open(input)
        .with_context(|| format!("Could not open image {}", input.display()))?
        .to_rgb8();

    let matrix = DotWriter::new(config)
        .write(&mut canvas, record)
        .with_context(|| format!("Could not stamp {}", input.display()))?;

    canvas
        .save(output)
        .with_context(|| format!("Could not save image {}", output.display()))?;

    info!("Stamped {} -> {}", input.display(), output.display());
    Ok(matrix)
}

pub fn read_file(input: &Path, config: DotConfig<Rgb<u8>>) -> Result<(DotRecord, DotMatrix)> {
    let canvas = image::open(input)
        .with_context(|| format!("Could not open image {}", input.display()))?
        .to_rgb8();

    let reader = DotReader::new(config);
    let matrix = reader.read_matrix(&canvas)?;
    let record = matrix
        .decode()
        .with_context(|| format!("No valid dot matrix in {}", input.display()))?;

    Ok((record, matrix))
}

/// Prints the record as a CSV row with a header.
pub fn write_record<W: Write>(out: W, record: &DotRecord) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.serialize(record)?;
    writer.flush()?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct ManifestRow {
    datetime: String,
    serial: String,
    username: String,
    input: PathBuf,
    output: PathBuf,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub stamped: usize,
    pub failed: usize,
}

/// Stamps every row of a `datetime,serial,username,input,output` manifest.
/// A bad row is logged and counted, the remaining rows are still processed.
pub fn stamp_manifest<R: Read>(manifest: R, config: DotConfig<Rgb<u8>>) -> BatchSummary {
    let mut reader = csv::Reader::from_reader(manifest);
    let mut summary = BatchSummary::default();

    for (i, result) in reader.deserialize::<ManifestRow>().enumerate() {
        // header is line 1
        let line = i + 2;
        let stamped = result
            .context("Could not read row")
            .and_then(|row| stamp_row(&row, config));

        match stamped {
            Ok(()) => summary.stamped += 1,
            Err(err) => {
                error!("Line {}: {:#}", line, err);
                summary.failed += 1;
            }
        }
    }

    summary
}

fn stamp_row(row: &ManifestRow, config: DotConfig<Rgb<u8>>) -> Result<()> {
    let placed_at = parse_datetime(&row.datetime).map_err(anyhow::Error::msg)?;
    let record = DotRecord::from_datetime(&placed_at, &row.serial, &row.username)?;
    stamp_file(&row.input, &row.output, &record, config)?;
    Ok(())
}
