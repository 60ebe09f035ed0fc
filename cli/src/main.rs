use std::{fs::File, io, path::PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand};
use dots::{constants::DEFAULT_ORIGIN, DotConfig, DotRecord};
use image::Rgb;
use log::info;

mod stamp;

use stamp::{parse_color, parse_datetime, parse_serial, parse_username};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
/// Embed printer-style tracking dots into images
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[command(flatten)]
    placement: Placement,
}

#[derive(Debug, Args)]
struct Placement {
    /// Left edge of the matrix
    #[clap(long, global = true, default_value_t = DEFAULT_ORIGIN.0)]
    origin_x: u32,
    /// Top edge of the matrix
    #[clap(long, global = true, default_value_t = DEFAULT_ORIGIN.1)]
    origin_y: u32,
    /// Color of set dots
    #[clap(long, global = true, default_value = "#ffff00", value_parser = parse_color)]
    on_color: Rgb<u8>,
    /// Color of unset dots, must differ from the on color
    #[clap(long, global = true, default_value = "#ffff01", value_parser = parse_color)]
    off_color: Rgb<u8>,
}

impl Placement {
    fn config(&self) -> DotConfig<Rgb<u8>> {
        DotConfig::new(
            (self.origin_x, self.origin_y),
            self.on_color,
            self.off_color,
        )
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Stamp a date, a printer serial and a username into an image
    Embed {
        /// "DD/MM/YYYY HH:MM"
        #[clap(value_parser = parse_datetime)]
        datetime: NaiveDateTime,
        /// Printer serial number (exactly 6 ASCII characters)
        #[clap(value_parser = parse_serial)]
        serial: String,
        /// Username (exactly 6 ASCII characters)
        #[clap(value_parser = parse_username)]
        username: String,
        input: PathBuf,
        out_file: PathBuf,
        /// Print the matrix
        #[clap(long)]
        show: bool,
    },
    /// Read the stamp back from an image and print it as CSV
    Decode {
        input: PathBuf,
        /// Print the matrix
        #[clap(long)]
        show: bool,
    },
    /// Stamp every row of a CSV manifest (datetime,serial,username,input,output)
    Batch { manifest: PathBuf },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.placement.config();

    match cli.command {
        Commands::Embed {
            datetime,
            serial,
            username,
            input,
            out_file,
            show,
        } => {
            let record = DotRecord::from_datetime(&datetime, &serial, &username)?;
            let matrix = stamp::stamp_file(&input, &out_file, &record, config)?;

            if show {
                print!("{}", matrix);
            }
        }
        Commands::Decode { input, show } => {
            let (record, matrix) = stamp::read_file(&input, config)?;

            if show {
                print!("{}", matrix);
            }
            stamp::write_record(io::stdout(), &record)?;
        }
        Commands::Batch { manifest } => {
            let file = File::open(&manifest)
                .with_context(|| format!("Could not open manifest {}", manifest.display()))?;
            let summary = stamp::stamp_manifest(file, config);

            info!("{} stamped, {} failed", summary.stamped, summary.failed);
            if summary.failed > 0 {
                bail!("{} of {} rows failed", summary.failed, summary.stamped + summary.failed);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use image::Rgb;

    use super::{Cli, Commands};

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_embed() {
        let cli = Cli::try_parse_from([
            "tracking-dots",
            "embed",
            "15/11/2025 14:42",
            "S3CUR3",
            "R3MI_X",
            "belgian_flag.bmp",
            "output.bmp",
            "--origin-x",
            "0",
        ])
        .unwrap();

        let config = cli.placement.config();
        assert_eq!(config.origin, (0, 160));
        assert_eq!(config.palette.on, Rgb([255, 255, 0]));
        assert!(matches!(cli.command, Commands::Embed { show: false, .. }));
    }

    #[test]
    fn rejects_invalid_arguments() {
        let embed = |serial: &str| {
            Cli::try_parse_from([
                "tracking-dots",
                "embed",
                "15/11/2025 14:42",
                serial,
                "R3MI_X",
                "in.bmp",
                "out.bmp",
            ])
        };
        assert!(embed("S3CUR3").is_ok());
        assert!(embed("ABC").is_err());

        let bad_color = ["tracking-dots", "decode", "in.bmp", "--on-color", "nope"];
        assert!(Cli::try_parse_from(bad_color).is_err());

        // identical colors parse, the codec rejects them when used
        let cli = Cli::try_parse_from([
            "tracking-dots",
            "decode",
            "in.bmp",
            "--on-color",
            "#ffff01",
        ])
        .unwrap();
        let config = cli.placement.config();
        assert_eq!(config.palette.on, config.palette.off);
    }
}
