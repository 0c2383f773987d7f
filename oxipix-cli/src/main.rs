//! OxiPix CLI - The Oxidized Pixel Packer
//!
//! Lossless compression for raw 8-bit grayscale raster images.

use clap::{CommandFactory, Parser, error::ErrorKind as ClapErrorKind};
use clap_complete::{Shell, generate};
use oxipix_codec::{CodecOptions, DEFAULT_BLOCK_SIZE, compress, decompress};
use oxipix_core::{OxiPixError, Result};
use oxipix_raster::Image;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "oxipix")]
#[command(
    author,
    version,
    about = "The Oxidized Pixel Packer - lossless grayscale raster compression"
)]
#[command(long_about = "
OxiPix losslessly compresses raw 8-bit grayscale images: one byte per
pixel, row-major, with the height derived from the file size and the
given width. The same -m/-a/-b options must be passed to both the
compressing and the decompressing run.

Examples:
  oxipix -i frame.raw -o frame.opx -c -w 1920
  oxipix -i frame.raw -o frame.opx -c -w 1920 -m -a
  oxipix -i frame.raw -o frame.opx -c -w 1920 -a -b 32
  oxipix -i frame.opx -o frame.raw -d -w 1920
")]
struct Cli {
    /// Input file name
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file name
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Compress mode (the default)
    #[arg(short = 'c', long = "compress")]
    compress: bool,

    /// Decompress mode
    #[arg(short = 'd', long = "decompress", conflicts_with = "compress")]
    decompress: bool,

    /// Activate the delta model for preprocessing pixel data
    #[arg(short = 'm', long = "model")]
    model: bool,

    /// Activate adaptive block scanning
    #[arg(short = 'a', long = "adaptive")]
    adaptive: bool,

    /// Block edge length for adaptive scanning
    #[arg(short = 'b', long = "block-size", value_name = "N", default_value_t = DEFAULT_BLOCK_SIZE)]
    block_size: u32,

    /// Width of the image in pixels; the height is the file size divided
    /// by the width
    #[arg(short = 'w', long = "width", value_name = "W")]
    width: Option<u32>,

    /// Generate a shell completion script and exit
    #[arg(long = "completions", value_enum, value_name = "SHELL", hide = true)]
    completions: Option<Shell>,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => exit_code_for(&OxiPixError::invalid_argument("bad usage")),
            };
        }
    };

    if let Some(shell) = cli.completions {
        let mut command = Cli::command();
        generate(shell, &mut command, "oxipix", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            exit_code_for(&err)
        }
    }
}

fn exit_code_for(err: &OxiPixError) -> ExitCode {
    ExitCode::from(err.exit_code())
}

fn run(cli: &Cli) -> Result<()> {
    let input = cli
        .input
        .as_deref()
        .ok_or_else(|| OxiPixError::invalid_argument("input file not specified"))?;
    let output = cli
        .output
        .as_deref()
        .ok_or_else(|| OxiPixError::invalid_argument("output file not specified"))?;
    let width = match cli.width {
        Some(width) if width > 0 => width,
        _ => {
            return Err(OxiPixError::invalid_argument(
                "width of the image not specified",
            ));
        }
    };

    let bytes = read_input(input)?;
    let options = CodecOptions::new()
        .adaptive(cli.adaptive)
        .delta(cli.model)
        .block_size(cli.block_size);

    if cli.decompress {
        let image = decompress(&bytes, &options)?;
        fs::write(output, image.as_bytes())?;
    } else {
        let image = frame_raw(bytes, width)?;
        let packed = compress(&image, &options)?;
        fs::write(output, &packed)?;
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => OxiPixError::file_not_found(path.display().to_string()),
        _ => err.into(),
    })
}

/// Frame a raw byte stream as an image: the height is the file length
/// divided by the width, and a trailing partial row is dropped.
fn frame_raw(mut bytes: Vec<u8>, width: u32) -> Result<Image> {
    let height = u32::try_from(bytes.len() / width as usize).unwrap_or(u32::MAX);
    if height == 0 {
        return Err(OxiPixError::invalid_image_size(width, 0));
    }
    bytes.truncate(width as usize * height as usize);
    Image::from_parts(bytes, width, height)
}
