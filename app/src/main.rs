use std::ffi::OsStr;
use std::io::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::{Parser, ValueEnum};
use env_logger::Builder;
use log::LevelFilter;

use las_exporter::encoder::{ColorScale, EncoderConfig, LasEncoder};
use las_exporter::header::{GRID_GENERATING_SOFTWARE, SURVEY_GENERATING_SOFTWARE};
use las_exporter::record::PointFormat;
use terrain_core::error::ConvertError;
use terrain_core::source::{PointSource, SourceProvider as _};
use terrain_parser::sources::grid::GridSourceProvider;
use terrain_parser::sources::survey::SurveySourceProvider;
use terrain_parser::sources::{get_extension, Extension};

#[derive(Parser, Debug)]
#[command(
    name = "t2las",
    about = "Convert ASC raster grids and LSS survey files into LAS point clouds",
    version = "0.0.1"
)]
struct Cli {
    /// Input file: an .asc raster grid or an LSS survey file (.001, ...)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Derive point colors from elevation (writes point format 2)
    #[arg(long = "elev-rgb")]
    elev_rgb: bool,

    /// How elevation colors are normalized
    #[arg(long = "color-scale", value_enum, default_value = "streaming")]
    color_scale: ColorScaleArg,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ColorScaleArg {
    /// Single pass against the running z range (historical behavior)
    Streaming,
    /// Buffer everything and use the dataset-wide z range
    Global,
}

impl From<ColorScaleArg> for ColorScale {
    fn from(arg: ColorScaleArg) -> Self {
        match arg {
            ColorScaleArg::Streaming => ColorScale::Streaming,
            ColorScaleArg::Global => ColorScale::Global,
        }
    }
}

fn run(args: &Cli) -> Result<(), ConvertError> {
    let extension = args
        .input
        .extension()
        .and_then(OsStr::to_str)
        .and_then(get_extension)
        .ok_or_else(|| {
            ConvertError::Parse(format!(
                "unsupported input extension: '{}'",
                args.input.display()
            ))
        })?;

    let output_path = args.input.with_extension("las");

    let (mut source, generating_software): (Box<dyn PointSource>, &'static str) = match extension {
        Extension::Asc => {
            let provider = GridSourceProvider {
                path: args.input.clone(),
            };
            (provider.get_source()?, GRID_GENERATING_SOFTWARE)
        }
        Extension::Survey => {
            let provider = SurveySourceProvider {
                path: args.input.clone(),
            };
            (provider.get_source()?, SURVEY_GENERATING_SOFTWARE)
        }
    };

    let format = if args.elev_rgb {
        PointFormat::Color
    } else {
        PointFormat::NoColor
    };
    let encoder = LasEncoder::new(EncoderConfig {
        format,
        color_scale: args.color_scale.into(),
        generating_software,
    });

    let start = std::time::Instant::now();
    let summary = encoder.encode(source.as_mut(), &output_path)?;
    log::info!(
        "Conversion complete: '{}' -> '{}'. Total points: {}",
        args.input.display(),
        output_path.display(),
        summary.points_written
    );
    log::info!("Elapsed: {:?}", start.elapsed());

    Ok(())
}

fn main() -> ExitCode {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, LevelFilter::Info)
        .init();

    let args = Cli::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}: {}", args.input.display(), e);
            ExitCode::FAILURE
        }
    }
}
