use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use terrain_core::bounds::Bounds;
use terrain_core::colormap::{self, Color};
use terrain_core::error::ConvertError;
use terrain_core::quantize::quantize;
use terrain_core::sample::RawSample;
use terrain_core::source::PointSource;

use crate::header::Header;
use crate::record::{PointFormat, PointRecord};

/// How elevation colors are normalized when point format 2 is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScale {
    /// Normalize against the z range observed so far, the historical
    /// single-pass behavior: identical elevations can receive different
    /// colors depending on stream position, and the first point always
    /// normalizes against itself.
    #[default]
    Streaming,
    /// Buffer all samples first and normalize against the dataset-wide z
    /// range.
    Global,
}

#[derive(Debug, Clone, Copy)]
pub struct EncoderConfig {
    pub format: PointFormat,
    pub color_scale: ColorScale,
    pub generating_software: &'static str,
}

/// What a finished encode reported back: the accumulator state consumed at
/// header-backpatch time.
#[derive(Debug, Clone)]
pub struct EncodeSummary {
    pub points_written: u32,
    pub bounds: Bounds,
}

/// Streaming LAS writer.
///
/// Protocol: write a placeholder header, append one fixed-size record per
/// accepted sample, then seek back to offset 0 and rewrite the header with
/// the final count and bounds. The backpatch is the only non-append write,
/// so the destination must be a seekable file, never a pipe. A fatal error
/// mid-stream aborts without finalizing; the partial file is left on disk.
pub struct LasEncoder {
    config: EncoderConfig,
}

impl LasEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn encode(
        &self,
        source: &mut dyn PointSource,
        output: &Path,
    ) -> Result<EncodeSummary, ConvertError> {
        let file = File::create(output)?;
        let mut writer = BufWriter::new(file);

        Header::placeholder(self.config.format, self.config.generating_software)
            .write_to(&mut writer)?;

        let summary = match self.config.color_scale {
            ColorScale::Streaming => self.stream(source, &mut writer)?,
            ColorScale::Global => self.stream_buffered(source, &mut writer)?,
        };

        writer.seek(SeekFrom::Start(0))?;
        Header::finalized(
            self.config.format,
            self.config.generating_software,
            summary.points_written,
            &summary.bounds,
        )
        .write_to(&mut writer)?;
        writer.flush()?;

        Ok(summary)
    }

    fn stream<W: Write>(
        &self,
        source: &mut dyn PointSource,
        writer: &mut W,
    ) -> Result<EncodeSummary, ConvertError> {
        let mut bounds = Bounds::new();
        let mut points_written: u32 = 0;

        while let Some(sample) = source.next_sample()? {
            bounds.update(sample.x, sample.y, sample.z);
            let color = self.color_for(sample.z, bounds.min[2], bounds.max[2]);
            self.write_record(&sample, color, writer)?;
            points_written += 1;
        }

        Ok(EncodeSummary {
            points_written,
            bounds,
        })
    }

    fn stream_buffered<W: Write>(
        &self,
        source: &mut dyn PointSource,
        writer: &mut W,
    ) -> Result<EncodeSummary, ConvertError> {
        // the source is single-pass, so global normalization has to buffer
        let mut bounds = Bounds::new();
        let mut samples = Vec::new();
        while let Some(sample) = source.next_sample()? {
            bounds.update(sample.x, sample.y, sample.z);
            samples.push(sample);
        }

        let mut points_written: u32 = 0;
        for sample in &samples {
            let color = self.color_for(sample.z, bounds.min[2], bounds.max[2]);
            self.write_record(sample, color, writer)?;
            points_written += 1;
        }

        Ok(EncodeSummary {
            points_written,
            bounds,
        })
    }

    fn color_for(&self, z: f64, min_z: f64, max_z: f64) -> Option<Color> {
        match self.config.format {
            PointFormat::NoColor => None,
            PointFormat::Color => Some(colormap::elevation_color(normalize(z, min_z, max_z))),
        }
    }

    fn write_record<W: Write>(
        &self,
        sample: &RawSample,
        color: Option<Color>,
        writer: &mut W,
    ) -> Result<(), ConvertError> {
        let x = quantize(sample.x, "x")?;
        let y = quantize(sample.y, "y")?;
        let z = quantize(sample.z, "z")?;
        PointRecord::new(x, y, z, color).write_to(writer)?;
        Ok(())
    }
}

/// Zero span (the first point of a streaming encode, or a flat dataset)
/// normalizes to 0.
fn normalize(z: f64, min_z: f64, max_z: f64) -> f64 {
    let span = max_z - min_z;
    if span == 0.0 {
        0.0
    } else {
        (z - min_z) / span
    }
}
