use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use terrain_core::error::ConvertError;
use terrain_core::sample::RawSample;
use terrain_core::source::{PointSource, SourceProvider};

/// The six scalar fields of an ASC raster header.
#[derive(Debug, Clone, Copy)]
pub struct GridHeader {
    pub nrows: usize,
    pub ncols: usize,
    pub xllcorner: f64,
    pub yllcorner: f64,
    pub cellsize: f64,
    pub nodata: i32,
}

impl GridHeader {
    /// Parse the first six `KEY value` lines. Keys are matched by
    /// case-insensitive substring and may appear in any order; a missing or
    /// unparsable field is fatal.
    pub fn parse<R: BufRead>(reader: &mut R) -> Result<Self, ConvertError> {
        let mut nrows = None;
        let mut ncols = None;
        let mut xllcorner = None;
        let mut yllcorner = None;
        let mut cellsize = None;
        let mut nodata = None;

        for _ in 0..6 {
            let mut line = String::new();
            if reader.read_line(&mut line)? == 0 {
                return Err(ConvertError::Parse(
                    "raster header ended before six fields were read".to_string(),
                ));
            }
            let lower = line.to_lowercase();
            if lower.contains("nrows") {
                nrows = Some(header_value(&line, "nrows")?);
            } else if lower.contains("ncols") {
                ncols = Some(header_value(&line, "ncols")?);
            } else if lower.contains("xllcorner") {
                xllcorner = Some(header_value(&line, "xllcorner")?);
            } else if lower.contains("yllcorner") {
                yllcorner = Some(header_value(&line, "yllcorner")?);
            } else if lower.contains("cellsize") {
                cellsize = Some(header_value(&line, "cellsize")?);
            } else if lower.contains("nodata") {
                let value: f64 = header_value(&line, "nodata_value")?;
                nodata = Some(value.trunc() as i32);
            }
        }

        Ok(Self {
            nrows: require(nrows, "nrows")?,
            ncols: require(ncols, "ncols")?,
            xllcorner: require(xllcorner, "xllcorner")?,
            yllcorner: require(yllcorner, "yllcorner")?,
            cellsize: require(cellsize, "cellsize")?,
            nodata: require(nodata, "nodata_value")?,
        })
    }

    /// Sentinel policy: a cell is rejected when its integer-truncated
    /// elevation equals the declared sentinel, or equals -9999 when the
    /// declared sentinel is something else.
    pub fn is_nodata(&self, z: f64) -> bool {
        let truncated = z.trunc();
        truncated == f64::from(self.nodata) || (self.nodata != -9999 && truncated == -9999.0)
    }
}

fn header_value<T: FromStr>(line: &str, key: &'static str) -> Result<T, ConvertError> {
    line.split_whitespace()
        .nth(1)
        .ok_or_else(|| {
            ConvertError::Parse(format!("missing value for raster header field '{key}'"))
        })?
        .parse()
        .map_err(|_| ConvertError::Parse(format!("invalid value for raster header field '{key}'")))
}

fn require<T>(value: Option<T>, key: &'static str) -> Result<T, ConvertError> {
    value.ok_or_else(|| ConvertError::Parse(format!("raster header field '{key}' not found")))
}

pub struct GridSourceProvider {
    pub path: PathBuf,
}

impl SourceProvider for GridSourceProvider {
    fn get_source(&self) -> Result<Box<dyn PointSource>, ConvertError> {
        Ok(Box::new(GridSource::open(&self.path)?))
    }
}

/// Lazy raster source: one sample per non-sentinel cell, rows from the
/// northern edge downward, columns left to right.
pub struct GridSource {
    header: GridHeader,
    reader: BufReader<File>,
    tokens: VecDeque<String>,
    row: usize,
    col: usize,
}

impl GridSource {
    pub fn open(path: &Path) -> Result<Self, ConvertError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let header = GridHeader::parse(&mut reader)?;
        Ok(Self {
            header,
            reader,
            tokens: VecDeque::new(),
            row: 0,
            col: 0,
        })
    }

    pub fn header(&self) -> &GridHeader {
        &self.header
    }

    fn next_token(&mut self) -> Result<String, ConvertError> {
        loop {
            if let Some(token) = self.tokens.pop_front() {
                return Ok(token);
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Err(ConvertError::Parse(format!(
                    "raster body ended early at row {}, col {}",
                    self.row, self.col
                )));
            }
            self.tokens
                .extend(line.split_whitespace().map(str::to_string));
        }
    }
}

impl PointSource for GridSource {
    fn next_sample(&mut self) -> Result<Option<RawSample>, ConvertError> {
        while self.row < self.header.nrows {
            let (row, col) = (self.row, self.col);
            let token = self.next_token()?;
            self.col += 1;
            if self.col == self.header.ncols {
                self.col = 0;
                self.row += 1;
            }

            let z: f64 = token.parse().map_err(|_| {
                ConvertError::Parse(format!(
                    "invalid elevation '{token}' at row {row}, col {col}"
                ))
            })?;
            if self.header.is_nodata(z) {
                continue;
            }

            let x = self.header.xllcorner + col as f64 * self.header.cellsize;
            let y = self.header.yllcorner + self.header.nrows as f64 * self.header.cellsize
                - row as f64 * self.header.cellsize;
            return Ok(Some(RawSample::new(x, y, z)));
        }
        Ok(None)
    }
}
