use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use log::warn;

use terrain_core::error::ConvertError;
use terrain_core::sample::RawSample;
use terrain_core::source::{PointSource, SourceProvider};

/// Record-type code of a survey point line.
const POINT_RECORD_CODE: &str = "21";

/// Record code, point id, x and y. The z and feature-code fields are
/// optional.
const MIN_FIELDS: usize = 4;

pub struct SurveySourceProvider {
    pub path: PathBuf,
}

impl SourceProvider for SurveySourceProvider {
    fn get_source(&self) -> Result<Box<dyn PointSource>, ConvertError> {
        Ok(Box::new(SurveySource::open(&self.path)?))
    }
}

/// Lazy survey-vertex source: one sample per well-formed point-record line.
///
/// Lines with other record codes are ignored; malformed point lines are
/// skipped with a diagnostic and never abort the conversion.
pub struct SurveySource {
    lines: Lines<BufReader<File>>,
}

impl SurveySource {
    pub fn open(path: &Path) -> Result<Self, ConvertError> {
        let file = File::open(path)?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
        })
    }

    fn parse_line(line: &str) -> Option<RawSample> {
        if !line.starts_with(POINT_RECORD_CODE) {
            return None;
        }

        // whitespace anywhere in the line is insignificant
        let clean: String = line.chars().filter(|c| !c.is_whitespace()).collect();
        let fields: Vec<&str> = clean.split(',').collect();
        if fields.len() < MIN_FIELDS {
            warn!("Malformed line: {line}");
            return None;
        }

        let coordinate = |index: usize| -> Option<f64> {
            match fields[index].parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Malformed line: {line}");
                    None
                }
            }
        };

        let x = coordinate(2)?;
        let y = coordinate(3)?;
        let z = if fields.len() > 4 { coordinate(4)? } else { 0.0 };

        let feature_code = fields
            .get(5)
            .filter(|code| !code.is_empty())
            .map(|code| code.to_string());

        Some(RawSample {
            x,
            y,
            z,
            feature_code,
        })
    }
}

impl PointSource for SurveySource {
    fn next_sample(&mut self) -> Result<Option<RawSample>, ConvertError> {
        for line in self.lines.by_ref() {
            let line = line?;
            if let Some(sample) = Self::parse_line(&line) {
                return Ok(Some(sample));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write as _;

    fn survey_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn drain(source: &mut SurveySource) -> Vec<RawSample> {
        let mut samples = Vec::new();
        while let Some(sample) = source.next_sample().unwrap() {
            samples.push(sample);
        }
        samples
    }

    #[test]
    fn parses_a_point_record_with_feature_code() {
        let sample = SurveySource::parse_line("21,  1, 100.0, 200.0, 5.5, A.1").unwrap();
        assert_eq!(sample.x, 100.0);
        assert_eq!(sample.y, 200.0);
        assert_eq!(sample.z, 5.5);
        assert_eq!(sample.feature_code.as_deref(), Some("A.1"));
        assert!(sample.starts_new_feature());
    }

    #[test]
    fn skips_lines_with_other_record_codes() {
        assert!(SurveySource::parse_line("10,SURVEY HEADER").is_none());
        assert!(SurveySource::parse_line("").is_none());
    }

    #[test]
    fn too_few_fields_is_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = survey_file(
            &dir,
            "survey.001",
            "10,SURVEY HEADER\n\
             21,1,100.0\n\
             21,  1, 100.0, 200.0, 5.5, A.1\n\
             21, 2, 101.0, 201.0, 6.5\n",
        );

        let mut source = SurveySource::open(&path).unwrap();
        let samples = drain(&mut source);

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].z, 5.5);
        assert_eq!(samples[1], {
            let mut expected = RawSample::new(101.0, 201.0, 6.5);
            expected.feature_code = None;
            expected
        });
    }

    #[test]
    fn z_defaults_to_zero_when_absent() {
        let sample = SurveySource::parse_line("21,7,10.0,20.0").unwrap();
        assert_eq!(sample.z, 0.0);
        assert!(sample.feature_code.is_none());
    }

    #[test]
    fn unparsable_coordinate_is_skipped() {
        assert!(SurveySource::parse_line("21,1,abc,200.0,5.5").is_none());
    }
}
