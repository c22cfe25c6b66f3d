use crate::error::ConvertError;
use crate::sample::RawSample;

/// Pull seam between the text sources and the binary encoder.
///
/// A source is lazy, finite and non-restartable: every accepted sample is
/// produced exactly once, rejected entries are skipped internally, and a
/// fatal error ends the sequence.
pub trait PointSource {
    /// Next accepted sample, or `Ok(None)` once the source is exhausted.
    fn next_sample(&mut self) -> Result<Option<RawSample>, ConvertError>;
}

pub trait SourceProvider {
    fn get_source(&self) -> Result<Box<dyn PointSource>, ConvertError>;
}
