use thiserror::Error;

/// Fatal failures of a conversion.
///
/// Malformed survey lines are not represented here: they are skipped with a
/// diagnostic and never abort a conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("coordinate {value} overflows the fixed-point range on the {axis} axis")]
    Range { axis: &'static str, value: f64 },
}
