/// One raw elevation sample pulled from a point source.
///
/// The feature code is carried through from survey sources only; the binary
/// encoder ignores it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub feature_code: Option<String>,
}

impl RawSample {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            feature_code: None,
        }
    }

    /// A `.` in the feature code marks the start of a new polyline feature.
    pub fn starts_new_feature(&self) -> bool {
        self.feature_code
            .as_deref()
            .is_some_and(|code| code.contains('.'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_code_dot_starts_new_feature() {
        let mut sample = RawSample::new(100.0, 200.0, 5.5);
        assert!(!sample.starts_new_feature());

        sample.feature_code = Some("A1".to_string());
        assert!(!sample.starts_new_feature());

        sample.feature_code = Some("A.1".to_string());
        assert!(sample.starts_new_feature());
    }
}
