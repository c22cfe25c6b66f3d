/// Running per-axis min/max over the raw coordinates of accepted points.
///
/// The extremes are the raw values, never the quantized ones.
#[derive(Debug, Clone)]
pub struct Bounds {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: [f64::MAX, f64::MAX, f64::MAX],
            max: [f64::MIN, f64::MIN, f64::MIN],
        }
    }
}

impl Bounds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, x: f64, y: f64, z: f64) {
        self.min[0] = self.min[0].min(x);
        self.min[1] = self.min[1].min(y);
        self.min[2] = self.min[2].min(z);
        self.max[0] = self.max[0].max(x);
        self.max[1] = self.max[1].max(y);
        self.max[2] = self.max[2].max(z);
    }

    /// True until the first point has been folded in.
    pub fn is_empty(&self) -> bool {
        self.min[0] > self.max[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_extremes_in_acceptance_order() {
        let mut bounds = Bounds::new();
        assert!(bounds.is_empty());

        bounds.update(0.0, 1.0, 1.0);
        bounds.update(1.0, 1.0, 2.0);
        bounds.update(1.0, 0.0, 4.0);

        assert!(!bounds.is_empty());
        assert_eq!(bounds.min, [0.0, 0.0, 1.0]);
        assert_eq!(bounds.max, [1.0, 1.0, 4.0]);
    }

    #[test]
    fn single_point_is_degenerate_box() {
        let mut bounds = Bounds::new();
        bounds.update(-3.5, 7.0, 0.25);
        assert_eq!(bounds.min, bounds.max);
    }
}
