//! Structural deformation from line angles

/// Angles that intact structures are built along, in degrees.
pub const CANONICAL_ANGLES: [f64; 4] = [0.0, 45.0, 90.0, 135.0];
/// Deviation above which a line counts as deformed.
pub const DEVIATION_TOLERANCE: f64 = 15.0;
/// Fewer lines than this give no deformation evidence.
pub const MIN_LINES: usize = 5;
/// Score added per deformed line.
pub const SCORE_PER_LINE: f64 = 0.1;

/// Smallest angular distance to a canonical angle, modulo 180 degrees.
pub fn deviation(angle: f64) -> f64 {
    let angle = angle.rem_euclid(180.0);
    CANONICAL_ANGLES
        .iter()
        .map(|canonical| {
            let d = (angle - canonical).abs();
            d.min(180.0 - d)
        })
        .fold(f64::INFINITY, f64::min)
}

/// Deformation score in `[0, 1]`.
pub fn score(line_angles: &[f64]) -> f64 {
    if line_angles.len() < MIN_LINES {
        return 0.0;
    }
    let deformed = line_angles
        .iter()
        .filter(|&&angle| deviation(angle) > DEVIATION_TOLERANCE)
        .count();
    (deformed as f64 * SCORE_PER_LINE).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_deviation_wraps() {
        assert_relative_eq!(deviation(0.0), 0.0);
        assert_relative_eq!(deviation(179.0), 1.0);
        assert_relative_eq!(deviation(22.5), 22.5);
        assert_relative_eq!(deviation(100.0), 10.0);
        assert_relative_eq!(deviation(-10.0), 10.0);
    }

    #[test]
    fn test_too_few_lines() {
        assert_eq!(score(&[20.0, 25.0, 30.0, 65.0]), 0.0);
    }

    #[test]
    fn test_counts_deviating_lines() {
        let angles = [0.0, 90.0, 45.0, 20.0, 70.0, 112.0];
        // 20, 70 and 112 deviate by more than 15 degrees
        assert_relative_eq!(score(&angles), 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_score_caps_at_one() {
        let angles = vec![22.0; 30];
        assert_eq!(score(&angles), 1.0);
    }
}
