//! Calibration matrix for absolute devices.
//!
//! The matrix is the top two rows of a 3x3 affine transform applied to
//! normalised coordinates, written as six whitespace-separated numbers:
//! `"a b c d e f"` maps `(x, y)` to `(a*x + b*y + c, d*x + e*y + f)`.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CalibrationError {
    #[error("calibration matrix needs 6 values, got {0}")]
    WrongLength(usize),
    #[error("invalid calibration value '{0}'")]
    InvalidNumber(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct CalibrationMatrix(pub [f32; 6]);

impl CalibrationMatrix {
    pub const IDENTITY: Self = Self([1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);

    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_identity(&self) -> bool {
        self.0 == Self::IDENTITY.0
    }

    /// Apply the transform to a normalised point.
    #[must_use]
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        let [a, b, c, d, e, f] = self.0;
        (a * x + b * y + c, d * x + e * y + f)
    }
}

impl Default for CalibrationMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl FromStr for CalibrationMatrix {
    type Err = CalibrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split_whitespace()
            .map(|value| {
                value
                    .parse::<f32>()
                    .ok()
                    .filter(|parsed| parsed.is_finite())
                    .ok_or_else(|| CalibrationError::InvalidNumber(value.to_string()))
            })
            .collect::<Result<Vec<f32>, _>>()?;

        let matrix: [f32; 6] = values
            .as_slice()
            .try_into()
            .map_err(|_| CalibrationError::WrongLength(values.len()))?;
        Ok(Self(matrix))
    }
}

impl TryFrom<String> for CalibrationMatrix {
    type Error = CalibrationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for CalibrationMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a} {b} {c} {d} {e} {g}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_six_values() {
        let matrix: CalibrationMatrix = "1 0 0 0 1 0".parse().unwrap();
        assert!(matrix.is_identity());
    }

    #[test]
    fn should_parse_rotated_matrix_and_apply_it() {
        let matrix: CalibrationMatrix = "0 1 0 -1 0 1".parse().unwrap();
        assert_eq!(matrix.apply(0.25, 0.5), (0.5, 0.75));
    }

    #[test]
    fn should_reject_wrong_length() {
        let result = "1 0 0 0 1".parse::<CalibrationMatrix>();
        assert_eq!(result, Err(CalibrationError::WrongLength(5)));
    }

    #[test]
    fn should_reject_non_numeric_value() {
        let result = "1 0 x 0 1 0".parse::<CalibrationMatrix>();
        assert_eq!(result, Err(CalibrationError::InvalidNumber("x".to_string())));
    }

    #[test]
    fn should_reject_non_finite_value() {
        let result = "1 0 inf 0 1 0".parse::<CalibrationMatrix>();
        assert!(matches!(result, Err(CalibrationError::InvalidNumber(_))));
    }

    #[test]
    fn should_deserialize_from_toml_string() {
        #[derive(Deserialize)]
        struct Wrapper {
            calibration: CalibrationMatrix,
        }
        let parsed: Wrapper = toml::from_str("calibration = '1 0 0.5 0 1 0'").unwrap();
        assert_eq!(parsed.calibration.0[2], 0.5);
    }

    #[test]
    fn should_display_round_trip() {
        let matrix = CalibrationMatrix([2.0, 0.0, -0.5, 0.0, 1.0, 0.0]);
        assert_eq!(matrix.to_string(), "2 0 -0.5 0 1 0");
    }
}
