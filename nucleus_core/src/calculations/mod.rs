//! # Calculations
//!
//! Pure advisory calculations. Each calculation follows the pattern:
//!
//! - inputs are plain records borrowed from the registry and catalog
//! - `*Result` - calculation results (JSON-serializable)
//! - `evaluate(...) -> NucleusResult<*Result>` - pure calculation function
//!
//! ## Available Calculations
//!
//! - [`thickness`] - Wall thickness and rib advice for a material/part pair

pub mod thickness;

pub use thickness::{evaluate, AdvisoryResult, AdvisoryTip};

/// Round half away from zero to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(24.4949, 1), 24.5);
        assert_eq!(round_to(20.0, 1), 20.0);
        assert_eq!(round_to(0.6124, 3), 0.612);
        assert_eq!(round_to(-1.25, 1), -1.3);
    }
}
