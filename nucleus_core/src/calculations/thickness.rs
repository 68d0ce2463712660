//! # Wall Thickness Advisor
//!
//! Scales a part's baseline thickness to a candidate material.
//!
//! ## Method
//!
//! ```text
//! ratio  = strength / req
//! factor = 1.0              if ratio >= 1   (no ribs)
//!        = 1 / sqrt(ratio)  if ratio <  1   (ribs required)
//! thickness = round(orig * factor, 1)
//! ```
//!
//! Bending capacity grows faster than linearly with section depth, so a
//! strength shortfall is covered by a super-linear thickness increase plus a
//! reinforcement flag. A material stronger than required never thins the
//! part below its baseline.
//!
//! ## Example
//!
//! ```rust
//! use nucleus_core::calculations::thickness::evaluate;
//! use nucleus_core::designs::DesignPart;
//! use nucleus_core::materials::{MaterialRecord, MaterialType};
//!
//! let material = MaterialRecord::new("m", "Weak Board", 30.0, None, MaterialType::Standard, "x");
//! let part = DesignPart::new("body", 80.0, 15.0).unwrap();
//!
//! let result = evaluate(&material, &part).unwrap();
//! assert_eq!(result.thickness, 24.5);
//! assert!(result.ribs_required);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use super::round_to;
use crate::designs::DesignPart;
use crate::errors::{NucleusError, NucleusResult};
use crate::materials::{validate_strength, MaterialRecord, MaterialType};

/// Ratio below which the part needs aggressive reinforcement
pub const SEVERE_RATIO: f64 = 0.6;

/// Ratio below which the part needs moderate reinforcement
pub const MODERATE_RATIO: f64 = 0.85;

/// Usage tip attached to every result, chosen by material type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryTip {
    /// Recycled feedstock must be cleaned before melting
    CleanBeforeMelting,
    /// Bio-based material needs a protective oil coat
    ProtectiveOilCoating,
    /// Nothing special to watch for
    ExcellentDesign,
}

impl AdvisoryTip {
    /// Select the tip for a material type.
    pub fn for_material(material_type: MaterialType) -> Self {
        match material_type {
            MaterialType::Waste => AdvisoryTip::CleanBeforeMelting,
            MaterialType::Eco => AdvisoryTip::ProtectiveOilCoating,
            MaterialType::Standard | MaterialType::UserAdded => AdvisoryTip::ExcellentDesign,
        }
    }

    /// Human-readable message
    pub fn message(&self) -> &'static str {
        match self {
            AdvisoryTip::CleanBeforeMelting => {
                "Caution: clean the plastic thoroughly before melting to ensure proper bonding."
            }
            AdvisoryTip::ProtectiveOilCoating => {
                "Tip: coat the material with linseed oil to protect it from moisture."
            }
            AdvisoryTip::ExcellentDesign => "Excellent design!",
        }
    }
}

impl std::fmt::Display for AdvisoryTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Result of evaluating a material against a part.
///
/// ## JSON Example
///
/// ```json
/// {
///   "thickness": 25.8,
///   "ratio": 0.6,
///   "carbon": "85%",
///   "ribs": true,
///   "tip": "Caution: clean the plastic thoroughly before melting to ensure proper bonding.",
///   "hints": ["Add 2-3 longitudinal ribs", "..."]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryResult {
    /// Required wall thickness, one decimal place
    pub thickness: f64,

    /// Strength ratio, three decimal places
    pub ratio: f64,

    /// Carbon descriptor passed through from the material
    pub carbon: String,

    /// Whether reinforcing ribs are needed
    #[serde(rename = "ribs")]
    pub ribs_required: bool,

    /// Usage tip for the material type
    pub tip: String,

    /// Reinforcement hints for the ratio band
    pub hints: Vec<String>,
}

impl AdvisoryResult {
    /// Whether the material is at least as strong as the part requires
    pub fn meets_requirement(&self) -> bool {
        !self.ribs_required
    }
}

/// Compute the thickness scaling factor for a strength ratio.
///
/// Returns `(factor, ribs_required)`.
pub fn scaling_factor(ratio: f64) -> (f64, bool) {
    if ratio >= 1.0 {
        (1.0, false)
    } else {
        (1.0 / ratio.sqrt(), true)
    }
}

/// Reinforcement hints for a strength ratio.
pub fn reinforcement_hints(ratio: f64) -> Vec<String> {
    let hints: &[&str] = if ratio < SEVERE_RATIO {
        &[
            "Add X-ribs across the span",
            "Increase fillet radii at corners to reduce stress concentration",
            "Add a closed-section rib or box-beam feature where possible",
            "Reduce unsupported length (add standoffs or intermediate supports)",
        ]
    } else if ratio < MODERATE_RATIO {
        &[
            "Add 2-3 longitudinal ribs",
            "Thicken around fasteners and load paths",
            "Add gussets at joints",
        ]
    } else if ratio < 1.0 {
        &[
            "Add light ribbing near high-stress areas",
            "Keep consistent wall thickness and avoid sharp internal corners",
        ]
    } else {
        &[
            "Maintain uniform thickness to avoid warping",
            "Consider weight-reduction pockets while keeping rib support",
        ]
    };
    hints.iter().map(|h| h.to_string()).collect()
}

/// Evaluate a material against a design part.
///
/// # Errors
///
/// - `DivisionUndefined` if `part.req` is zero
/// - `InvalidInput` if the part dimensions or the material strength are not
///   positive finite numbers, or if the scaled thickness overflows
pub fn evaluate(material: &MaterialRecord, part: &DesignPart) -> NucleusResult<AdvisoryResult> {
    part.validate()?;
    let strength = validate_strength(material.strength)?;

    let ratio = strength / part.req;
    let (factor, ribs_required) = scaling_factor(ratio);
    let thickness = round_to(part.orig * factor, 1);
    if !thickness.is_finite() {
        return Err(NucleusError::invalid_input(
            "orig",
            part.orig.to_string(),
            format!("Scaled thickness overflows (factor {:.3})", factor),
        ));
    }

    debug!(
        "evaluate {} on {}: ratio={:.3} factor={:.3} thickness={}",
        material.id, part.id, ratio, factor, thickness
    );

    Ok(AdvisoryResult {
        thickness,
        ratio: round_to(ratio, 3),
        carbon: material.carbon_or_unknown().to_string(),
        ribs_required,
        tip: AdvisoryTip::for_material(material.material_type).message().to_string(),
        hints: reinforcement_hints(ratio),
    })
}
