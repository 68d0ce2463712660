//! # Materials
//!
//! Material records and the community-extensible registry that holds them.
//!
//! ## Material Types
//!
//! - **standard**: conventional engineering stock (steel)
//! - **eco**: renewable, low-carbon materials (bamboo, palm fronds)
//! - **waste**: reclaimed or recycled feedstock (shredded plastic)
//! - **user_added**: anything submitted by the community
//!
//! The type drives which usage tip the advisor attaches to a result.
//!
//! ## Example
//!
//! ```rust
//! use nucleus_core::materials::{MaterialRegistry, MaterialType};
//!
//! let mut registry = MaterialRegistry::seeded();
//! let steel = registry.lookup("steel").unwrap();
//! assert_eq!(steel.material_type, MaterialType::Standard);
//!
//! let olive = registry.append("Olive Wood", 55.0, "Lab_X").unwrap();
//! assert_eq!(olive.material_type, MaterialType::UserAdded);
//! ```

pub mod registry;

pub use registry::MaterialRegistry;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{NucleusError, NucleusResult};

/// Lowest accepted strength score
pub const MIN_STRENGTH: f64 = 1.0;

/// Highest accepted strength score (steel sits at the top of the scale)
pub const MAX_STRENGTH: f64 = 100.0;

/// Carbon descriptor used when a material's embodied-carbon savings are unknown
pub const UNKNOWN_CARBON: &str = "unknown";

/// Categorical tag for a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialType {
    /// Conventional engineering material
    Standard,
    /// Renewable / bio-based material
    Eco,
    /// Recycled or reclaimed waste stream
    Waste,
    /// Community submission
    UserAdded,
}

impl MaterialType {
    /// Get the wire code (e.g., "user_added")
    pub fn code(&self) -> &'static str {
        match self {
            MaterialType::Standard => "standard",
            MaterialType::Eco => "eco",
            MaterialType::Waste => "waste",
            MaterialType::UserAdded => "user_added",
        }
    }
}

impl std::fmt::Display for MaterialType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A single material in the registry.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "bamboo",
///   "name": "Bamboo Wood",
///   "strength": 60.0,
///   "carbon": "95%",
///   "type": "eco",
///   "contributor": "Core Team"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    /// Stable unique identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Abstract relative-strength score in `MIN_STRENGTH..=MAX_STRENGTH`
    pub strength: f64,

    /// Embodied-carbon savings descriptor (free-form, e.g. "95%")
    #[serde(default)]
    pub carbon: Option<String>,

    /// Category tag
    #[serde(rename = "type")]
    pub material_type: MaterialType,

    /// Free-text attribution
    pub contributor: String,
}

impl MaterialRecord {
    /// Create a record with every field supplied.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        strength: f64,
        carbon: Option<&str>,
        material_type: MaterialType,
        contributor: impl Into<String>,
    ) -> Self {
        MaterialRecord {
            id: id.into(),
            name: name.into(),
            strength,
            carbon: carbon.map(str::to_string),
            material_type,
            contributor: contributor.into(),
        }
    }

    /// Carbon descriptor, falling back to [`UNKNOWN_CARBON`]
    pub fn carbon_or_unknown(&self) -> &str {
        self.carbon.as_deref().unwrap_or(UNKNOWN_CARBON)
    }
}

impl std::fmt::Display for MaterialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.material_type)
    }
}

/// Materials present at startup, in display order.
pub static SEED_MATERIALS: Lazy<Vec<MaterialRecord>> = Lazy::new(|| {
    vec![
        MaterialRecord::new("steel", "Industrial Steel", 100.0, Some("0%"), MaterialType::Standard, "System"),
        MaterialRecord::new("bamboo", "Bamboo Wood", 60.0, Some("95%"), MaterialType::Eco, "Core Team"),
        MaterialRecord::new("pvc_waste", "Recycled Plastic", 30.0, Some("85%"), MaterialType::Waste, "Green_Lab"),
        MaterialRecord::new("palm", "Treated Palm Fronds", 45.0, Some("98%"), MaterialType::Eco, "Egypt_Branch"),
    ]
});

/// Check that a strength score is usable by the advisor.
///
/// The score must be finite and lie in `MIN_STRENGTH..=MAX_STRENGTH`.
/// Subnormal positives would underflow the strength ratio to zero.
pub fn validate_strength(strength: f64) -> NucleusResult<f64> {
    if !strength.is_finite() {
        return Err(NucleusError::invalid_input(
            "strength",
            strength.to_string(),
            "Strength must be a finite number",
        ));
    }
    if !(MIN_STRENGTH..=MAX_STRENGTH).contains(&strength) {
        return Err(NucleusError::invalid_input(
            "strength",
            strength.to_string(),
            format!("Strength must be between {} and {}", MIN_STRENGTH, MAX_STRENGTH),
        ));
    }
    Ok(strength)
}

/// Parse a strength score from user text (e.g. a form field).
pub fn parse_strength(raw: &str) -> NucleusResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(NucleusError::missing_field("strength"));
    }
    let value: f64 = trimmed.parse().map_err(|_| {
        NucleusError::invalid_input("strength", trimmed, "Strength must be numeric")
    })?;
    validate_strength(value)
}
