//! # Hub Settings
//!
//! Tunables for a [`NucleusHub`](crate::hub::NucleusHub). Every field has a
//! default, so a settings document only needs the keys it overrides.
//!
//! ## Example
//!
//! ```rust
//! use nucleus_core::settings::HubSettings;
//!
//! let settings = HubSettings::from_json(r#"{ "default_recent_limit": 5 }"#).unwrap();
//! assert_eq!(settings.default_recent_limit, 5);
//! assert_eq!(settings.default_design, "pump");
//! ```

use serde::{Deserialize, Serialize};

use crate::designs::DEFAULT_DESIGN_ID;
use crate::errors::{NucleusError, NucleusResult};

/// Global hub settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubSettings {
    /// Design evaluated when a request names none
    pub default_design: String,

    /// Page size for material listings when none is requested
    pub default_list_limit: usize,

    /// Upper bound for material listing page size
    pub max_list_limit: usize,

    /// Number of entries in the recent-materials view when none is requested
    pub default_recent_limit: usize,

    /// Upper bound for the recent-materials view
    pub max_recent_limit: usize,

    /// Attribution used when a submission leaves the contributor blank
    pub anonymous_contributor: String,
}

impl Default for HubSettings {
    fn default() -> Self {
        HubSettings {
            default_design: DEFAULT_DESIGN_ID.to_string(),
            default_list_limit: 100,
            max_list_limit: 100,
            default_recent_limit: 20,
            max_recent_limit: 50,
            anonymous_contributor: "Anonymous".to_string(),
        }
    }
}

impl HubSettings {
    /// Parse a (possibly partial) JSON settings document and validate it.
    pub fn from_json(json: &str) -> NucleusResult<Self> {
        let settings: HubSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings values.
    pub fn validate(&self) -> NucleusResult<()> {
        if self.default_design.trim().is_empty() {
            return Err(NucleusError::missing_field("default_design"));
        }
        check_limit("default_list_limit", self.default_list_limit, "max_list_limit", self.max_list_limit)?;
        check_limit(
            "default_recent_limit",
            self.default_recent_limit,
            "max_recent_limit",
            self.max_recent_limit,
        )?;
        Ok(())
    }

    /// Resolve a requested listing size against the configured bounds.
    pub fn list_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_list_limit)
            .clamp(1, self.max_list_limit)
    }

    /// Resolve a requested recent-view size against the configured bounds.
    pub fn recent_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_recent_limit)
            .clamp(1, self.max_recent_limit)
    }
}

fn check_limit(default_field: &str, default: usize, max_field: &str, max: usize) -> NucleusResult<()> {
    if max == 0 {
        return Err(NucleusError::invalid_input(max_field, "0", "Limit must be at least 1"));
    }
    if default == 0 || default > max {
        return Err(NucleusError::invalid_input(
            default_field,
            default.to_string(),
            format!("Must be between 1 and {} ({})", max, max_field),
        ));
    }
    Ok(())
}
