//! # Nucleus Hub
//!
//! The `NucleusHub` is the store object every operation runs against. It
//! owns the material registry, the design catalog and the activity feed,
//! and implements the two workflows exposed to callers:
//!
//! - **Evaluate**: resolve a material and a part, run the thickness advisor
//! - **Submit**: validate a community material, append it, record it in the feed
//!
//! ## Structure
//!
//! ```text
//! NucleusHub
//! ├── meta: HubMetadata (version, timestamps)
//! ├── settings: HubSettings (default design, listing limits)
//! ├── registry: MaterialRegistry (insertion order)
//! ├── catalog: DesignCatalog (read-only)
//! └── feed: ActivityFeed (newest first)
//! ```
//!
//! State lives for the lifetime of the hub only. Each test can build its
//! own isolated hub.
//!
//! ## Example
//!
//! ```rust
//! use nucleus_core::hub::{EvaluateRequest, NucleusHub, StrengthInput, SubmitRequest};
//!
//! let mut hub = NucleusHub::new();
//!
//! let result = hub.evaluate(&EvaluateRequest::for_material("steel")).unwrap();
//! assert_eq!(result.thickness, 20.0);
//!
//! let response = hub.submit(&SubmitRequest {
//!     name: Some("Olive Wood".to_string()),
//!     strength: Some(StrengthInput::Text("55".to_string())),
//!     contributor: Some("Lab_X".to_string()),
//! }).unwrap();
//! assert!(response.success);
//! assert_eq!(hub.feed().latest(), Some("Lab_X added material: Olive Wood"));
//! ```

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::calculations::thickness::{self, AdvisoryResult};
use crate::designs::{DesignCatalog, DesignPart, PartSelector};
use crate::errors::{NucleusError, NucleusResult};
use crate::feed::{submission_entry, ActivityFeed};
use crate::materials::{parse_strength, validate_strength, MaterialRecord, MaterialRegistry};
use crate::settings::HubSettings;

/// Current schema version of hub snapshots
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Hub metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubMetadata {
    /// Schema version of snapshots
    pub version: String,

    /// When the hub was created
    pub created: DateTime<Utc>,

    /// When the hub last accepted a submission
    pub modified: DateTime<Utc>,
}

impl HubMetadata {
    fn now() -> Self {
        let now = Utc::now();
        HubMetadata {
            version: SCHEMA_VERSION.to_string(),
            created: now,
            modified: now,
        }
    }
}

/// Caller-supplied part dimensions, used instead of a catalogued part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CustomPart {
    /// Required-strength threshold
    #[serde(alias = "partRequirement")]
    pub req: f64,

    /// Baseline thickness
    #[serde(alias = "originalThickness")]
    pub orig: f64,
}

/// Input of the Evaluate operation.
///
/// ## JSON Example
///
/// ```json
/// { "material_id": "bamboo", "design_id": "pump", "part": { "id": "body" } }
/// ```
///
/// `design_id` and `part` default to the configured design and its first
/// part. `custom_part` replaces the catalog lookup entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluateRequest {
    /// Material to evaluate
    #[serde(default, alias = "materialId", alias = "mat_id")]
    pub material_id: String,

    /// Design id
    #[serde(default, alias = "designId", skip_serializing_if = "Option::is_none")]
    pub design_id: Option<String>,

    /// Part within the design
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part: Option<PartSelector>,

    /// Ad-hoc part dimensions
    #[serde(default, alias = "customPart", skip_serializing_if = "Option::is_none")]
    pub custom_part: Option<CustomPart>,
}

impl EvaluateRequest {
    /// Request against the default design's first part.
    pub fn for_material(material_id: impl Into<String>) -> Self {
        EvaluateRequest {
            material_id: material_id.into(),
            ..Default::default()
        }
    }

    /// Select a design.
    pub fn with_design(mut self, design_id: impl Into<String>) -> Self {
        self.design_id = Some(design_id.into());
        self
    }

    /// Select a part.
    pub fn with_part(mut self, part: PartSelector) -> Self {
        self.part = Some(part);
        self
    }

    /// Evaluate against explicit dimensions instead of the catalog.
    pub fn with_custom_part(mut self, req: f64, orig: f64) -> Self {
        self.custom_part = Some(CustomPart { req, orig });
        self
    }
}

/// Strength as it arrives from a form or JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StrengthInput {
    Number(f64),
    Text(String),
}

impl StrengthInput {
    /// Convert to a validated strength score.
    pub fn resolve(&self) -> NucleusResult<f64> {
        match self {
            StrengthInput::Number(value) => validate_strength(*value),
            StrengthInput::Text(raw) => parse_strength(raw),
        }
    }
}

impl From<f64> for StrengthInput {
    fn from(value: f64) -> Self {
        StrengthInput::Number(value)
    }
}

impl From<&str> for StrengthInput {
    fn from(raw: &str) -> Self {
        StrengthInput::Text(raw.to_string())
    }
}

/// Input of the Submit operation.
///
/// ## JSON Example
///
/// ```json
/// { "name": "Olive Wood", "strength": "55", "contributor": "Lab_X" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub strength: Option<StrengthInput>,
    #[serde(default)]
    pub contributor: Option<String>,
}

/// Output of the Submit operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,

    /// Id assigned to the new material
    pub material_id: String,
}

/// Listing filter for materials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialQuery {
    /// Case-insensitive name substring
    #[serde(default)]
    pub search: Option<String>,

    /// Maximum number of records
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Read-only view of the hub for rendering or export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubSnapshot {
    pub meta: HubMetadata,

    /// Materials in insertion order
    pub materials: Vec<MaterialRecord>,

    /// Feed entries, newest first
    pub feed: Vec<String>,
}

/// In-memory store for materials, designs and the activity feed.
#[derive(Debug, Clone)]
pub struct NucleusHub {
    /// Hub metadata (version, timestamps)
    pub meta: HubMetadata,

    /// Hub settings
    pub settings: HubSettings,

    registry: MaterialRegistry,
    catalog: DesignCatalog,
    feed: ActivityFeed,
}

impl NucleusHub {
    /// Create a hub with the seed materials, built-in designs and an empty feed.
    pub fn new() -> Self {
        NucleusHub {
            meta: HubMetadata::now(),
            settings: HubSettings::default(),
            registry: MaterialRegistry::seeded(),
            catalog: DesignCatalog::seeded(),
            feed: ActivityFeed::new(),
        }
    }

    /// Create a seeded hub with custom settings.
    pub fn with_settings(settings: HubSettings) -> NucleusResult<Self> {
        NucleusHub::from_parts(
            settings,
            MaterialRegistry::seeded(),
            DesignCatalog::seeded(),
            ActivityFeed::new(),
        )
    }

    /// Assemble a hub from explicit components.
    ///
    /// Fails if the settings are invalid or name a design the catalog lacks.
    pub fn from_parts(
        settings: HubSettings,
        registry: MaterialRegistry,
        catalog: DesignCatalog,
        feed: ActivityFeed,
    ) -> NucleusResult<Self> {
        settings.validate()?;
        catalog.get_design(&settings.default_design)?;
        Ok(NucleusHub {
            meta: HubMetadata::now(),
            settings,
            registry,
            catalog,
            feed,
        })
    }

    pub fn registry(&self) -> &MaterialRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &DesignCatalog {
        &self.catalog
    }

    pub fn feed(&self) -> &ActivityFeed {
        &self.feed
    }

    /// Resolve the part an Evaluate request targets.
    pub fn resolve_part(&self, request: &EvaluateRequest) -> NucleusResult<DesignPart> {
        if let Some(custom) = request.custom_part {
            if request.design_id.is_some() || request.part.is_some() {
                return Err(NucleusError::invalid_input(
                    "custom_part",
                    format!("req={}, orig={}", custom.req, custom.orig),
                    "Cannot be combined with design_id or part",
                ));
            }
            return DesignPart::new("custom", custom.req, custom.orig);
        }

        let design_id = request
            .design_id
            .as_deref()
            .unwrap_or(self.settings.default_design.as_str());
        let selector = request.part.clone().unwrap_or_default();
        self.catalog.get_part(design_id, &selector).cloned()
    }

    /// Evaluate a material against a part.
    ///
    /// # Errors
    ///
    /// - `MissingField` if `material_id` is blank
    /// - `NotFound` for an unknown material, design or part
    /// - `InvalidInput` / `DivisionUndefined` from the advisor
    pub fn evaluate(&self, request: &EvaluateRequest) -> NucleusResult<AdvisoryResult> {
        let material_id = request.material_id.trim();
        if material_id.is_empty() {
            return Err(NucleusError::missing_field("material_id"));
        }

        let material = self.registry.lookup(material_id)?;
        let part = self.resolve_part(request)?;
        debug!("evaluating {} against part {}", material.id, part.id);

        thickness::evaluate(material, &part)
    }

    /// Accept a community material submission.
    ///
    /// Appends the material to the registry, then records a feed entry.
    /// Nothing is changed when validation fails.
    pub fn submit(&mut self, request: &SubmitRequest) -> NucleusResult<SubmitResponse> {
        let name = request
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| NucleusError::missing_field("name"))?;
        let strength = request
            .strength
            .as_ref()
            .ok_or_else(|| NucleusError::missing_field("strength"))?
            .resolve()?;
        let contributor = request
            .contributor
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(self.settings.anonymous_contributor.as_str())
            .to_string();

        let material_id = self.registry.append(name, strength, &contributor)?.id.clone();
        self.feed.record(submission_entry(&contributor, name));
        self.touch();

        info!("{} submitted material '{}' as {}", contributor, name, material_id);

        Ok(SubmitResponse {
            success: true,
            material_id,
        })
    }

    /// Materials matching a query, insertion order.
    pub fn list_materials(&self, query: &MaterialQuery) -> Vec<&MaterialRecord> {
        let limit = self.settings.list_limit(query.limit);
        self.registry
            .search(query.search.as_deref().unwrap_or(""), limit)
    }

    /// Most recently added materials, newest first.
    pub fn recent_materials(&self, limit: Option<usize>) -> Vec<&MaterialRecord> {
        self.registry.recent(self.settings.recent_limit(limit))
    }

    /// Read-only copy of the hub state.
    pub fn snapshot(&self) -> HubSnapshot {
        HubSnapshot {
            meta: self.meta.clone(),
            materials: self.registry.list().to_vec(),
            feed: self.feed.list(),
        }
    }

    /// Render the snapshot as pretty JSON.
    pub fn to_json_pretty(&self) -> NucleusResult<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for NucleusHub {
    fn default() -> Self {
        NucleusHub::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::MaterialType;

    fn submission(name: &str, strength: StrengthInput, contributor: &str) -> SubmitRequest {
        SubmitRequest {
            name: Some(name.to_string()),
            strength: Some(strength),
            contributor: Some(contributor.to_string()),
        }
    }

    #[test]
    fn test_evaluate_default_part() {
        let hub = NucleusHub::new();
        let result = hub.evaluate(&EvaluateRequest::for_material("steel")).unwrap();
        assert_eq!(result.thickness, 20.0);
        assert!(!result.ribs_required);
        assert_eq!(result.carbon, "0%");
        assert_eq!(result.tip, "Excellent design!");
    }

    #[test]
    fn test_evaluate_seeded_materials_on_handle() {
        let hub = NucleusHub::new();
        let cases = [("bamboo", 20.0, false), ("pvc_waste", 25.8, true), ("palm", 21.1, true)];
        for (id, thickness, ribs) in cases {
            let result = hub.evaluate(&EvaluateRequest::for_material(id)).unwrap();
            assert_eq!(result.thickness, thickness, "{}", id);
            assert_eq!(result.ribs_required, ribs, "{}", id);
        }
    }

    #[test]
    fn test_evaluate_selected_part() {
        let hub = NucleusHub::new();
        let request = EvaluateRequest::for_material("pvc_waste")
            .with_design("pump")
            .with_part(PartSelector::Id("body".to_string()));
        let result = hub.evaluate(&request).unwrap();
        assert_eq!(result.thickness, 24.5);
        assert!(result.ribs_required);
        assert_eq!(result.carbon, "85%");
    }

    #[test]
    fn test_evaluate_custom_part() {
        let hub = NucleusHub::new();
        let request = EvaluateRequest::for_material("steel").with_custom_part(50.0, 20.0);
        assert_eq!(hub.evaluate(&request).unwrap().thickness, 20.0);

        let zero = EvaluateRequest::for_material("steel").with_custom_part(0.0, 20.0);
        assert_eq!(hub.evaluate(&zero).unwrap_err(), NucleusError::division_undefined("req"));

        let mixed = EvaluateRequest::for_material("steel")
            .with_design("pump")
            .with_custom_part(50.0, 20.0);
        assert_eq!(hub.evaluate(&mixed).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_evaluate_unknown_material() {
        let hub = NucleusHub::new();
        let err = hub.evaluate(&EvaluateRequest::for_material("unobtainium")).unwrap_err();
        assert_eq!(err, NucleusError::material_not_found("unobtainium"));

        let err = hub.evaluate(&EvaluateRequest::for_material("  ")).unwrap_err();
        assert_eq!(err, NucleusError::missing_field("material_id"));
    }

    #[test]
    fn test_submit_scenario() {
        let mut hub = NucleusHub::new();
        let before = hub.registry().len();

        let response = hub.submit(&submission("Olive Wood", "55".into(), "Lab_X")).unwrap();
        assert!(response.success);
        assert_eq!(hub.registry().len(), before + 1);

        let record = hub.registry().lookup(&response.material_id).unwrap();
        assert_eq!(record.material_type, MaterialType::UserAdded);
        assert_eq!(record.carbon.as_deref(), Some("unknown"));
        assert_eq!(record.strength, 55.0);

        let latest = hub.feed().latest().unwrap();
        assert!(latest.contains("Lab_X"));
        assert!(latest.contains("Olive Wood"));
    }

    #[test]
    fn test_submitted_material_is_evaluable() {
        let mut hub = NucleusHub::new();
        let response = hub.submit(&submission("Cork", StrengthInput::Number(25.0), "Lab_Y")).unwrap();
        let result = hub.evaluate(&EvaluateRequest::for_material(response.material_id)).unwrap();
        assert_eq!(result.thickness, 28.3);
        assert_eq!(result.carbon, "unknown");
        assert_eq!(result.tip, "Excellent design!");
    }

    #[test]
    fn test_submit_rejections_leave_state_untouched() {
        let mut hub = NucleusHub::new();
        let before = hub.registry().len();

        let missing_name = SubmitRequest {
            strength: Some("10".into()),
            ..Default::default()
        };
        assert_eq!(hub.submit(&missing_name).unwrap_err(), NucleusError::missing_field("name"));

        let missing_strength = SubmitRequest {
            name: Some("Clay".to_string()),
            ..Default::default()
        };
        assert_eq!(hub.submit(&missing_strength).unwrap_err(), NucleusError::missing_field("strength"));

        let bad_strength = submission("Clay", "very strong".into(), "x");
        assert_eq!(hub.submit(&bad_strength).unwrap_err().error_code(), "INVALID_INPUT");

        assert_eq!(hub.registry().len(), before);
        assert!(hub.feed().is_empty());
    }

    #[test]
    fn test_out_of_range_strength_never_reaches_the_advisor() {
        let mut hub = NucleusHub::new();
        let before = hub.registry().len();

        for raw in ["5e-324", "0.5", "250"] {
            let err = hub.submit(&submission("Dust", raw.into(), "x")).unwrap_err();
            assert_eq!(err.field(), Some("strength"), "{}", raw);
            assert_eq!(err.error_code(), "INVALID_INPUT", "{}", raw);
        }
        let err = hub.submit(&submission("Dust", StrengthInput::Number(5e-324), "x")).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        assert_eq!(hub.registry().len(), before);
        assert!(hub.feed().is_empty());
    }

    #[test]
    fn test_custom_part_overflow_is_an_error() {
        let hub = NucleusHub::new();
        let request = EvaluateRequest::for_material("steel").with_custom_part(50.0, 1e308);
        let err = hub.evaluate(&request).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert_eq!(err.field(), Some("orig"));
    }

    #[test]
    fn test_blank_contributor_is_anonymous() {
        let mut hub = NucleusHub::new();
        hub.submit(&submission("Jute", "40".into(), "  ")).unwrap();
        assert_eq!(hub.feed().latest(), Some("Anonymous added material: Jute"));
    }

    #[test]
    fn test_feed_order_across_submissions() {
        let mut hub = NucleusHub::new();
        for name in ["A", "B", "C"] {
            hub.submit(&submission(name, "10".into(), "lab")).unwrap();
        }
        assert_eq!(
            hub.feed().list(),
            ["lab added material: C", "lab added material: B", "lab added material: A"]
        );
    }

    #[test]
    fn test_listing() {
        let mut hub = NucleusHub::new();
        hub.submit(&submission("Olive Wood", "55".into(), "Lab_X")).unwrap();

        let all = hub.list_materials(&MaterialQuery::default());
        assert_eq!(all.len(), 5);
        assert_eq!(all[0].id, "steel");

        let wood = hub.list_materials(&MaterialQuery {
            search: Some("wood".to_string()),
            limit: None,
        });
        assert_eq!(wood.len(), 2);

        let recent = hub.recent_materials(Some(1));
        assert_eq!(recent[0].name, "Olive Wood");
    }

    #[test]
    fn test_settings_must_name_known_design() {
        let settings = HubSettings {
            default_design: "windmill".to_string(),
            ..Default::default()
        };
        assert!(NucleusHub::with_settings(settings).is_err());
    }

    #[test]
    fn test_snapshot_json() {
        let mut hub = NucleusHub::new();
        hub.submit(&submission("Olive Wood", "55".into(), "Lab_X")).unwrap();
        let json = hub.to_json_pretty().unwrap();
        let parsed: HubSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.materials.len(), 5);
        assert_eq!(parsed.feed, ["Lab_X added material: Olive Wood"]);
        assert_eq!(parsed.meta.version, SCHEMA_VERSION);
    }

    #[test]
    fn test_request_json_aliases() {
        let request: EvaluateRequest = serde_json::from_str(r#"{ "materialId": "palm" }"#).unwrap();
        assert_eq!(request.material_id, "palm");

        let submit: SubmitRequest =
            serde_json::from_str(r#"{ "name": "Olive Wood", "strength": 55, "contributor": "Lab_X" }"#).unwrap();
        assert_eq!(submit.strength, Some(StrengthInput::Number(55.0)));
    }
}
