//! # Design Catalog
//!
//! Static mapping from a design id to its ordered parts. Each part carries
//! the strength it needs (`req`) and the thickness it has when built from a
//! material that exactly meets that strength (`orig`).
//!
//! ## Example
//!
//! ```rust
//! use nucleus_core::designs::{DesignCatalog, PartSelector};
//!
//! let catalog = DesignCatalog::seeded();
//! let handle = catalog.get_part("pump", &PartSelector::default()).unwrap();
//! assert_eq!(handle.id, "handle");
//!
//! let body = catalog.get_part("pump", &PartSelector::Id("body".into())).unwrap();
//! assert_eq!(body.req, 80.0);
//! ```

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{NucleusError, NucleusResult};

/// Id of the design used when a request names none
pub const DEFAULT_DESIGN_ID: &str = "pump";

/// One structural part of a design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignPart {
    /// Part id, unique within its design
    pub id: String,

    /// Required-strength threshold under baseline material
    pub req: f64,

    /// Baseline thickness when strength exactly meets `req`
    pub orig: f64,
}

impl DesignPart {
    /// Create a part, checking that both dimensions are usable.
    ///
    /// A zero `req` is reported as `DivisionUndefined`.
    pub fn new(id: impl Into<String>, req: f64, orig: f64) -> NucleusResult<Self> {
        let part = DesignPart {
            id: id.into(),
            req,
            orig,
        };
        part.validate()?;
        Ok(part)
    }

    /// Validate the part dimensions.
    pub fn validate(&self) -> NucleusResult<()> {
        if self.req == 0.0 {
            return Err(NucleusError::division_undefined("req"));
        }
        if !self.req.is_finite() || self.req < 0.0 {
            return Err(NucleusError::invalid_input(
                "req",
                self.req.to_string(),
                "Required strength must be a positive number",
            ));
        }
        if !self.orig.is_finite() || self.orig <= 0.0 {
            return Err(NucleusError::invalid_input(
                "orig",
                self.orig.to_string(),
                "Baseline thickness must be a positive number",
            ));
        }
        Ok(())
    }
}

/// A named design made of ordered parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Design {
    /// Display name
    pub name: String,

    /// Parts in catalog order
    pub parts: Vec<DesignPart>,
}

/// How to address a part inside a design.
///
/// ## JSON
///
/// ```json
/// { "index": 1 }
/// { "id": "body" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartSelector {
    /// Position in the design's part list
    Index(usize),
    /// Part id
    Id(String),
}

impl Default for PartSelector {
    fn default() -> Self {
        PartSelector::Index(0)
    }
}

impl PartSelector {
    /// Parse CLI-style text: digits select by index, anything else by id.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<usize>() {
            Ok(index) => PartSelector::Index(index),
            Err(_) => PartSelector::Id(raw.to_string()),
        }
    }
}

impl std::fmt::Display for PartSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PartSelector::Index(i) => write!(f, "#{}", i),
            PartSelector::Id(id) => write!(f, "{}", id),
        }
    }
}

static SEED_DESIGNS: Lazy<BTreeMap<String, Design>> = Lazy::new(|| {
    let mut designs = BTreeMap::new();
    designs.insert(
        DEFAULT_DESIGN_ID.to_string(),
        Design {
            name: "Manual Water Pump".to_string(),
            parts: vec![
                DesignPart {
                    id: "handle".to_string(),
                    req: 50.0,
                    orig: 20.0,
                },
                DesignPart {
                    id: "body".to_string(),
                    req: 80.0,
                    orig: 15.0,
                },
            ],
        },
    );
    designs
});

/// Read-only catalog of designs.
#[derive(Debug, Clone, Default)]
pub struct DesignCatalog {
    designs: BTreeMap<String, Design>,
}

impl DesignCatalog {
    /// Catalog with the built-in designs.
    pub fn seeded() -> Self {
        DesignCatalog {
            designs: (*SEED_DESIGNS).clone(),
        }
    }

    /// Build a catalog from explicit designs.
    ///
    /// Every part is validated up front so lookups never hand out a part
    /// with `req <= 0`.
    pub fn from_designs(designs: impl IntoIterator<Item = (String, Design)>) -> NucleusResult<Self> {
        let designs: BTreeMap<_, _> = designs.into_iter().collect();
        for design in designs.values() {
            for part in &design.parts {
                part.validate()?;
            }
        }
        Ok(DesignCatalog { designs })
    }

    /// Look up a design by id.
    pub fn get_design(&self, design_id: &str) -> NucleusResult<&Design> {
        self.designs
            .get(design_id)
            .ok_or_else(|| NucleusError::not_found("Design", design_id))
    }

    /// Look up a part of a design.
    pub fn get_part(&self, design_id: &str, selector: &PartSelector) -> NucleusResult<&DesignPart> {
        let design = self.get_design(design_id)?;
        let part = match selector {
            PartSelector::Index(index) => design.parts.get(*index),
            PartSelector::Id(id) => design.parts.iter().find(|p| &p.id == id),
        };
        part.ok_or_else(|| NucleusError::not_found("Part", format!("{}/{}", design_id, selector)))
    }

    /// Design ids with their designs, sorted by id.
    pub fn designs(&self) -> impl Iterator<Item = (&str, &Design)> {
        self.designs.iter().map(|(id, d)| (id.as_str(), d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selector_is_first_part() {
        let catalog = DesignCatalog::seeded();
        let part = catalog.get_part(DEFAULT_DESIGN_ID, &PartSelector::default()).unwrap();
        assert_eq!(part.id, "handle");
        assert_eq!(part.req, 50.0);
        assert_eq!(part.orig, 20.0);
    }

    #[test]
    fn test_select_by_index_and_id() {
        let catalog = DesignCatalog::seeded();
        let by_index = catalog.get_part("pump", &PartSelector::Index(1)).unwrap();
        let by_id = catalog.get_part("pump", &PartSelector::Id("body".to_string())).unwrap();
        assert_eq!(by_index, by_id);
        assert_eq!(by_id.orig, 15.0);
    }

    #[test]
    fn test_missing_design_and_part() {
        let catalog = DesignCatalog::seeded();
        assert_eq!(
            catalog.get_part("windmill", &PartSelector::default()).unwrap_err(),
            NucleusError::not_found("Design", "windmill")
        );
        assert_eq!(
            catalog.get_part("pump", &PartSelector::Index(5)).unwrap_err(),
            NucleusError::not_found("Part", "pump/#5")
        );
    }

    #[test]
    fn test_part_validation() {
        assert!(matches!(
            DesignPart::new("p", 0.0, 10.0),
            Err(NucleusError::DivisionUndefined { .. })
        ));
        assert!(matches!(
            DesignPart::new("p", -5.0, 10.0),
            Err(NucleusError::InvalidInput { .. })
        ));
        assert!(matches!(
            DesignPart::new("p", 5.0, 0.0),
            Err(NucleusError::InvalidInput { .. })
        ));
        assert!(DesignPart::new("p", 5.0, 1.0).is_ok());
    }

    #[test]
    fn test_from_designs_rejects_zero_req() {
        let bad = Design {
            name: "Bad".to_string(),
            parts: vec![DesignPart {
                id: "x".to_string(),
                req: 0.0,
                orig: 1.0,
            }],
        };
        assert!(DesignCatalog::from_designs([("bad".to_string(), bad)]).is_err());
    }

    #[test]
    fn test_selector_parse_and_json() {
        assert_eq!(PartSelector::parse("1"), PartSelector::Index(1));
        assert_eq!(PartSelector::parse("body"), PartSelector::Id("body".to_string()));

        let json = serde_json::to_string(&PartSelector::Id("body".to_string())).unwrap();
        assert_eq!(json, r#"{"id":"body"}"#);
        let parsed: PartSelector = serde_json::from_str(r#"{"index":1}"#).unwrap();
        assert_eq!(parsed, PartSelector::Index(1));
    }
}
