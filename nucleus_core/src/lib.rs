//! # nucleus_core - Material Advisory Engine
//!
//! `nucleus_core` answers one question: given a candidate material and a
//! target part, how thick must the part's wall be, and does it need ribs?
//! It also keeps a community-extensible material registry and an activity
//! feed of contributions. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Explicit store**: all state lives in a [`NucleusHub`] passed to each operation
//! - **Pure advisor**: the thickness calculation is a function of material and part
//! - **Rich Errors**: structured error types, recovered at the API boundary
//!
//! ## Quick Start
//!
//! ```rust
//! use nucleus_core::hub::{EvaluateRequest, NucleusHub};
//!
//! let hub = NucleusHub::new();
//! let result = hub.evaluate(&EvaluateRequest::for_material("pvc_waste")).unwrap();
//!
//! assert!(result.ribs_required);
//! println!("{}", serde_json::to_string_pretty(&result).unwrap());
//! ```
//!
//! ## Modules
//!
//! - [`materials`] - Material records and the registry
//! - [`designs`] - Design catalog and part addressing
//! - [`calculations`] - The thickness advisor
//! - [`feed`] - Activity feed
//! - [`hub`] - Store object and the Evaluate/Submit workflows
//! - [`shared`] - Lock-protected hub handle for threaded transports
//! - [`api`] - Error-recovering entry points for transports
//! - [`settings`] - Hub configuration
//! - [`errors`] - Structured error types

pub mod api;
pub mod calculations;
pub mod designs;
pub mod errors;
pub mod feed;
pub mod hub;
pub mod materials;
pub mod settings;
pub mod shared;

// Re-export commonly used types at crate root for convenience
pub use calculations::{AdvisoryResult, AdvisoryTip};
pub use designs::{DesignCatalog, DesignPart, PartSelector};
pub use errors::{NucleusError, NucleusResult};
pub use feed::ActivityFeed;
pub use hub::{EvaluateRequest, NucleusHub, SubmitRequest, SubmitResponse};
pub use materials::{MaterialRecord, MaterialRegistry, MaterialType};
pub use settings::HubSettings;
pub use shared::SharedHub;
