//! # fundar_core - Foundation Design Search Engine
//!
//! `fundar_core` finds admissible (or least-non-compliant) spread-footing
//! geometries for electrical-transmission-tower foundations: a layered soil
//! model with aggregate queries, a five-check stability evaluator driven by
//! an external physics oracle, and a deterministic width/depth grid-search
//! optimizer.
//!
//! ## Design Philosophy
//!
//! - **Deterministic**: identical inputs always produce the identical ranked
//!   candidate list
//! - **JSON-First**: all public types implement Serialize/Deserialize
//! - **Rich Errors**: structured error types, not just strings
//! - **Oracle at the seam**: the geotechnical equations sit behind the
//!   [`physics::FoundationPhysics`] trait; this crate owns the search, not
//!   the formulas
//!
//! ## Quick Start
//!
//! ```rust
//! use fundar_core::soil::{Profile, Stratum};
//!
//! // Layered column with the water table at 2 m
//! let profile = Profile::new(
//!     vec![
//!         Stratum::granular(2.0, 18.0, 20_000.0, 30.0),
//!         Stratum::cohesive(6.0, 17.5, 4_500.0, 35.0, 110.0),
//!     ],
//!     Some(2.0),
//!     18.0,
//! ).unwrap();
//!
//! assert_eq!(profile.water_table_m(), Some(2.0));
//! ```
//!
//! ## Modules
//!
//! - [`soil`] - strata, profiles and aggregate queries
//! - [`loads`] - tower load cases and the lookup interface
//! - [`physics`] - footing geometry and the external physics oracle
//! - [`evaluate`] - the fixed stability-check battery
//! - [`search`] - the grid-search optimizer and ranked candidates
//! - [`config`] - the typed search configuration
//! - [`tower`] - per-tower geometry and site overrides
//! - [`site`] - in-memory container of tower records
//! - [`units`] - unit newtypes and decimeter-grid helpers
//! - [`errors`] - structured error types

pub mod config;
pub mod errors;
pub mod evaluate;
pub mod loads;
pub mod physics;
pub mod search;
pub mod site;
pub mod soil;
pub mod tower;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use config::{RetentionPolicy, SearchConfig};
pub use errors::{DesignError, DesignResult};
pub use search::{CandidateSolution, Optimizer};
pub use soil::{Profile, Stratum};
pub use tower::Tower;
