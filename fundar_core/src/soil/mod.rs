//! # Layered Soil Model
//!
//! Site-investigation data as the engine consumes it: individual layers
//! ([`Stratum`]), the ordered column at a tower site ([`Profile`]) with its
//! aggregate queries, and the derived excavation backfill
//! ([`BackfillMaterial`]).
//!
//! ## Example
//!
//! ```rust
//! use fundar_core::soil::{MaterialClass, Profile, Stratum};
//!
//! let profile = Profile::new(
//!     vec![
//!         Stratum::cohesive(3.0, 17.5, 4_500.0, 35.0, 110.0),
//!         Stratum::granular(4.0, 19.0, 30_000.0, 34.0),
//!     ],
//!     Some(1.5),
//!     18.0,
//! ).unwrap();
//!
//! assert_eq!(profile.predominant_material(0.0, 7.0).unwrap(), MaterialClass::Granular);
//! ```

pub mod profile;
pub mod stratum;

pub use profile::{BackfillMaterial, MaterialPercentages, Profile};
pub use stratum::{MaterialClass, Stratum};
