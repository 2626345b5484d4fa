//! # Foundation Design Search
//!
//! The grid-search optimizer and its ranked result set.
//!
//! # Overview
//!
//! - [`Optimizer`] - enumerates (width, depth) pairs, adjusts for rock and
//!   water, evaluates pedestal heights and retains ranked candidates
//! - [`CandidateSolution`] - one ranked entry with its aggregated outcomes
//! - [`Score`] - the deterministic lexicographic ranking key
//! - [`classify`] - pure insertion under a
//!   [`RetentionPolicy`](crate::config::RetentionPolicy)
//!
//! # Example
//!
//! ```no_run
//! use fundar_core::config::SearchConfig;
//! use fundar_core::search::Optimizer;
//! # use fundar_core::loads::LoadTable;
//! # use fundar_core::physics::PhysicsFactory;
//! # use fundar_core::soil::Profile;
//! # use fundar_core::tower::Tower;
//! # fn run(tower: Tower, profile: Profile, loads: LoadTable,
//! #        factory: Box<dyn PhysicsFactory>) -> fundar_core::errors::DesignResult<()> {
//! let config = SearchConfig::default();
//! let optimizer = Optimizer::new(&config);
//! let ranked = optimizer.search(&tower, &profile, &loads, factory.as_ref())?;
//! if let Some(best) = ranked.first() {
//!     println!("B = {} m, D = {} m", best.width_m, best.depth_m);
//! }
//! # Ok(())
//! # }
//! ```

pub mod candidate;
pub mod optimizer;

pub use candidate::{classify, CandidateSolution, Score};
pub use optimizer::Optimizer;
