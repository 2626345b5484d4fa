//! Structural load cases for transmission-tower foundations
//!
//! The tower analysis produces a catalogue of governing load cases; the
//! foundation engine only ever sees force triples looked up by case name.
//!
//! # Overview
//!
//! - [`LoadKind`] - Working (service) vs design (factored) values
//! - [`LoadCaseName`] - The five catalogue cases the stability checks consume
//! - [`LoadTriple`] - One vertical and two horizontal force magnitudes
//! - [`LoadProvider`] - The lookup interface, bound to a single tower
//! - [`LoadTable`] - HashMap-backed provider for tabulated catalogues
//!
//! # Example
//!
//! ```
//! use fundar_core::loads::{LoadCaseName, LoadKind, LoadTable, LoadTriple, LoadProvider};
//!
//! let table = LoadTable::new()
//!     .with_case(LoadKind::Working, LoadCaseName::MaxCompression,
//!                LoadTriple::new(420.0, 35.0, 28.0))
//!     .with_case(LoadKind::Working, LoadCaseName::MaxTension,
//!                LoadTriple::new(180.0, 30.0, 22.0));
//!
//! let triple = table.loads(LoadKind::Working, LoadCaseName::MaxCompression).unwrap();
//! assert_eq!(triple.vertical_kn, 420.0);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{DesignError, DesignResult};

/// Working (service) vs design (factored) load values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LoadKind {
    /// Unfactored service loads, used by the geotechnical checks
    #[default]
    Working,
    /// Factored loads, used by structural proportioning downstream
    Design,
}

impl LoadKind {
    /// Short abbreviation
    pub fn code(&self) -> &'static str {
        match self {
            LoadKind::Working => "working",
            LoadKind::Design => "design",
        }
    }
}

impl std::fmt::Display for LoadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// The five governing load cases of the tower catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadCaseName {
    /// Maximum leg compression
    MaxCompression,
    /// Sustained (EDS) share of the maximum compression, for consolidation
    MaxCompressionSustained,
    /// Maximum leg tension (uplift)
    MaxTension,
    /// Maximum longitudinal horizontal load
    MaxLongitudinal,
    /// Maximum transversal horizontal load
    MaxTransversal,
}

impl LoadCaseName {
    /// All catalogue cases
    pub const ALL: [LoadCaseName; 5] = [
        LoadCaseName::MaxCompression,
        LoadCaseName::MaxCompressionSustained,
        LoadCaseName::MaxTension,
        LoadCaseName::MaxLongitudinal,
        LoadCaseName::MaxTransversal,
    ];

    /// Short catalogue name
    pub fn code(&self) -> &'static str {
        match self {
            LoadCaseName::MaxCompression => "max-compression",
            LoadCaseName::MaxCompressionSustained => "max-compression-eds",
            LoadCaseName::MaxTension => "max-tension",
            LoadCaseName::MaxLongitudinal => "max-longitudinal",
            LoadCaseName::MaxTransversal => "max-transversal",
        }
    }
}

impl std::fmt::Display for LoadCaseName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One vertical and two horizontal force magnitudes (kN).
///
/// Values are magnitudes; the sign/direction convention is fixed by the
/// caller (the checks consume verticals and horizontal resultants).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LoadTriple {
    /// Vertical force (kN)
    pub vertical_kn: f64,
    /// Horizontal force in the line (longitudinal) direction (kN)
    pub longitudinal_kn: f64,
    /// Horizontal force across the line (transversal) direction (kN)
    pub transversal_kn: f64,
}

impl LoadTriple {
    /// Create a new load triple
    pub fn new(vertical_kn: f64, longitudinal_kn: f64, transversal_kn: f64) -> Self {
        LoadTriple {
            vertical_kn,
            longitudinal_kn,
            transversal_kn,
        }
    }

    /// Resultant of the two horizontal components (kN)
    pub fn resultant_horizontal_kn(&self) -> f64 {
        (self.longitudinal_kn.powi(2) + self.transversal_kn.powi(2)).sqrt()
    }
}

/// Lookup interface for the load catalogue of one tower.
///
/// Implementations are bound to a single tower; the engine never inspects
/// the catalogue itself.
pub trait LoadProvider {
    /// Return the force triple for a load kind and case name.
    fn loads(&self, kind: LoadKind, case: LoadCaseName) -> DesignResult<LoadTriple>;
}

/// HashMap-backed load provider for tabulated catalogues.
///
/// # JSON Format
/// ```json
/// {
///   "cases": [
///     [["Working", "MaxCompression"], { "vertical_kn": 420.0,
///       "longitudinal_kn": 35.0, "transversal_kn": 28.0 }]
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadTable {
    /// Force triples keyed by (kind, case)
    cases: Vec<((LoadKind, LoadCaseName), LoadTriple)>,
}

impl LoadTable {
    /// Create an empty table
    pub fn new() -> Self {
        LoadTable { cases: Vec::new() }
    }

    /// Add or replace a case (builder pattern)
    pub fn with_case(mut self, kind: LoadKind, case: LoadCaseName, triple: LoadTriple) -> Self {
        self.set_case(kind, case, triple);
        self
    }

    /// Add or replace a case (mutable)
    pub fn set_case(&mut self, kind: LoadKind, case: LoadCaseName, triple: LoadTriple) {
        if let Some(entry) = self.cases.iter_mut().find(|(k, _)| *k == (kind, case)) {
            entry.1 = triple;
        } else {
            self.cases.push(((kind, case), triple));
        }
    }

    /// Check whether a case is defined
    pub fn has(&self, kind: LoadKind, case: LoadCaseName) -> bool {
        self.cases.iter().any(|(k, _)| *k == (kind, case))
    }

    /// Number of defined cases
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Build a table from an iterator of entries
    pub fn from_entries(
        entries: impl IntoIterator<Item = (LoadKind, LoadCaseName, LoadTriple)>,
    ) -> Self {
        let mut table = LoadTable::new();
        for (kind, case, triple) in entries {
            table.set_case(kind, case, triple);
        }
        table
    }

    /// View as a map for reporting
    pub fn as_map(&self) -> HashMap<(LoadKind, LoadCaseName), LoadTriple> {
        self.cases.iter().copied().collect()
    }
}

impl LoadProvider for LoadTable {
    fn loads(&self, kind: LoadKind, case: LoadCaseName) -> DesignResult<LoadTriple> {
        self.cases
            .iter()
            .find(|(k, _)| *k == (kind, case))
            .map(|(_, t)| *t)
            .ok_or_else(|| DesignError::missing_load_case(kind.code(), case.code()))
    }
}
