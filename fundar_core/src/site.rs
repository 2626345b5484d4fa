//! # Site Data Structures
//!
//! The `Site` struct is the root container for one transmission-line
//! section: metadata plus the tower records (tower geometry and soil
//! profile) the search runs against. In-memory only; serialization is plain
//! JSON via serde.
//!
//! ## Structure
//!
//! ```text
//! Site
//! ├── meta: SiteMetadata (version, name, engineer, timestamps)
//! └── towers: HashMap<Uuid, TowerRecord> (tower + profile per location)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use fundar_core::site::{Site, TowerRecord};
//! use fundar_core::soil::{Profile, Stratum};
//! use fundar_core::tower::Tower;
//!
//! let mut site = Site::new("Norte 220 kV", "Jane Engineer");
//!
//! let profile = Profile::new(
//!     vec![Stratum::granular(8.0, 19.0, 30_000.0, 33.0)],
//!     None,
//!     19.0,
//! ).unwrap();
//! let id = site.add_tower(TowerRecord::new(Tower::new("T-1", 0.4, 1.8), profile));
//! assert!(site.towers.contains_key(&id));
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::soil::Profile;
use crate::tower::Tower;

/// Current schema version for serialized sites
pub const SCHEMA_VERSION: &str = "0.1.0";

/// One tower location: the tower record and its soil column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerRecord {
    /// Tower geometry and site overrides
    pub tower: Tower,

    /// Soil profile at the tower location
    pub profile: Profile,
}

impl TowerRecord {
    /// Pair a tower with its profile.
    pub fn new(tower: Tower, profile: Profile) -> Self {
        TowerRecord { tower, profile }
    }
}

/// Root container for one line section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    /// Site metadata (version, name, engineer, timestamps)
    pub meta: SiteMetadata,

    /// All tower records, keyed by UUID
    pub towers: HashMap<Uuid, TowerRecord>,
}

impl Site {
    /// Create a new empty site.
    pub fn new(name: impl Into<String>, engineer: impl Into<String>) -> Self {
        let now = Utc::now();
        Site {
            meta: SiteMetadata {
                version: SCHEMA_VERSION.to_string(),
                name: name.into(),
                engineer: engineer.into(),
                created: now,
                modified: now,
            },
            towers: HashMap::new(),
        }
    }

    /// Add a tower record; returns its assigned UUID.
    pub fn add_tower(&mut self, record: TowerRecord) -> Uuid {
        let id = Uuid::new_v4();
        self.towers.insert(id, record);
        self.touch();
        id
    }

    /// Remove a tower record by id.
    pub fn remove_tower(&mut self, id: &Uuid) -> Option<TowerRecord> {
        let removed = self.towers.remove(id);
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    /// Find a tower record by tower name.
    pub fn tower_by_name(&self, name: &str) -> Option<(&Uuid, &TowerRecord)> {
        self.towers.iter().find(|(_, r)| r.tower.name == name)
    }

    /// Update the modification timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

/// Site metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteMetadata {
    /// Schema version
    pub version: String,

    /// Line section or project name
    pub name: String,

    /// Responsible engineer
    pub engineer: String,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Last modification timestamp
    pub modified: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soil::Stratum;

    fn demo_record(name: &str) -> TowerRecord {
        let profile = Profile::new(
            vec![Stratum::granular(8.0, 19.0, 30_000.0, 33.0)],
            None,
            19.0,
        )
        .unwrap();
        TowerRecord::new(Tower::new(name, 0.4, 1.8), profile)
    }

    #[test]
    fn test_add_and_lookup() {
        let mut site = Site::new("Norte 220 kV", "Jane");
        let id = site.add_tower(demo_record("T-1"));
        site.add_tower(demo_record("T-2"));

        assert_eq!(site.towers.len(), 2);
        assert!(site.towers.contains_key(&id));
        let (found_id, record) = site.tower_by_name("T-1").unwrap();
        assert_eq!(found_id, &id);
        assert_eq!(record.tower.name, "T-1");
    }

    #[test]
    fn test_remove_tower() {
        let mut site = Site::new("Norte 220 kV", "Jane");
        let id = site.add_tower(demo_record("T-1"));
        assert!(site.remove_tower(&id).is_some());
        assert!(site.towers.is_empty());
        assert!(site.remove_tower(&id).is_none());
    }

    #[test]
    fn test_site_serialization() {
        let mut site = Site::new("Norte 220 kV", "Jane");
        site.add_tower(demo_record("T-1"));

        let json = serde_json::to_string_pretty(&site).unwrap();
        let parsed: Site = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.meta.name, "Norte 220 kV");
        assert_eq!(parsed.towers.len(), 1);
    }
}
