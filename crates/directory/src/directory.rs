use std::collections::HashMap;
use std::sync::RwLock;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use procura_core::{ProjectId, VendorId};

/// Vendor identity as seen by the engine: immutable for the duration of an
/// order's life.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorRef {
    pub id: VendorId,
    pub name: String,
    pub category: String,
    pub active: bool,
}

/// Project reference; no behavior beyond existence-lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: ProjectId,
    pub name: String,
}

/// Orderable catalog entry used to pre-fill order lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: String,
    pub unit: String,
    pub unit_price: Decimal,
    pub gst_rate: Decimal,
}

/// Read-only vendor lookup.
pub trait VendorLookup: Send + Sync {
    fn vendor(&self, id: VendorId) -> Option<VendorRef>;
}

/// Read-only project lookup.
pub trait ProjectLookup: Send + Sync {
    fn project(&self, id: ProjectId) -> Option<ProjectRef>;
}

/// Read-only catalog lookup.
pub trait CatalogLookup: Send + Sync {
    fn items_for_project(&self, project_id: ProjectId) -> Vec<CatalogItem>;
}

/// Seed data for the in-memory directory (loaded from JSON in dev/test).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectorySeed {
    #[serde(default)]
    pub vendors: Vec<VendorRef>,
    #[serde(default)]
    pub projects: Vec<ProjectRef>,
    #[serde(default)]
    pub catalog: HashMap<ProjectId, Vec<CatalogItem>>,
}

/// In-memory directory for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    vendors: RwLock<HashMap<VendorId, VendorRef>>,
    projects: RwLock<HashMap<ProjectId, ProjectRef>>,
    catalog: RwLock<HashMap<ProjectId, Vec<CatalogItem>>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: DirectorySeed) -> Self {
        let dir = Self::new();
        for vendor in seed.vendors {
            dir.insert_vendor(vendor);
        }
        for project in seed.projects {
            dir.insert_project(project);
        }
        for (project_id, items) in seed.catalog {
            dir.set_catalog(project_id, items);
        }
        dir
    }

    pub fn insert_vendor(&self, vendor: VendorRef) {
        match self.vendors.write() {
            Ok(mut map) => {
                map.insert(vendor.id, vendor);
            }
            Err(_) => tracing::warn!(vendor_id = %vendor.id, "directory lock poisoned; vendor dropped"),
        }
    }

    pub fn insert_project(&self, project: ProjectRef) {
        match self.projects.write() {
            Ok(mut map) => {
                map.insert(project.id, project);
            }
            Err(_) => tracing::warn!(project_id = %project.id, "directory lock poisoned; project dropped"),
        }
    }

    pub fn set_catalog(&self, project_id: ProjectId, items: Vec<CatalogItem>) {
        match self.catalog.write() {
            Ok(mut map) => {
                map.insert(project_id, items);
            }
            Err(_) => tracing::warn!(%project_id, "directory lock poisoned; catalog dropped"),
        }
    }
}

impl VendorLookup for InMemoryDirectory {
    fn vendor(&self, id: VendorId) -> Option<VendorRef> {
        let map = self.vendors.read().ok()?;
        map.get(&id).cloned()
    }
}

impl ProjectLookup for InMemoryDirectory {
    fn project(&self, id: ProjectId) -> Option<ProjectRef> {
        let map = self.projects.read().ok()?;
        map.get(&id).cloned()
    }
}

impl CatalogLookup for InMemoryDirectory {
    fn items_for_project(&self, project_id: ProjectId) -> Vec<CatalogItem> {
        let map = match self.catalog.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };
        map.get(&project_id).cloned().unwrap_or_default()
    }
}
