//! Collaborator directory interfaces: vendors, projects, item catalog.
//!
//! The procurement engine consumes these read-only. Vendor and project data
//! are owned elsewhere; the engine only needs existence and (for vendors)
//! the active flag. The catalog is pre-fill data for callers building order
//! lines — the engine itself never consults it.

pub mod directory;

pub use directory::{
    CatalogItem, CatalogLookup, DirectorySeed, InMemoryDirectory, ProjectLookup, ProjectRef,
    VendorLookup, VendorRef,
};
