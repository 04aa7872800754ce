//! Developer Tooling: read-only inspection of a life world.
//!
//! # Invariants
//! - Inspection never mutates the world.

mod inspector;

pub use inspector::{WorldInspector, WorldSummary};

pub fn crate_info() -> &'static str {
    "lifespace-tools v0.1.0"
}
