//! Life Kernel: the sparse live-cell set, generation stepping, seeding and
//! deterministic replay.
//!
//! # Invariants
//! - A generation is computed entirely from a read-only snapshot of the
//!   previous one.
//! - All state mutations flow through explicit operations.

pub mod seed;
pub mod world;

pub use lifespace_common::{Bounds, Cell, LifeError};
pub use seed::{SeedConfig, Seeder};
pub use world::{World, WorldEvent};
