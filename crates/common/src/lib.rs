//! Shared types for the lifespace crates: cell coordinates, seeding bounds,
//! the pattern catalog and the common error type.

mod error;
pub mod pattern;
mod types;

pub use error::LifeError;
pub use pattern::Pattern;
pub use types::{Bounds, Cell, MOORE_OFFSETS};
