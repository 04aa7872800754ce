use lifespace_common::Cell;
use lifespace_kernel::World;
use serde::Serialize;

/// World inspector for developer tooling.
///
/// Provides read-only queries against the world state for debugging
/// and command-line output.
pub struct WorldInspector;

impl WorldInspector {
    /// Produce a summary of the world state.
    pub fn summary(world: &World) -> WorldSummary {
        WorldSummary {
            generation: world.generation(),
            live_cells: world.count(),
            bounding_box: Self::bounding_box(world),
            pending_events: world.events().len(),
        }
    }

    /// List all live cells in canonical order.
    pub fn list_cells(world: &World) -> Vec<Cell> {
        world.live_cells().iter().copied().collect()
    }

    /// Smallest inclusive rectangle holding every live cell, as its
    /// (min, max) corners. `None` for an empty world.
    pub fn bounding_box(world: &World) -> Option<(Cell, Cell)> {
        let mut cells = world.live_cells().iter();
        let first = *cells.next()?;
        Some(cells.fold((first, first), |(min, max), c| {
            (
                Cell::new(min.x.min(c.x), min.y.min(c.y)),
                Cell::new(max.x.max(c.x), max.y.max(c.y)),
            )
        }))
    }

    /// Whether `cell` is alive.
    pub fn contains(world: &World, cell: Cell) -> bool {
        world.contains(cell)
    }
}

/// Summary of world state for the inspector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorldSummary {
    pub generation: u64,
    pub live_cells: usize,
    pub bounding_box: Option<(Cell, Cell)>,
    pub pending_events: usize,
}

impl std::fmt::Display for WorldSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "World: generation={} live={} pending_events={}",
            self.generation, self.live_cells, self.pending_events
        )?;
        match self.bounding_box {
            Some((min, max)) => write!(f, " bbox={min}..={max}"),
            None => write!(f, " bbox=none"),
        }
    }
}
