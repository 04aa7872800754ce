use lifespace_common::{Bounds, Cell, LifeError};
use rand::Rng;
use std::collections::{BTreeSet, HashSet};

/// An event record produced by every mutation to a recording world.
///
/// Advancing is deterministic, so a baseline plus inserted cells and the
/// sequence of advances are enough to reconstruct any generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldEvent {
    /// Full state at the point the log starts: when recording is enabled on
    /// a non-empty world, or after the log is drained.
    Baseline { generation: u64, cells: Vec<Cell> },
    /// A dead cell was made alive by insertion or seeding.
    Inserted { cell: Cell },
    /// The world advanced to `generation`.
    Advanced {
        generation: u64,
        born: usize,
        died: usize,
    },
}

/// The set of live cells on an unbounded grid.
///
/// Presence in the set means alive, absence means dead. Uses BTreeSet so
/// iteration and hashing follow one canonical order on every platform.
///
/// Event recording is off by default, so a world can advance indefinitely
/// in bounded memory. Turn it on with [`World::recording`] or
/// [`World::set_recording`] when the log is needed for replay.
#[derive(Debug, Clone, Default)]
pub struct World {
    cells: BTreeSet<Cell>,
    generation: u64,
    record_events: bool,
    /// Append-only event log of all mutations while recording.
    event_log: Vec<WorldEvent>,
}

impl World {
    /// Create an empty world at generation 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty world at generation 0 that records its events.
    pub fn recording() -> Self {
        Self {
            record_events: true,
            ..Default::default()
        }
    }

    /// Create a world whose live set is exactly `cells`. Duplicates collapse.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        let mut world = Self::new();
        world.extend(cells);
        world
    }

    /// Number of advances applied so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of live cells.
    pub fn count(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell is alive.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Read-only view of the live cells.
    pub fn live_cells(&self) -> &BTreeSet<Cell> {
        &self.cells
    }

    /// Whether `cell` is alive.
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Whether mutations are being appended to the event log.
    pub fn is_recording(&self) -> bool {
        self.record_events
    }

    /// Start or stop recording events.
    ///
    /// Starting on a non-empty world logs a baseline of the current state.
    /// Stopping discards the log.
    pub fn set_recording(&mut self, on: bool) {
        if on == self.record_events {
            return;
        }
        self.record_events = on;
        if on {
            self.push_baseline();
        } else {
            self.event_log = Vec::new();
        }
    }

    /// Drain and return the event log.
    ///
    /// While recording, the log restarts from a baseline of the current
    /// state, so whatever is logged next still replays on its own.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        let drained = std::mem::take(&mut self.event_log);
        if self.record_events {
            self.push_baseline();
        }
        drained
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[WorldEvent] {
        &self.event_log
    }

    /// Make `cell` alive. Returns false if it already was.
    pub fn insert(&mut self, cell: Cell) -> bool {
        let inserted = self.cells.insert(cell);
        if inserted {
            self.record(WorldEvent::Inserted { cell });
        }
        inserted
    }

    /// Insert `count` cells drawn uniformly from `bounds`.
    ///
    /// Draws are independent; a repeated coordinate is kept once, so the live
    /// count grows by at most `count`.
    pub fn seed_random<R: Rng + ?Sized>(&mut self, rng: &mut R, count: usize, bounds: Bounds) {
        let before = self.count();
        for _ in 0..count {
            let x = rng.random_range(bounds.x_min()..bounds.x_max());
            let y = rng.random_range(bounds.y_min()..bounds.y_max());
            self.insert(Cell::new(x, y));
        }
        tracing::debug!(
            requested = count,
            added = self.count() - before,
            %bounds,
            "seeded world"
        );
    }

    /// Replace the live set with the next generation.
    ///
    /// The current set is moved out and kept read-only as the snapshot every
    /// neighbor lookup goes through; the next generation is built in a fresh
    /// buffer and swapped in at the end.
    pub fn advance(&mut self) {
        let _span = tracing::debug_span!("advance", generation = self.generation).entered();
        let snapshot = std::mem::take(&mut self.cells);
        let mut next = BTreeSet::new();
        let mut candidates = HashSet::new();

        for &cell in &snapshot {
            let live = live_neighbors(cell, &snapshot);
            if live == 2 || live == 3 {
                next.insert(cell);
            }
            candidates.extend(cell.neighbors().filter(|n| !snapshot.contains(n)));
        }

        let survived = next.len();
        for cell in candidates {
            if live_neighbors(cell, &snapshot) == 3 {
                next.insert(cell);
            }
        }

        let born = next.len() - survived;
        let died = snapshot.len() - survived;
        self.cells = next;
        self.generation += 1;
        tracing::trace!(born, died, live = self.cells.len(), "advanced");
        self.record(WorldEvent::Advanced {
            generation: self.generation,
            born,
            died,
        });
    }

    /// Reconstruct a world from a sequence of events.
    ///
    /// The log must describe the world from its start: either from an empty
    /// world at generation 0, or from a leading `Baseline`. Advances are
    /// re-run rather than trusted, and each recorded generation and
    /// born/died count must match what the re-run produces. The returned
    /// world is recording.
    pub fn replay(events: &[WorldEvent]) -> Result<Self, LifeError> {
        let mut world = Self::recording();
        for event in events {
            match event {
                WorldEvent::Baseline { generation, cells } => {
                    world.cells = cells.iter().copied().collect();
                    world.generation = *generation;
                    world.event_log.push(event.clone());
                }
                WorldEvent::Inserted { cell } => {
                    world.insert(*cell);
                }
                WorldEvent::Advanced {
                    generation,
                    born,
                    died,
                } => {
                    world.advance();
                    let recorded = world.event_log.last();
                    if recorded != Some(event) {
                        return Err(LifeError::ReplayMismatch {
                            expected: format!(
                                "generation {generation} (born {born}, died {died})"
                            ),
                            actual: format!("{recorded:?}"),
                        });
                    }
                }
            }
        }
        tracing::debug!(
            events = events.len(),
            generation = world.generation,
            live = world.count(),
            "replayed world"
        );
        Ok(world)
    }

    /// Compute a deterministic hash of the world state for comparison.
    /// Uses canonical (BTreeSet) iteration order.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&mut h, &self.generation.to_le_bytes());
        for cell in &self.cells {
            mix(&mut h, &cell.x.to_le_bytes());
            mix(&mut h, &cell.y.to_le_bytes());
        }
        h
    }

    fn record(&mut self, event: WorldEvent) {
        if self.record_events {
            self.event_log.push(event);
        }
    }

    /// An empty world at generation 0 needs no baseline.
    fn push_baseline(&mut self) {
        if self.cells.is_empty() && self.generation == 0 {
            return;
        }
        self.event_log.push(WorldEvent::Baseline {
            generation: self.generation,
            cells: self.cells.iter().copied().collect(),
        });
    }
}

impl Extend<Cell> for World {
    fn extend<I: IntoIterator<Item = Cell>>(&mut self, iter: I) {
        for cell in iter {
            self.insert(cell);
        }
    }
}

impl FromIterator<Cell> for World {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self::from_cells(iter)
    }
}

/// Live cells among the Moore neighbors of `cell` in `snapshot`.
/// Same routine for live and dead cells.
fn live_neighbors(cell: Cell, snapshot: &BTreeSet<Cell>) -> usize {
    cell.neighbors().filter(|n| snapshot.contains(n)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifespace_common::pattern::{BEACON, BLINKER, BLOCK, GLIDER, TOAD};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn cells(pairs: &[(i64, i64)]) -> BTreeSet<Cell> {
        pairs.iter().map(|&p| Cell::from(p)).collect()
    }

    #[test]
    fn world_starts_empty() {
        let w = World::new();
        assert_eq!(w.generation(), 0);
        assert_eq!(w.count(), 0);
        assert!(w.is_empty());
    }

    #[test]
    fn insert_is_set_semantics() {
        let mut w = World::recording();
        assert!(w.insert(Cell::new(1, 1)));
        assert!(!w.insert(Cell::new(1, 1)));
        assert_eq!(w.count(), 1);
        assert_eq!(w.events().len(), 1);
    }

    #[test]
    fn count_matches_live_cells() {
        let w = World::from_cells([Cell::new(0, 0), Cell::new(0, 0), Cell::new(4, -4)]);
        assert_eq!(w.count(), 2);
        assert_eq!(w.count(), w.live_cells().len());
    }

    #[test]
    fn block_is_a_still_life() {
        let mut w = World::from_cells(BLOCK.cells());
        let before = w.live_cells().clone();
        w.advance();
        assert_eq!(w.live_cells(), &before);
        w.advance();
        assert_eq!(w.live_cells(), &before);
    }

    #[test]
    fn single_cell_dies_of_isolation() {
        let mut w = World::from_cells([Cell::new(5, 5)]);
        w.advance();
        assert_eq!(w.count(), 0);
    }

    #[test]
    fn full_square_dies_of_overcrowding() {
        let square = (-1..=1).flat_map(|x| (-1..=1).map(move |y| Cell::new(x, y)));
        let mut w = World::from_cells(square);
        assert_eq!(w.count(), 9);
        w.advance();
        assert_eq!(
            w.live_cells(),
            &cells(&[
                (-1, -1),
                (1, -1),
                (-1, 1),
                (1, 1),
                (0, -2),
                (-2, 0),
                (2, 0),
                (0, 2),
            ])
        );
    }

    #[test]
    fn blinker_oscillates_with_period_two() {
        let horizontal = cells(&[(-1, 0), (0, 0), (1, 0)]);
        let vertical = cells(&[(0, -1), (0, 0), (0, 1)]);
        let mut w = World::from_cells(BLINKER.cells());
        assert_eq!(w.live_cells(), &horizontal);
        w.advance();
        assert_eq!(w.live_cells(), &vertical);
        w.advance();
        assert_eq!(w.live_cells(), &horizontal);
    }

    #[test]
    fn toad_and_beacon_return_after_two_generations() {
        for pattern in [TOAD, BEACON] {
            let mut w = World::from_cells(pattern.cells());
            let start = w.live_cells().clone();
            w.advance();
            assert_ne!(w.live_cells(), &start, "{}", pattern.name);
            w.advance();
            assert_eq!(w.live_cells(), &start, "{}", pattern.name);
        }
    }

    #[test]
    fn glider_translates_diagonally() {
        let mut w = World::from_cells(GLIDER.cells());
        for _ in 0..4 {
            w.advance();
        }
        let expected: BTreeSet<Cell> = GLIDER.offset(1, 1).collect();
        assert_eq!(w.live_cells(), &expected);
    }

    #[test]
    fn empty_world_is_a_fixed_point() {
        let mut w = World::new();
        for _ in 0..5 {
            w.advance();
        }
        assert!(w.is_empty());
        assert_eq!(w.generation(), 5);
    }

    #[test]
    fn advance_works_far_from_origin() {
        let far = i64::MAX / 2;
        let mut w = World::from_cells(BLINKER.offset(far, -far));
        w.advance();
        let expected: BTreeSet<Cell> = [(0, -1), (0, 0), (0, 1)]
            .into_iter()
            .map(|(x, y)| Cell::new(x + far, y - far))
            .collect();
        assert_eq!(w.live_cells(), &expected);
    }

    #[test]
    fn advance_records_births_and_deaths() {
        let mut w = World::recording();
        w.extend(BLINKER.cells());
        w.drain_events();
        w.advance();
        assert_eq!(
            w.events(),
            &[
                WorldEvent::Baseline {
                    generation: 0,
                    cells: BLINKER.cells().collect(),
                },
                WorldEvent::Advanced {
                    generation: 1,
                    born: 2,
                    died: 2,
                },
            ]
        );
    }

    #[test]
    fn log_stays_empty_without_recording() {
        let mut w = World::from_cells(BLINKER.cells());
        assert!(!w.is_recording());
        for _ in 0..100_000 {
            w.advance();
        }
        assert_eq!(w.generation(), 100_000);
        assert_eq!(w.count(), 3);
        assert!(w.events().is_empty());
    }

    #[test]
    fn enabling_recording_logs_a_baseline() {
        let mut w = World::from_cells(BLOCK.cells());
        w.advance();
        w.set_recording(true);
        assert!(w.is_recording());
        let mut cells: Vec<Cell> = BLOCK.cells().collect();
        cells.sort();
        assert_eq!(
            w.events(),
            &[WorldEvent::Baseline {
                generation: 1,
                cells,
            }]
        );
    }

    #[test]
    fn disabling_recording_discards_the_log() {
        let mut w = World::recording();
        w.extend(GLIDER.cells());
        w.advance();
        w.set_recording(false);
        assert!(w.events().is_empty());
        w.advance();
        assert!(w.events().is_empty());
    }

    #[test]
    fn replay_after_drain() {
        let mut w = World::recording();
        w.extend(BLINKER.cells());
        w.advance();
        w.drain_events();
        w.advance();
        w.advance();

        let replayed = World::replay(w.events()).unwrap();
        assert_eq!(replayed.generation(), 3);
        assert_eq!(replayed.live_cells(), w.live_cells());
        assert_eq!(replayed.state_hash(), w.state_hash());
    }

    #[test]
    fn advance_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(3);
        let bounds = Bounds::new(-20, 20, -20, 20).unwrap();
        let mut w1 = World::new();
        w1.seed_random(&mut rng, 300, bounds);
        let mut w2 = World::from_cells(w1.live_cells().iter().copied());
        for _ in 0..10 {
            w1.advance();
            w2.advance();
            assert_eq!(w1.live_cells(), w2.live_cells());
        }
    }

    #[test]
    fn seed_random_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        let bounds = Bounds::new(-100, 200, -100, 200).unwrap();
        let mut w = World::new();
        w.seed_random(&mut rng, 100, bounds);
        assert!(w.count() <= 100);
        assert!(w.count() > 0);
        assert!(w.live_cells().iter().all(|&c| bounds.contains(c)));
    }

    #[test]
    fn seed_random_collapses_duplicates() {
        let mut rng = StdRng::seed_from_u64(5);
        let bounds = Bounds::new(0, 2, 0, 2).unwrap();
        let mut w = World::new();
        w.seed_random(&mut rng, 50, bounds);
        assert!(w.count() <= 4);
    }

    #[test]
    fn replay_reconstructs_state() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut w = World::recording();
        w.seed_random(&mut rng, 80, Bounds::new(0, 16, 0, 16).unwrap());
        for _ in 0..6 {
            w.advance();
        }

        let replayed = World::replay(w.events()).unwrap();
        assert_eq!(replayed.generation(), w.generation());
        assert_eq!(replayed.live_cells(), w.live_cells());
        assert_eq!(replayed.state_hash(), w.state_hash());
    }

    #[test]
    fn replay_detects_tampered_log() {
        let mut w = World::recording();
        w.extend(BLINKER.cells());
        w.advance();
        let mut events = w.events().to_vec();
        if let Some(WorldEvent::Advanced { born, .. }) = events.last_mut() {
            *born = 7;
        }
        assert!(matches!(
            World::replay(&events),
            Err(LifeError::ReplayMismatch { .. })
        ));
    }

    #[test]
    fn state_hash_tracks_generation_and_cells() {
        let a = World::from_cells(BLOCK.cells());
        let b = World::from_cells(BLOCK.cells());
        assert_eq!(a.state_hash(), b.state_hash());

        let mut c = b.clone();
        c.advance();
        assert_eq!(c.live_cells(), a.live_cells());
        assert_ne!(c.state_hash(), a.state_hash());
    }
}
