//! BoardEngine - sparse live-cell board and the generation transition
//!
//! Only live cells are stored. A generation is computed from a read-only view
//! of the current board and committed in one assignment, so no cell ever sees
//! a half-applied generation while its neighbors are counted.

use ahash::AHashSet;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::core::config::LifeConfig;
use crate::core::error::{LifeError, Result};
use crate::core::types::{Cell, Dimensions, Generation};
use crate::engine::neighborhood::neighbors;
use crate::engine::rules::RuleSet;
use crate::engine::seeding::SeedStrategy;
use crate::patterns::Pattern;

/// Candidate count above which `advance` evaluates cells with rayon
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;

/// Owns the live-cell set for a toroidal board of fixed dimensions.
///
/// Not internally synchronized: one driver owns all calls within a tick.
#[derive(Debug, Clone)]
pub struct BoardEngine {
    dims: Dimensions,
    rule: RuleSet,
    board: AHashSet<Cell>,
    generation: Generation,
    rng: ChaCha8Rng,
    parallel_threshold: usize,
}

impl BoardEngine {
    /// Empty board seeded from OS entropy
    pub fn new(dims: Dimensions, rule: RuleSet) -> Result<Self> {
        Self::build(dims, rule, ChaCha8Rng::from_entropy())
    }

    /// Empty board with a deterministic RNG
    pub fn with_seed(dims: Dimensions, rule: RuleSet, seed: u64) -> Result<Self> {
        Self::build(dims, rule, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_config(config: &LifeConfig) -> Result<Self> {
        config.validate()?;
        let dims = config.dimensions();
        let rule = config.rule_set()?;
        let mut engine = match config.seeding.seed {
            Some(seed) => Self::with_seed(dims, rule, seed)?,
            None => Self::new(dims, rule)?,
        };
        engine.parallel_threshold = config.parallel_threshold;
        Ok(engine)
    }

    fn build(dims: Dimensions, rule: RuleSet, rng: ChaCha8Rng) -> Result<Self> {
        if dims.rows == 0 || dims.cols == 0 {
            return Err(LifeError::InvalidConfig(format!(
                "board must be at least 1x1, got {}x{}",
                dims.rows, dims.cols
            )));
        }
        Ok(Self {
            dims,
            rule,
            board: AHashSet::new(),
            generation: 0,
            rng,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        })
    }

    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    // === QUERIES ===

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn rule(&self) -> RuleSet {
        self.rule
    }

    /// Generations advanced since the board was last cleared or seeded
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn live_count(&self) -> usize {
        self.board.len()
    }

    pub fn is_empty(&self) -> bool {
        self.board.is_empty()
    }

    pub fn is_alive(&self, cell: Cell) -> bool {
        self.board.contains(&cell)
    }

    /// The live-cell set. Iteration order is unspecified.
    pub fn live_cells(&self) -> &AHashSet<Cell> {
        &self.board
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.board.iter().copied()
    }

    /// Live cells in row-major order
    pub fn sorted_cells(&self) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self.cells().collect();
        cells.sort_unstable();
        cells
    }

    /// Live cells among the eight wrapped neighbors of `cell` (0..=8)
    pub fn count_neighbors(&self, cell: Cell) -> u8 {
        neighbors(self.dims, cell)
            .filter(|n| self.board.contains(n))
            .count() as u8
    }

    // === EDITS ===

    /// Bring `cell` to life. Already-live cells are left as they are.
    pub fn toggle(&mut self, cell: Cell) -> Result<()> {
        self.check_in_range(cell)?;
        self.board.insert(cell);
        Ok(())
    }

    /// Kill `cell` if it is alive
    pub fn erase(&mut self, cell: Cell) -> Result<()> {
        self.check_in_range(cell)?;
        self.board.remove(&cell);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.board = AHashSet::new();
        self.generation = 0;
        tracing::debug!("Board cleared");
    }

    /// Clear the board, then fill it using `strategy`
    pub fn seed_random(&mut self, strategy: SeedStrategy) {
        self.clear();
        let cells = strategy.draw(self.dims, &mut self.rng);
        self.board.extend(cells);
        tracing::info!(
            "Seeded {}x{} board with {:?}: {} live cells",
            self.dims.rows,
            self.dims.cols,
            strategy,
            self.board.len()
        );
    }

    pub fn seed_counted(&mut self, count: usize) {
        self.seed_random(SeedStrategy::Counted { count });
    }

    pub fn seed_probability(&mut self) {
        self.seed_random(SeedStrategy::per_cell());
    }

    /// Stamp `pattern` with its top-left corner at `origin`, wrapping past the edges
    pub fn place(&mut self, pattern: &Pattern, origin: Cell) -> Result<()> {
        self.check_in_range(origin)?;
        for (d_row, d_col) in pattern.offsets() {
            let cell = self.dims.wrap(origin, d_row as isize, d_col as isize);
            self.board.insert(cell);
        }
        Ok(())
    }

    fn check_in_range(&self, cell: Cell) -> Result<()> {
        if self.dims.contains(cell) {
            Ok(())
        } else {
            Err(LifeError::OutOfRange {
                row: cell.row,
                col: cell.col,
                rows: self.dims.rows,
                cols: self.dims.cols,
            })
        }
    }

    // === TRANSITION ===

    /// Compute the next generation without committing it.
    ///
    /// Evaluates every live cell and every cell adjacent to one. Dead cells
    /// with no live neighbor cannot be born because `begin` never contains 0.
    pub fn next_generation(&self) -> AHashSet<Cell> {
        let candidates: AHashSet<Cell> = self
            .board
            .iter()
            .flat_map(|&cell| std::iter::once(cell).chain(neighbors(self.dims, cell)))
            .collect();

        if candidates.len() >= self.parallel_threshold {
            let candidates: Vec<Cell> = candidates.into_iter().collect();
            let survivors: Vec<Cell> = candidates
                .par_iter()
                .copied()
                .filter(|&cell| self.lives_next(cell))
                .collect();
            survivors.into_iter().collect()
        } else {
            candidates
                .into_iter()
                .filter(|&cell| self.lives_next(cell))
                .collect()
        }
    }

    #[inline]
    fn lives_next(&self, cell: Cell) -> bool {
        let count = self.count_neighbors(cell);
        if self.board.contains(&cell) {
            self.rule.survives(count)
        } else {
            self.rule.born(count)
        }
    }

    /// Advance one generation
    pub fn advance(&mut self) {
        let next = self.next_generation();
        self.board = next;
        self.generation += 1;
        tracing::debug!(
            "Generation {}: {} live cells",
            self.generation,
            self.board.len()
        );
    }

    pub fn step_n(&mut self, generations: u64) {
        for _ in 0..generations {
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(rows: usize, cols: usize) -> BoardEngine {
        BoardEngine::with_seed(Dimensions::new(rows, cols), RuleSet::conway(), 42).unwrap()
    }

    fn with_cells(rows: usize, cols: usize, cells: &[(usize, usize)]) -> BoardEngine {
        let mut engine = engine(rows, cols);
        for &cell in cells {
            engine.toggle(cell.into()).unwrap();
        }
        engine
    }

    fn set(cells: &[(usize, usize)]) -> AHashSet<Cell> {
        cells.iter().map(|&c| Cell::from(c)).collect()
    }

    #[test]
    fn test_empty_dimensions_rejected() {
        let result = BoardEngine::new(Dimensions::new(0, 5), RuleSet::conway());
        assert!(matches!(result, Err(LifeError::InvalidConfig(_))));
    }

    #[test]
    fn test_toggle_is_idempotent() {
        let mut engine = engine(5, 5);
        engine.toggle(Cell::new(1, 1)).unwrap();
        engine.toggle(Cell::new(1, 1)).unwrap();
        assert_eq!(engine.live_count(), 1);
        assert!(engine.is_alive(Cell::new(1, 1)));
    }

    #[test]
    fn test_erase_absent_is_noop() {
        let mut engine = with_cells(5, 5, &[(0, 0)]);
        engine.erase(Cell::new(3, 3)).unwrap();
        assert_eq!(engine.live_cells(), &set(&[(0, 0)]));
    }

    #[test]
    fn test_out_of_range_edits_rejected_without_mutation() {
        let mut engine = with_cells(4, 6, &[(1, 1)]);
        let err = engine.toggle(Cell::new(4, 0)).unwrap_err();
        assert!(matches!(
            err,
            LifeError::OutOfRange { row: 4, col: 0, rows: 4, cols: 6 }
        ));
        assert!(engine.erase(Cell::new(0, 6)).is_err());
        assert_eq!(engine.live_cells(), &set(&[(1, 1)]));
    }

    #[test]
    fn test_wrapped_diagonal_neighbor_counted() {
        let engine = with_cells(3, 3, &[(0, 0), (2, 2)]);
        assert_eq!(engine.count_neighbors(Cell::new(0, 0)), 1);
    }

    #[test]
    fn test_count_neighbors_full_ring() {
        let engine = with_cells(
            5,
            5,
            &[(1, 1), (1, 2), (1, 3), (2, 1), (2, 3), (3, 1), (3, 2), (3, 3), (2, 2)],
        );
        assert_eq!(engine.count_neighbors(Cell::new(2, 2)), 8);
        assert_eq!(engine.count_neighbors(Cell::new(0, 0)), 1);
    }

    #[test]
    fn test_block_is_still_life() {
        let block = &[(0, 0), (0, 1), (1, 0), (1, 1)];
        let mut engine = with_cells(4, 4, block);
        engine.advance();
        assert_eq!(engine.live_cells(), &set(block));
    }

    #[test]
    fn test_blinker_oscillates() {
        let horizontal = &[(2, 1), (2, 2), (2, 3)];
        let vertical = &[(1, 2), (2, 2), (3, 2)];
        let mut engine = with_cells(5, 5, horizontal);

        engine.advance();
        assert_eq!(engine.live_cells(), &set(vertical));

        engine.advance();
        assert_eq!(engine.live_cells(), &set(horizontal));
        assert_eq!(engine.generation(), 2);
    }

    #[test]
    fn test_blinker_across_the_seam() {
        let mut engine = with_cells(6, 6, &[(0, 5), (0, 0), (0, 1)]);
        engine.advance();
        assert_eq!(engine.live_cells(), &set(&[(5, 0), (0, 0), (1, 0)]));
    }

    #[test]
    fn test_isolated_cell_dies() {
        let mut engine = with_cells(5, 5, &[(2, 2)]);
        engine.advance();
        assert!(engine.is_empty());
    }

    #[test]
    fn test_next_generation_does_not_commit() {
        let engine = with_cells(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        let next = engine.next_generation();
        assert_eq!(next, set(&[(1, 2), (2, 2), (3, 2)]));
        assert_eq!(engine.live_cells(), &set(&[(2, 1), (2, 2), (2, 3)]));
        assert_eq!(engine.generation(), 0);
    }

    #[test]
    fn test_parallel_path_matches_sequential() {
        let mut sequential = engine(40, 40);
        sequential.seed_probability();
        let mut parallel = sequential.clone();
        sequential.set_parallel_threshold(usize::MAX);
        parallel.set_parallel_threshold(0);

        for _ in 0..10 {
            sequential.advance();
            parallel.advance();
            assert_eq!(sequential.live_cells(), parallel.live_cells());
        }
    }

    #[test]
    fn test_clear_resets_generation() {
        let mut engine = with_cells(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        engine.step_n(3);
        assert_eq!(engine.generation(), 3);
        engine.clear();
        assert!(engine.is_empty());
        assert_eq!(engine.generation(), 0);
    }

    #[test]
    fn test_seed_counted_is_bounded_and_in_range() {
        let mut engine = engine(10, 10);
        engine.toggle(Cell::new(0, 0)).unwrap();
        engine.seed_counted(30);
        assert!(engine.live_count() <= 30);
        assert!(engine.live_count() > 0);
        let dims = engine.dimensions();
        assert!(engine.cells().all(|c| dims.contains(c)));
    }

    #[test]
    fn test_seed_is_reproducible() {
        let mut a = engine(20, 20);
        let mut b = engine(20, 20);
        a.seed_probability();
        b.seed_probability();
        assert_eq!(a.live_cells(), b.live_cells());
    }

    #[test]
    fn test_place_wraps_pattern() {
        let mut engine = engine(5, 5);
        let pattern = Pattern::parse("##\n##").unwrap();
        engine.place(&pattern, Cell::new(4, 4)).unwrap();
        assert_eq!(engine.live_cells(), &set(&[(4, 4), (4, 0), (0, 4), (0, 0)]));
    }

    #[test]
    fn test_place_rejects_out_of_range_origin() {
        let mut engine = engine(5, 5);
        let pattern = Pattern::parse("#").unwrap();
        assert!(engine.place(&pattern, Cell::new(5, 0)).is_err());
        assert!(engine.is_empty());
    }

    #[test]
    fn test_sorted_cells_row_major() {
        let engine = with_cells(5, 5, &[(3, 0), (0, 4), (0, 1)]);
        assert_eq!(
            engine.sorted_cells(),
            vec![Cell::new(0, 1), Cell::new(0, 4), Cell::new(3, 0)]
        );
    }
}
