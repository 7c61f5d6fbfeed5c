//! Random board seeding

use rand::Rng;

use crate::core::types::{Cell, Dimensions};

/// Per-cell inclusion probability used by the probability strategy
pub const DEFAULT_PROBABILITY: f64 = 1.0 / 9.0;

/// How a random board is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeedStrategy {
    /// `count` independent uniform draws over the board. Duplicate draws
    /// collapse, so the live count can end up below `count`.
    Counted { count: usize },
    /// Every cell is alive independently with probability `p`
    Probability { p: f64 },
}

impl SeedStrategy {
    pub fn per_cell() -> Self {
        Self::Probability { p: DEFAULT_PROBABILITY }
    }

    /// Draw cells for a fresh board
    pub fn draw<R: Rng + ?Sized>(&self, dims: Dimensions, rng: &mut R) -> Vec<Cell> {
        match *self {
            Self::Counted { count } => draw_counted(dims, count, rng),
            Self::Probability { p } => draw_per_cell(dims, p, rng),
        }
    }
}

/// Bounds are exclusive on both axes, so every draw is on the board.
fn draw_counted<R: Rng + ?Sized>(dims: Dimensions, count: usize, rng: &mut R) -> Vec<Cell> {
    (0..count)
        .map(|_| Cell::new(rng.gen_range(0..dims.rows), rng.gen_range(0..dims.cols)))
        .collect()
}

fn draw_per_cell<R: Rng + ?Sized>(dims: Dimensions, p: f64, rng: &mut R) -> Vec<Cell> {
    // NaN means no live cells; out-of-range values saturate
    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
    let mut cells = Vec::new();
    for row in 0..dims.rows {
        for col in 0..dims.cols {
            if rng.gen_bool(p) {
                cells.push(Cell::new(row, col));
            }
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_counted_draws_stay_in_range() {
        let dims = Dimensions::new(3, 4);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let cells = SeedStrategy::Counted { count: 500 }.draw(dims, &mut rng);
        assert_eq!(cells.len(), 500);
        assert!(cells.iter().all(|&c| dims.contains(c)));
    }

    #[test]
    fn test_counted_reaches_last_row_and_col() {
        let dims = Dimensions::new(2, 2);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let cells = SeedStrategy::Counted { count: 200 }.draw(dims, &mut rng);
        assert!(cells.contains(&Cell::new(1, 1)));
    }

    #[test]
    fn test_probability_extremes() {
        let dims = Dimensions::new(5, 5);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        assert!(SeedStrategy::Probability { p: 0.0 }.draw(dims, &mut rng).is_empty());
        assert_eq!(SeedStrategy::Probability { p: 1.0 }.draw(dims, &mut rng).len(), 25);
    }

    #[test]
    fn test_probability_out_of_range_and_nan() {
        let dims = Dimensions::new(4, 4);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(SeedStrategy::Probability { p: f64::NAN }.draw(dims, &mut rng).is_empty());
        assert!(SeedStrategy::Probability { p: -0.5 }.draw(dims, &mut rng).is_empty());
        assert_eq!(SeedStrategy::Probability { p: 1.5 }.draw(dims, &mut rng).len(), 16);
        assert_eq!(SeedStrategy::Probability { p: f64::INFINITY }.draw(dims, &mut rng).len(), 16);
    }

    #[test]
    fn test_per_cell_density_is_roughly_one_ninth() {
        let dims = Dimensions::new(300, 300);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let live = SeedStrategy::per_cell().draw(dims, &mut rng).len() as f64;
        let expected = dims.area() as f64 / 9.0;
        assert!(
            (live - expected).abs() < expected * 0.05,
            "expected ~{} live cells, got {}",
            expected,
            live
        );
    }

    #[test]
    fn test_same_seed_same_draw() {
        let dims = Dimensions::new(10, 10);
        let a = SeedStrategy::Counted { count: 20 }.draw(dims, &mut ChaCha8Rng::seed_from_u64(5));
        let b = SeedStrategy::Counted { count: 20 }.draw(dims, &mut ChaCha8Rng::seed_from_u64(5));
        assert_eq!(a, b);
    }
}
