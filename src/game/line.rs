use super::config::LineConfig;
use super::draw::draw_kind;
use super::symbol::{Position, Symbol};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Symbols drawn for one play action in a line mode. Discarded at the next
/// action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineRound {
    pub length: usize,
    pub active_row: usize,
    /// Row-major, `rows[row][col]`.
    pub rows: Vec<Vec<Symbol>>,
}

impl LineRound {
    pub fn generate<R: Rng + ?Sized>(config: &LineConfig, rng: &mut R) -> Self {
        let [min, max] = config.line_length_range;
        let length = rng.gen_range(min..=max);

        let rows = (0..config.row_count)
            .map(|row| {
                (0..length)
                    .map(|col| {
                        let kind = draw_kind(&config.symbols, rng);
                        Symbol::new(
                            row * length + col,
                            kind,
                            &config.symbols,
                            Position::Line { row, col },
                        )
                    })
                    .collect()
            })
            .collect();

        LineRound {
            length,
            active_row: config.active_row,
            rows,
        }
    }

    pub fn active(&self) -> &[Symbol] {
        &self.rows[self.active_row]
    }

    /// Column-major order: every row of column 0, then column 1, and so on.
    pub fn reveal_order(&self) -> Vec<(usize, usize)> {
        (0..self.length)
            .flat_map(|col| (0..self.rows.len()).map(move |row| (row, col)))
            .collect()
    }

    pub fn reveal(&mut self, row: usize, col: usize) {
        if let Some(symbol) = self.rows.get_mut(row).and_then(|row| row.get_mut(col)) {
            symbol.reveal();
        }
    }

    pub fn is_revealed(&self) -> bool {
        self.rows.iter().flatten().all(|symbol| symbol.revealed)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::game::config::{GameConfig, ModeConfig};
    use rand::{rngs::StdRng, SeedableRng};

    fn line_config() -> LineConfig {
        match GameConfig::quick_dig().mode {
            ModeConfig::Line(line) => line,
            ModeConfig::Grid(_) => unreachable!(),
        }
    }

    #[test]
    fn test_generate_shape() {
        let config = line_config();
        let mut rng = StdRng::seed_from_u64(5);
        let mut lengths = Vec::new();
        for _ in 0..50 {
            let round = LineRound::generate(&config, &mut rng);
            assert_eq!(round.rows.len(), 3);
            assert!(round.rows.iter().all(|row| row.len() == round.length));
            assert!(!round.rows.iter().flatten().any(|symbol| symbol.revealed));
            assert_eq!(round.active().len(), round.length);
            lengths.push(round.length);
        }
        assert!(lengths.contains(&4));
        assert!(lengths.contains(&5));
        assert!(lengths.iter().all(|&length| length == 4 || length == 5));
    }

    #[test]
    fn test_reveal_order_is_column_major() {
        let config = line_config();
        let mut rng = StdRng::seed_from_u64(5);
        let mut round = LineRound::generate(&config, &mut rng);
        let order = round.reveal_order();

        assert_eq!(order.len(), 3 * round.length);
        assert_eq!(&order[..4], &[(0, 0), (1, 0), (2, 0), (0, 1)]);

        for &(row, col) in order.iter() {
            assert!(!round.is_revealed());
            round.reveal(row, col);
        }
        assert!(round.is_revealed());
    }
}
