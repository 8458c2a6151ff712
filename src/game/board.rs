use super::config::GridConfig;
use super::draw::shuffle;
use super::symbol::{Position, Symbol, SymbolKind};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fixed excavation board. Cells keep their identity for the whole game,
/// only the revealed flag changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridBoard {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<Symbol>,
}

impl GridBoard {
    pub fn generate<R: Rng + ?Sized>(config: &GridConfig, rng: &mut R) -> Self {
        let total = config.rows * config.cols;

        let mut items: Vec<SymbolKind> = config
            .item_distribution
            .iter()
            .flat_map(|(&kind, &count)| std::iter::repeat(kind).take(count))
            .collect();
        if items.len() < total {
            items.resize(total, config.filler);
        }
        items.truncate(total);
        shuffle(&mut items, rng);

        let cells = items
            .into_iter()
            .enumerate()
            .map(|(id, kind)| Symbol::new(id, kind, &config.symbols, Position::Cell(id)))
            .collect();

        GridBoard {
            rows: config.rows,
            cols: config.cols,
            cells,
        }
    }

    pub fn hidden(&self) -> impl Iterator<Item = &Symbol> {
        self.cells.iter().filter(|cell| !cell.revealed)
    }

    #[cfg(test)]
    pub fn hidden_count(&self) -> usize {
        self.hidden().count()
    }

    /// Chooses `count` distinct hidden cells uniformly at random.
    pub fn pick_hidden<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Option<Vec<usize>> {
        let mut hidden: Vec<usize> = self.hidden().map(|cell| cell.id).collect();
        if hidden.len() < count {
            return None;
        }
        shuffle(&mut hidden, rng);
        hidden.truncate(count);
        Some(hidden)
    }

    /// Reveals the given cells. Unknown ids are skipped.
    pub fn reveal(&mut self, ids: &[usize]) {
        for &id in ids {
            if let Some(cell) = self.cells.get_mut(id) {
                cell.reveal();
            }
        }
    }

    #[cfg(test)]
    pub fn count_of(&self, kind: SymbolKind) -> usize {
        self.cells.iter().filter(|cell| cell.kind == kind).count()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::game::config::{GameConfig, ModeConfig};
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::BTreeSet;
    use SymbolKind::*;

    fn grid_config() -> GridConfig {
        match GameConfig::grid().mode {
            ModeConfig::Grid(grid) => grid,
            ModeConfig::Line(_) => unreachable!(),
        }
    }

    #[test]
    fn test_generate_matches_distribution() {
        let config = grid_config();
        let mut rng = StdRng::seed_from_u64(3);
        let board = GridBoard::generate(&config, &mut rng);

        assert_eq!(board.cells.len(), 25);
        for (&kind, &count) in config.item_distribution.iter() {
            assert_eq!(board.count_of(kind), count, "{:?}", kind);
        }
        let ids: BTreeSet<usize> = board.cells.iter().map(|cell| cell.id).collect();
        assert_eq!(ids.len(), 25);
        assert!(board.cells.iter().all(|cell| !cell.revealed));
        assert!(board
            .cells
            .iter()
            .all(|cell| cell.position == Position::Cell(cell.id)));
    }

    #[test]
    fn test_generate_pads_with_filler() {
        let mut config = grid_config();
        config.item_distribution = [(Bomb, 3)].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(3);
        let board = GridBoard::generate(&config, &mut rng);

        assert_eq!(board.cells.len(), 25);
        assert_eq!(board.count_of(Bomb), 3);
        assert_eq!(board.count_of(Scroll), 22);
    }

    #[test]
    fn test_generate_truncates_long_distribution() {
        let mut config = grid_config();
        config.rows = 2;
        config.cols = 2;
        config.item_distribution = [(Gem, 3), (Bomb, 3)].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(3);
        let board = GridBoard::generate(&config, &mut rng);

        assert_eq!(board.cells.len(), 4);
        assert_eq!(board.count_of(Gem), 3);
        assert_eq!(board.count_of(Bomb), 1);
    }

    #[test]
    fn test_reveal_picked_cells() {
        let config = grid_config();
        let mut rng = StdRng::seed_from_u64(11);
        let mut board = GridBoard::generate(&config, &mut rng);

        let picked = board.pick_hidden(2, &mut rng).unwrap();
        assert_eq!(picked.len(), 2);
        assert_ne!(picked[0], picked[1]);

        board.reveal(&picked);
        assert!(picked.iter().all(|&id| board.cells[id].revealed));
        assert_eq!(board.hidden_count(), 23);

        board.reveal(&[picked[0], 25, 100]);
        assert_eq!(board.hidden_count(), 23);
        assert!(board.pick_hidden(24, &mut rng).is_none());
    }
}
