use super::symbol::{Symbol, SymbolKind, SymbolTable};
use serde::{Deserialize, Serialize};

pub const ALL_UNIQUE_BONUS: i64 = 100;
pub const ALL_UNIQUE_MIN_LENGTH: usize = 4;
pub const MATCH_MIN_COUNT: usize = 3;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bonus {
    pub points: i64,
    pub message: Option<String>,
}

pub fn base_points(symbols: &[Symbol]) -> i64 {
    symbols.iter().map(|symbol| symbol.points).sum()
}

/// Scales by a level multiplier, rounding half away from zero.
pub fn scale(points: i64, multiplier: f64) -> i64 {
    (points as f64 * multiplier).round() as i64
}

/// Three-or-more matches pay `points * count * 2` per kind; a row of at
/// least four distinct kinds pays a flat bonus. Only the last message
/// written survives.
pub fn detect_bonus(row: &[Symbol], table: &SymbolTable) -> Bonus {
    let mut counts = [0usize; SymbolKind::ALL.len()];
    for symbol in row.iter() {
        counts[symbol.kind.index()] += 1;
    }

    let mut bonus = Bonus::default();
    for kind in SymbolKind::ALL {
        let count = counts[kind.index()];
        if count < MATCH_MIN_COUNT {
            continue;
        }
        let points = row
            .iter()
            .find(|symbol| symbol.kind == kind)
            .map(|symbol| symbol.points)
            .unwrap_or_else(|| table.point_value_of(kind));
        bonus.points += points * count as i64 * 2;
        bonus.message = Some(format!("{} of a kind: {}!", count, table.label_of(kind)));
    }

    let unique = counts.iter().filter(|&&count| count > 0).count();
    if row.len() >= ALL_UNIQUE_MIN_LENGTH && unique == row.len() {
        bonus.points += ALL_UNIQUE_BONUS;
        bonus.message = Some("All different finds!".to_string());
    }

    bonus
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::game::config::GameConfig;
    use crate::game::symbol::Position;
    use proptest::prelude::*;
    use SymbolKind::*;

    fn table() -> SymbolTable {
        GameConfig::quick_dig().mode.symbols().clone()
    }

    fn row(kinds: &[SymbolKind]) -> Vec<Symbol> {
        let table = table();
        kinds
            .iter()
            .enumerate()
            .map(|(col, &kind)| Symbol::new(col, kind, &table, Position::Line { row: 1, col }))
            .collect()
    }

    #[test]
    fn test_three_of_a_kind() {
        let bonus = detect_bonus(&row(&[Gem, Gem, Gem, Scroll]), &table());
        assert_eq!(bonus.points, 50 * 3 * 2);
        assert_eq!(bonus.message.as_deref(), Some("3 of a kind: gem!"));
    }

    #[test]
    fn test_four_of_a_kind_counts_all() {
        let symbols = row(&[Gem, Gem, Gem, Gem]);
        assert_eq!(base_points(&symbols), 200);
        assert_eq!(detect_bonus(&symbols, &table()).points, 400);
    }

    #[test]
    fn test_all_unique() {
        let bonus = detect_bonus(&row(&[Gem, Treasure, Skull, Bomb]), &table());
        assert_eq!(bonus.points, ALL_UNIQUE_BONUS);
        assert_eq!(bonus.message.as_deref(), Some("All different finds!"));

        let bonus = detect_bonus(&row(&[Gem, Treasure, Skull]), &table());
        assert_eq!(bonus, Bonus::default());
    }

    #[test]
    fn test_negative_matches_accumulate_and_last_message_wins() {
        let bonus = detect_bonus(
            &row(&[Bomb, Bomb, Bomb, Scroll, Scroll, Scroll]),
            &table(),
        );
        assert_eq!(bonus.points, -50 * 3 * 2 + 10 * 3 * 2);
        assert_eq!(bonus.message.as_deref(), Some("3 of a kind: scroll!"));
    }

    #[test]
    fn test_no_bonus_for_pairs() {
        let bonus = detect_bonus(&row(&[Gem, Gem, Skull, Skull, Coins]), &table());
        assert_eq!(bonus, Bonus::default());
    }

    #[test]
    fn test_scale_rounds_half_away_from_zero() {
        assert_eq!(scale(200, 1.0), 200);
        assert_eq!(scale(25, 1.1), 28);
        assert_eq!(scale(-25, 1.1), -28);
        assert_eq!(scale(5, 1.5), 8);
        assert_eq!(scale(-5, 1.5), -8);
    }

    fn kind_strategy() -> impl Strategy<Value = SymbolKind> {
        (0..SymbolKind::ALL.len()).prop_map(|index| SymbolKind::ALL[index])
    }

    proptest! {
        #[test]
        fn scoring_ignores_order(kinds in proptest::collection::vec(kind_strategy(), 4..=5), seed in any::<u64>()) {
            let symbols = row(&kinds);
            let mut reversed = symbols.clone();
            reversed.reverse();
            let mut rotated = symbols.clone();
            rotated.rotate_left((seed % kinds.len() as u64) as usize);

            prop_assert_eq!(base_points(&symbols), base_points(&reversed));
            prop_assert_eq!(base_points(&symbols), base_points(&rotated));
            prop_assert_eq!(detect_bonus(&symbols, &table()), detect_bonus(&rotated, &table()));
        }
    }
}
