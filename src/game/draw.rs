use super::symbol::{SymbolKind, SymbolTable};
use rand::prelude::*;

fn cumulate(iter: impl Iterator<Item = u32>) -> impl Iterator<Item = f64> {
    iter.scan(0., |acc, x| {
        *acc += x as f64;
        Some(*acc)
    })
}

/// Draws a kind with probability `weight / total`. Walks kinds in
/// enumeration order and returns the first whose running sum reaches `r`.
pub fn draw_kind<R: Rng + ?Sized>(table: &SymbolTable, rng: &mut R) -> SymbolKind {
    let total = table.total_weight();
    if total == 0 {
        log::warn!("symbol table has no weight, drawing fallback kind");
        return fallback_kind();
    }

    let r = rng.gen_range(0. ..total as f64);
    SymbolKind::ALL
        .iter()
        .zip(cumulate(SymbolKind::ALL.iter().map(|&kind| table.draw_weight_of(kind))))
        .find(|&(&kind, sum)| table.draw_weight_of(kind) > 0 && sum >= r)
        .map(|(&kind, _)| kind)
        .unwrap_or_else(|| {
            log::warn!("weighted draw walked off the table at r={}", r);
            fallback_kind()
        })
}

fn fallback_kind() -> SymbolKind {
    SymbolKind::ALL[SymbolKind::ALL.len() - 1]
}

/// Uniform Fisher–Yates permutation.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::game::symbol::SymbolSpec;
    use proptest::prelude::*;
    use SymbolKind::*;

    fn table() -> SymbolTable {
        SymbolTable::new(vec![
            SymbolSpec::new(Gem, "gem", 50, 10),
            SymbolSpec::new(Treasure, "treasure", 100, 5),
            SymbolSpec::new(Skull, "skull", -25, 15),
            SymbolSpec::new(Bomb, "bomb", -50, 0),
            SymbolSpec::new(Coins, "coins", 20, 30),
            SymbolSpec::new(Scroll, "scroll", 10, 40),
        ])
    }

    #[test]
    fn test_frequencies_converge_to_weights() {
        let table = table();
        let mut rng = StdRng::seed_from_u64(7);
        let draws = 200_000;
        let mut counts = [0usize; 6];
        for _ in 0..draws {
            counts[draw_kind(&table, &mut rng).index()] += 1;
        }

        let total = table.total_weight() as f64;
        for kind in SymbolKind::ALL {
            let expected = table.draw_weight_of(kind) as f64 / total;
            let observed = counts[kind.index()] as f64 / draws as f64;
            assert!(
                (expected - observed).abs() < 0.01,
                "{:?}: expected {} observed {}",
                kind,
                expected,
                observed
            );
        }
        assert_eq!(counts[Bomb.index()], 0);
    }

    #[test]
    fn test_single_weight_always_wins() {
        let table = SymbolTable::new(vec![
            SymbolSpec::new(Gem, "gem", 50, 0),
            SymbolSpec::new(Skull, "skull", -25, 4),
        ]);
        let mut rng = StdRng::seed_from_u64(1);
        assert!((0..1000).all(|_| draw_kind(&table, &mut rng) == Skull));
    }

    #[test]
    fn test_empty_table_falls_back_to_last_kind() {
        let table = SymbolTable::new(Vec::new());
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(draw_kind(&table, &mut rng), Scroll);
    }

    proptest! {
        #[test]
        fn shuffle_preserves_multiset(items in proptest::collection::vec(0u8..6, 0..64), seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut items = items;
            let mut shuffled = items.clone();
            shuffle(&mut shuffled, &mut rng);
            items.sort_unstable();
            shuffled.sort_unstable();
            prop_assert_eq!(items, shuffled);
        }
    }
}
