use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Gem,
    Treasure,
    Skull,
    Bomb,
    Coins,
    Scroll,
}

impl SymbolKind {
    /// Fixed enumeration order. Draw walks and bonus scans follow it.
    pub const ALL: [SymbolKind; 6] = [
        SymbolKind::Gem,
        SymbolKind::Treasure,
        SymbolKind::Skull,
        SymbolKind::Bomb,
        SymbolKind::Coins,
        SymbolKind::Scroll,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SymbolSpec {
    pub kind: SymbolKind,
    pub label: String,
    pub points: i64,
    #[serde(default)]
    pub weight: u32,
}

impl SymbolSpec {
    pub fn new(kind: SymbolKind, label: &str, points: i64, weight: u32) -> Self {
        SymbolSpec {
            kind,
            label: label.to_string(),
            points,
            weight,
        }
    }
}

/// Point values and draw weights for every kind, held in enumeration order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SymbolSpec>", into = "Vec<SymbolSpec>")]
pub struct SymbolTable {
    specs: Vec<SymbolSpec>,
}

impl SymbolTable {
    /// Builds a table from one entry per kind. Kinds left out are worth
    /// nothing and are never drawn.
    pub fn new(specs: impl IntoIterator<Item = SymbolSpec>) -> Self {
        let mut table: Vec<SymbolSpec> = SymbolKind::ALL
            .iter()
            .map(|&kind| SymbolSpec::new(kind, &format!("{:?}", kind).to_lowercase(), 0, 0))
            .collect();
        for spec in specs {
            let index = spec.kind.index();
            table[index] = spec;
        }
        SymbolTable { specs: table }
    }

    pub fn point_value_of(&self, kind: SymbolKind) -> i64 {
        self.specs[kind.index()].points
    }

    pub fn draw_weight_of(&self, kind: SymbolKind) -> u32 {
        self.specs[kind.index()].weight
    }

    pub fn label_of(&self, kind: SymbolKind) -> &str {
        &self.specs[kind.index()].label
    }

    pub fn total_weight(&self) -> u32 {
        self.specs.iter().map(|spec| spec.weight).sum()
    }

    /// Replaces one kind's weight to force outcomes.
    #[cfg(test)]
    pub fn with_weight(mut self, kind: SymbolKind, weight: u32) -> Self {
        self.specs[kind.index()].weight = weight;
        self
    }
}

impl TryFrom<Vec<SymbolSpec>> for SymbolTable {
    type Error = String;

    fn try_from(specs: Vec<SymbolSpec>) -> Result<Self, Self::Error> {
        let mut seen = [false; 6];
        for spec in specs.iter() {
            if std::mem::replace(&mut seen[spec.kind.index()], true) {
                return Err(format!("duplicate symbol kind {:?}", spec.kind));
            }
        }
        Ok(SymbolTable::new(specs))
    }
}

impl From<SymbolTable> for Vec<SymbolSpec> {
    fn from(table: SymbolTable) -> Self {
        table.specs
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    Cell(usize),
    Line { row: usize, col: usize },
}

/// One drawn instance. `points` is copied from the table at draw time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub id: usize,
    pub kind: SymbolKind,
    pub points: i64,
    pub revealed: bool,
    pub position: Position,
}

impl Symbol {
    pub fn new(id: usize, kind: SymbolKind, table: &SymbolTable, position: Position) -> Self {
        Symbol {
            id,
            kind,
            points: table.point_value_of(kind),
            revealed: false,
            position,
        }
    }

    pub fn reveal(&mut self) {
        self.revealed = true;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use SymbolKind::*;

    #[test]
    fn test_missing_kinds_are_inert() {
        let table = SymbolTable::new(vec![SymbolSpec::new(Gem, "gem", 50, 3)]);
        assert_eq!(table.point_value_of(Gem), 50);
        assert_eq!(table.draw_weight_of(Gem), 3);
        assert_eq!(table.point_value_of(Bomb), 0);
        assert_eq!(table.draw_weight_of(Bomb), 0);
        assert_eq!(table.total_weight(), 3);
    }

    #[test]
    fn test_points_are_copied_at_draw_time() {
        let table = SymbolTable::new(vec![SymbolSpec::new(Skull, "skull", 25, 1)]);
        let symbol = Symbol::new(0, Skull, &table, Position::Cell(0));
        let table = SymbolTable::new(vec![SymbolSpec::new(Skull, "skull", -99, 1)]);
        assert_eq!(symbol.points, 25);
        assert_eq!(table.point_value_of(Skull), -99);
    }

    #[test]
    fn test_duplicate_kinds_are_rejected() {
        let specs = vec![
            SymbolSpec::new(Gem, "gem", 50, 1),
            SymbolSpec::new(Gem, "gem again", 10, 1),
        ];
        assert!(SymbolTable::try_from(specs).is_err());
    }
}
