//! Static game configuration: one descriptor per mode plus shared timing,
//! attempt count and an optional level table.

use super::progression::LevelTable;
use super::symbol::{SymbolKind, SymbolSpec, SymbolTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Missing required parameter: {0}")]
    MissingParam(String),

    #[error("Invalid parameter value: {0}")]
    InvalidValue(String),
}

/// Reveal pacing in milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Gap between consecutive symbol reveals, scaled by reveal order.
    pub reveal_step_ms: u64,
    /// Pause between the last reveal and the base credit.
    pub settle_ms: u64,
    /// Pause between the base credit and the bonus credit.
    pub bonus_delay_ms: u64,
    /// How long the grid keeps the play control locked after a dig.
    pub grid_cooldown_ms: u64,
}

impl TimingConfig {
    /// Everything fires at offset zero, in schedule order.
    #[cfg(test)]
    pub fn instant() -> Self {
        TimingConfig {
            reveal_step_ms: 0,
            settle_ms: 0,
            bonus_delay_ms: 0,
            grid_cooldown_ms: 0,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            reveal_step_ms: 150,
            settle_ms: 500,
            bonus_delay_ms: 1000,
            grid_cooldown_ms: 1000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    /// Exact number of cells per kind before padding or truncation.
    pub item_distribution: BTreeMap<SymbolKind, usize>,
    /// Kind used to pad a short distribution.
    pub filler: SymbolKind,
    pub symbols: SymbolTable,
    pub reveal_count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineConfig {
    pub symbols: SymbolTable,
    #[serde(default = "LineConfig::default_row_count")]
    pub row_count: usize,
    /// Inclusive range the line length is drawn from.
    #[serde(default = "LineConfig::default_line_length_range")]
    pub line_length_range: [usize; 2],
    #[serde(default = "LineConfig::default_active_row")]
    pub active_row: usize,
}

impl LineConfig {
    fn default_row_count() -> usize {
        3
    }

    fn default_line_length_range() -> [usize; 2] {
        [4, 5]
    }

    fn default_active_row() -> usize {
        1
    }

    pub fn new(symbols: SymbolTable) -> Self {
        LineConfig {
            symbols,
            row_count: Self::default_row_count(),
            line_length_range: Self::default_line_length_range(),
            active_row: Self::default_active_row(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ModeConfig {
    Grid(GridConfig),
    Line(LineConfig),
}

impl ModeConfig {
    pub fn symbols(&self) -> &SymbolTable {
        match self {
            ModeConfig::Grid(grid) => &grid.symbols,
            ModeConfig::Line(line) => &line.symbols,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub mode: ModeConfig,
    #[serde(default = "GameConfig::default_attempts")]
    pub attempts: u32,
    #[serde(default)]
    pub timing: TimingConfig,
    /// Present only in the leveling variant.
    #[serde(default)]
    pub levels: Option<LevelTable>,
}

impl GameConfig {
    fn default_attempts() -> u32 {
        10
    }

    /// The 5×5 excavation board.
    pub fn grid() -> Self {
        use SymbolKind::*;
        let item_distribution = [
            (Gem, 5),
            (Treasure, 3),
            (Skull, 2),
            (Bomb, 2),
            (Coins, 3),
            (Scroll, 10),
        ]
        .into_iter()
        .collect();
        let symbols = SymbolTable::new(vec![
            SymbolSpec::new(Gem, "artifact", 50, 0),
            SymbolSpec::new(Treasure, "treasure", 100, 0),
            SymbolSpec::new(Skull, "skull", 25, 0),
            SymbolSpec::new(Bomb, "bomb", -50, 0),
            SymbolSpec::new(Coins, "coins", -25, 0),
            SymbolSpec::new(Scroll, "scroll", 10, 0),
        ]);

        GameConfig {
            mode: ModeConfig::Grid(GridConfig {
                rows: 5,
                cols: 5,
                item_distribution,
                filler: Scroll,
                symbols,
                reveal_count: 2,
            }),
            attempts: Self::default_attempts(),
            timing: TimingConfig::default(),
            levels: None,
        }
    }

    fn line_symbols() -> SymbolTable {
        use SymbolKind::*;
        SymbolTable::new(vec![
            SymbolSpec::new(Gem, "gem", 50, 10),
            SymbolSpec::new(Treasure, "treasure", 100, 5),
            SymbolSpec::new(Skull, "skull", -25, 15),
            SymbolSpec::new(Bomb, "bomb", -50, 10),
            SymbolSpec::new(Coins, "coins", 20, 25),
            SymbolSpec::new(Scroll, "scroll", 10, 35),
        ])
    }

    /// Symbol lines with experience, levels and score multipliers.
    pub fn expedition() -> Self {
        GameConfig {
            mode: ModeConfig::Line(LineConfig::new(Self::line_symbols())),
            attempts: Self::default_attempts(),
            timing: TimingConfig::default(),
            levels: Some(LevelTable::default()),
        }
    }

    /// Symbol lines without leveling.
    pub fn quick_dig() -> Self {
        GameConfig {
            levels: None,
            ..Self::expedition()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: String| Err(ConfigError::InvalidValue(message));

        match &self.mode {
            ModeConfig::Grid(grid) => {
                if grid.rows == 0 || grid.cols == 0 {
                    return invalid(format!("grid size {}x{}", grid.rows, grid.cols));
                }
                if grid.reveal_count == 0 {
                    return invalid("reveal_count must be positive".to_string());
                }
                if grid.reveal_count > grid.rows * grid.cols {
                    return invalid(format!(
                        "reveal_count {} exceeds {} cells",
                        grid.reveal_count,
                        grid.rows * grid.cols
                    ));
                }
            }
            ModeConfig::Line(line) => {
                if line.symbols.total_weight() == 0 {
                    return invalid("line symbols need a positive total weight".to_string());
                }
                let [min, max] = line.line_length_range;
                if min == 0 || min > max {
                    return invalid(format!("line length range [{}, {}]", min, max));
                }
                if line.active_row >= line.row_count {
                    return invalid(format!(
                        "active row {} outside {} rows",
                        line.active_row, line.row_count
                    ));
                }
            }
        }

        if let Some(levels) = &self.levels {
            let entries = levels.levels();
            let first = entries
                .first()
                .ok_or_else(|| ConfigError::MissingParam("levels".to_string()))?;
            if first.threshold != 0 {
                return invalid(format!("first level threshold {}", first.threshold));
            }
            if entries
                .windows(2)
                .any(|pair| pair[0].level >= pair[1].level || pair[0].threshold > pair[1].threshold)
            {
                return invalid("levels must ascend".to_string());
            }
            if let Some(entry) = entries.iter().find(|entry| !(entry.multiplier > 0.)) {
                return invalid(format!(
                    "level {} multiplier {}",
                    entry.level, entry.multiplier
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::game::progression::Level;

    #[test]
    fn test_presets_are_valid() {
        for config in [
            GameConfig::grid(),
            GameConfig::expedition(),
            GameConfig::quick_dig(),
        ] {
            assert!(config.validate().is_ok(), "{:?}", config);
        }
    }

    #[test]
    fn test_grid_distribution_fills_board() {
        let config = GameConfig::grid();
        let ModeConfig::Grid(grid) = config.mode else {
            panic!("grid preset is not a grid");
        };
        assert_eq!(grid.item_distribution.values().sum::<usize>(), 25);
    }

    #[test]
    fn test_from_json_applies_defaults() {
        let json = r#"{
            "mode": {
                "type": "line",
                "symbols": [
                    {"kind": "gem", "label": "gem", "points": 50, "weight": 1},
                    {"kind": "bomb", "label": "bomb", "points": -50, "weight": 1}
                ]
            },
            "levels": [
                {"level": 1, "title": "Novice", "threshold": 0, "multiplier": 1.0},
                {"level": 2, "title": "Expert", "threshold": 50, "multiplier": 1.5}
            ]
        }"#;

        let config = GameConfig::from_json(json).unwrap();
        assert_eq!(config.attempts, 10);
        assert_eq!(config.timing, TimingConfig::default());
        let ModeConfig::Line(line) = &config.mode else {
            panic!("expected line mode");
        };
        assert_eq!(line.row_count, 3);
        assert_eq!(line.line_length_range, [4, 5]);
        assert_eq!(line.active_row, 1);
        assert_eq!(line.symbols.point_value_of(SymbolKind::Gem), 50);
        assert_eq!(line.symbols.draw_weight_of(SymbolKind::Skull), 0);
        assert_eq!(config.levels.unwrap().levels().len(), 2);
    }

    #[test]
    fn test_from_json_reports_parse_errors() {
        assert!(matches!(
            GameConfig::from_json("{\"mode\": 3}"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = GameConfig::grid();
        if let ModeConfig::Grid(grid) = &mut config.mode {
            grid.reveal_count = 26;
        }
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue(_))
        ));

        let mut config = GameConfig::quick_dig();
        if let ModeConfig::Line(line) = &mut config.mode {
            line.active_row = 3;
        }
        assert!(config.validate().is_err());

        let mut config = GameConfig::expedition();
        config.levels = Some(LevelTable::new(vec![
            Level::new(1, "a", 0, 1.0),
            Level::new(2, "b", 0, 0.0),
        ]));
        assert!(config.validate().is_err());

        config.levels = Some(LevelTable::new(Vec::new()));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingParam(_))
        ));
    }
}
