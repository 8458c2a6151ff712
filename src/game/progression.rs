use serde::{Deserialize, Serialize};

pub const MIN_EXPERIENCE_PER_ROUND: u64 = 10;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub level: u32,
    pub title: String,
    pub threshold: u64,
    pub multiplier: f64,
}

impl Level {
    pub fn new(level: u32, title: &str, threshold: u64, multiplier: f64) -> Level {
        Level {
            level,
            title: title.to_string(),
            threshold,
            multiplier,
        }
    }
}

/// Ordered by level and threshold, both ascending.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelTable {
    levels: Vec<Level>,
}

impl LevelTable {
    pub fn new(levels: Vec<Level>) -> Self {
        LevelTable { levels }
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn get(&self, level: u32) -> Option<&Level> {
        self.levels.iter().find(|entry| entry.level == level)
    }

    /// Unknown levels scale by 1.0.
    pub fn multiplier(&self, level: u32) -> f64 {
        self.get(level).map(|entry| entry.multiplier).unwrap_or(1.0)
    }

    pub fn title(&self, level: u32) -> &str {
        self.get(level)
            .map(|entry| entry.title.as_str())
            .unwrap_or("Digger")
    }

    /// Greatest entry whose threshold is reached by `experience`.
    pub fn level_for(&self, experience: u64) -> Option<&Level> {
        self.levels
            .iter()
            .filter(|entry| entry.threshold <= experience)
            .max_by_key(|entry| entry.level)
    }

    /// Threshold of the level after `level`, if any.
    pub fn next_threshold(&self, level: u32) -> Option<u64> {
        self.levels
            .iter()
            .filter(|entry| entry.level > level)
            .map(|entry| entry.threshold)
            .min()
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        LevelTable::new(vec![
            Level::new(1, "Novice Digger", 0, 1.0),
            Level::new(2, "Trench Apprentice", 100, 1.1),
            Level::new(3, "Field Archaeologist", 300, 1.2),
            Level::new(4, "Site Supervisor", 600, 1.35),
            Level::new(5, "Expedition Leader", 1000, 1.5),
            Level::new(6, "Legendary Explorer", 1600, 2.0),
        ])
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelUp {
    pub level: u32,
    pub title: String,
    pub rewards: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    pub level: u32,
    pub experience: u64,
}

impl Progression {
    pub fn new(table: &LevelTable) -> Self {
        let level = table.levels().first().map(|entry| entry.level).unwrap_or(1);
        Progression {
            level,
            experience: 0,
        }
    }

    /// Adds experience and jumps straight to the highest level reached.
    pub fn add_experience(&mut self, amount: u64, table: &LevelTable) -> Option<LevelUp> {
        self.experience += amount;

        let reached = table
            .level_for(self.experience)
            .filter(|entry| entry.level > self.level)?;
        self.level = reached.level;

        log::info!(
            "level up to {} ({}) at {} experience",
            reached.level,
            reached.title,
            self.experience
        );
        Some(LevelUp {
            level: reached.level,
            title: reached.title.clone(),
            rewards: vec![
                format!("Score multiplier x{:.1}", reached.multiplier),
                "New expedition title".to_string(),
                "Bonus combinations pay more".to_string(),
            ],
        })
    }

    pub fn multiplier(&self, table: &LevelTable) -> f64 {
        table.multiplier(self.level)
    }
}

/// Experience for one round: at least the floor even when points were lost.
pub fn experience_for_round(base: i64, bonus: i64) -> u64 {
    (base.abs() + bonus).max(MIN_EXPERIENCE_PER_ROUND as i64) as u64
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_zero_experience_keeps_level() {
        let table = LevelTable::default();
        let mut progression = Progression::new(&table);
        assert_eq!(progression.add_experience(0, &table), None);
        assert_eq!(progression.level, 1);
        assert_eq!(progression.experience, 0);
    }

    #[test]
    fn test_exact_threshold_levels_up() {
        let table = LevelTable::default();
        let mut progression = Progression::new(&table);
        assert_eq!(progression.add_experience(99, &table), None);

        let level_up = progression.add_experience(1, &table).unwrap();
        assert_eq!(level_up.level, 2);
        assert_eq!(level_up.title, "Trench Apprentice");
        assert_eq!(level_up.rewards[0], "Score multiplier x1.1");
        assert_eq!(level_up.rewards.len(), 3);
        assert_eq!(progression.level, 2);
    }

    #[test]
    fn test_large_gain_jumps_levels() {
        let table = LevelTable::default();
        let mut progression = Progression::new(&table);
        let level_up = progression.add_experience(1200, &table).unwrap();
        assert_eq!(level_up.level, 5);
        assert_eq!(progression.multiplier(&table), 1.5);
        assert_eq!(level_up.rewards[0], "Score multiplier x1.5");
    }

    #[test]
    fn test_unknown_level_falls_back() {
        let table = LevelTable::default();
        assert_eq!(table.multiplier(42), 1.0);
        assert_eq!(table.title(42), "Digger");
        assert_eq!(table.next_threshold(6), None);
        assert_eq!(table.next_threshold(1), Some(100));
    }

    #[test]
    fn test_round_experience_floor() {
        assert_eq!(experience_for_round(0, 0), 10);
        assert_eq!(experience_for_round(-5, 0), 10);
        assert_eq!(experience_for_round(-150, 0), 150);
        assert_eq!(experience_for_round(200, 400), 600);
        assert_eq!(experience_for_round(100, -300), 10);
    }
}
