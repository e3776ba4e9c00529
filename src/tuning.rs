//! Difficulty tiers
//!
//! Each tier scales the pursuers and nudges the level's time limit.

use serde::{Deserialize, Serialize};

/// Named difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Next tier, wrapping Hard back to Easy
    pub fn cycle(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Normal,
            Difficulty::Normal => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

/// What a tier changes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultySettings {
    /// Pursuer base speed, units per tick
    pub pursuer_speed: f32,
    /// Upper bound on pursuers spawned (capped by the level's spawn list)
    pub pursuer_count: usize,
    /// Seconds added to (or removed from) the level time limit
    pub time_adjust: f32,
}

/// Lookup from tier to settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTable {
    pub easy: DifficultySettings,
    pub normal: DifficultySettings,
    pub hard: DifficultySettings,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            easy: DifficultySettings {
                pursuer_speed: 2.0,
                pursuer_count: 2,
                time_adjust: 30.0,
            },
            normal: DifficultySettings {
                pursuer_speed: 2.5,
                pursuer_count: 3,
                time_adjust: 0.0,
            },
            hard: DifficultySettings {
                pursuer_speed: 3.5,
                pursuer_count: 5,
                time_adjust: -20.0,
            },
        }
    }
}

impl DifficultyTable {
    pub fn get(&self, tier: Difficulty) -> &DifficultySettings {
        match tier {
            Difficulty::Easy => &self.easy,
            Difficulty::Normal => &self.normal,
            Difficulty::Hard => &self.hard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps() {
        let mut tier = Difficulty::Easy;
        for expected in [Difficulty::Normal, Difficulty::Hard, Difficulty::Easy] {
            tier = tier.cycle();
            assert_eq!(tier, expected);
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn test_table_lookup() {
        let table = DifficultyTable::default();
        assert_eq!(table.get(Difficulty::Hard).pursuer_count, 5);
        assert_eq!(table.get(Difficulty::Easy).time_adjust, 30.0);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Difficulty::Easy).unwrap();
        assert_eq!(json, "\"easy\"");
        let tier: Difficulty = serde_json::from_str("\"hard\"").unwrap();
        assert_eq!(tier, Difficulty::Hard);
    }
}
