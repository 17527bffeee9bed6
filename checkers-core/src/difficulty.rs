//! Difficulty tiers and their search limits

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Computer opponent strength
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Uniformly random legal move, no search
    Easy,
    Medium,
    Hard,
    GodMode,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::GodMode,
    ];
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::GodMode => "god-mode",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Difficulty {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "god-mode" | "godmode" | "god" => Ok(Difficulty::GodMode),
            other => anyhow::bail!("Unknown difficulty: {}", other),
        }
    }
}

/// Depth and wall-clock budget for one search
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    pub max_depth: u32,
    pub time_budget_ms: u64,
}

impl SearchLimits {
    pub const fn new(max_depth: u32, time_budget_ms: u64) -> Self {
        Self { max_depth, time_budget_ms }
    }

    /// Depth 0 and 1 do not search; the move is picked at random
    pub fn uses_search(&self) -> bool {
        self.max_depth >= 2
    }
}

/// Difficulty -> limits mapping
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyTable {
    pub easy: SearchLimits,
    pub medium: SearchLimits,
    pub hard: SearchLimits,
    pub god_mode: SearchLimits,
    /// Used for every tier while a multi-jump chain is being finished
    pub continuation: SearchLimits,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            easy: SearchLimits::new(0, 0),
            medium: SearchLimits::new(2, 1_000),
            hard: SearchLimits::new(4, 5_000),
            god_mode: SearchLimits::new(6, 15_000),
            continuation: SearchLimits::new(3, 3_000),
        }
    }
}

impl DifficultyTable {
    pub fn limits(&self, difficulty: Difficulty) -> SearchLimits {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
            Difficulty::GodMode => self.god_mode,
        }
    }

    /// Load overrides from a JSON file. Missing tiers fall back to defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read limits file: {}", path.display()))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        #[derive(Deserialize)]
        struct PartialTable {
            easy: Option<SearchLimits>,
            medium: Option<SearchLimits>,
            hard: Option<SearchLimits>,
            god_mode: Option<SearchLimits>,
            continuation: Option<SearchLimits>,
        }

        let partial: PartialTable =
            serde_json::from_str(content).context("Invalid difficulty table JSON")?;
        let defaults = Self::default();

        let table = Self {
            easy: partial.easy.unwrap_or(defaults.easy),
            medium: partial.medium.unwrap_or(defaults.medium),
            hard: partial.hard.unwrap_or(defaults.hard),
            god_mode: partial.god_mode.unwrap_or(defaults.god_mode),
            continuation: partial.continuation.unwrap_or(defaults.continuation),
        };

        if !table.continuation.uses_search() {
            anyhow::bail!(
                "continuation limits must search at least depth 2, got {}",
                table.continuation.max_depth
            );
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = DifficultyTable::default();
        assert!(!table.limits(Difficulty::Easy).uses_search());
        assert_eq!(table.limits(Difficulty::Medium), SearchLimits::new(2, 1000));
        assert_eq!(table.limits(Difficulty::Hard), SearchLimits::new(4, 5000));
        assert_eq!(table.limits(Difficulty::GodMode), SearchLimits::new(6, 15000));
        assert_eq!(table.continuation.max_depth, 3);
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{ "hard": { "max_depth": 5, "time_budget_ms": 200 } }"#;
        let table = DifficultyTable::from_json(json).unwrap();
        assert_eq!(table.hard, SearchLimits::new(5, 200));
        assert_eq!(table.medium, DifficultyTable::default().medium);
    }

    #[test]
    fn test_rejects_shallow_continuation() {
        let json = r#"{ "continuation": { "max_depth": 0, "time_budget_ms": 10 } }"#;
        assert!(DifficultyTable::from_json(json).is_err());
        assert!(DifficultyTable::from_json("not json").is_err());
    }

    #[test]
    fn test_parse_difficulty() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.to_string().parse::<Difficulty>().unwrap(), difficulty);
        }
        assert_eq!("GodMode".parse::<Difficulty>().unwrap(), Difficulty::GodMode);
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let table = DifficultyTable::default();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(DifficultyTable::from_json(&json).unwrap(), table);
    }
}
