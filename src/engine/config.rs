use color_eyre::eyre::{ensure, Result};

/// Playfield dimensions in terminal cells. `hud_line` is the first row
/// below the score bar; entities never move above it. `item_line` is
/// where falling items stop being collectible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldBounds {
    pub width: i32,
    pub height: i32,
    pub hud_line: i32,
    pub item_line: i32,
}

impl Default for FieldBounds {
    fn default() -> Self {
        Self {
            width: 100,
            height: 48,
            hud_line: 3,
            item_line: 42,
        }
    }
}

impl FieldBounds {
    pub fn new(width: i32, height: i32, hud_line: i32, item_line: i32) -> Result<Self> {
        ensure!(width > 0 && height > 0, "field must have positive size");
        ensure!(
            hud_line >= 0 && hud_line < item_line && item_line <= height,
            "hud line and item line must sit inside the field"
        );
        Ok(Self {
            width,
            height,
            hud_line,
            item_line,
        })
    }
}

/// Per-level difficulty knobs. `base_speed` scales the formation step
/// interval and `shooting_frequency_ms` is the mean delay between
/// formation shots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelConfig {
    pub level: u32,
    pub formation_width: usize,
    pub formation_height: usize,
    pub base_speed: u64,
    pub shooting_frequency_ms: u64,
}

impl LevelConfig {
    pub fn new(
        level: u32,
        formation_width: usize,
        formation_height: usize,
        base_speed: u64,
        shooting_frequency_ms: u64,
    ) -> Result<Self> {
        ensure!(
            formation_width > 0 && formation_height > 0,
            "formation must have at least one column and one row"
        );
        ensure!(base_speed > 0, "base speed must be positive");
        ensure!(
            shooting_frequency_ms > 0,
            "shooting frequency must be positive"
        );
        Ok(Self {
            level,
            formation_width,
            formation_height,
            base_speed,
            shooting_frequency_ms,
        })
    }

    pub fn movement_interval_ms(&self) -> u64 {
        self.base_speed * 10
    }
}

/// Difficulty curve across the campaign. Later levels pack more enemies,
/// step faster and shoot more often.
pub fn level_table() -> Result<Vec<LevelConfig>> {
    Ok(vec![
        LevelConfig::new(1, 5, 4, 60, 2000)?,
        LevelConfig::new(2, 5, 5, 50, 2500)?,
        LevelConfig::new(3, 6, 5, 40, 1500)?,
        LevelConfig::new(4, 6, 6, 30, 1500)?,
        LevelConfig::new(5, 7, 6, 20, 1000)?,
        LevelConfig::new(6, 7, 7, 10, 1000)?,
        LevelConfig::new(7, 8, 7, 5, 500)?,
    ])
}

const SPREAD_BULLETS: [u32; 4] = [1, 2, 3, 4];
const SPREAD_SPACING: [i32; 4] = [0, 10, 8, 5];
const RAPID_REDUCTION_PCT: [u64; 6] = [0, 5, 10, 15, 20, 30];
const BASE_SHOOTING_INTERVAL_MS: u64 = 750;

/// Carried-over weapon upgrades. Each level is an index into a small
/// lookup table rather than a formula so the steps can stay uneven.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpgradeConfig {
    pub spread_level: usize,
    pub rapid_level: usize,
    pub pierce_level: usize,
}

impl UpgradeConfig {
    pub fn new(spread_level: usize, rapid_level: usize, pierce_level: usize) -> Result<Self> {
        ensure!(
            spread_level < SPREAD_BULLETS.len(),
            "spread level out of range"
        );
        ensure!(
            rapid_level < RAPID_REDUCTION_PCT.len(),
            "rapid level out of range"
        );
        ensure!(pierce_level <= 2, "pierce level out of range");
        Ok(Self {
            spread_level,
            rapid_level,
            pierce_level,
        })
    }

    pub fn bullet_count(&self) -> u32 {
        SPREAD_BULLETS[self.spread_level]
    }

    pub fn bullet_spacing(&self) -> i32 {
        SPREAD_SPACING[self.spread_level]
    }

    pub fn shooting_interval_ms(&self) -> u64 {
        BASE_SHOOTING_INTERVAL_MS * (100 - RAPID_REDUCTION_PCT[self.rapid_level]) / 100
    }

    pub fn pierce_budget(&self) -> u32 {
        self.pierce_level as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_bounds_rejects_inverted_lines() {
        assert!(FieldBounds::new(100, 48, 42, 3).is_err());
        assert!(FieldBounds::new(0, 48, 3, 42).is_err());
        assert!(FieldBounds::new(100, 48, 3, 42).is_ok());
    }

    #[test]
    fn test_level_table_is_monotonic_in_difficulty() {
        let table = level_table().unwrap();
        assert_eq!(table.len(), 7);
        for pair in table.windows(2) {
            assert!(pair[1].base_speed <= pair[0].base_speed);
            assert!(
                pair[1].formation_width * pair[1].formation_height
                    >= pair[0].formation_width * pair[0].formation_height
            );
        }
    }

    #[test]
    fn test_upgrade_lookup_tables() {
        let maxed = UpgradeConfig::new(3, 5, 2).unwrap();
        assert_eq!(maxed.bullet_count(), 4);
        assert_eq!(maxed.bullet_spacing(), 5);
        assert_eq!(maxed.shooting_interval_ms(), 525);
        assert_eq!(maxed.pierce_budget(), 2);

        let fresh = UpgradeConfig::default();
        assert_eq!(fresh.bullet_count(), 1);
        assert_eq!(fresh.shooting_interval_ms(), 750);
        assert_eq!(fresh.pierce_budget(), 0);

        assert!(UpgradeConfig::new(4, 0, 0).is_err());
        assert!(UpgradeConfig::new(0, 6, 0).is_err());
        assert!(UpgradeConfig::new(0, 0, 3).is_err());
    }
}
