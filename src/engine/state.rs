/// Snapshot of a run's progress, carried from level to level and fed to
/// the HUD and end screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    pub level: u32,
    pub scores: Vec<u32>,
    pub coins: u32,
    pub lives: Vec<u32>,
    pub bullets_shot: u32,
    pub ships_destroyed: u32,
    pub elapsed_ms: u64,
}

impl GameStats {
    pub fn new_game(players: usize, starting_lives: u32) -> Self {
        Self {
            level: 1,
            scores: vec![0; players],
            coins: 0,
            lives: vec![starting_lives; players],
            bullets_shot: 0,
            ships_destroyed: 0,
            elapsed_ms: 0,
        }
    }

    pub fn total_score(&self) -> u32 {
        self.scores.iter().sum()
    }
}
