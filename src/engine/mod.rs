pub mod clock;
pub mod config;
pub mod cooldown;
pub mod pool;
pub mod state;

pub use clock::{Clock, GameTimer, SystemClock};
pub use config::{level_table, FieldBounds, LevelConfig, UpgradeConfig};
pub use cooldown::{Cooldown, VariableCooldown};
pub use pool::{Pool, PoolEntry};
pub use state::GameStats;
