pub mod app;
pub mod audio;
pub mod engine;
pub mod entities;
pub mod game;
pub mod input;
pub mod renderer;

// Library exports for testing
pub use engine::{
    Cooldown, FieldBounds, GameStats, GameTimer, LevelConfig, Pool, PoolEntry, UpgradeConfig,
    VariableCooldown, level_table,
};
pub use entities::{
    BonusFormation, Boss, Direction, DroppedItem, EnemyKind, EnemyUnit, Entity, FinalBoss,
    FinalPhase, Formation, ItemKind, ItemParams, MidBoss, Projectile, ProjectileOwner,
    ProjectileParams, Ship, SpriteKind, Tint, MAX_LIVES,
};
pub use game::{GameSession, InputState, RenderSink};
