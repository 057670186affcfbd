mod bonus;
mod boss;
mod enemy;
mod entity;
mod formation;
mod item;
mod projectile;
mod ship;

// Re-export all public types
pub use bonus::BonusFormation;
pub use boss::{Boss, FinalBoss, FinalPhase, MidBoss};
pub use enemy::{EnemyKind, EnemyUnit};
pub use entity::{Entity, ItemKind, SpriteKind, Tint};
pub use formation::{Direction, Formation};
pub use item::{DroppedItem, ItemParams, ITEM_DROP_CHANCE};
pub use projectile::{Projectile, ProjectileOwner, ProjectileParams};
pub use ship::{PlayerId, Ship, MAX_LIVES, SHIP_HEIGHT};
