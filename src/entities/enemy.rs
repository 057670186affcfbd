use crate::entities::entity::{Entity, SpriteKind, Tint};

pub const ENEMY_WIDTH: i32 = 5;
pub const ENEMY_HEIGHT: i32 = 3;

/// Formation rows are worth more the deeper they sit; the bonus ship is
/// its own kind so the lanes can reuse the unit type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    RowA,
    RowB,
    RowC,
    Bonus,
}

impl EnemyKind {
    pub fn point_value(&self) -> u32 {
        match self {
            EnemyKind::RowA => 30,
            EnemyKind::RowB => 20,
            EnemyKind::RowC => 10,
            EnemyKind::Bonus => 100,
        }
    }

    fn sprite(&self) -> SpriteKind {
        match self {
            EnemyKind::RowA => SpriteKind::EnemyA,
            EnemyKind::RowB => SpriteKind::EnemyB,
            EnemyKind::RowC => SpriteKind::EnemyC,
            EnemyKind::Bonus => SpriteKind::Bonus,
        }
    }
}

/// One enemy in a formation or bonus lane. Destroyed units keep their
/// slot so the formation shape stays stable; they just stop colliding.
#[derive(Debug, Clone)]
pub struct EnemyUnit {
    pub entity: Entity,
    kind: EnemyKind,
    destroyed: bool,
}

impl EnemyUnit {
    pub fn new(x: i32, y: i32, kind: EnemyKind) -> Self {
        Self {
            entity: Entity::new(x, y, ENEMY_WIDTH, ENEMY_HEIGHT, kind.sprite()),
            kind,
            destroyed: false,
        }
    }

    pub fn with_tint(mut self, tint: Tint) -> Self {
        self.entity = self.entity.with_color(tint);
        self
    }

    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    pub fn point_value(&self) -> u32 {
        self.kind.point_value()
    }

    /// Marks the unit dead and returns its score. The sprite flips to
    /// an explosion so the frame can still draw the slot.
    pub fn destroy(&mut self) -> u32 {
        self.destroyed = true;
        self.entity.sprite = SpriteKind::EnemyExplosion;
        self.kind.point_value()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_values_by_row() {
        assert_eq!(EnemyUnit::new(0, 0, EnemyKind::RowA).point_value(), 30);
        assert_eq!(EnemyUnit::new(0, 0, EnemyKind::RowB).point_value(), 20);
        assert_eq!(EnemyUnit::new(0, 0, EnemyKind::RowC).point_value(), 10);
        assert_eq!(EnemyUnit::new(0, 0, EnemyKind::Bonus).point_value(), 100);
    }

    #[test]
    fn test_destroy_flips_sprite_and_returns_points() {
        let mut unit = EnemyUnit::new(5, 5, EnemyKind::RowB);
        assert!(!unit.is_destroyed());
        assert_eq!(unit.destroy(), 20);
        assert!(unit.is_destroyed());
        assert_eq!(unit.entity.sprite, SpriteKind::EnemyExplosion);
    }
}
