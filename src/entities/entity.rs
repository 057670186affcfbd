/// Palette-independent color tag. The renderer maps these onto whatever
/// the terminal supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Red,
    Blue,
    Orange,
    Yellow,
    Green,
    Cyan,
    Magenta,
    White,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Heal,
    Shield,
    Push,
    Freeze,
    Explode,
    Slow,
}

/// What an entity looks like. The simulation only cares about the
/// bounding box; the renderer picks glyphs per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Ship,
    ShipExplosion,
    EnemyA,
    EnemyB,
    EnemyC,
    EnemyExplosion,
    Bonus,
    MidBoss,
    FinalBoss,
    BossExplosion,
    PlayerBullet,
    HostileBullet,
    Item(ItemKind),
}

/// Axis-aligned box with a sprite tag. Position is the top-left corner
/// in cells; overlap tests work from centers so sprites of different
/// sizes compare fairly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entity {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub sprite: SpriteKind,
    pub color: Option<Tint>,
}

impl Entity {
    pub fn new(x: i32, y: i32, width: i32, height: i32, sprite: SpriteKind) -> Self {
        Self {
            x,
            y,
            width,
            height,
            sprite,
            color: None,
        }
    }

    pub fn with_color(mut self, color: Tint) -> Self {
        self.color = Some(color);
        self
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    pub fn center_y(&self) -> i32 {
        self.y + self.height / 2
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Strict center-distance test: two boxes touching edge to edge do
    /// not overlap. Centers are doubled so odd sizes keep their exact
    /// half-extents instead of truncating.
    pub fn overlaps(&self, other: &Entity) -> bool {
        let dx2 = (2 * self.x + self.width) - (2 * other.x + other.width);
        let dy2 = (2 * self.y + self.height) - (2 * other.y + other.height);
        dx2.abs() < self.width + other.width && dy2.abs() < self.height + other.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_at_same_position() {
        let a = Entity::new(10, 10, 5, 3, SpriteKind::Ship);
        let b = Entity::new(10, 10, 5, 3, SpriteKind::EnemyA);
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_edge_adjacent_boxes_do_not_overlap() {
        let a = Entity::new(10, 10, 4, 4, SpriteKind::Ship);
        // centers 4 apart, exactly the sum of half-widths
        let b = Entity::new(14, 10, 4, 4, SpriteKind::EnemyA);
        assert!(!a.overlaps(&b));

        let c = Entity::new(13, 10, 4, 4, SpriteKind::EnemyA);
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_one_cell_overlap_of_odd_widths_collides() {
        let a = Entity::new(10, 10, 5, 3, SpriteKind::Ship);
        let b = Entity::new(14, 10, 5, 3, SpriteKind::EnemyA);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_bullet_over_outer_cell_of_enemy_collides() {
        let enemy = Entity::new(10, 10, 5, 3, SpriteKind::EnemyB);
        for x in 10..15 {
            let bullet = Entity::new(x, 11, 1, 1, SpriteKind::PlayerBullet);
            assert!(bullet.overlaps(&enemy), "column {x} must register a hit");
        }
        assert!(!Entity::new(9, 11, 1, 1, SpriteKind::PlayerBullet).overlaps(&enemy));
        assert!(!Entity::new(15, 11, 1, 1, SpriteKind::PlayerBullet).overlaps(&enemy));
    }

    #[test]
    fn test_small_bullet_inside_large_sprite() {
        let boss = Entity::new(20, 5, 11, 5, SpriteKind::FinalBoss);
        let bullet = Entity::new(25, 7, 1, 1, SpriteKind::PlayerBullet);
        assert!(boss.overlaps(&bullet));
        assert!(bullet.overlaps(&boss));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_overlap_is_symmetric(
                ax in -50i32..50, ay in -50i32..50,
                aw in 1i32..12, ah in 1i32..12,
                bx in -50i32..50, by in -50i32..50,
                bw in 1i32..12, bh in 1i32..12,
            ) {
                let a = Entity::new(ax, ay, aw, ah, SpriteKind::Ship);
                let b = Entity::new(bx, by, bw, bh, SpriteKind::EnemyA);
                prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
            }

            #[test]
            fn test_far_apart_boxes_never_overlap(
                ax in 0i32..20, ay in 0i32..20,
                offset in 30i32..100,
            ) {
                let a = Entity::new(ax, ay, 11, 5, SpriteKind::FinalBoss);
                let b = Entity::new(ax + offset, ay, 11, 5, SpriteKind::MidBoss);
                prop_assert!(!a.overlaps(&b));
            }
        }
    }
}
