use rand::Rng;

use crate::engine::{FieldBounds, PoolEntry};
use crate::entities::entity::{Entity, ItemKind, SpriteKind, Tint};

pub const ITEM_DROP_CHANCE: f64 = 0.3;

const ITEM_SIZE: i32 = 1;
const DEFAULT_FALL_INTERVAL: u32 = 6;

impl ItemKind {
    pub const ALL: [ItemKind; 6] = [
        ItemKind::Heal,
        ItemKind::Shield,
        ItemKind::Push,
        ItemKind::Freeze,
        ItemKind::Explode,
        ItemKind::Slow,
    ];

    /// Rolls the drop dice for a downed enemy.
    pub fn random_drop(rng: &mut impl Rng, chance: f64) -> Option<ItemKind> {
        if rng.random_bool(chance) {
            Some(Self::ALL[rng.random_range(0..Self::ALL.len())])
        } else {
            None
        }
    }

    fn tint(&self) -> Tint {
        match self {
            ItemKind::Heal => Tint::Green,
            ItemKind::Shield => Tint::Cyan,
            ItemKind::Push => Tint::White,
            ItemKind::Freeze => Tint::Blue,
            ItemKind::Explode => Tint::Red,
            ItemKind::Slow => Tint::Yellow,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ItemParams {
    pub x: i32,
    pub y: i32,
    pub kind: ItemKind,
    pub fall_interval: u32,
}

impl ItemParams {
    pub fn new(x: i32, y: i32, kind: ItemKind) -> Self {
        Self {
            x,
            y,
            kind,
            fall_interval: DEFAULT_FALL_INTERVAL,
        }
    }
}

/// A pickup drifting down from a destroyed enemy. Falls one cell every
/// `fall_interval` ticks and despawns past the item line.
#[derive(Debug, Clone)]
pub struct DroppedItem {
    pub entity: Entity,
    pub kind: ItemKind,
    fall_interval: u32,
    ticks: u32,
    live: bool,
}

impl DroppedItem {
    pub fn update(&mut self) {
        self.ticks += 1;
        if self.ticks.is_multiple_of(self.fall_interval) {
            self.entity.move_by(0, 1);
        }
    }

    pub fn is_off_field(&self, field: &FieldBounds) -> bool {
        self.entity.y > field.item_line
    }
}

impl PoolEntry for DroppedItem {
    type Params = ItemParams;

    fn create(params: ItemParams) -> Self {
        Self {
            entity: Entity::new(
                params.x,
                params.y,
                ITEM_SIZE,
                ITEM_SIZE,
                SpriteKind::Item(params.kind),
            )
            .with_color(params.kind.tint()),
            kind: params.kind,
            fall_interval: params.fall_interval,
            ticks: 0,
            live: false,
        }
    }

    fn reconfigure(&mut self, params: ItemParams) {
        self.entity = Entity::new(
            params.x,
            params.y,
            ITEM_SIZE,
            ITEM_SIZE,
            SpriteKind::Item(params.kind),
        )
        .with_color(params.kind.tint());
        self.kind = params.kind;
        self.fall_interval = params.fall_interval;
        self.ticks = 0;
    }

    fn is_live(&self) -> bool {
        self.live
    }

    fn set_live(&mut self, live: bool) {
        self.live = live;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Pool;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_item_falls_one_cell_per_interval() {
        let mut pool: Pool<DroppedItem> = Pool::new();
        let mut item = pool.acquire(ItemParams::new(10, 20, ItemKind::Heal));
        for _ in 0..DEFAULT_FALL_INTERVAL {
            item.update();
        }
        assert_eq!(item.entity.y, 21);
        for _ in 0..DEFAULT_FALL_INTERVAL {
            item.update();
        }
        assert_eq!(item.entity.y, 22);
    }

    #[test]
    fn test_item_despawns_past_item_line() {
        let field = FieldBounds::default();
        let mut pool: Pool<DroppedItem> = Pool::new();
        let mut item = pool.acquire(ItemParams::new(10, field.item_line, ItemKind::Slow));
        assert!(!item.is_off_field(&field));
        for _ in 0..DEFAULT_FALL_INTERVAL {
            item.update();
        }
        assert!(item.is_off_field(&field));
    }

    #[test]
    fn test_drop_chance_extremes() {
        let mut rng = StdRng::seed_from_u64(5);
        assert!(ItemKind::random_drop(&mut rng, 0.0).is_none());
        assert!(ItemKind::random_drop(&mut rng, 1.0).is_some());
    }

    #[test]
    fn test_recycled_item_restarts_fall_clock() {
        let mut pool: Pool<DroppedItem> = Pool::new();
        let mut item = pool.acquire(ItemParams::new(10, 20, ItemKind::Heal));
        for _ in 0..DEFAULT_FALL_INTERVAL - 1 {
            item.update();
        }
        pool.recycle(item);

        let mut item = pool.acquire(ItemParams::new(10, 20, ItemKind::Shield));
        assert_eq!(item.kind, ItemKind::Shield);
        item.update();
        assert_eq!(item.entity.y, 20);
    }
}
