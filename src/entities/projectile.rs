use crate::engine::{FieldBounds, PoolEntry};
use crate::entities::entity::{Entity, SpriteKind, Tint};
use crate::entities::ship::PlayerId;

pub const PLAYER_BULLET_SPEED: i32 = -1;
pub const HOSTILE_BULLET_SPEED: i32 = 1;

const BULLET_WIDTH: i32 = 1;
const BULLET_HEIGHT: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileOwner {
    Player(PlayerId),
    Hostile,
}

/// Everything needed to (re)configure a bullet taken from the pool.
#[derive(Debug, Clone, Copy)]
pub struct ProjectileParams {
    pub x: i32,
    pub y: i32,
    pub dx: i32,
    pub dy: i32,
    pub owner: ProjectileOwner,
    pub pierce: u32,
}

impl ProjectileParams {
    pub fn player_shot(x: i32, y: i32, player_id: PlayerId, pierce: u32) -> Self {
        Self {
            x,
            y,
            dx: 0,
            dy: PLAYER_BULLET_SPEED,
            owner: ProjectileOwner::Player(player_id),
            pierce,
        }
    }

    pub fn hostile(x: i32, y: i32, dx: i32, dy: i32) -> Self {
        Self {
            x,
            y,
            dx,
            dy,
            owner: ProjectileOwner::Hostile,
            pierce: 0,
        }
    }

    fn entity(&self) -> Entity {
        let (sprite, tint) = match self.owner {
            ProjectileOwner::Player(_) => (SpriteKind::PlayerBullet, Tint::Yellow),
            ProjectileOwner::Hostile => (SpriteKind::HostileBullet, Tint::Magenta),
        };
        Entity::new(self.x, self.y, BULLET_WIDTH, BULLET_HEIGHT, sprite).with_color(tint)
    }
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub entity: Entity,
    dx: i32,
    dy: i32,
    owner: ProjectileOwner,
    pierce: u32,
    live: bool,
}

impl Projectile {
    pub fn owner(&self) -> ProjectileOwner {
        self.owner
    }

    pub fn update(&mut self) {
        self.entity.move_by(self.dx, self.dy);
    }

    pub fn is_off_field(&self, field: &FieldBounds) -> bool {
        self.entity.y < field.hud_line
            || self.entity.y > field.height
            || self.entity.x < 0
            || self.entity.x >= field.width
    }

    /// Records a hit against a target. Returns true when the bullet is
    /// spent; a bullet with pierce budget left keeps flying.
    pub fn register_hit(&mut self) -> bool {
        if self.pierce == 0 {
            true
        } else {
            self.pierce -= 1;
            false
        }
    }
}

impl PoolEntry for Projectile {
    type Params = ProjectileParams;

    fn create(params: ProjectileParams) -> Self {
        Self {
            entity: params.entity(),
            dx: params.dx,
            dy: params.dy,
            owner: params.owner,
            pierce: params.pierce,
            live: false,
        }
    }

    fn reconfigure(&mut self, params: ProjectileParams) {
        self.entity = params.entity();
        self.dx = params.dx;
        self.dy = params.dy;
        self.owner = params.owner;
        self.pierce = params.pierce;
    }

    fn is_live(&self) -> bool {
        self.live
    }

    fn set_live(&mut self, live: bool) {
        self.live = live;
    }
}
