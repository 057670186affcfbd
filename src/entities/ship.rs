use crate::engine::{Cooldown, Pool, UpgradeConfig};
use crate::entities::entity::{Entity, SpriteKind, Tint};
use crate::entities::projectile::{Projectile, ProjectileParams};

pub type PlayerId = usize;

pub const MAX_LIVES: u32 = 3;

const SHIP_WIDTH: i32 = 5;
pub const SHIP_HEIGHT: i32 = 3;
const SHIP_SPEED: i32 = 1;
const DESTRUCTION_MS: u64 = 1000;

/// Player-controlled ship. Movement is requested by the caller, which
/// also enforces the playfield borders; the ship owns its weapon state
/// and the destroyed/invincible timers.
#[derive(Debug, Clone)]
pub struct Ship {
    pub entity: Entity,
    pub player_id: PlayerId,
    pub lives: u32,
    speed: i32,
    fire_cooldown: Cooldown,
    destruction_cooldown: Cooldown,
    destroyed: bool,
    invincible_until: Option<u64>,
    bullet_count: u32,
    bullet_spacing: i32,
    pierce_budget: u32,
}

impl Ship {
    pub fn new(x: i32, y: i32, player_id: PlayerId, lives: u32, upgrades: &UpgradeConfig) -> Self {
        let tint = if player_id == 0 { Tint::Green } else { Tint::Cyan };
        Self {
            entity: Entity::new(x, y, SHIP_WIDTH, SHIP_HEIGHT, SpriteKind::Ship).with_color(tint),
            player_id,
            lives,
            speed: SHIP_SPEED,
            fire_cooldown: Cooldown::new(upgrades.shooting_interval_ms()),
            destruction_cooldown: Cooldown::new(DESTRUCTION_MS),
            destroyed: false,
            invincible_until: None,
            bullet_count: upgrades.bullet_count(),
            bullet_spacing: upgrades.bullet_spacing(),
            pierce_budget: upgrades.pierce_budget(),
        }
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn move_left(&mut self) {
        self.entity.move_by(-self.speed, 0);
    }

    pub fn move_right(&mut self) {
        self.entity.move_by(self.speed, 0);
    }

    pub fn move_up(&mut self) {
        self.entity.move_by(0, -self.speed);
    }

    pub fn move_down(&mut self) {
        self.entity.move_by(0, self.speed);
    }

    /// Fires the current spread if the trigger cooldown allows it.
    /// Bullets come out of the pool and go into `out`; returns how many
    /// were fired.
    pub fn fire(
        &mut self,
        pool: &mut Pool<Projectile>,
        now_ms: u64,
        out: &mut Vec<Projectile>,
    ) -> u32 {
        if self.destroyed || !self.fire_cooldown.is_finished(now_ms) {
            return 0;
        }
        self.fire_cooldown.reset(now_ms);

        let count = self.bullet_count as i32;
        let start_x = self.entity.center_x() - self.bullet_spacing * (count - 1) / 2;
        for i in 0..count {
            let params = ProjectileParams::player_shot(
                start_x + i * self.bullet_spacing,
                self.entity.y - 1,
                self.player_id,
                self.pierce_budget,
            );
            out.push(pool.acquire(params));
        }
        self.bullet_count
    }

    /// A hit while neither invincible nor already exploding. Costs one
    /// life and shows the explosion sprite until `update` clears it.
    pub fn destroy(&mut self, now_ms: u64) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.lives = self.lives.saturating_sub(1);
        self.entity.sprite = SpriteKind::ShipExplosion;
        self.destruction_cooldown.reset(now_ms);
    }

    pub fn update(&mut self, now_ms: u64) {
        if self.destroyed && self.destruction_cooldown.is_finished(now_ms) {
            self.destroyed = false;
            self.entity.sprite = SpriteKind::Ship;
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn is_out_of_lives(&self) -> bool {
        self.lives == 0
    }

    pub fn gain_life(&mut self, cap: u32) {
        if self.lives < cap {
            self.lives += 1;
        }
    }

    pub fn activate_invincibility(&mut self, duration_ms: u64, now_ms: u64) {
        self.invincible_until = Some(now_ms + duration_ms);
    }

    /// The window closes after the expiry instant, so a hit exactly at
    /// expiry is still absorbed.
    pub fn is_invincible(&self, now_ms: u64) -> bool {
        matches!(self.invincible_until, Some(expiry) if now_ms <= expiry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_ship(upgrades: &UpgradeConfig) -> Ship {
        Ship::new(40, 40, 0, MAX_LIVES, upgrades)
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let upgrades = UpgradeConfig::default();
        let mut ship = test_ship(&upgrades);
        let mut pool = Pool::new();
        let mut bullets = Vec::new();

        assert_eq!(ship.fire(&mut pool, 1000, &mut bullets), 1);
        assert_eq!(ship.fire(&mut pool, 1100, &mut bullets), 0);
        assert_eq!(
            ship.fire(&mut pool, 1000 + upgrades.shooting_interval_ms(), &mut bullets),
            1
        );
        assert_eq!(bullets.len(), 2);
    }

    #[test]
    fn test_spread_is_centered() {
        let upgrades = UpgradeConfig::new(2, 0, 0).unwrap();
        let mut ship = test_ship(&upgrades);
        let mut pool = Pool::new();
        let mut bullets = Vec::new();

        assert_eq!(ship.fire(&mut pool, 1000, &mut bullets), 3);
        let xs: Vec<i32> = bullets.iter().map(|b| b.entity.x).collect();
        let center = ship.entity.center_x();
        assert_eq!(xs, vec![center - 8, center, center + 8]);
        for b in &bullets {
            assert_eq!(b.entity.y, ship.entity.y - 1);
        }
    }

    #[test]
    fn test_destroy_costs_a_life_and_recovers() {
        let upgrades = UpgradeConfig::default();
        let mut ship = test_ship(&upgrades);

        ship.destroy(1000);
        assert_eq!(ship.lives, MAX_LIVES - 1);
        assert!(ship.is_destroyed());
        assert_eq!(ship.entity.sprite, SpriteKind::ShipExplosion);

        // a second hit during the explosion does not cost another life
        ship.destroy(1200);
        assert_eq!(ship.lives, MAX_LIVES - 1);

        ship.update(1999);
        assert!(ship.is_destroyed());
        ship.update(2000);
        assert!(!ship.is_destroyed());
        assert_eq!(ship.entity.sprite, SpriteKind::Ship);
    }

    #[test]
    fn test_invincibility_window_is_inclusive() {
        let upgrades = UpgradeConfig::default();
        let mut ship = test_ship(&upgrades);

        assert!(!ship.is_invincible(0));
        ship.activate_invincibility(5000, 1000);
        assert!(ship.is_invincible(1000));
        assert!(ship.is_invincible(6000));
        assert!(!ship.is_invincible(6001));
    }

    #[test]
    fn test_gain_life_caps() {
        let upgrades = UpgradeConfig::default();
        let mut ship = test_ship(&upgrades);
        ship.gain_life(MAX_LIVES);
        assert_eq!(ship.lives, MAX_LIVES);
        ship.destroy(0);
        ship.gain_life(MAX_LIVES);
        assert_eq!(ship.lives, MAX_LIVES);
    }
}
