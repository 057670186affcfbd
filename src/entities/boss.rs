use rand::rngs::StdRng;
use rand::Rng;

use crate::engine::{Cooldown, FieldBounds, Pool};
use crate::entities::entity::{Entity, SpriteKind, Tint};
use crate::entities::projectile::{Projectile, ProjectileParams};

/// Common surface for the two boss kinds so the session can drive them
/// uniformly.
pub trait Boss {
    fn entity(&self) -> &Entity;

    fn update(
        &mut self,
        now_ms: u64,
        field: &FieldBounds,
        rng: &mut StdRng,
        pool: &mut Pool<Projectile>,
        bullets: &mut Vec<Projectile>,
    );

    fn take_damage(&mut self, amount: u32);

    fn health(&self) -> u32;

    fn max_health(&self) -> u32;

    fn point_value(&self) -> u32;

    fn destroy(&mut self);

    fn is_destroyed(&self) -> bool;
}

const MID_BOSS_WIDTH: i32 = 9;
const MID_BOSS_HEIGHT: i32 = 4;
const MID_BOSS_HEALTH: u32 = 10;
const MID_BOSS_POINTS: u32 = 500;
const MID_BOSS_STEP_MS: u64 = 40;
const MID_BOSS_PAIR_MS: u64 = 3000;
const MID_BOSS_SNIPE_MS: u64 = 1200;
const MID_BOSS_PAIR_OFFSET: i32 = 6;
const BOSS_SIDE_MARGIN: i32 = 2;

/// Mid-level boss. Sweeps side to side while healthy, doubles its pace
/// once below half health, and alternates a paired volley with an aimed
/// single shot.
#[derive(Debug)]
pub struct MidBoss {
    entity: Entity,
    health: u32,
    destroyed: bool,
    direction: i32,
    step_cooldown: Cooldown,
    pair_cooldown: Cooldown,
    snipe_cooldown: Cooldown,
}

impl MidBoss {
    pub fn new(field: &FieldBounds, now_ms: u64) -> Self {
        let mut step_cooldown = Cooldown::new(MID_BOSS_STEP_MS);
        let mut pair_cooldown = Cooldown::new(MID_BOSS_PAIR_MS);
        let mut snipe_cooldown = Cooldown::new(MID_BOSS_SNIPE_MS);
        step_cooldown.reset(now_ms);
        pair_cooldown.reset(now_ms);
        snipe_cooldown.reset(now_ms);
        Self {
            entity: Entity::new(
                field.width / 4,
                field.hud_line + 1,
                MID_BOSS_WIDTH,
                MID_BOSS_HEIGHT,
                SpriteKind::MidBoss,
            )
            .with_color(Tint::Orange),
            health: MID_BOSS_HEALTH,
            destroyed: false,
            direction: 1,
            step_cooldown,
            pair_cooldown,
            snipe_cooldown,
        }
    }

    fn step_scale(&self) -> u64 {
        // lumbers while healthy, sweeps at full pace below half health
        if self.health * 2 > MID_BOSS_HEALTH { 2 } else { 1 }
    }
}

impl Boss for MidBoss {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn update(
        &mut self,
        now_ms: u64,
        field: &FieldBounds,
        rng: &mut StdRng,
        pool: &mut Pool<Projectile>,
        bullets: &mut Vec<Projectile>,
    ) {
        if self.destroyed {
            return;
        }

        if self.step_cooldown.is_finished(now_ms) {
            self.step_cooldown.reset_scaled(now_ms, self.step_scale());
            let next = self.entity.x + self.direction;
            if next < BOSS_SIDE_MARGIN
                || next + self.entity.width > field.width - BOSS_SIDE_MARGIN
            {
                self.direction = -self.direction;
            } else {
                self.entity.move_by(self.direction, 0);
            }
        }

        let muzzle_y = self.entity.y + self.entity.height;
        if self.pair_cooldown.is_finished(now_ms) {
            self.pair_cooldown.reset(now_ms);
            let cx = self.entity.center_x();
            for offset in [-MID_BOSS_PAIR_OFFSET, MID_BOSS_PAIR_OFFSET] {
                bullets.push(pool.acquire(ProjectileParams::hostile(cx + offset, muzzle_y, 0, 1)));
            }
        }
        if self.snipe_cooldown.is_finished(now_ms) {
            self.snipe_cooldown.reset(now_ms);
            let x = self.entity.center_x() + rng.random_range(-8..=8);
            bullets.push(pool.acquire(ProjectileParams::hostile(x, muzzle_y, 0, 1)));
        }
    }

    fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.destroy();
        }
    }

    fn health(&self) -> u32 {
        self.health
    }

    fn max_health(&self) -> u32 {
        MID_BOSS_HEALTH
    }

    fn point_value(&self) -> u32 {
        MID_BOSS_POINTS
    }

    fn destroy(&mut self) {
        self.destroyed = true;
        self.entity.sprite = SpriteKind::BossExplosion;
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

const FINAL_BOSS_WIDTH: i32 = 11;
const FINAL_BOSS_HEIGHT: i32 = 5;
const FINAL_BOSS_HEALTH: u32 = 20;
const FINAL_BOSS_POINTS: u32 = 1000;
const FINAL_BOSS_STEP_MS: u64 = 30;
const FINAL_BOSS_FAN_MS: u64 = 5000;
const FINAL_BOSS_SNIPE_MS: u64 = 400;
const FINAL_BOSS_PAIR_MS: u64 = 300;
const FINAL_BOSS_PAIR_OFFSET: i32 = 5;
const FAN_VELOCITIES: [i32; 5] = [0, 1, -1, 2, -2];

/// Movement posture derived from the health ratio alone, re-evaluated
/// every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalPhase {
    Hold,
    Zigzag,
    Rage,
}

impl FinalPhase {
    pub fn for_health(health: u32, max_health: u32) -> Self {
        if health * 2 > max_health {
            FinalPhase::Hold
        } else if health * 4 > max_health {
            FinalPhase::Zigzag
        } else {
            FinalPhase::Rage
        }
    }
}

/// Last boss. Holds position at full strength, zigzags below half
/// health and goes into a rage below a quarter. Entering rage wipes the
/// hostile bullets once, which the session applies via
/// [`FinalBoss::take_rage_event`].
#[derive(Debug)]
pub struct FinalBoss {
    entity: Entity,
    health: u32,
    destroyed: bool,
    zig_direction: i32,
    going_down: bool,
    rage_triggered: bool,
    rage_event_pending: bool,
    step_cooldown: Cooldown,
    fan_cooldown: Cooldown,
    snipe_cooldown: Cooldown,
    pair_cooldown: Cooldown,
}

impl FinalBoss {
    pub fn new(field: &FieldBounds, now_ms: u64) -> Self {
        let mut step_cooldown = Cooldown::new(FINAL_BOSS_STEP_MS);
        let mut fan_cooldown = Cooldown::new(FINAL_BOSS_FAN_MS);
        let mut snipe_cooldown = Cooldown::new(FINAL_BOSS_SNIPE_MS);
        let mut pair_cooldown = Cooldown::new(FINAL_BOSS_PAIR_MS);
        step_cooldown.reset(now_ms);
        fan_cooldown.reset(now_ms);
        snipe_cooldown.reset(now_ms);
        pair_cooldown.reset(now_ms);
        Self {
            entity: Entity::new(
                (field.width - FINAL_BOSS_WIDTH) / 2,
                field.hud_line + 1,
                FINAL_BOSS_WIDTH,
                FINAL_BOSS_HEIGHT,
                SpriteKind::FinalBoss,
            )
            .with_color(Tint::Red),
            health: FINAL_BOSS_HEALTH,
            destroyed: false,
            zig_direction: 1,
            going_down: true,
            rage_triggered: false,
            rage_event_pending: false,
            step_cooldown,
            fan_cooldown,
            snipe_cooldown,
            pair_cooldown,
        }
    }

    pub fn phase(&self) -> FinalPhase {
        FinalPhase::for_health(self.health, FINAL_BOSS_HEALTH)
    }

    /// True exactly once, on the frame the boss dropped into rage.
    pub fn take_rage_event(&mut self) -> bool {
        std::mem::take(&mut self.rage_event_pending)
    }

    fn zigzag_step(&mut self, field: &FieldBounds) {
        let next_x = self.entity.x + self.zig_direction;
        if next_x < BOSS_SIDE_MARGIN || next_x + self.entity.width > field.width - BOSS_SIDE_MARGIN
        {
            self.zig_direction = -self.zig_direction;
        } else {
            self.entity.move_by(self.zig_direction, 0);
        }

        // vertical drift stays inside the top half of the field
        let dy = if self.going_down { 1 } else { -1 };
        let next_y = self.entity.y + dy;
        let floor = field.height / 2 - self.entity.height;
        if next_y < field.hud_line + 1 || next_y > floor {
            self.going_down = !self.going_down;
        } else {
            self.entity.move_by(0, dy);
        }
    }
}

impl Boss for FinalBoss {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn update(
        &mut self,
        now_ms: u64,
        field: &FieldBounds,
        rng: &mut StdRng,
        pool: &mut Pool<Projectile>,
        bullets: &mut Vec<Projectile>,
    ) {
        if self.destroyed {
            return;
        }
        let phase = self.phase();

        if phase != FinalPhase::Hold && self.step_cooldown.is_finished(now_ms) {
            let scale = if phase == FinalPhase::Rage { 1 } else { 2 };
            self.step_cooldown.reset_scaled(now_ms, scale);
            self.zigzag_step(field);
        }

        let muzzle_y = self.entity.y + self.entity.height;
        if self.fan_cooldown.is_finished(now_ms) {
            self.fan_cooldown.reset(now_ms);
            let cx = self.entity.center_x();
            for dx in FAN_VELOCITIES {
                bullets.push(pool.acquire(ProjectileParams::hostile(cx, muzzle_y, dx, 1)));
            }
        }
        if self.snipe_cooldown.is_finished(now_ms) {
            self.snipe_cooldown.reset(now_ms);
            let x = rng.random_range(BOSS_SIDE_MARGIN..field.width - BOSS_SIDE_MARGIN);
            bullets.push(pool.acquire(ProjectileParams::hostile(
                x,
                field.hud_line + 1,
                0,
                1,
            )));
        }
        if phase == FinalPhase::Rage && self.pair_cooldown.is_finished(now_ms) {
            self.pair_cooldown.reset(now_ms);
            let cx = self.entity.center_x();
            for offset in [-FINAL_BOSS_PAIR_OFFSET, FINAL_BOSS_PAIR_OFFSET] {
                bullets.push(pool.acquire(ProjectileParams::hostile(cx + offset, muzzle_y, 0, 2)));
            }
        }
    }

    fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
        if !self.rage_triggered && self.phase() == FinalPhase::Rage {
            self.rage_triggered = true;
            self.rage_event_pending = true;
        }
        if self.health == 0 {
            self.destroy();
        }
    }

    fn health(&self) -> u32 {
        self.health
    }

    fn max_health(&self) -> u32 {
        FINAL_BOSS_HEALTH
    }

    fn point_value(&self) -> u32 {
        FINAL_BOSS_POINTS
    }

    fn destroy(&mut self) {
        self.destroyed = true;
        self.entity.sprite = SpriteKind::BossExplosion;
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}
