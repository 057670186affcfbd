use color_eyre::eyre::Result;
use rand::Rng;

use crate::engine::{Cooldown, FieldBounds, VariableCooldown};
use crate::entities::enemy::{EnemyKind, EnemyUnit};
use crate::entities::entity::Tint;

const LANE_MARGIN: i32 = 2;
const RESPAWN_BASE_MS: u64 = 20_000;
const RESPAWN_VARIANCE_MS: u64 = 10_000;
const EXPLOSION_LINGER_MS: u64 = 500;

const SLOW_LANE_STEP_MS: u64 = 80;
const FAST_LANE_STEP_MS: u64 = 30;

#[derive(Debug)]
struct BonusLane {
    unit: Option<EnemyUnit>,
    step_cooldown: Cooldown,
    respawn: VariableCooldown,
    linger: Cooldown,
    direction: i32,
    spawn_y: i32,
    tint: Tint,
}

impl BonusLane {
    fn new(step_ms: u64, spawn_y: i32, tint: Tint) -> Result<Self> {
        Ok(Self {
            unit: None,
            step_cooldown: Cooldown::new(step_ms),
            respawn: VariableCooldown::new(RESPAWN_BASE_MS, RESPAWN_VARIANCE_MS)?,
            linger: Cooldown::new(EXPLOSION_LINGER_MS),
            direction: 1,
            spawn_y,
            tint,
        })
    }

    fn spawn(&mut self, field: &FieldBounds) {
        self.unit = Some(
            EnemyUnit::new(LANE_MARGIN, field.hud_line + self.spawn_y, EnemyKind::Bonus)
                .with_tint(self.tint),
        );
        self.direction = 1;
    }

    fn update(&mut self, field: &FieldBounds, now_ms: u64, rng: &mut impl Rng) {
        match &mut self.unit {
            Some(unit) if unit.is_destroyed() => {
                // keep the explosion on screen briefly, then schedule a
                // fresh ship
                if self.linger.is_finished(now_ms) {
                    self.unit = None;
                    self.respawn.reset(now_ms, rng);
                }
            }
            Some(unit) => {
                if !self.step_cooldown.is_finished(now_ms) {
                    return;
                }
                self.step_cooldown.reset(now_ms);
                let next = unit.entity.x + self.direction;
                if next < LANE_MARGIN || next + unit.entity.width > field.width - LANE_MARGIN {
                    self.direction = -self.direction;
                } else {
                    unit.entity.move_by(self.direction, 0);
                }
            }
            None => {
                if self.respawn.is_finished(now_ms) {
                    self.spawn(field);
                }
            }
        }
    }
}

/// Two bonus ships sweeping across the top of the field on their own
/// lanes, one slow and one fast. Shooting one down pays out and the
/// lane respawns after a randomized delay.
#[derive(Debug)]
pub struct BonusFormation {
    lanes: [BonusLane; 2],
    field: FieldBounds,
}

impl BonusFormation {
    pub fn new(field: FieldBounds, now_ms: u64, rng: &mut impl Rng) -> Result<Self> {
        let mut slow = BonusLane::new(SLOW_LANE_STEP_MS, 1, Tint::Red)?;
        let mut fast = BonusLane::new(FAST_LANE_STEP_MS, 4, Tint::Blue)?;
        slow.spawn(&field);
        fast.spawn(&field);
        slow.step_cooldown.reset(now_ms);
        fast.step_cooldown.reset(now_ms);
        slow.respawn.reset(now_ms, rng);
        fast.respawn.reset(now_ms, rng);
        Ok(Self {
            lanes: [slow, fast],
            field,
        })
    }

    pub fn update(&mut self, now_ms: u64, rng: &mut impl Rng) {
        for lane in &mut self.lanes {
            lane.update(&self.field, now_ms, rng);
        }
    }

    /// Live ships eligible for collision, tagged by lane.
    pub fn live_units(&self) -> impl Iterator<Item = (usize, &EnemyUnit)> {
        self.lanes.iter().enumerate().filter_map(|(idx, lane)| {
            lane.unit
                .as_ref()
                .filter(|u| !u.is_destroyed())
                .map(|u| (idx, u))
        })
    }

    /// Everything to draw, including explosions still lingering.
    pub fn visible_units(&self) -> impl Iterator<Item = &EnemyUnit> {
        self.lanes.iter().filter_map(|lane| lane.unit.as_ref())
    }

    pub fn destroy(&mut self, lane: usize, now_ms: u64) -> Option<u32> {
        let lane = self.lanes.get_mut(lane)?;
        let unit = lane.unit.as_mut().filter(|u| !u.is_destroyed())?;
        let points = unit.destroy();
        lane.linger.reset(now_ms);
        Some(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_both_lanes_spawn_at_start() {
        let mut rng = StdRng::seed_from_u64(3);
        let bonus = BonusFormation::new(FieldBounds::default(), 0, &mut rng).unwrap();
        assert_eq!(bonus.live_units().count(), 2);
        let ys: Vec<i32> = bonus.live_units().map(|(_, u)| u.entity.y).collect();
        assert_ne!(ys[0], ys[1]);
    }

    #[test]
    fn test_fast_lane_outruns_slow_lane() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut bonus = BonusFormation::new(FieldBounds::default(), 0, &mut rng).unwrap();
        for step in 1..=20 {
            bonus.update(step * FAST_LANE_STEP_MS, &mut rng);
        }
        let xs: Vec<i32> = bonus.live_units().map(|(_, u)| u.entity.x).collect();
        assert!(xs[1] > xs[0]);
    }

    #[test]
    fn test_ship_bounces_at_margins() {
        let mut rng = StdRng::seed_from_u64(3);
        let field = FieldBounds::default();
        let mut bonus = BonusFormation::new(field, 0, &mut rng).unwrap();
        let mut now = 0;
        for _ in 0..5000 {
            now += FAST_LANE_STEP_MS;
            bonus.update(now, &mut rng);
            for (_, unit) in bonus.live_units() {
                assert!(unit.entity.x >= LANE_MARGIN);
                assert!(unit.entity.x + unit.entity.width <= field.width - LANE_MARGIN);
            }
        }
    }

    #[test]
    fn test_destroy_pays_once_then_lingers_and_respawns() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut bonus = BonusFormation::new(FieldBounds::default(), 0, &mut rng).unwrap();

        assert_eq!(bonus.destroy(0, 1000), Some(100));
        assert_eq!(bonus.destroy(0, 1000), None);
        assert_eq!(bonus.live_units().count(), 1);
        // explosion still visible during the linger window
        assert_eq!(bonus.visible_units().count(), 2);

        bonus.update(1000 + EXPLOSION_LINGER_MS + 1, &mut rng);
        assert_eq!(bonus.visible_units().count(), 1);

        // respawn delay is at most base + variance
        let latest = 1000 + EXPLOSION_LINGER_MS + 1 + RESPAWN_BASE_MS + RESPAWN_VARIANCE_MS + 1;
        bonus.update(latest, &mut rng);
        assert_eq!(bonus.live_units().count(), 2);
    }
}
