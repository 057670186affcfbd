use color_eyre::eyre::Result;
use rand::Rng;

use crate::engine::{Cooldown, FieldBounds, LevelConfig, Pool, VariableCooldown};
use crate::entities::enemy::{EnemyKind, EnemyUnit, ENEMY_HEIGHT, ENEMY_WIDTH};
use crate::entities::projectile::{Projectile, ProjectileParams, HOSTILE_BULLET_SPEED};

const SIDE_MARGIN: i32 = 4;
const X_STEP: i32 = 1;
const DESCENT_STEP: i32 = 1;
const COLUMN_GAP: i32 = 2;
const ROW_GAP: i32 = 1;
const TOP_OFFSET: i32 = 8;

const SLOWDOWN_MS: u64 = 5000;
const SLOWDOWN_SCALE: u64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Right,
    Left,
}

/// The enemy grid. Marches sideways as one block, descends one step
/// when a live unit reaches a side margin, and fires from the
/// bottom-most live unit of a random column. Destroyed units keep their
/// slots so the grid shape never shifts.
#[derive(Debug)]
pub struct Formation {
    columns: Vec<Vec<EnemyUnit>>,
    direction: Direction,
    descending: bool,
    movement_cooldown: Cooldown,
    shooting_cooldown: VariableCooldown,
    slowdown_until: Option<u64>,
    field: FieldBounds,
}

impl Formation {
    pub fn new(
        config: &LevelConfig,
        field: FieldBounds,
        now_ms: u64,
        rng: &mut impl Rng,
    ) -> Result<Self> {
        let cell_w = ENEMY_WIDTH + COLUMN_GAP;
        let cell_h = ENEMY_HEIGHT + ROW_GAP;
        let total_w = config.formation_width as i32 * cell_w - COLUMN_GAP;
        let x0 = (field.width - total_w) / 2;
        let y0 = field.hud_line + TOP_OFFSET;

        let columns = (0..config.formation_width)
            .map(|col| {
                (0..config.formation_height)
                    .map(|row| {
                        let kind = if row == 0 {
                            EnemyKind::RowA
                        } else if row <= config.formation_height / 2 {
                            EnemyKind::RowB
                        } else {
                            EnemyKind::RowC
                        };
                        EnemyUnit::new(
                            x0 + col as i32 * cell_w,
                            y0 + row as i32 * cell_h,
                            kind,
                        )
                    })
                    .collect()
            })
            .collect();

        let mut movement_cooldown = Cooldown::new(config.movement_interval_ms());
        movement_cooldown.reset(now_ms);
        let mut shooting_cooldown = VariableCooldown::new(
            config.shooting_frequency_ms,
            config.shooting_frequency_ms / 5,
        )?;
        shooting_cooldown.reset(now_ms, rng);

        Ok(Self {
            columns,
            direction: Direction::Right,
            descending: false,
            movement_cooldown,
            shooting_cooldown,
            slowdown_until: None,
            field,
        })
    }

    fn speed_scale(&self, now_ms: u64) -> u64 {
        match self.slowdown_until {
            Some(expiry) if now_ms <= expiry => SLOWDOWN_SCALE,
            _ => 1,
        }
    }

    pub fn update(&mut self, now_ms: u64) {
        if matches!(self.slowdown_until, Some(expiry) if now_ms > expiry) {
            self.slowdown_until = None;
        }
        if !self.movement_cooldown.is_finished(now_ms) {
            return;
        }
        self.movement_cooldown
            .reset_scaled(now_ms, self.speed_scale(now_ms));

        if self.descending {
            self.move_all(0, DESCENT_STEP);
            self.direction = match self.direction {
                Direction::Right => Direction::Left,
                Direction::Left => Direction::Right,
            };
            self.descending = false;
            return;
        }

        // edge detection uses the live extent only, so a thinned grid
        // keeps marching into the space its dead flanks vacated
        let Some((min_x, max_x)) = self.live_extent() else {
            return;
        };
        let at_edge = match self.direction {
            Direction::Right => max_x + X_STEP > self.field.width - SIDE_MARGIN,
            Direction::Left => min_x - X_STEP < SIDE_MARGIN,
        };
        if at_edge {
            self.descending = true;
        } else {
            let dx = match self.direction {
                Direction::Right => X_STEP,
                Direction::Left => -X_STEP,
            };
            self.move_all(dx, 0);
        }
    }

    fn move_all(&mut self, dx: i32, dy: i32) {
        for unit in self.columns.iter_mut().flatten() {
            unit.entity.move_by(dx, dy);
        }
    }

    fn live_extent(&self) -> Option<(i32, i32)> {
        let mut extent: Option<(i32, i32)> = None;
        for unit in self.columns.iter().flatten() {
            if unit.is_destroyed() {
                continue;
            }
            let left = unit.entity.x;
            let right = unit.entity.x + unit.entity.width;
            extent = Some(match extent {
                Some((min_x, max_x)) => (min_x.min(left), max_x.max(right)),
                None => (left, right),
            });
        }
        extent
    }

    /// Fires one hostile bullet when the shooting cooldown allows it.
    /// Only the bottom-most live unit of each column is a candidate.
    pub fn try_shoot(
        &mut self,
        pool: &mut Pool<Projectile>,
        now_ms: u64,
        rng: &mut impl Rng,
    ) -> Option<Projectile> {
        if !self.shooting_cooldown.is_finished(now_ms) {
            return None;
        }
        let shooters: Vec<&EnemyUnit> = self
            .columns
            .iter()
            .filter_map(|col| col.iter().rev().find(|u| !u.is_destroyed()))
            .collect();
        if shooters.is_empty() {
            return None;
        }
        let shooter = shooters[rng.random_range(0..shooters.len())];
        let params = ProjectileParams::hostile(
            shooter.entity.center_x(),
            shooter.entity.y + shooter.entity.height,
            0,
            HOSTILE_BULLET_SPEED,
        );
        self.shooting_cooldown
            .reset_scaled(now_ms, self.speed_scale(now_ms), rng);
        Some(pool.acquire(params))
    }

    pub fn destroy_at(&mut self, col: usize, row: usize) -> Option<u32> {
        let unit = self.columns.get_mut(col)?.get_mut(row)?;
        if unit.is_destroyed() {
            return None;
        }
        Some(unit.destroy())
    }

    /// Wipes every live unit and returns how many went down.
    pub fn destroy_all(&mut self) -> usize {
        let mut count = 0;
        for unit in self.columns.iter_mut().flatten() {
            if !unit.is_destroyed() {
                unit.destroy();
                count += 1;
            }
        }
        count
    }

    /// Shoves the whole grid back toward the top of the field, stopping
    /// short of the HUD.
    pub fn push_back(&mut self, distance: i32) {
        let min_y = self
            .columns
            .iter()
            .flatten()
            .map(|u| u.entity.y)
            .min()
            .unwrap_or(self.field.hud_line);
        let room = (min_y - (self.field.hud_line + 1)).max(0);
        self.move_all(0, -distance.min(room));
    }

    pub fn activate_slowdown(&mut self, now_ms: u64) {
        self.slowdown_until = Some(now_ms + SLOWDOWN_MS);
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().flatten().all(|u| u.is_destroyed())
    }

    pub fn live_count(&self) -> usize {
        self.columns
            .iter()
            .flatten()
            .filter(|u| !u.is_destroyed())
            .count()
    }

    pub fn columns(&self) -> &[Vec<EnemyUnit>] {
        &self.columns
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_descending(&self) -> bool {
        self.descending
    }
}
