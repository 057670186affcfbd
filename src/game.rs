use color_eyre::eyre::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engine::{
    Cooldown, FieldBounds, GameStats, GameTimer, LevelConfig, Pool, UpgradeConfig,
};
use crate::entities::{
    BonusFormation, Boss, DroppedItem, Entity, FinalBoss, Formation, ItemKind, ItemParams,
    MidBoss, Projectile, ProjectileOwner, Ship, MAX_LIVES, ITEM_DROP_CHANCE, SHIP_HEIGHT,
};

pub const INPUT_DELAY_MS: u64 = 6000;
pub const SCREEN_CHANGE_MS: u64 = 1500;
pub const BOSS_EXPLOSION_MS: u64 = 600;
pub const LIFE_BONUS: u32 = 100;

const FREEZE_MS: u64 = 3000;
const SHIELD_MS: u64 = 5000;
const PUSH_DISTANCE: i32 = 4;
const EXPLODE_POINTS_PER_UNIT: u32 = 5;
const MID_BOSS_BULLET_DAMAGE: u32 = 2;
const FINAL_BOSS_BULLET_DAMAGE: u32 = 1;

/// Held keys for one player, sampled once per tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

/// Where a finished frame goes. The terminal renderer implements this;
/// tests use a recording sink.
pub trait RenderSink {
    fn draw_entity(&mut self, entity: &Entity);
    fn draw_score(&mut self, score: u32);
    fn draw_coins(&mut self, coins: u32);
    fn draw_lives(&mut self, lives: &[u32]);
    fn draw_time(&mut self, elapsed_ms: u64);
    fn draw_level(&mut self, level: u32, countdown_secs: Option<u64>);
}

/// One level of play: the ships, the grid, the bonus lanes, both bosses
/// and every bullet and pickup in flight. `tick` advances everything by
/// one frame in a fixed order so a given seed replays identically.
pub struct GameSession {
    field: FieldBounds,
    level: LevelConfig,
    ships: Vec<Ship>,
    formation: Formation,
    bonus: BonusFormation,
    mid_boss: Option<MidBoss>,
    final_boss: Option<FinalBoss>,
    mid_boss_linger: Cooldown,
    final_boss_linger: Cooldown,
    bullet_pool: Pool<Projectile>,
    item_pool: Pool<DroppedItem>,
    bullets: Vec<Projectile>,
    items: Vec<DroppedItem>,
    scores: Vec<u32>,
    coins: u32,
    bullets_shot: u32,
    ships_destroyed: u32,
    freeze_cooldown: Cooldown,
    input_delay: Cooldown,
    screen_change: Cooldown,
    timer: GameTimer,
    level_finished: bool,
    started: bool,
    rng: StdRng,
    max_lives: u32,
}

impl GameSession {
    pub fn new(
        config: LevelConfig,
        upgrades: &UpgradeConfig,
        field: FieldBounds,
        carry: &GameStats,
        seed: u64,
        now_ms: u64,
    ) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let players = carry.lives.len().max(1);

        let ships = (0..players)
            .map(|id| {
                let x = field.width * (id as i32 + 1) / (players as i32 + 1) - 2;
                let lives = carry.lives.get(id).copied().unwrap_or(MAX_LIVES);
                Ship::new(x, field.item_line - SHIP_HEIGHT, id, lives, upgrades)
            })
            .collect();

        let formation = Formation::new(&config, field, now_ms, &mut rng)?;
        let bonus = BonusFormation::new(field, now_ms, &mut rng)?;

        let mut scores = carry.scores.clone();
        scores.resize(players, 0);

        let mut input_delay = Cooldown::new(INPUT_DELAY_MS);
        input_delay.reset(now_ms);

        Ok(Self {
            field,
            level: config,
            ships,
            formation,
            bonus,
            mid_boss: Some(MidBoss::new(&field, now_ms)),
            final_boss: None,
            mid_boss_linger: Cooldown::new(BOSS_EXPLOSION_MS),
            final_boss_linger: Cooldown::new(BOSS_EXPLOSION_MS),
            bullet_pool: Pool::new(),
            item_pool: Pool::new(),
            bullets: Vec::new(),
            items: Vec::new(),
            scores,
            coins: carry.coins,
            bullets_shot: carry.bullets_shot,
            ships_destroyed: carry.ships_destroyed,
            freeze_cooldown: Cooldown::new(FREEZE_MS),
            input_delay,
            screen_change: Cooldown::new(SCREEN_CHANGE_MS),
            timer: GameTimer::new(),
            level_finished: false,
            started: false,
            rng,
            max_lives: MAX_LIVES,
        })
    }

    /// Advances one frame. Order is fixed: ships, bosses, formation,
    /// bonus lanes, integration, collisions, cleanup.
    pub fn tick(&mut self, inputs: &[InputState], now_ms: u64) {
        if self.level_finished || !self.input_delay.is_finished(now_ms) {
            return;
        }
        if !self.started {
            self.started = true;
            log::info!("level {} begins", self.level.level);
            self.timer.start(now_ms);
            self.final_boss = Some(FinalBoss::new(&self.field, now_ms));
        }

        for (id, ship) in self.ships.iter_mut().enumerate() {
            ship.update(now_ms);
            if ship.is_out_of_lives() || ship.is_destroyed() {
                continue;
            }
            let input = inputs.get(id).copied().unwrap_or_default();
            let speed = ship.speed();
            if input.left && ship.entity.x - speed >= 1 {
                ship.move_left();
            }
            if input.right && ship.entity.x + ship.entity.width + speed <= self.field.width - 1 {
                ship.move_right();
            }
            if input.up && ship.entity.y - speed > self.field.hud_line {
                ship.move_up();
            }
            if input.down && ship.entity.y + ship.entity.height + speed <= self.field.item_line {
                ship.move_down();
            }
            if input.fire {
                self.bullets_shot += ship.fire(&mut self.bullet_pool, now_ms, &mut self.bullets);
            }
        }

        self.update_mid_boss(now_ms);
        self.update_final_boss(now_ms);

        // a freeze pickup suspends the grid entirely, mid-march state
        // included
        if self.freeze_cooldown.is_finished(now_ms) {
            self.formation.update(now_ms);
            if let Some(shot) =
                self.formation
                    .try_shoot(&mut self.bullet_pool, now_ms, &mut self.rng)
            {
                self.bullets.push(shot);
            }
        }
        self.bonus.update(now_ms, &mut self.rng);

        for bullet in self.bullets.iter_mut() {
            bullet.update();
        }
        for item in self.items.iter_mut() {
            item.update();
        }

        self.resolve_collisions(now_ms);
        self.reclaim_off_field();
        self.check_level_end(now_ms);
    }

    fn update_mid_boss(&mut self, now_ms: u64) {
        if let Some(boss) = self.mid_boss.as_mut() {
            if boss.is_destroyed() {
                if self.mid_boss_linger.is_finished(now_ms) {
                    self.mid_boss = None;
                }
            } else {
                boss.update(
                    now_ms,
                    &self.field,
                    &mut self.rng,
                    &mut self.bullet_pool,
                    &mut self.bullets,
                );
            }
        }
    }

    fn update_final_boss(&mut self, now_ms: u64) {
        let Some(boss) = self.final_boss.as_mut() else {
            return;
        };
        // dropping into rage clears the sky once, even on the frame the
        // boss dies
        if boss.take_rage_event() {
            let mut idx = 0;
            while idx < self.bullets.len() {
                if self.bullets[idx].owner() == ProjectileOwner::Hostile {
                    self.bullet_pool.recycle(self.bullets.swap_remove(idx));
                } else {
                    idx += 1;
                }
            }
        }
        if boss.is_destroyed() {
            if self.final_boss_linger.is_finished(now_ms) {
                self.final_boss = None;
            }
        } else {
            boss.update(
                now_ms,
                &self.field,
                &mut self.rng,
                &mut self.bullet_pool,
                &mut self.bullets,
            );
        }
    }

    fn resolve_collisions(&mut self, now_ms: u64) {
        let mut spent = vec![false; self.bullets.len()];

        for idx in 0..self.bullets.len() {
            let bullet_entity = self.bullets[idx].entity;
            match self.bullets[idx].owner() {
                ProjectileOwner::Player(player) => {
                    // bosses soak hits before the grid behind them
                    if let Some(boss) = self.mid_boss.as_mut() {
                        if !boss.is_destroyed() && bullet_entity.overlaps(boss.entity()) {
                            boss.take_damage(MID_BOSS_BULLET_DAMAGE);
                            if boss.is_destroyed() {
                                log::info!(
                                    "mid boss destroyed by player {player} for {} points",
                                    boss.point_value()
                                );
                                self.scores[player] += boss.point_value();
                                self.coins += boss.point_value() / 10;
                                self.ships_destroyed += 1;
                                self.mid_boss_linger.reset(now_ms);
                            }
                            if self.bullets[idx].register_hit() {
                                spent[idx] = true;
                                continue;
                            }
                        }
                    }
                    if let Some(boss) = self.final_boss.as_mut() {
                        if !boss.is_destroyed() && bullet_entity.overlaps(boss.entity()) {
                            boss.take_damage(FINAL_BOSS_BULLET_DAMAGE);
                            if boss.is_destroyed() {
                                log::info!(
                                    "final boss destroyed by player {player} for {} points",
                                    boss.point_value()
                                );
                                self.scores[player] += boss.point_value();
                                self.coins += boss.point_value() / 10;
                                self.ships_destroyed += 1;
                                self.final_boss_linger.reset(now_ms);
                            }
                            if self.bullets[idx].register_hit() {
                                spent[idx] = true;
                                continue;
                            }
                        }
                    }

                    let target = self
                        .formation
                        .columns()
                        .iter()
                        .enumerate()
                        .find_map(|(col, units)| {
                            units.iter().enumerate().find_map(|(row, unit)| {
                                (!unit.is_destroyed()
                                    && bullet_entity.overlaps(&unit.entity))
                                .then(|| (col, row, unit.entity.center_x(), unit.entity.y))
                            })
                        });
                    if let Some((col, row, drop_x, drop_y)) = target {
                        if let Some(points) = self.formation.destroy_at(col, row) {
                            self.scores[player] += points;
                            self.coins += points / 10;
                            self.ships_destroyed += 1;
                            if let Some(kind) =
                                ItemKind::random_drop(&mut self.rng, ITEM_DROP_CHANCE)
                            {
                                self.items
                                    .push(self.item_pool.acquire(ItemParams::new(
                                        drop_x, drop_y, kind,
                                    )));
                            }
                        }
                        if self.bullets[idx].register_hit() {
                            spent[idx] = true;
                            continue;
                        }
                    }

                    let lane = self
                        .bonus
                        .live_units()
                        .find(|(_, unit)| bullet_entity.overlaps(&unit.entity))
                        .map(|(lane, _)| lane);
                    if let Some(lane) = lane {
                        if let Some(points) = self.bonus.destroy(lane, now_ms) {
                            self.scores[player] += points;
                            self.coins += points / 10;
                            self.ships_destroyed += 1;
                        }
                        if self.bullets[idx].register_hit() {
                            spent[idx] = true;
                        }
                    }
                }
                ProjectileOwner::Hostile => {
                    for ship in self.ships.iter_mut() {
                        if ship.is_out_of_lives() || ship.is_destroyed() {
                            continue;
                        }
                        if bullet_entity.overlaps(&ship.entity) {
                            spent[idx] = true;
                            if !ship.is_invincible(now_ms) {
                                ship.destroy(now_ms);
                                log::info!(
                                    "player {} hit, {} lives left",
                                    ship.player_id,
                                    ship.lives
                                );
                            }
                            break;
                        }
                    }
                }
            }
        }

        for idx in (0..self.bullets.len()).rev() {
            if spent[idx] {
                self.bullet_pool.recycle(self.bullets.swap_remove(idx));
            }
        }

        let mut picked: Vec<(usize, usize, ItemKind)> = Vec::new();
        for (item_idx, item) in self.items.iter().enumerate() {
            let collector = self.ships.iter().position(|ship| {
                !ship.is_out_of_lives()
                    && !ship.is_destroyed()
                    && ship.entity.overlaps(&item.entity)
            });
            if let Some(ship_idx) = collector {
                picked.push((item_idx, ship_idx, item.kind));
            }
        }
        for &(_, ship_idx, kind) in &picked {
            self.apply_item(kind, ship_idx, now_ms);
        }
        for &(item_idx, _, _) in picked.iter().rev() {
            self.item_pool.recycle(self.items.swap_remove(item_idx));
        }
    }

    fn apply_item(&mut self, kind: ItemKind, ship_idx: usize, now_ms: u64) {
        log::debug!("player {ship_idx} picked up {kind:?}");
        match kind {
            ItemKind::Heal => self.ships[ship_idx].gain_life(self.max_lives),
            ItemKind::Shield => self.ships[ship_idx].activate_invincibility(SHIELD_MS, now_ms),
            ItemKind::Push => self.formation.push_back(PUSH_DISTANCE),
            ItemKind::Freeze => self.freeze_cooldown.reset(now_ms),
            ItemKind::Explode => {
                let downed = self.formation.destroy_all() as u32;
                self.scores[ship_idx] += downed * EXPLODE_POINTS_PER_UNIT;
                self.ships_destroyed += downed;
            }
            ItemKind::Slow => self.formation.activate_slowdown(now_ms),
        }
    }

    fn reclaim_off_field(&mut self) {
        for idx in (0..self.bullets.len()).rev() {
            if self.bullets[idx].is_off_field(&self.field) {
                self.bullet_pool.recycle(self.bullets.swap_remove(idx));
            }
        }
        for idx in (0..self.items.len()).rev() {
            if self.items[idx].is_off_field(&self.field) {
                self.item_pool.recycle(self.items.swap_remove(idx));
            }
        }
    }

    fn check_level_end(&mut self, now_ms: u64) {
        if self.level_finished {
            return;
        }
        if self.formation.is_empty() {
            // surviving lives pay out on a clear
            for (id, ship) in self.ships.iter().enumerate() {
                self.scores[id] += LIFE_BONUS * ship.lives.saturating_sub(1);
            }
            log::info!("level {} cleared", self.level.level);
            self.finish_level(now_ms);
        } else if self.is_defeated() {
            log::info!("level {} lost, every ship is out of lives", self.level.level);
            self.finish_level(now_ms);
        }
    }

    fn finish_level(&mut self, now_ms: u64) {
        self.level_finished = true;
        self.timer.stop(now_ms);
        self.screen_change.reset(now_ms);
    }

    pub fn is_level_cleared(&self) -> bool {
        self.formation.is_empty()
    }

    pub fn is_defeated(&self) -> bool {
        self.ships.iter().all(|ship| ship.is_out_of_lives())
    }

    /// True once the end-of-level screen has been shown long enough to
    /// move on.
    pub fn is_finished(&self, now_ms: u64) -> bool {
        self.level_finished && self.screen_change.is_finished(now_ms)
    }

    /// Seconds left on the pre-level countdown, None once play begins.
    pub fn countdown_secs(&self, now_ms: u64) -> Option<u64> {
        if self.input_delay.is_finished(now_ms) {
            None
        } else {
            Some(self.input_delay.remaining_ms(now_ms).div_ceil(1000))
        }
    }

    pub fn snapshot(&self, now_ms: u64) -> GameStats {
        GameStats {
            level: self.level.level,
            scores: self.scores.clone(),
            coins: self.coins,
            lives: self.ships.iter().map(|ship| ship.lives).collect(),
            bullets_shot: self.bullets_shot,
            ships_destroyed: self.ships_destroyed,
            elapsed_ms: self.timer.elapsed_ms(now_ms),
        }
    }

    pub fn bullets_shot(&self) -> u32 {
        self.bullets_shot
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ships_mut(&mut self) -> &mut [Ship] {
        &mut self.ships
    }

    pub fn formation(&self) -> &Formation {
        &self.formation
    }

    pub fn formation_mut(&mut self) -> &mut Formation {
        &mut self.formation
    }

    pub fn bullets(&self) -> &[Projectile] {
        &self.bullets
    }

    pub fn items(&self) -> &[DroppedItem] {
        &self.items
    }

    pub fn mid_boss(&self) -> Option<&MidBoss> {
        self.mid_boss.as_ref()
    }

    pub fn final_boss(&self) -> Option<&FinalBoss> {
        self.final_boss.as_ref()
    }

    pub fn field(&self) -> &FieldBounds {
        &self.field
    }

    pub fn draw(&self, sink: &mut dyn RenderSink, now_ms: u64) {
        for unit in self.formation.columns().iter().flatten() {
            if !unit.is_destroyed() {
                sink.draw_entity(&unit.entity);
            }
        }
        for unit in self.bonus.visible_units() {
            sink.draw_entity(&unit.entity);
        }
        if let Some(boss) = &self.mid_boss {
            sink.draw_entity(boss.entity());
        }
        if let Some(boss) = &self.final_boss {
            sink.draw_entity(boss.entity());
        }
        for ship in &self.ships {
            if !ship.is_out_of_lives() || ship.is_destroyed() {
                sink.draw_entity(&ship.entity);
            }
        }
        for bullet in &self.bullets {
            sink.draw_entity(&bullet.entity);
        }
        for item in &self.items {
            sink.draw_entity(&item.entity);
        }

        let stats = self.snapshot(now_ms);
        sink.draw_score(stats.total_score());
        sink.draw_coins(stats.coins);
        sink.draw_lives(&stats.lives);
        sink.draw_time(stats.elapsed_ms);
        sink.draw_level(stats.level, self.countdown_secs(now_ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::level_table;
    use crate::entities::{Direction, FinalPhase, ProjectileParams, SpriteKind};

    fn test_session(seed: u64) -> GameSession {
        let config = level_table().unwrap()[0];
        let carry = GameStats::new_game(1, MAX_LIVES);
        GameSession::new(
            config,
            &UpgradeConfig::default(),
            FieldBounds::default(),
            &carry,
            seed,
            0,
        )
        .unwrap()
    }

    /// Spot where a single bullet covers both the final boss and a
    /// live grid unit.
    fn overlap_shot(session: &GameSession) -> Option<(i32, i32)> {
        let boss = session.final_boss.as_ref()?;
        session
            .formation
            .columns()
            .iter()
            .flatten()
            .filter(|unit| !unit.is_destroyed())
            .find_map(|unit| {
                let (x, y) = (unit.entity.center_x(), unit.entity.center_y());
                let shot = Entity::new(x, y, 1, 1, SpriteKind::PlayerBullet);
                (shot.overlaps(&unit.entity) && shot.overlaps(boss.entity())).then_some((x, y))
            })
    }

    #[test]
    fn test_bullet_without_pierce_stops_at_the_boss() {
        let mut session = test_session(11);
        session.final_boss = Some(FinalBoss::new(&session.field, 0));
        // shove the grid up under the boss so one shot can reach both
        session.formation.push_back(100);
        let (x, y) = overlap_shot(&session).expect("grid must reach the boss row");

        let bullet = session
            .bullet_pool
            .acquire(ProjectileParams::player_shot(x, y, 0, 0));
        session.bullets.push(bullet);
        session.resolve_collisions(7000);

        let boss = session.final_boss.as_ref().unwrap();
        assert_eq!(boss.health(), boss.max_health() - 1);
        assert_eq!(session.formation.live_count(), 20);
        assert!(session.bullets.is_empty());
        assert_eq!(session.scores[0], 0);
    }

    #[test]
    fn test_piercing_bullet_hits_boss_then_grid() {
        let mut session = test_session(11);
        session.final_boss = Some(FinalBoss::new(&session.field, 0));
        session.formation.push_back(100);
        let (x, y) = overlap_shot(&session).expect("grid must reach the boss row");

        let bullet = session
            .bullet_pool
            .acquire(ProjectileParams::player_shot(x, y, 0, 1));
        session.bullets.push(bullet);
        session.resolve_collisions(7000);

        let boss = session.final_boss.as_ref().unwrap();
        assert_eq!(boss.health(), boss.max_health() - 1);
        assert_eq!(session.formation.live_count(), 19);
        assert_eq!(session.scores[0], 30);
        assert!(session.bullets.is_empty());
    }

    #[test]
    fn test_freeze_suspends_the_grid_mid_march() {
        let mut session = test_session(3);
        let inputs = [InputState::default()];

        // get past the countdown, then let the grid take a few steps
        let mut now = INPUT_DELAY_MS + 1;
        for _ in 0..5 {
            session.tick(&inputs, now);
            now += session.level.movement_interval_ms();
        }
        let direction = session.formation.direction();
        let descending = session.formation.is_descending();
        let x_before = session.formation.columns()[0][0].entity.x;

        session.apply_item(ItemKind::Freeze, 0, now);
        for _ in 0..4 {
            session.tick(&inputs, now);
            now += FREEZE_MS / 5;
        }
        assert_eq!(session.formation.columns()[0][0].entity.x, x_before);
        assert_eq!(session.formation.direction(), direction);
        assert_eq!(session.formation.is_descending(), descending);

        // thawed grid resumes from exactly where it left off
        now += FREEZE_MS;
        session.tick(&inputs, now);
        assert_eq!(session.formation.direction(), Direction::Right);
        assert_eq!(session.formation.columns()[0][0].entity.x, x_before + 1);
    }

    #[test]
    fn test_explode_item_wipes_grid_and_ends_level() {
        let mut session = test_session(3);
        let inputs = [InputState::default()];
        session.tick(&inputs, INPUT_DELAY_MS + 1);

        session.apply_item(ItemKind::Explode, 0, INPUT_DELAY_MS + 1);
        assert_eq!(session.scores[0], 20 * EXPLODE_POINTS_PER_UNIT);
        assert!(session.is_level_cleared());

        let now = INPUT_DELAY_MS + 100;
        session.tick(&inputs, now);
        assert!(!session.is_finished(now));
        assert!(session.is_finished(now + SCREEN_CHANGE_MS));
    }

    #[test]
    fn test_shield_absorbs_a_hostile_bullet() {
        let mut session = test_session(3);
        session.ships[0].activate_invincibility(SHIELD_MS, 1000);
        let ship_entity = session.ships[0].entity;

        let bullet = session.bullet_pool.acquire(ProjectileParams::hostile(
            ship_entity.center_x(),
            ship_entity.center_y(),
            0,
            1,
        ));
        session.bullets.push(bullet);
        session.resolve_collisions(1000 + SHIELD_MS);

        assert!(session.bullets.is_empty());
        assert_eq!(session.ships[0].lives, MAX_LIVES);
        assert!(!session.ships[0].is_destroyed());
    }

    #[test]
    fn test_rage_clears_hostile_bullets_but_not_player_shots() {
        let mut session = test_session(3);
        let inputs = [InputState::default()];
        session.tick(&inputs, INPUT_DELAY_MS + 1);

        session
            .bullets
            .push(session.bullet_pool.acquire(ProjectileParams::hostile(
                50, 20, 0, 1,
            )));
        session
            .bullets
            .push(
                session
                    .bullet_pool
                    .acquire(ProjectileParams::player_shot(10, 40, 0, 0)),
            );

        let boss = session.final_boss.as_mut().unwrap();
        boss.take_damage(16);
        assert_eq!(boss.phase(), FinalPhase::Rage);

        session.update_final_boss(INPUT_DELAY_MS + 10);
        assert!(session
            .bullets
            .iter()
            .all(|b| b.owner() != ProjectileOwner::Hostile
                || b.entity.y <= session.field.hud_line + 1));
        assert!(session
            .bullets
            .iter()
            .any(|b| matches!(b.owner(), ProjectileOwner::Player(_))));
    }

    #[test]
    fn test_destroyed_ship_ignores_movement_input() {
        let mut session = test_session(5);
        let held_left = [InputState {
            left: true,
            ..InputState::default()
        }];

        let mut now = INPUT_DELAY_MS + 1;
        session.tick(&held_left, now);
        let x_after_step = session.ships[0].entity.x;

        now += 1;
        session.ships[0].destroy(now);
        now += 100;
        session.tick(&held_left, now);
        // wreck stays put until the respawn timer runs out
        assert!(session.ships[0].is_destroyed());
        assert_eq!(session.ships[0].entity.x, x_after_step);

        now += 1100;
        session.tick(&held_left, now);
        assert!(!session.ships[0].is_destroyed());
        assert_eq!(session.ships[0].entity.x, x_after_step - 1);
    }

    #[test]
    fn test_ship_cannot_descend_past_the_item_line() {
        let mut session = test_session(5);
        let bottom = |session: &GameSession| {
            session.ships[0].entity.y + session.ships[0].entity.height
        };
        assert!(bottom(&session) <= session.field.item_line);

        let held_down = [InputState {
            down: true,
            ..InputState::default()
        }];
        let mut now = INPUT_DELAY_MS + 1;
        for _ in 0..10 {
            session.tick(&held_down, now);
            assert!(bottom(&session) <= session.field.item_line);
            now += 50;
        }
        assert_eq!(bottom(&session), session.field.item_line);
    }
}
