use color_eyre::Result;
use rand::Rng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::{Duration, Instant};

use crate::audio::AudioManager;
use crate::engine::{
    Clock, FieldBounds, GameStats, LevelConfig, SystemClock, UpgradeConfig, level_table,
};
use crate::entities::MAX_LIVES;
use crate::game::GameSession;
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPhase {
    Playing,
    Paused,
    GameOver,
    Victory,
}

/// The main application which holds the state and logic of the application.
pub struct App {
    running: bool,
    phase: AppPhase,
    session: GameSession,
    level_index: usize,
    levels: Vec<LevelConfig>,
    upgrades: UpgradeConfig,
    field: FieldBounds,
    /// Stats carried into the current level from the levels before it
    carry: GameStats,
    /// Latest cumulative snapshot, shown on the end screens
    last_stats: GameStats,
    last_shot_count: u32,
    seed: u64,
    clock: SystemClock,
    /// Frames info
    last_frame_time: Instant,
    fps: u32,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: AudioManager,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new() -> Result<Self> {
        let levels = level_table()?;
        let field = FieldBounds::default();
        let upgrades = UpgradeConfig::default();
        let carry = GameStats::new_game(1, MAX_LIVES);
        let clock = SystemClock::new();
        let seed = rand::rng().random();

        let session = GameSession::new(levels[0], &upgrades, field, &carry, seed, clock.now_ms())?;
        log::info!("new game, seed {seed}");

        Ok(Self {
            running: true,
            phase: AppPhase::Playing,
            session,
            level_index: 0,
            levels,
            upgrades,
            field,
            last_stats: carry.clone(),
            carry,
            last_shot_count: 0,
            seed,
            clock,
            last_frame_time: Instant::now(),
            fps: 0,
            input_manager: InputManager::new(),
            renderer: GameRenderer::new(),
            audio_manager: AudioManager::default(),
        })
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        while self.running {
            // Calculate FPS
            let frame_start = Instant::now();
            let frame_time = frame_start.duration_since(self.last_frame_time);
            self.last_frame_time = frame_start;
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }

            let now_ms = self.clock.now_ms();

            // Render the frame
            terminal.draw(|frame| {
                let view = RenderView {
                    phase: self.phase,
                    session: &self.session,
                    stats: &self.last_stats,
                    area: frame.area(),
                    fps: self.fps,
                    now_ms,
                };
                self.renderer.render(frame, &view);
            })?;

            // Poll input events and process one-shot actions
            self.input_manager.poll_events()?;
            for action in self.input_manager.take_oneshot_actions() {
                self.process_action(action)?;
            }

            if self.phase == AppPhase::Playing {
                self.update_game(now_ms)?;
            }

            // Small sleep to maintain ~60 FPS and prevent CPU spinning
            std::thread::sleep(Duration::from_millis(8));
        }
        Ok(())
    }

    fn process_action(&mut self, action: InputAction) -> Result<()> {
        match action {
            InputAction::Quit => {
                self.running = false;
            }
            InputAction::TogglePause => match self.phase {
                AppPhase::Playing => self.phase = AppPhase::Paused,
                AppPhase::Paused => self.phase = AppPhase::Playing,
                _ => {}
            },
            InputAction::Restart => {
                if matches!(self.phase, AppPhase::GameOver | AppPhase::Victory) {
                    self.restart()?;
                }
            }
        }
        Ok(())
    }

    fn update_game(&mut self, now_ms: u64) -> Result<()> {
        let input = self.input_manager.ship_input();
        self.session.tick(&[input], now_ms);

        // one sound per volley, however many bullets it held
        let shots = self.session.bullets_shot();
        if shots > self.last_shot_count {
            self.audio_manager.play_fire_sound();
        }
        self.last_shot_count = shots;

        self.last_stats = self.session.snapshot(now_ms);
        self.last_stats.elapsed_ms += self.carry.elapsed_ms;

        if self.session.is_finished(now_ms) {
            self.advance(now_ms)?;
        }
        Ok(())
    }

    /// Moves to the next level, or to an end screen when the run is
    /// over.
    fn advance(&mut self, now_ms: u64) -> Result<()> {
        if self.session.is_defeated() {
            log::info!("defeated on level {}", self.levels[self.level_index].level);
            self.phase = AppPhase::GameOver;
            return Ok(());
        }
        if self.level_index + 1 >= self.levels.len() {
            log::info!("campaign cleared");
            self.phase = AppPhase::Victory;
            return Ok(());
        }

        self.level_index += 1;
        let config = self.levels[self.level_index];

        let mut carry = self.session.snapshot(now_ms);
        carry.elapsed_ms += self.carry.elapsed_ms;
        carry.level = config.level;
        self.carry = carry;

        // every cleared level sharpens the weapon a little
        self.upgrades = UpgradeConfig::new(
            (self.upgrades.spread_level + 1).min(3),
            (self.upgrades.rapid_level + 1).min(5),
            (self.level_index / 3).min(2),
        )?;

        self.session = GameSession::new(
            config,
            &self.upgrades,
            self.field,
            &self.carry,
            self.seed.wrapping_add(self.level_index as u64),
            now_ms,
        )?;
        self.last_shot_count = self.carry.bullets_shot;
        log::info!("advancing to level {}", config.level);
        Ok(())
    }

    fn restart(&mut self) -> Result<()> {
        self.level_index = 0;
        self.upgrades = UpgradeConfig::default();
        self.carry = GameStats::new_game(1, MAX_LIVES);
        self.last_stats = self.carry.clone();
        self.seed = rand::rng().random();
        self.last_shot_count = 0;
        self.session = GameSession::new(
            self.levels[0],
            &self.upgrades,
            self.field,
            &self.carry,
            self.seed,
            self.clock.now_ms(),
        )?;
        self.phase = AppPhase::Playing;
        log::info!("restart, seed {}", self.seed);
        Ok(())
    }
}
