use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::AppPhase;
use crate::engine::GameStats;
use crate::entities::{Entity, ItemKind, SpriteKind, Tint};
use crate::game::{GameSession, RenderSink};

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub phase: AppPhase,
    pub session: &'a GameSession,
    pub stats: &'a GameStats,
    pub area: Rect,
    pub fps: u32,
    pub now_ms: u64,
}

/// Handles all rendering responsibilities for the game
pub struct GameRenderer {
    // Future: could add theme/config fields here
}

impl Default for GameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRenderer {
    pub fn new() -> Self {
        Self {}
    }

    /// Main render method that dispatches to phase-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.phase {
            AppPhase::Playing => self.render_game(frame, view),
            AppPhase::Paused => self.render_paused(frame, view),
            AppPhase::GameOver => self.render_game_over(frame, view),
            AppPhase::Victory => self.render_victory(frame, view),
        }
    }

    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let field = view.session.field();

        // Center the playfield, clipped when the terminal is smaller
        let field_width = (field.width as u16 + 2).min(area.width);
        let field_height = (field.height as u16 + 2).min(area.height);
        let field_area = Rect {
            x: area.x + (area.width - field_width) / 2,
            y: area.y + (area.height - field_height) / 2,
            width: field_width,
            height: field_height,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(field_area);
        frame.render_widget(block, field_area);

        let mut sink = FrameSink {
            buffer: frame.buffer_mut(),
            area: inner,
        };
        view.session.draw(&mut sink, view.now_ms);

        // FPS counter and controls hint live outside the playfield
        let fps_text = Line::from(vec![
            Span::styled("FPS: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.fps),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        let fps_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(fps_text), fps_area);

        let controls = Line::from(vec![Span::styled(
            "[WASD/Arrows: Move] [Space: Fire] [P: Pause] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);
        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    fn render_paused(&self, frame: &mut Frame, view: &RenderView) {
        self.render_game(frame, view);

        let area = view.area;
        let pause_text = vec![
            Line::from(""),
            Line::from("PAUSED").centered().bold().yellow(),
            Line::from(""),
            Line::from("Press P to resume").centered().white(),
        ];

        let pause_area = Rect {
            x: (area.width / 2).saturating_sub(15),
            y: (area.height / 2).saturating_sub(3),
            width: 30.min(area.width),
            height: 6.min(area.height),
        };

        frame.render_widget(
            Paragraph::new(pause_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                )
                .alignment(Alignment::Center),
            pause_area,
        );
    }

    fn render_game_over(&self, frame: &mut Frame, view: &RenderView) {
        let stats = view.stats;
        let minutes = stats.elapsed_ms / 60_000;
        let seconds = (stats.elapsed_ms / 1000) % 60;

        let game_over_text = vec![
            Line::from(""),
            Line::from("╔═══════════════════════════╗").centered().red(),
            Line::from("║        GAME OVER          ║")
                .centered()
                .red()
                .bold(),
            Line::from("╚═══════════════════════════╝").centered().red(),
            Line::from(""),
            Line::from(format!("Final Score: {}", stats.total_score()))
                .centered()
                .yellow()
                .bold(),
            Line::from(format!("Coins: {}", stats.coins)).centered().yellow(),
            Line::from(format!("Reached Level: {}", stats.level)).centered().cyan(),
            Line::from(format!("Time Played: {:02}:{:02}", minutes, seconds))
                .centered()
                .cyan(),
            Line::from(""),
            Line::from("Press R to restart").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];

        frame.render_widget(
            Paragraph::new(game_over_text)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            view.area,
        );
    }

    fn render_victory(&self, frame: &mut Frame, view: &RenderView) {
        let stats = view.stats;
        let victory_text = vec![
            Line::from(""),
            Line::from("╔═══════════════════════════╗").centered().green(),
            Line::from("║         VICTORY!          ║")
                .centered()
                .green()
                .bold(),
            Line::from("╚═══════════════════════════╝").centered().green(),
            Line::from(""),
            Line::from(format!("Final Score: {}", stats.total_score()))
                .centered()
                .yellow()
                .bold(),
            Line::from(format!("Coins: {}", stats.coins)).centered().yellow(),
            Line::from(format!("Enemies Destroyed: {}", stats.ships_destroyed))
                .centered()
                .cyan(),
            Line::from(""),
            Line::from("Press R to play again").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];

        frame.render_widget(
            Paragraph::new(victory_text)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            view.area,
        );
    }
}

/// Writes session draw calls straight into the frame buffer, clipped to
/// the playfield rect.
struct FrameSink<'a> {
    buffer: &'a mut Buffer,
    area: Rect,
}

impl FrameSink<'_> {
    fn put(&mut self, x: i32, y: i32, text: &str, style: Style) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u16, y as u16);
        if y >= self.area.height || x >= self.area.width {
            return;
        }
        // clip the tail so wide sprites never bleed past the border
        let room = (self.area.width - x) as usize;
        let text: String = text.chars().take(room).collect();
        self.buffer
            .set_string(self.area.x + x, self.area.y + y, text, style);
    }

    fn put_spans(&mut self, mut x: i32, y: i32, spans: &[Span<'static>]) {
        for span in spans {
            self.put(x, y, &span.content, span.style);
            x += span.content.chars().count() as i32;
        }
    }
}

impl RenderSink for FrameSink<'_> {
    fn draw_entity(&mut self, entity: &Entity) {
        let style = Style::default()
            .fg(tint_color(entity.color))
            .add_modifier(Modifier::BOLD);
        for (row, line) in sprite_lines(entity.sprite).iter().enumerate() {
            self.put(entity.x, entity.y + row as i32, line, style);
        }
    }

    fn draw_score(&mut self, score: u32) {
        self.put_spans(
            1,
            0,
            &[
                Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{score}"),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
            ],
        );
    }

    fn draw_coins(&mut self, coins: u32) {
        self.put_spans(
            20,
            0,
            &[
                Span::styled("Coins: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{coins}"),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
            ],
        );
    }

    fn draw_lives(&mut self, lives: &[u32]) {
        let mut spans = vec![Span::styled("Lives: ", Style::default().fg(Color::DarkGray))];
        for (id, count) in lives.iter().enumerate() {
            if id > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                "^".repeat(*count as usize),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        self.put_spans(40, 0, &spans);
    }

    fn draw_time(&mut self, elapsed_ms: u64) {
        let minutes = elapsed_ms / 60_000;
        let seconds = (elapsed_ms / 1000) % 60;
        self.put_spans(
            62,
            0,
            &[
                Span::styled("Time: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{minutes:02}:{seconds:02}"),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ],
        );
    }

    fn draw_level(&mut self, level: u32, countdown_secs: Option<u64>) {
        self.put_spans(
            1,
            1,
            &[
                Span::styled("Level: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{level}"),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
            ],
        );
        if let Some(secs) = countdown_secs {
            let text = format!("GET READY  {secs}");
            let x = (self.area.width as i32 - text.chars().count() as i32) / 2;
            self.put(
                x,
                self.area.height as i32 / 2,
                &text,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        }
    }
}

fn tint_color(tint: Option<Tint>) -> Color {
    match tint {
        Some(Tint::Red) => Color::Red,
        Some(Tint::Blue) => Color::Blue,
        Some(Tint::Orange) => Color::LightRed,
        Some(Tint::Yellow) => Color::Yellow,
        Some(Tint::Green) => Color::Green,
        Some(Tint::Cyan) => Color::Cyan,
        Some(Tint::Magenta) => Color::Magenta,
        Some(Tint::White) | None => Color::White,
    }
}

fn sprite_lines(kind: SpriteKind) -> Vec<&'static str> {
    match kind {
        SpriteKind::Ship => vec!["  ^  ", " /|\\ ", "/___\\"],
        SpriteKind::ShipExplosion => vec![" \\|/ ", "-- --", " /|\\ "],
        SpriteKind::EnemyA => vec![" /^\\ ", "<(o)>", " v v "],
        SpriteKind::EnemyB => vec![" .-. ", "(o.o)", " \\_/ "],
        SpriteKind::EnemyC => vec![" ___ ", "[o_o]", " | | "],
        SpriteKind::EnemyExplosion => vec![" \\|/ ", "-- --", " /|\\ "],
        SpriteKind::Bonus => vec!["/===\\", "|(*)|", "\\===/"],
        SpriteKind::MidBoss => vec![
            " /=====\\ ",
            "<[O] [O]>",
            " \\V===V/ ",
            "  v v v  ",
        ],
        SpriteKind::FinalBoss => vec![
            " /=======\\ ",
            "<<[X] [X]>>",
            " |=======| ",
            " \\VVVVVVV/ ",
            "  v v v v  ",
        ],
        SpriteKind::BossExplosion => vec![
            "  \\  |  /  ",
            " --     -- ",
            "-- BOOM  --",
            " --     -- ",
            "  /  |  \\  ",
        ],
        SpriteKind::PlayerBullet => vec!["|"],
        SpriteKind::HostileBullet => vec!["!"],
        SpriteKind::Item(kind) => vec![match kind {
            ItemKind::Heal => "+",
            ItemKind::Shield => "S",
            ItemKind::Push => "^",
            ItemKind::Freeze => "*",
            ItemKind::Explode => "X",
            ItemKind::Slow => "~",
        }],
    }
}
