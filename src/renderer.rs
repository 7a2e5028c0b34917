use glam::Vec2;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Paragraph,
        canvas::{Canvas, Context, Line as CanvasLine, Points},
    },
};

use crate::config::GameConfig;
use crate::entities::{Enemy, GameState, Player, Projectile};
use crate::session::Session;

const BACKGROUND: Color = Color::Black;
const PLAYER_COLOR: Color = Color::Red;
const ENEMY_COLOR: Color = Color::Blue;
const PROJECTILE_COLOR: Color = Color::Yellow;
const TEXT_COLOR: Color = Color::White;

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub game_state: GameState,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub projectiles: &'a [Projectile],
    pub score: u32,
    /// Player facing in degrees
    pub facing: f32,
    pub config: &'a GameConfig,
    pub area: Rect,
}

impl<'a> RenderView<'a> {
    pub fn new(session: &'a Session, area: Rect) -> Self {
        Self {
            game_state: session.game_state(),
            player: session.player(),
            enemies: session.enemies(),
            projectiles: session.projectiles(),
            score: session.score(),
            facing: session.facing(),
            config: session.config(),
            area,
        }
    }
}

/// Handles all rendering responsibilities for the game. Reads state, never
/// changes it.
#[derive(Default)]
pub struct GameRenderer;

impl GameRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Main render method that dispatches to state-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.game_state {
            GameState::Playing => self.render_game(frame, view),
            GameState::GameOver => self.render_game_over(frame, view),
        }
    }

    /// Projectiles, then enemies, then the player, then the HUD on top
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let (width, height) = (view.config.width as f64, view.config.height as f64);
        // World units covered by one braille dot
        let dot = Vec2::new(
            (width / (f64::from(area.width.max(1)) * 2.0)) as f32,
            (height / (f64::from(area.height.max(1)) * 4.0)) as f32,
        );

        let canvas = Canvas::default()
            .background_color(BACKGROUND)
            .marker(Marker::Braille)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                let mut painter = Painter {
                    ctx,
                    height: height as f32,
                    dot,
                };
                for projectile in view.projectiles {
                    painter.fill_circle(projectile.position, projectile.size / 2.0, PROJECTILE_COLOR);
                }
                for enemy in view.enemies {
                    painter.fill_square(enemy.position, enemy.size, ENEMY_COLOR);
                }
                painter.fill_rotated_square(
                    view.player.position,
                    view.player.size,
                    view.facing,
                    PLAYER_COLOR,
                );
            });
        frame.render_widget(canvas, area);

        // Stats overlay at the top
        let hud_style = Style::default()
            .fg(TEXT_COLOR)
            .add_modifier(Modifier::BOLD);
        let half_width = area.width.saturating_sub(2) / 2;
        let score_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: half_width,
            height: area.height.min(1),
        };
        let lives_area = Rect {
            x: score_area.right(),
            ..score_area
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(format!("Score: {}", view.score), hud_style))),
            score_area,
        );
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("Lives: {}", view.player.lives),
                hud_style,
            )))
            .alignment(Alignment::Right),
            lives_area,
        );

        // Controls hint at bottom
        if area.height > 2 {
            let controls = Line::from(vec![Span::styled(
                "[WASD/Arrows: Move] [Mouse: Aim] [Right click: Fire] [Q: Quit]",
                Style::default().fg(Color::DarkGray),
            )]);
            let controls_area = Rect {
                x: area.x + 1,
                y: area.y + area.height - 1,
                width: area.width.saturating_sub(2),
                height: 1,
            };
            frame.render_widget(Paragraph::new(controls).centered(), controls_area);
        }
    }

    /// End screen: headline and final score, no entities
    fn render_game_over(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let height = view.config.height;

        frame.render_widget(
            Paragraph::new("").style(Style::default().bg(BACKGROUND)),
            area,
        );

        let headline = Line::from("GAME OVER").style(
            Style::default()
                .fg(TEXT_COLOR)
                .add_modifier(Modifier::BOLD),
        );
        let score = Line::from(format!("Score: {}", view.score)).style(Style::default().fg(TEXT_COLOR));

        let headline_row = world_row(area, height / 2.0 - 50.0, height);
        let score_row = world_row(area, height / 2.0 + 20.0, height).max(headline_row + 1);

        for (line, row) in [(headline, headline_row), (score, score_row)] {
            if row >= area.bottom() {
                continue;
            }
            let line_area = Rect {
                x: area.x,
                y: row,
                width: area.width,
                height: 1,
            };
            frame.render_widget(Paragraph::new(line).centered(), line_area);
        }
    }
}

/// Terminal row showing world coordinate `y`
fn world_row(area: Rect, y: f32, height: f32) -> u16 {
    let rows = f32::from(area.height);
    let offset = ((y / height) * rows).floor().clamp(0.0, (rows - 1.0).max(0.0));
    area.y + offset as u16
}

/// Canvas helper that draws filled shapes given in world coordinates
/// (y down) onto the canvas (y up).
struct Painter<'c, 'a> {
    ctx: &'c mut Context<'a>,
    height: f32,
    dot: Vec2,
}

impl Painter<'_, '_> {
    fn to_canvas(&self, p: Vec2) -> (f64, f64) {
        (p.x as f64, (self.height - p.y) as f64)
    }

    /// Samples a square region around `center` on the dot grid and keeps the
    /// points `inside` accepts.
    fn fill(&mut self, center: Vec2, reach: f32, color: Color, inside: impl Fn(Vec2) -> bool) {
        let mut coords = Vec::new();
        let steps_x = (reach / self.dot.x).ceil() as i32;
        let steps_y = (reach / self.dot.y).ceil() as i32;
        for iy in -steps_y..=steps_y {
            for ix in -steps_x..=steps_x {
                let offset = Vec2::new(ix as f32 * self.dot.x, iy as f32 * self.dot.y);
                if inside(offset) {
                    coords.push(self.to_canvas(center + offset));
                }
            }
        }
        // Tiny shapes still show up as one dot
        if coords.is_empty() {
            coords.push(self.to_canvas(center));
        }
        self.ctx.draw(&Points {
            coords: &coords,
            color,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.fill(center, radius, color, |offset| offset.length() <= radius);
    }

    fn fill_square(&mut self, center: Vec2, size: f32, color: Color) {
        let half = size / 2.0;
        self.fill(center, half, color, |offset| {
            offset.x.abs() <= half && offset.y.abs() <= half
        });
    }

    /// Square turned counter-clockwise on screen by `angle_deg`, with an
    /// outline so the edges stay crisp at low resolutions.
    fn fill_rotated_square(&mut self, center: Vec2, size: f32, angle_deg: f32, color: Color) {
        let half = size / 2.0;
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        // Screen y points down, so a visual counter-clockwise turn flips the sine
        let rotate = |v: Vec2| Vec2::new(v.x * cos + v.y * sin, -v.x * sin + v.y * cos);
        let unrotate = |v: Vec2| Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos);

        self.fill(center, half * std::f32::consts::SQRT_2, color, |offset| {
            let local = unrotate(offset);
            local.x.abs() <= half && local.y.abs() <= half
        });

        let corners = [
            Vec2::new(-half, -half),
            Vec2::new(half, -half),
            Vec2::new(half, half),
            Vec2::new(-half, half),
        ]
        .map(|corner| center + rotate(corner));
        for i in 0..corners.len() {
            let (x1, y1) = self.to_canvas(corners[i]);
            let (x2, y2) = self.to_canvas(corners[(i + 1) % corners.len()]);
            self.ctx.draw(&CanvasLine {
                x1,
                y1,
                x2,
                y2,
                color,
            });
        }
    }
}
