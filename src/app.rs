use color_eyre::Result;
use ratatui::{Terminal, backend::Backend, layout::Rect};
use std::time::Instant;

use crate::clock::FrameClock;
use crate::config::GameConfig;
use crate::input::{InputEvent, InputManager};
use crate::renderer::{GameRenderer, RenderView};
use crate::session::Session;

/// The main application: owns the session and drives input, simulation and
/// rendering once per frame.
pub struct App {
    running: bool,
    session: Session,
    /// Monotonic origin for every timestamp handed to the session
    started: Instant,
    clock: FrameClock,
    input_manager: InputManager,
    renderer: GameRenderer,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: GameConfig, reports_key_releases: bool) -> Self {
        let started = Instant::now();
        Self {
            running: true,
            session: Session::new(config, started.elapsed()),
            started,
            clock: FrameClock::new(config.frame_duration()),
            input_manager: InputManager::new(&config, reports_key_releases),
            renderer: GameRenderer::new(),
        }
    }

    /// Run the application's main loop until a quit is requested.
    pub fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let mut frame_count: u64 = 0;

        while self.running {
            let now = self.started.elapsed();

            // Mouse cells map onto the full terminal area
            let size = terminal.size()?;
            self.input_manager
                .set_viewport(Rect::new(0, 0, size.width, size.height));

            // Poll input events and get this frame's one-shot events
            self.input_manager
                .poll_events(self.session.game_state(), now)?;
            let events = self.input_manager.take_events();
            self.process_events(&events);

            // Update game state; a no-op once the game is over
            let frame_input = self.input_manager.frame_input(now);
            let report = self.session.step(&frame_input, now);
            if report.kills > 0 || report.lives_lost > 0 {
                tracing::debug!(frame = frame_count, ?report, "frame resolved");
            }

            terminal.draw(|frame| {
                let view = RenderView::new(&self.session, frame.area());
                self.renderer.render(frame, &view);
            })?;

            self.clock.tick();
            frame_count += 1;
        }

        tracing::info!(
            frames = frame_count,
            score = self.session.score(),
            "quit requested, shutting down"
        );
        Ok(())
    }

    /// Applies discrete events in the order they arrived
    fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            match event {
                InputEvent::Fire => {
                    self.session.fire(self.input_manager.pointer());
                }
                InputEvent::Quit => {
                    // Finish the current frame, then stop
                    self.running = false;
                }
            }
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}
