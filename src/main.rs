use color_eyre::eyre::eyre;
use crossterm::{
    event::{
        EnableFocusChange, EnableMouseCapture, KeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{EnterAlternateScreen, SetTitle, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stdout, stdout};

use edge_siege::{GameConfig, app::App, logging, tui};

fn main() -> color_eyre::Result<()> {
    tui::install_hooks()?;
    logging::init("debug.log")?;

    let config = GameConfig::default();
    config
        .validate()
        .map_err(|err| eyre!("invalid game configuration: {err}"))?;

    let supports_keyboard_enhancement = matches!(
        crossterm::terminal::supports_keyboard_enhancement(),
        Ok(true)
    );
    tracing::info!(supports_keyboard_enhancement, "terminal capabilities detected");

    enable_raw_mode()?;
    let result = enter_game_screen(supports_keyboard_enhancement)
        .and_then(|mut terminal| App::new(config, supports_keyboard_enhancement).run(&mut terminal));

    // Cleanup runs every step even if the loop or an earlier step failed
    let restored = tui::restore(supports_keyboard_enhancement);
    if let Err(err) = &result {
        tracing::error!(%err, "game loop failed");
    }
    tui::finish(result, restored)
}

/// Setup terminal manually for full control. Raw mode is already on; any
/// failure here still goes through the caller's restore.
fn enter_game_screen(keyboard_enhancement: bool) -> color_eyre::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange,
        SetTitle("2D Shooter")
    )?;

    // Enable keyboard enhancement AFTER entering alternate screen so key
    // releases are reported
    if keyboard_enhancement {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
    }

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.hide_cursor()?;
    Ok(terminal)
}
