use crossterm::{
    cursor::Show,
    event::{DisableFocusChange, DisableMouseCapture, PopKeyboardEnhancementFlags},
    execute,
    terminal::{LeaveAlternateScreen, disable_raw_mode},
};
use std::io::{self, stdout};

/// One terminal teardown action
pub type RestoreStep = Box<dyn FnOnce() -> io::Result<()>>;

/// Puts the terminal back the way the shell expects it. Every step runs even
/// when an earlier one fails; the first failure is returned.
pub fn restore(keyboard_enhanced: bool) -> io::Result<()> {
    let steps: [RestoreStep; 3] = [
        Box::new(move || {
            if keyboard_enhanced {
                execute!(stdout(), PopKeyboardEnhancementFlags)
            } else {
                Ok(())
            }
        }),
        Box::new(disable_raw_mode),
        Box::new(|| {
            execute!(
                stdout(),
                DisableFocusChange,
                DisableMouseCapture,
                LeaveAlternateScreen,
                Show
            )
        }),
    ];
    run_all(steps)
}

/// Runs each step in order regardless of failures, keeping the first error
pub fn run_all(steps: impl IntoIterator<Item = RestoreStep>) -> io::Result<()> {
    let mut first_error = None;
    for step in steps {
        if let Err(err) = step() {
            tracing::error!(%err, "terminal restore step failed");
            first_error.get_or_insert(err);
        }
    }
    first_error.map_or(Ok(()), Err)
}

/// Combines the game loop outcome with the teardown outcome. A loop error
/// wins over a restore error.
pub fn finish(run: color_eyre::Result<()>, restored: io::Result<()>) -> color_eyre::Result<()> {
    match run {
        Err(err) => {
            if let Err(restore_err) = restored {
                tracing::error!(%restore_err, "terminal restore also failed");
            }
            Err(err)
        }
        Ok(()) => restored.map_err(Into::into),
    }
}

/// Installs color-eyre with a panic hook that restores the terminal before
/// the report is printed, so it lands on the normal screen.
pub fn install_hooks() -> color_eyre::Result<()> {
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install()?;

    std::panic::set_hook(Box::new(move |panic_info| {
        // Popping flags that were never pushed is harmless
        let _ = restore(true);
        eprintln!("{}", panic_hook.panic_report(panic_info));
    }));
    Ok(())
}
