pub mod draw;
pub mod editor;

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste,
        EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, time::Duration};

use crate::core::editor::Editor;
use crate::utils::logger;
use editor::EditorApp;

type UiTerminal = Terminal<CrosstermBackend<io::Stderr>>;

/// Runs the interactive editor until the user quits.
pub fn run_editor(editor: Editor) -> Result<()> {
    let mut app = EditorApp::new(editor);

    let mut terminal = setup_terminal()?;
    let run_result = run_app(&mut terminal, &mut app);
    let restore_result = restore_terminal(&mut terminal);

    if let Err(err) = restore_result {
        logger::error(&format!("Failed to restore terminal from editor: {}", err));
    }

    run_result
}

fn setup_terminal() -> Result<UiTerminal> {
    enable_raw_mode().context("failed to enable raw mode")?;

    let mut stderr = io::stderr();
    execute!(
        stderr,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste,
        Hide
    )
    .context("failed to switch to alternate screen")?;

    let backend = CrosstermBackend::new(stderr);
    let terminal = Terminal::new(backend).context("failed to initialize terminal backend")?;

    Ok(terminal)
}

fn restore_terminal(terminal: &mut UiTerminal) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen,
        Show
    )
    .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;
    Ok(())
}

/// Leaves raw mode and the alternate screen without a terminal handle.
///
/// Used from the panic hook and at startup after an earlier crash.
pub fn restore_terminal_best_effort() {
    let _ = disable_raw_mode();
    let _ = execute!(
        io::stderr(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen,
        Show
    );
}

fn run_app(terminal: &mut UiTerminal, app: &mut EditorApp) -> Result<()> {
    loop {
        terminal.draw(|frame| draw::draw_editor(frame, app))?;

        if app.should_quit {
            break;
        }

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    app.should_quit = true;
                } else {
                    app.on_key(key.code);
                }
            }
            Event::Mouse(mouse) => app.on_mouse(mouse.kind, mouse.column, mouse.row),
            Event::Paste(text) => app.on_paste(&text),
            _ => {}
        }
    }

    logger::info("editor closed");
    Ok(())
}
