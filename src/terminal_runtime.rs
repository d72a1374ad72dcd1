use std::io;
use std::panic;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::driver::{Control, Frontend};
use crate::renderer::{self, GlyphSet};
use crate::snapshot::Snapshot;

/// Concrete terminal type used by the runtime.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Owns terminal lifecycle (raw mode + alternate screen) for one session.
///
/// On drop, this type restores terminal state best-effort.
pub struct TerminalSession {
    terminal: AppTerminal,
}

impl TerminalSession {
    /// Enters raw mode, switches to alternate screen, and creates a ratatui terminal.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        let backend = CrosstermBackend::new(stdout);
        match Terminal::new(backend) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(error) => {
                let _ = cleanup_terminal_best_effort();
                Err(error)
            }
        }
    }

    /// Returns mutable access to the inner ratatui terminal.
    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = cleanup_terminal_best_effort();
    }
}

/// Restores the terminal before the default panic message is printed.
pub fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = cleanup_terminal_best_effort();
        default_hook(panic_info);
    }));
}

fn cleanup_terminal_best_effort() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)
}

/// Full-screen frontend: draws every tick and sleeps by polling for keys, so
/// `q`, `Esc` or `Ctrl-C` can end the run at any tick boundary.
pub struct TerminalFrontend {
    session: TerminalSession,
    glyphs: GlyphSet,
    quit_requested: bool,
}

impl TerminalFrontend {
    #[must_use]
    pub fn new(session: TerminalSession, glyphs: GlyphSet) -> Self {
        Self {
            session,
            glyphs,
            quit_requested: false,
        }
    }

    fn draw(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        let glyphs = self.glyphs;
        self.session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, snapshot, glyphs))?;
        Ok(())
    }
}

impl Frontend for TerminalFrontend {
    fn present(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        self.draw(snapshot)
    }

    fn pause(&mut self, delay: Duration) -> io::Result<Control> {
        let deadline = Instant::now() + delay;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !event::poll(remaining)? {
                return Ok(Control::Continue);
            }

            if let Event::Key(key) = event::read()? {
                if is_quit_key(key) {
                    self.quit_requested = true;
                    return Ok(Control::Stop);
                }
            }
        }
    }

    /// Shows the final board and waits for a key unless the user already quit.
    fn finish(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        if self.quit_requested {
            return Ok(());
        }

        self.draw(snapshot)?;
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(());
                }
            }
        }
    }
}

fn is_quit_key(key: KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    use super::is_quit_key;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn quit_keys_are_recognised() {
        assert!(is_quit_key(press(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit_key(press(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn other_keys_and_releases_are_ignored() {
        assert!(!is_quit_key(press(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit_key(press(KeyCode::Up, KeyModifiers::NONE)));

        let mut release = press(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert!(!is_quit_key(release));
    }
}
