use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use crate::cell::RenderClass;
use crate::game::GameStatus;
use crate::snapshot::Snapshot;

/// Terminal columns used per board cell.
pub const CELL_WIDTH: u16 = 2;

/// Glyphs for each render class.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GlyphSet {
    pub head: &'static str,
    pub body: &'static str,
    pub fruit: &'static str,
}

/// Block glyphs for terminals with good Unicode fonts.
pub const GLYPHS_UNICODE: GlyphSet = GlyphSet {
    head: "██",
    body: "▓▓",
    fruit: "◆",
};

/// Plain ASCII fallback, matching the text board.
pub const GLYPHS_ASCII: GlyphSet = GlyphSet {
    head: "O",
    body: "#",
    fruit: "*",
};

impl GlyphSet {
    fn for_class(self, class: RenderClass) -> Option<(&'static str, Style)> {
        match class {
            RenderClass::Head => Some((
                self.head,
                Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            RenderClass::Body => Some((self.body, Style::new().fg(Color::Green))),
            RenderClass::Fruit => Some((self.fruit, Style::new().fg(Color::Red))),
            RenderClass::Empty => None,
        }
    }
}

/// Renders the board and a one-line HUD from a snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot, glyphs: GlyphSet) {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    let title = match snapshot.status {
        GameStatus::Running => " torus snake ",
        GameStatus::Terminated => " game over ",
    };
    let block = Block::bordered()
        .title(title)
        .border_style(Style::new().fg(Color::DarkGray));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_cells(frame, inner, snapshot, glyphs);

    frame.render_widget(
        Paragraph::new(hud_line(snapshot))
            .alignment(Alignment::Left)
            .style(Style::default().fg(Color::Gray)),
        hud_area,
    );
}

fn render_cells(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot, glyphs: GlyphSet) {
    let buffer = frame.buffer_mut();
    for (row_index, row) in snapshot.rows().enumerate() {
        for (column_index, class) in row.iter().enumerate() {
            let Some((glyph, style)) = glyphs.for_class(*class) else {
                continue;
            };
            let Some((x, y)) = cell_to_terminal(inner, column_index, row_index) else {
                continue;
            };
            buffer.set_stringn(x, y, glyph, usize::from(inner.right() - x), style);
        }
    }
}

fn hud_line(snapshot: &Snapshot) -> Line<'static> {
    let hint = match snapshot.status {
        GameStatus::Running => "[q] quit",
        GameStatus::Terminated => "press any key",
    };
    Line::from(format!(
        " Score: {}  Body: {}  Delay: {:.3}s  Tick: {}  {hint}",
        snapshot.length, snapshot.body_cells, snapshot.speed, snapshot.tick_count
    ))
}

fn cell_to_terminal(inner: Rect, column: usize, row: usize) -> Option<(u16, u16)> {
    let x_offset = u16::try_from(column).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(row).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::{render, GLYPHS_ASCII};
    use crate::config::SimConfig;
    use crate::game::Game;

    #[test]
    fn board_is_drawn_inside_border_with_hud() {
        let game = Game::with_seed(SimConfig::new(5, 4), 31).expect("valid config");
        let snapshot = game.snapshot();
        let mut terminal = Terminal::new(TestBackend::new(20, 8)).expect("test terminal");

        terminal
            .draw(|frame| render(frame, &snapshot, GLYPHS_ASCII))
            .expect("draw should succeed");

        let buffer = terminal.backend().buffer();
        // Head sits at (2, 2): one border column plus two columns per cell.
        assert_eq!(buffer[(5u16, 3u16)].symbol(), "O");

        let hud: String = (0..20u16).map(|x| buffer[(x, 7u16)].symbol()).collect();
        assert!(hud.contains("Score: 3"), "unexpected HUD: {hud:?}");
        assert!(hud.contains("Body: 1"), "unexpected HUD: {hud:?}");
    }
}
