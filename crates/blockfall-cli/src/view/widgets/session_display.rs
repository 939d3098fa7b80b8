use blockfall_engine::{GameSession, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::view::widgets::{BoardDisplay, PieceDisplay, StatsDisplay, color, style};

/// Board, next piece and stats of a session, with a popup while paused or
/// after game over.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    show_ghost: bool,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession, show_ghost: bool) -> Self {
        Self {
            session,
            show_ghost,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let engine = self.session.engine();
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let border_style = match self.session.session_state() {
            SessionState::Playing => color::WHITE,
            SessionState::Paused => color::YELLOW,
            SessionState::GameOver => color::RED,
        };
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT)
        };

        let game_board = BoardDisplay::new(engine.grid())
            .falling_piece(engine.falling_piece())
            .ghost(
                self.show_ghost
                    .then(|| engine.simulate_drop_position())
                    .flatten(),
            )
            .block(
                Block::bordered()
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );
        let next_panel = PieceDisplay::new()
            .piece(engine.next_piece())
            .block(panel("NEXT"));
        let stats_panel = StatsDisplay::new(self.session).block(panel("STATS"));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(stats_panel.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(stats_panel.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_panel.height())]).areas(right_column);

        let game_board_width = game_board.width();
        stats_panel.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);

        let popup = match self.session.session_state() {
            SessionState::Playing => None,
            SessionState::Paused => Some(("PAUSED", style::PAUSED_POPUP)),
            SessionState::GameOver => Some(("GAME OVER", style::GAME_OVER_POPUP)),
        };

        if let Some((text, style)) = popup {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{FallSpeed, Intent, PieceSeed};

    use super::*;

    fn render(session: &GameSession) -> String {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        SessionDisplay::new(session, true).render(area, &mut buf);
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_render_panels() {
        let seed = PieceSeed::from_bytes([1; 16]);
        let session = GameSession::with_seed(60, FallSpeed::default(), seed);
        let screen = render(&session);
        assert!(screen.contains("NEXT"));
        assert!(screen.contains("STATS"));
        assert!(screen.contains("SCORE:"));
        assert!(screen.contains("[]"));
        assert!(!screen.contains("PAUSED"));
    }

    #[test]
    fn test_render_pause_popup() {
        let mut session = GameSession::new(60, FallSpeed::default());
        session.handle_intent(Intent::TogglePause);
        assert!(render(&session).contains("PAUSED"));
    }
}
