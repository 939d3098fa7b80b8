use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    board_display::*, cell_display::*, key_binding_display::*, piece_display::*,
    session_display::*, stats_display::*,
};

mod board_display;
mod cell_display;
mod key_binding_display;
mod piece_display;
mod session_display;
mod stats_display;

mod color {
    use ratatui::style::Color;

    pub const CYAN: Color = Color::Rgb(0x00, 0xf0, 0xf0);
    pub const YELLOW: Color = Color::Rgb(0xf0, 0xf0, 0x00);
    pub const PURPLE: Color = Color::Rgb(0xa0, 0x00, 0xf0);
    pub const GREEN: Color = Color::Rgb(0x00, 0xf0, 0x00);
    pub const RED: Color = Color::Rgb(0xf0, 0x00, 0x00);
    pub const BLUE: Color = Color::Rgb(0x00, 0x00, 0xf0);
    pub const ORANGE: Color = Color::Rgb(0xf0, 0xa0, 0x00);
    pub const GRAY: Color = Color::Rgb(0x7f, 0x7f, 0x7f);
    pub const BLACK: Color = Color::Rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::Rgb(0xff, 0xff, 0xff);
}

pub mod style {
    use ratatui::style::{Color, Style};

    use crate::view::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY: Style = bg_only(color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::GRAY, color::BLACK);
    pub const GHOST: Style = fg_bg(color::GRAY, color::BLACK);

    pub const I_BLOCK: Style = bg_only(color::CYAN);
    pub const O_BLOCK: Style = bg_only(color::YELLOW);
    pub const T_BLOCK: Style = bg_only(color::PURPLE);
    pub const S_BLOCK: Style = bg_only(color::GREEN);
    pub const Z_BLOCK: Style = bg_only(color::RED);
    pub const J_BLOCK: Style = bg_only(color::BLUE);
    pub const L_BLOCK: Style = bg_only(color::ORANGE);

    pub const PAUSED_POPUP: Style = fg_bg(color::BLACK, color::YELLOW);
    pub const GAME_OVER_POPUP: Style = fg_bg(color::WHITE, color::RED);
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}

#[cfg(test)]
mod tests {
    use ratatui::widgets::Padding;

    use super::*;

    #[test]
    fn test_block_margins() {
        assert_eq!(block_horizontal_margin(None), 0);
        assert_eq!(block_vertical_margin(None), 0);

        let block = BlockWidget::bordered().padding(Padding::horizontal(1));
        assert_eq!(block_horizontal_margin(Some(&block)), 4);
        assert_eq!(block_vertical_margin(Some(&block)), 2);
    }
}
