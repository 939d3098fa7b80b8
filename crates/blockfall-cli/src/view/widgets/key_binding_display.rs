use ratatui::{
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::config::{self, Action, KeyMap};

/// One-line help listing the keys of some actions.
#[derive(Debug)]
pub struct KeyBindingDisplay<'a> {
    key_map: &'a KeyMap,
    actions: &'a [Action],
    block: Option<BlockWidget<'a>>,
}

impl<'a> KeyBindingDisplay<'a> {
    pub fn new(key_map: &'a KeyMap, actions: &'a [Action]) -> Self {
        Self {
            key_map,
            actions,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    fn line(&self) -> Line<'static> {
        let mut spans = vec![];
        for (i, action) in self.actions.iter().copied().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", ITEM_SEPARATOR_STYLE));
            }
            for (i, key) in self.key_map.keys(action).iter().copied().enumerate() {
                if i > 0 {
                    spans.push(Span::styled("/", KEY_SEPARATOR_STYLE));
                }
                spans.push(Span::styled(config::key_name(key), KEY_STYLE));
            }
            spans.push(Span::from(" "));
            spans.push(Span::styled(action.to_string(), DESCRIPTION_STYLE));
        }
        Line::from(spans).centered()
    }
}

const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const KEY_SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);
const DESCRIPTION_STYLE: Style = Style::new().fg(Color::White);
const ITEM_SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);

impl Widget for KeyBindingDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);
        self.line().render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_lists_keys_per_action() {
        let key_map = KeyMap::default();
        let display = KeyBindingDisplay::new(&key_map, &[Action::MoveLeft, Action::Quit]);
        assert_eq!(display.line().to_string(), "a/left Move Left | q/esc Quit");
    }
}
