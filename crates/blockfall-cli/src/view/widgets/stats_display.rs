use std::iter;

use blockfall_engine::GameSession;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::style;

pub struct StatsDisplay<'a> {
    session: &'a GameSession,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatsDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        18 + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        ROWS.len() as u16 + super::block_vertical_margin(self.block.as_ref())
    }
}

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(&'static dyn Fn(&GameSession) -> String),
    LabelValue(&'static str, &'static dyn Fn(&GameSession) -> String),
}

fn cleared(session: &GameSession, lines: usize) -> String {
    session.engine().stats().line_cleared_counter()[lines].to_string()
}

const ROWS: &[Row] = &[
    Row::FullLabel("SCORE:"),
    Row::FullValue(&|session| session.engine().score().to_string()),
    Row::FullLabel("TIME:"),
    Row::FullValue(&|session| {
        let dur = session.duration();
        format!(
            "{:0}:{:0>2}.{:0>2}",
            dur.as_secs() / 60,
            dur.as_secs() % 60,
            dur.subsec_millis() / 10
        )
    }),
    Row::Empty,
    Row::LabelValue("LEVEL:", &|session| session.engine().level().to_string()),
    Row::LabelValue("LINES:", &|session| {
        session.engine().total_cleared_lines().to_string()
    }),
    Row::LabelValue("PIECES:", &|session| {
        session.engine().stats().completed_pieces().to_string()
    }),
    Row::Empty,
    Row::LabelValue("SINGLES:", &|session| cleared(session, 1)),
    Row::LabelValue("DOUBLES:", &|session| cleared(session, 2)),
    Row::LabelValue("TRIPLES:", &|session| cleared(session, 3)),
    Row::LabelValue("QUADS:", &|session| cleared(session, 4)),
];

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas.iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(self.session), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(self.session), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
