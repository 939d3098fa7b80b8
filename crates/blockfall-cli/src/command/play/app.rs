use blockfall_engine::{GameHost, SessionState, TickOutcome};
use crossterm::event::{Event, KeyEventKind};
use log::debug;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::{
    config::{Action, KeyMap},
    tui::{App, Tui},
    view::widgets::{KeyBindingDisplay, SessionDisplay},
};

const PLAYING_HELP: &[Action] = &[
    Action::MoveLeft,
    Action::MoveRight,
    Action::Rotate,
    Action::SoftDrop,
    Action::HardDrop,
    Action::Pause,
    Action::Restart,
    Action::Quit,
];
const PAUSED_HELP: &[Action] = &[Action::Pause, Action::Restart, Action::Quit];
const GAME_OVER_HELP: &[Action] = &[Action::Restart, Action::Quit];

#[derive(Debug)]
pub struct PlayApp {
    host: GameHost,
    key_map: KeyMap,
    show_ghost: bool,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(mut host: GameHost, key_map: KeyMap, show_ghost: bool) -> Self {
        host.launch();
        Self {
            host,
            key_map,
            show_ghost,
            is_exiting: false,
        }
    }

    pub fn into_host(self) -> GameHost {
        self.host
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.is_exiting = true,
            Action::Restart => _ = self.host.restart(),
            action => {
                if let Some(intent) = action.intent() {
                    let session = self.host.launch();
                    if session.handle_intent(intent) {
                        debug!("{intent:?}");
                    }
                }
            }
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_frame_rate(self.host.fps());
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: Event) {
        if let Some(key) = event.as_key_event()
            && key.kind != KeyEventKind::Release
            && let Some(action) = self.key_map.action(key.code)
        {
            self.handle_action(action);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let Some(session) = self.host.session() else {
            return;
        };
        let help = match session.session_state() {
            SessionState::Playing => PLAYING_HELP,
            SessionState::Paused => PAUSED_HELP,
            SessionState::GameOver => GAME_OVER_HELP,
        };

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(23), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(SessionDisplay::new(session, self.show_ghost), main_area);
        frame.render_widget(KeyBindingDisplay::new(&self.key_map, help), help_area);
    }

    fn update(&mut self, _tui: &mut Tui) {
        let session = self.host.launch();
        if let Some(TickOutcome::Locked(outcome)) = session.increment_frame()
            && outcome.lines_cleared > 0
        {
            debug!(
                "cleared {} lines, score {}",
                outcome.lines_cleared,
                session.engine().score()
            );
        }
    }
}
