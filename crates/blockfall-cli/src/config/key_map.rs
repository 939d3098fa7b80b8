use std::{collections::BTreeMap, path::Path};

use blockfall_engine::Intent;
use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};

use crate::util;

/// Something a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    #[display("Move Left")]
    MoveLeft,
    #[display("Move Right")]
    MoveRight,
    #[display("Rotate")]
    Rotate,
    #[display("Soft Drop")]
    SoftDrop,
    #[display("Hard Drop")]
    HardDrop,
    #[display("Pause")]
    Pause,
    #[display("Restart")]
    Restart,
    #[display("Quit")]
    Quit,
}

impl Action {
    pub const ALL: [Self; 8] = [
        Self::MoveLeft,
        Self::MoveRight,
        Self::Rotate,
        Self::SoftDrop,
        Self::HardDrop,
        Self::Pause,
        Self::Restart,
        Self::Quit,
    ];

    /// The game intent this action stands for. Restart and quit are handled
    /// by the front end itself.
    pub fn intent(self) -> Option<Intent> {
        match self {
            Self::MoveLeft => Some(Intent::MoveLeft),
            Self::MoveRight => Some(Intent::MoveRight),
            Self::Rotate => Some(Intent::RotateClockwise),
            Self::SoftDrop => Some(Intent::SoftDrop),
            Self::HardDrop => Some(Intent::HardDrop),
            Self::Pause => Some(Intent::TogglePause),
            Self::Restart | Self::Quit => None,
        }
    }

    fn default_keys(self) -> Vec<KeyCode> {
        match self {
            Self::MoveLeft => vec![KeyCode::Char('a'), KeyCode::Left],
            Self::MoveRight => vec![KeyCode::Char('d'), KeyCode::Right],
            Self::Rotate => vec![KeyCode::Char('w'), KeyCode::Up],
            Self::SoftDrop => vec![KeyCode::Char('s'), KeyCode::Down],
            Self::HardDrop => vec![KeyCode::Char(' ')],
            Self::Pause => vec![KeyCode::Char('p')],
            Self::Restart => vec![KeyCode::Char('r')],
            Self::Quit => vec![KeyCode::Char('q'), KeyCode::Esc],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum KeyMapError {
    #[display("unknown key name {name:?}")]
    UnknownKey { name: String },
    #[display("no keys bound to {action}")]
    Unbound { action: Action },
    #[display("key {key:?} bound to both {first} and {second}")]
    Conflict {
        key: String,
        first: Action,
        second: Action,
    },
}

/// Parses a key name as written in key map files.
///
/// Named keys are case-insensitive; a single character stands for itself,
/// with letters folded to lower case.
pub fn parse_key(name: &str) -> Result<KeyCode, KeyMapError> {
    let code = match name.to_ascii_lowercase().as_str() {
        "space" => KeyCode::Char(' '),
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        lower => {
            let mut chars = lower.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if !c.is_whitespace() && !c.is_control() => KeyCode::Char(c),
                _ => {
                    return Err(KeyMapError::UnknownKey {
                        name: name.to_owned(),
                    });
                }
            }
        }
    };
    Ok(code)
}

/// Inverse of [`parse_key`] for the keys it accepts.
pub fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "space".to_owned(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Left => "left".to_owned(),
        KeyCode::Right => "right".to_owned(),
        KeyCode::Up => "up".to_owned(),
        KeyCode::Down => "down".to_owned(),
        KeyCode::Enter => "enter".to_owned(),
        KeyCode::Esc => "esc".to_owned(),
        KeyCode::Tab => "tab".to_owned(),
        other => other.to_string().to_lowercase(),
    }
}

/// Key names per action, as stored in JSON.
type KeyMapFile = BTreeMap<Action, Vec<String>>;

/// Assignment of keys to actions.
///
/// Every action has at least one key and no key triggers two actions.
/// A key map file only needs to list the actions it changes:
///
/// ```json
/// { "rotate": ["x", "up"], "hard_drop": ["enter"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "KeyMapFile", into = "KeyMapFile")]
pub struct KeyMap {
    bindings: BTreeMap<Action, Vec<KeyCode>>,
}

impl Default for KeyMap {
    fn default() -> Self {
        let bindings = Action::ALL
            .into_iter()
            .map(|action| (action, action.default_keys()))
            .collect();
        Self { bindings }
    }
}

impl TryFrom<KeyMapFile> for KeyMap {
    type Error = KeyMapError;

    fn try_from(file: KeyMapFile) -> Result<Self, Self::Error> {
        let mut key_map = Self::default();
        for (action, names) in file {
            let keys = names
                .iter()
                .map(|name| parse_key(name))
                .collect::<Result<Vec<_>, _>>()?;
            key_map.bindings.insert(action, keys);
        }
        key_map.validate()?;
        Ok(key_map)
    }
}

impl From<KeyMap> for KeyMapFile {
    fn from(key_map: KeyMap) -> Self {
        key_map
            .bindings
            .into_iter()
            .map(|(action, keys)| (action, keys.into_iter().map(key_name).collect()))
            .collect()
    }
}

impl KeyMap {
    pub fn load<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        util::read_json_file("key map", path)
    }

    fn validate(&self) -> Result<(), KeyMapError> {
        let mut owners = BTreeMap::new();
        for (action, keys) in &self.bindings {
            if keys.is_empty() {
                return Err(KeyMapError::Unbound { action: *action });
            }
            for key in keys {
                if let Some(first) = owners.insert(key_name(*key), *action)
                    && first != *action
                {
                    return Err(KeyMapError::Conflict {
                        key: key_name(*key),
                        first,
                        second: *action,
                    });
                }
            }
        }
        Ok(())
    }

    /// Keys bound to `action`, in file order.
    pub fn keys(&self, action: Action) -> &[KeyCode] {
        self.bindings
            .get(&action)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Action triggered by a key press, if any.
    pub fn action(&self, code: KeyCode) -> Option<Action> {
        let code = match code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            code => code,
        };
        self.bindings
            .iter()
            .find(|(_, keys)| keys.contains(&code))
            .map(|(action, _)| *action)
    }
}
