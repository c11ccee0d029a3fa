use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::GameMode;
use crate::message::PlayerId;
use crate::snake::Direction::{self, *};

/// Raw input handed to the world once per step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(KeyCode),
}

impl InputEvent {
    /// Only key presses count; Ctrl+C and `q` mean quit.
    pub fn from_key(ev: &KeyEvent) -> Option<Self> {
        if ev.kind == KeyEventKind::Release {
            return None;
        }

        if is_quit(ev) {
            Some(InputEvent::Quit)
        } else {
            Some(InputEvent::KeyDown(ev.code))
        }
    }
}

pub fn is_quit(ev: &KeyEvent) -> bool {
    match ev.code {
        KeyCode::Char('c') => ev.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Steer { player: PlayerId, direction: Direction },
    TogglePause,
}

pub struct KeyBindings {
    map: HashMap<KeyCode, Command>,
}

impl KeyBindings {
    pub fn for_mode(mode: GameMode) -> Self {
        let mut bindings = KeyBindings { map: HashMap::new() };

        bindings.bind_arrows(1);
        match mode {
            GameMode::SinglePlayer => bindings.bind_wasd(1),
            GameMode::Multiplayer => bindings.bind_wasd(2),
        }

        bindings.map.insert(KeyCode::Char('p'), Command::TogglePause);
        bindings.map.insert(KeyCode::Char('P'), Command::TogglePause);
        bindings.map.insert(KeyCode::Esc, Command::TogglePause);
        bindings
    }

    pub fn resolve(&self, code: &KeyCode) -> Option<Command> {
        self.map.get(code).copied()
    }

    fn bind_arrows(&mut self, player: PlayerId) {
        let keys = [(KeyCode::Up, Up), (KeyCode::Down, Down), (KeyCode::Left, Left), (KeyCode::Right, Right)];
        for (code, direction) in keys {
            self.map.insert(code, Command::Steer { player, direction });
        }
    }

    fn bind_wasd(&mut self, player: PlayerId) {
        let keys = [('w', Up), ('s', Down), ('a', Left), ('d', Right)];
        for (ch, direction) in keys {
            let steer = Command::Steer { player, direction };
            self.map.insert(KeyCode::Char(ch), steer);
            self.map.insert(KeyCode::Char(ch.to_ascii_uppercase()), steer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_player_arrows_and_wasd() {
        let bindings = KeyBindings::for_mode(GameMode::SinglePlayer);

        assert_eq!(bindings.resolve(&KeyCode::Up), Some(Command::Steer { player: 1, direction: Up }));
        assert_eq!(bindings.resolve(&KeyCode::Char('a')), Some(Command::Steer { player: 1, direction: Left }));
        assert_eq!(bindings.resolve(&KeyCode::Char('D')), Some(Command::Steer { player: 1, direction: Right }));
    }

    #[test]
    fn test_multiplayer_splits_players() {
        let bindings = KeyBindings::for_mode(GameMode::Multiplayer);

        assert_eq!(bindings.resolve(&KeyCode::Down), Some(Command::Steer { player: 1, direction: Down }));
        assert_eq!(bindings.resolve(&KeyCode::Char('w')), Some(Command::Steer { player: 2, direction: Up }));
        assert_eq!(bindings.resolve(&KeyCode::Char('S')), Some(Command::Steer { player: 2, direction: Down }));
    }

    #[test]
    fn test_pause_keys() {
        let bindings = KeyBindings::for_mode(GameMode::Multiplayer);
        assert_eq!(bindings.resolve(&KeyCode::Char('p')), Some(Command::TogglePause));
        assert_eq!(bindings.resolve(&KeyCode::Esc), Some(Command::TogglePause));
    }

    #[test]
    fn test_unknown_key() {
        let bindings = KeyBindings::for_mode(GameMode::SinglePlayer);
        assert_eq!(bindings.resolve(&KeyCode::Char('x')), None);
        assert_eq!(bindings.resolve(&KeyCode::Enter), None);
    }

    #[test]
    fn test_ctrl_c_and_q_quit() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(InputEvent::from_key(&ctrl_c), Some(InputEvent::Quit));

        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(InputEvent::from_key(&q), Some(InputEvent::Quit));

        let c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(InputEvent::from_key(&c), Some(InputEvent::KeyDown(KeyCode::Char('c'))));
    }

    #[test]
    fn test_key_release_is_dropped() {
        let mut up = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        up.kind = KeyEventKind::Release;
        assert_eq!(InputEvent::from_key(&up), None);
    }
}
