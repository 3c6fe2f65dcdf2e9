use crate::domain::keybinding::{Action, Keybind};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

pub struct CommandRegistry {
    display_bindings: HashMap<Action, KeyEvent>,
    input_bindings: Vec<(KeyEvent, Action)>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        let mut display_bindings = HashMap::new();
        let mut input_bindings = Vec::new();

        let mut register = |action: Action, key: KeyEvent, is_primary: bool| {
            if is_primary {
                display_bindings.insert(action, key);
            }
            input_bindings.push((key, action));
        };

        register(
            Action::Quit,
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE),
            true,
        );
        register(
            Action::Quit,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            false,
        );
        register(
            Action::ToggleMenu,
            KeyEvent::new(KeyCode::Char('m'), KeyModifiers::NONE),
            true,
        );
        register(
            Action::ToggleMenu,
            KeyEvent::new(KeyCode::F(2), KeyModifiers::NONE),
            false,
        );

        register(
            Action::NextPlaylist,
            KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE),
            true,
        );
        register(
            Action::NextPlaylist,
            KeyEvent::new(KeyCode::Right, KeyModifiers::NONE),
            false,
        );
        register(
            Action::NextPlaylist,
            KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE),
            false,
        );
        register(
            Action::PreviousPlaylist,
            KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT),
            true,
        );
        register(
            Action::PreviousPlaylist,
            KeyEvent::new(KeyCode::BackTab, KeyModifiers::NONE),
            false,
        );
        register(
            Action::PreviousPlaylist,
            KeyEvent::new(KeyCode::Left, KeyModifiers::NONE),
            false,
        );
        register(
            Action::PreviousPlaylist,
            KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE),
            false,
        );

        register(
            Action::NavigateUp,
            KeyEvent::new(KeyCode::Up, KeyModifiers::NONE),
            true,
        );
        register(
            Action::NavigateUp,
            KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE),
            false,
        );
        register(
            Action::NavigateDown,
            KeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
            true,
        );
        register(
            Action::NavigateDown,
            KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE),
            false,
        );
        register(
            Action::SelectFirst,
            KeyEvent::new(KeyCode::Char('g'), KeyModifiers::NONE),
            true,
        );
        register(
            Action::SelectFirst,
            KeyEvent::new(KeyCode::Home, KeyModifiers::NONE),
            false,
        );
        register(
            Action::SelectLast,
            KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT),
            true,
        );
        register(
            Action::SelectLast,
            KeyEvent::new(KeyCode::End, KeyModifiers::NONE),
            false,
        );

        register(
            Action::Select,
            KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            true,
        );
        register(
            Action::Cancel,
            KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            true,
        );

        Self {
            display_bindings,
            input_bindings,
        }
    }
}

impl CommandRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, action: Action) -> Option<KeyEvent> {
        self.display_bindings.get(&action).copied()
    }

    #[must_use]
    pub fn find_action(&self, key: KeyEvent) -> Option<Action> {
        self.input_bindings
            .iter()
            .find(|(k, _)| k.code == key.code && k.modifiers == key.modifiers)
            .map(|(_, a)| *a)
    }

    /// Footer entry for `action` using its primary key.
    #[must_use]
    pub fn keybind(&self, action: Action, label: &'static str) -> Option<Keybind> {
        self.get(action).map(|key| Keybind::new(key, action, label))
    }
}

pub trait HasCommands {
    fn get_commands(&self, registry: &CommandRegistry) -> Vec<Keybind>;
}
