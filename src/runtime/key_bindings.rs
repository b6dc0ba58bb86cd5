use crate::routing::Route;
use crate::runtime::intent::Intent;
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn alt(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::ALT)
    }

    pub fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

/// Keys the storefront reserves. Anything unbound that produces a character
/// goes to the search field.
#[derive(Default)]
pub struct KeyBindings {
    bindings: HashMap<KeyBinding, Intent>,
}

impl KeyBindings {
    pub fn new() -> Self {
        let mut manager = Self::default();
        manager.install_defaults();
        manager
    }

    pub fn bind(&mut self, key: KeyBinding, intent: Intent) {
        self.bindings.insert(key, intent);
    }

    pub fn unbind(&mut self, key: &KeyBinding) {
        self.bindings.remove(key);
    }

    pub fn resolve(&self, event: KeyEvent) -> Intent {
        if let Some(intent) = self.bindings.get(&KeyBinding::from_event(event)) {
            return intent.clone();
        }
        match event.code {
            KeyCode::Char(ch)
                if !event.modifiers.contains(KeyModifiers::CONTROL)
                    && !event.modifiers.contains(KeyModifiers::ALT) =>
            {
                Intent::InsertChar(ch)
            }
            _ => Intent::Noop,
        }
    }

    fn install_defaults(&mut self) {
        self.bind(KeyBinding::ctrl(KeyCode::Char('c')), Intent::Exit);
        self.bind(KeyBinding::key(KeyCode::Esc), Intent::ClearSearch);
        self.bind(KeyBinding::key(KeyCode::Backspace), Intent::DeleteChar);

        self.bind(KeyBinding::key(KeyCode::Up), Intent::SelectPrev);
        self.bind(KeyBinding::key(KeyCode::Down), Intent::SelectNext);
        self.bind(KeyBinding::key(KeyCode::Enter), Intent::OpenSelected);
        self.bind(KeyBinding::key(KeyCode::Left), Intent::PrevPage);
        self.bind(KeyBinding::key(KeyCode::Right), Intent::NextPage);
        self.bind(KeyBinding::key(KeyCode::PageUp), Intent::Scroll(-10));
        self.bind(KeyBinding::key(KeyCode::PageDown), Intent::Scroll(10));

        self.bind(KeyBinding::alt(KeyCode::Left), Intent::Back);
        self.bind(KeyBinding::alt(KeyCode::Right), Intent::Forward);
        self.bind(KeyBinding::ctrl(KeyCode::Char('r')), Intent::Reload);

        self.bind(
            KeyBinding::alt(KeyCode::Char('h')),
            Intent::OpenRoute(Route::Home),
        );
        self.bind(
            KeyBinding::alt(KeyCode::Char('p')),
            Intent::OpenRoute(Route::Listing),
        );
        self.bind(
            KeyBinding::alt(KeyCode::Char('a')),
            Intent::OpenRoute(Route::About),
        );
        self.bind(
            KeyBinding::alt(KeyCode::Char('c')),
            Intent::OpenRoute(Route::Contact),
        );
        self.bind(
            KeyBinding::alt(KeyCode::Char('k')),
            Intent::OpenRoute(Route::Cart),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyBinding, KeyBindings};
    use crate::routing::Route;
    use crate::runtime::intent::Intent;
    use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent { code, modifiers }
    }

    #[test]
    fn plain_characters_type_into_search() {
        let bindings = KeyBindings::new();
        assert_eq!(
            bindings.resolve(key(KeyCode::Char('x'), KeyModifiers::NONE)),
            Intent::InsertChar('x')
        );
        assert_eq!(
            bindings.resolve(key(KeyCode::Char('X'), KeyModifiers::SHIFT)),
            Intent::InsertChar('X')
        );
    }

    #[test]
    fn reserved_keys_resolve_to_their_intents() {
        let bindings = KeyBindings::new();
        assert_eq!(
            bindings.resolve(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Intent::Exit
        );
        assert_eq!(
            bindings.resolve(key(KeyCode::Char('a'), KeyModifiers::ALT)),
            Intent::OpenRoute(Route::About)
        );
        assert_eq!(
            bindings.resolve(key(KeyCode::Char('z'), KeyModifiers::CONTROL)),
            Intent::Noop
        );
    }

    #[test]
    fn rebinding_overrides_defaults() {
        let mut bindings = KeyBindings::new();
        bindings.bind(KeyBinding::key(KeyCode::Right), Intent::GoToPage(1));
        assert_eq!(
            bindings.resolve(key(KeyCode::Right, KeyModifiers::NONE)),
            Intent::GoToPage(1)
        );
        bindings.unbind(&KeyBinding::key(KeyCode::Right));
        assert_eq!(
            bindings.resolve(key(KeyCode::Right, KeyModifiers::NONE)),
            Intent::Noop
        );
    }
}
