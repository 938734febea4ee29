//! Keyboard handling of the chat input box.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
}

impl KeyPress {
    pub fn new(key: Key, shift: bool) -> Self {
        Self { key, shift }
    }

    pub fn enter() -> Self {
        Self::new(Key::Enter, false)
    }

    pub fn shift_enter() -> Self {
        Self::new(Key::Enter, true)
    }

    /// Enter submits; Shift+Enter and every other key do not.
    pub fn submits(&self) -> bool {
        self.key == Key::Enter && !self.shift
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_plain_enter_submits() {
        assert!(KeyPress::enter().submits());
        assert!(!KeyPress::shift_enter().submits());
        assert!(!KeyPress::new(Key::Char('a'), false).submits());
        assert!(!KeyPress::new(Key::Other, true).submits());
    }
}
