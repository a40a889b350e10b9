use crossterm::event::{KeyCode, KeyModifiers};

pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn matches(&self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        self.code == code && self.modifiers == modifiers
    }
}

pub fn quit_binding() -> KeyBinding {
    KeyBinding {
        code: KeyCode::Char('q'),
        modifiers: KeyModifiers::CONTROL,
    }
}

pub fn export_binding() -> KeyBinding {
    KeyBinding {
        code: KeyCode::Char('e'),
        modifiers: KeyModifiers::CONTROL,
    }
}

pub fn details_binding() -> KeyBinding {
    KeyBinding {
        code: KeyCode::Char('d'),
        modifiers: KeyModifiers::CONTROL,
    }
}

/// Restore every field to its configured starting value.
pub fn reset_binding() -> KeyBinding {
    KeyBinding {
        code: KeyCode::Char('r'),
        modifiers: KeyModifiers::CONTROL,
    }
}
