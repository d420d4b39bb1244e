//! Logical key tokens and their tmux `send-keys` spelling

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Typed as-is. tmux still interprets text that spells a key name
    /// (`"C-a"`, `"Enter"`), so chords may also be passed as text.
    Text(String),
    Enter,
    Tab,
    BTab,
    Escape,
    Space,
    BSpace,
    Up,
    Down,
    Left,
    Right,
    PgUp,
    PgDn,
    Home,
    End,
    Ctrl(char),
    Meta(char),
}

impl Key {
    pub fn text(s: impl Into<String>) -> Self {
        Key::Text(s.into())
    }

    pub fn tmux_token(&self) -> String {
        match self {
            Key::Text(s) => s.clone(),
            Key::Enter => "Enter".to_string(),
            Key::Tab => "Tab".to_string(),
            Key::BTab => "BTab".to_string(),
            Key::Escape => "Escape".to_string(),
            Key::Space => "Space".to_string(),
            Key::BSpace => "BSpace".to_string(),
            Key::Up => "Up".to_string(),
            Key::Down => "Down".to_string(),
            Key::Left => "Left".to_string(),
            Key::Right => "Right".to_string(),
            Key::PgUp => "PageUp".to_string(),
            Key::PgDn => "PageDown".to_string(),
            Key::Home => "Home".to_string(),
            Key::End => "End".to_string(),
            Key::Ctrl(c) => format!("C-{}", c.to_ascii_lowercase()),
            Key::Meta(c) => format!("M-{}", c),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tmux_token())
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Text(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Text(s)
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        Key::Text(c.to_string())
    }
}

impl From<&Key> for Key {
    fn from(k: &Key) -> Self {
        k.clone()
    }
}
