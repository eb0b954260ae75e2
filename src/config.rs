//! User configuration — keybindings and scroll feel.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/timeline-tui/config.toml` (default
//! `~/.config/timeline-tui/config.toml`).  Unknown keys are ignored;
//! any load problem falls back to defaults.

use std::collections::HashMap;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    JumpTop,
    JumpBottom,
    ToggleStrip,
    Help,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the help popup).
    pub const ALL: &[Action] = &[
        Action::ScrollUp,
        Action::ScrollDown,
        Action::PageUp,
        Action::PageDown,
        Action::JumpTop,
        Action::JumpBottom,
        Action::ToggleStrip,
        Action::Help,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::ScrollUp => "Scroll Up",
            Action::ScrollDown => "Scroll Down",
            Action::PageUp => "Page Up",
            Action::PageDown => "Page Down",
            Action::JumpTop => "Jump to Start",
            Action::JumpBottom => "Jump to End",
            Action::ToggleStrip => "Toggle Binary Strip",
            Action::Help => "Help",
            Action::Quit => "Quit",
        }
    }

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::JumpTop => "jump_top",
            Action::JumpBottom => "jump_bottom",
            Action::ToggleStrip => "toggle_strip",
            Action::Help => "help",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

/// Modifiers that take part in matching; platform extras (SUPER etc.)
/// are ignored.
const MOD_MASK: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT);

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn matches(&self, event: KeyEvent) -> bool {
        self.code == event.code && (self.modifiers & MOD_MASK) == (event.modifiers & MOD_MASK)
    }

    /// Display string, used both in the UI and in the config file
    /// (`"Ctrl+d"`, `"Alt+Up"`, `"g"`).
    pub fn display(&self) -> String {
        let mut s = String::new();
        for (m, name) in [
            (KeyModifiers::CONTROL, "Ctrl+"),
            (KeyModifiers::ALT, "Alt+"),
            (KeyModifiers::SHIFT, "Shift+"),
        ] {
            if self.modifiers.contains(m) {
                s.push_str(name);
            }
        }
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Left => "Left".into(),
            KeyCode::Right => "Right".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PageUp".into(),
            KeyCode::PageDown => "PageDown".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        });
        s
    }

    /// Parse a key string like `"Ctrl+d"`, `"Alt+Up"`, `"g"`, `"Home"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => {
                let n: u8 = s[1..].parse().ok()?;
                KeyCode::F(n)
            }
            s if s.chars().count() == 1 => KeyCode::Char(s.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration — keybindings and scroll settings.
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Rows added to the scroll target per wheel notch / arrow press.
    pub wheel_step: u16,
    /// Smooth-scroll damping per frame (fraction of remaining distance).
    pub scroll_speed: f64,
    /// Whether the binary strip starts visible.
    pub strip: bool,
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use KeyCode::Char;
        let n = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;
        let mut m = HashMap::new();

        m.insert(Action::ScrollUp, vec![
            KeyBind::new(KeyCode::Up, n),
            KeyBind::new(Char('k'), n),
        ]);
        m.insert(Action::ScrollDown, vec![
            KeyBind::new(KeyCode::Down, n),
            KeyBind::new(Char('j'), n),
        ]);
        m.insert(Action::PageUp, vec![
            KeyBind::new(KeyCode::PageUp, n),
            KeyBind::new(Char('u'), ctrl),
        ]);
        m.insert(Action::PageDown, vec![
            KeyBind::new(KeyCode::PageDown, n),
            KeyBind::new(Char(' '), n),
            KeyBind::new(Char('d'), ctrl),
        ]);
        m.insert(Action::JumpTop, vec![
            KeyBind::new(KeyCode::Home, n),
            KeyBind::new(Char('g'), n),
        ]);
        m.insert(Action::JumpBottom, vec![
            KeyBind::new(KeyCode::End, n),
            KeyBind::new(Char('G'), KeyModifiers::SHIFT),
        ]);
        m.insert(Action::ToggleStrip, vec![KeyBind::new(Char('b'), n)]);
        m.insert(Action::Help, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Action::Quit, vec![
            KeyBind::new(Char('q'), n),
            KeyBind::new(KeyCode::Esc, n),
        ]);

        m
    }

    /// Find the action matching a key event.  When several bindings match,
    /// the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<(Action, u32)> = None;
        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.map_or(true, |(_, prev)| mc > prev) {
                        best = Some((action, mc));
                    }
                }
            }
        }
        best.map(|(a, _)| a)
    }

    /// Binding list for a given action, formatted for the help popup.
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(|b| b.display()).collect::<Vec<_>>().join(" / ")
            }
            _ => "unbound".into(),
        }
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Status-bar hint string built from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: scroll | {}: strip | {}: help | {}: quit",
            self.short_binding(Action::ScrollUp),
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::ToggleStrip),
            self.short_binding(Action::Help),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        if path.exists() {
            if let Ok(contents) = std::fs::read_to_string(&path) {
                return Self::parse(&contents);
            }
        }
        Self::defaults()
    }

    /// Built-in defaults, no disk access.
    pub fn defaults() -> Self {
        Self {
            bindings: Self::default_bindings(),
            wheel_step: 3,
            scroll_speed: 0.35,
            strip: true,
        }
    }

    fn parse(s: &str) -> Self {
        let mut config = Self::defaults();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let (key, value) = (key.trim(), value.trim());

            match key {
                "wheel_step" => {
                    if let Ok(v) = value.parse::<u16>() {
                        config.wheel_step = v.clamp(1, 10);
                    }
                    continue;
                }
                "scroll_speed" => {
                    if let Ok(v) = value.parse::<f64>() {
                        config.scroll_speed = v.clamp(0.05, 0.95);
                    }
                    continue;
                }
                "strip" => {
                    config.strip = value == "true";
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                continue;
            };
            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    /// Write a template config on first run so the keys are discoverable.
    /// Never overwrites an existing file.
    pub fn ensure_saved(&self) {
        if config_path().exists() {
            return;
        }
        if let Err(e) = self.save() {
            tracing::debug!("config template write: {e}");
        }
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(())
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# timeline-tui configuration".to_string(),
            String::new(),
            "# Scroll settings".to_string(),
            format!("wheel_step = {}", self.wheel_step),
            format!("scroll_speed = {}", self.scroll_speed),
            format!("strip = {}", self.strip),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.display()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/timeline-tui/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("timeline-tui").join("config.toml")
}

// ───────────────────────────────────────── tests ─────────────
