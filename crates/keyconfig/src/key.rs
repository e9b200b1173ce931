use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::ConfigError;

/// Key used to toggle the overlay when no configuration exists.
pub const DEFAULT_KEYBIND: &str = "Numpad6";

/// Key used to close the overlay when the configuration does not name one.
pub const DEFAULT_EXIT_KEY: &str = "Escape";

/// A single physical key, stored under the name the windowing layer reports
/// for it (`Numpad6`, `KeyA`, `Digit1`, `F8`, `Escape`, ...).
///
/// Parsing is case-insensitive and accepts the short aliases people tend to
/// type (`esc`, `kp_6`, `a`, `1`, `space`). Comparison against incoming key
/// names is case-insensitive as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Keybind(String);

impl Keybind {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::InvalidKey(
                "key name must not be empty".to_string(),
            ));
        }

        if let Some(canonical) = canonical_alias(trimmed) {
            return Ok(Self(canonical));
        }

        if !trimmed.chars().all(|ch| ch.is_ascii_alphanumeric()) {
            return Err(ConfigError::InvalidKey(format!(
                "unrecognised key name '{trimmed}'"
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Maps a GLFW key code (as written by older config files) to a key name.
    pub fn from_glfw_code(code: i64) -> Option<Self> {
        let name = match code {
            32 => "Space".to_string(),
            39 => "Quote".to_string(),
            44 => "Comma".to_string(),
            45 => "Minus".to_string(),
            46 => "Period".to_string(),
            47 => "Slash".to_string(),
            48..=57 => format!("Digit{}", code - 48),
            59 => "Semicolon".to_string(),
            61 => "Equal".to_string(),
            65..=90 => format!("Key{}", (code as u8) as char),
            91 => "BracketLeft".to_string(),
            92 => "Backslash".to_string(),
            93 => "BracketRight".to_string(),
            96 => "Backquote".to_string(),
            256 => "Escape".to_string(),
            257 => "Enter".to_string(),
            258 => "Tab".to_string(),
            259 => "Backspace".to_string(),
            260 => "Insert".to_string(),
            261 => "Delete".to_string(),
            262 => "ArrowRight".to_string(),
            263 => "ArrowLeft".to_string(),
            264 => "ArrowDown".to_string(),
            265 => "ArrowUp".to_string(),
            266 => "PageUp".to_string(),
            267 => "PageDown".to_string(),
            268 => "Home".to_string(),
            269 => "End".to_string(),
            290..=314 => format!("F{}", code - 289),
            320..=329 => format!("Numpad{}", code - 320),
            330 => "NumpadDecimal".to_string(),
            331 => "NumpadDivide".to_string(),
            332 => "NumpadMultiply".to_string(),
            333 => "NumpadSubtract".to_string(),
            334 => "NumpadAdd".to_string(),
            335 => "NumpadEnter".to_string(),
            _ => return None,
        };
        Some(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when `name` refers to this key.
    pub fn matches(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name)
    }

    pub fn exit_default() -> Self {
        Self(DEFAULT_EXIT_KEY.to_string())
    }
}

impl Default for Keybind {
    fn default() -> Self {
        Self(DEFAULT_KEYBIND.to_string())
    }
}

impl fmt::Display for Keybind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Keybind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Keybind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Keybind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Helper {
            Str(String),
            Num(i64),
        }

        match Helper::deserialize(deserializer)? {
            Helper::Str(raw) => Keybind::parse(&raw).map_err(de::Error::custom),
            Helper::Num(code) => Keybind::from_glfw_code(code)
                .ok_or_else(|| de::Error::custom(format!("unknown key code {code}"))),
        }
    }
}

fn canonical_alias(raw: &str) -> Option<String> {
    let mut chars = raw.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        if ch.is_ascii_alphabetic() {
            return Some(format!("Key{}", ch.to_ascii_uppercase()));
        }
        if ch.is_ascii_digit() {
            return Some(format!("Digit{ch}"));
        }
        let punctuation = match ch {
            '`' => "Backquote",
            '-' => "Minus",
            '=' => "Equal",
            '[' => "BracketLeft",
            ']' => "BracketRight",
            '\\' => "Backslash",
            ';' => "Semicolon",
            '\'' => "Quote",
            ',' => "Comma",
            '.' => "Period",
            '/' => "Slash",
            _ => return None,
        };
        return Some(punctuation.to_string());
    }

    let normalized = raw.to_ascii_lowercase().replace(['_', '-', ' '], "");

    if let Some(digit) = normalized
        .strip_prefix("numpad")
        .or_else(|| normalized.strip_prefix("kp"))
        .or_else(|| normalized.strip_prefix("num"))
    {
        let suffix = match digit {
            d if d.len() == 1 && d.chars().all(|ch| ch.is_ascii_digit()) => d.to_string(),
            "add" | "plus" => "Add".to_string(),
            "subtract" | "minus" => "Subtract".to_string(),
            "multiply" => "Multiply".to_string(),
            "divide" => "Divide".to_string(),
            "decimal" => "Decimal".to_string(),
            "enter" => "Enter".to_string(),
            "lock" => return Some("NumLock".to_string()),
            _ => return None,
        };
        return Some(format!("Numpad{suffix}"));
    }

    if let Some(number) = normalized.strip_prefix('f') {
        if let Ok(index) = number.parse::<u8>() {
            if (1..=35).contains(&index) {
                return Some(format!("F{index}"));
            }
        }
    }

    let named = match normalized.as_str() {
        "esc" | "escape" => "Escape",
        "space" | "spacebar" => "Space",
        "enter" | "return" => "Enter",
        "tab" => "Tab",
        "backspace" => "Backspace",
        "delete" | "del" => "Delete",
        "insert" | "ins" => "Insert",
        "home" => "Home",
        "end" => "End",
        "pageup" | "pgup" => "PageUp",
        "pagedown" | "pgdn" => "PageDown",
        "up" | "arrowup" => "ArrowUp",
        "down" | "arrowdown" => "ArrowDown",
        "left" | "arrowleft" => "ArrowLeft",
        "right" | "arrowright" => "ArrowRight",
        "shift" | "lshift" | "shiftleft" => "ShiftLeft",
        "rshift" | "shiftright" => "ShiftRight",
        "ctrl" | "control" | "lctrl" | "controlleft" => "ControlLeft",
        "rctrl" | "controlright" => "ControlRight",
        "alt" | "lalt" | "altleft" => "AltLeft",
        "ralt" | "altgr" | "altright" => "AltRight",
        "capslock" | "caps" => "CapsLock",
        "scrolllock" => "ScrollLock",
        "printscreen" | "prtsc" | "print" => "PrintScreen",
        "pause" => "Pause",
        _ => return None,
    };
    Some(named.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalises_common_aliases() {
        assert_eq!(Keybind::parse("esc").unwrap().as_str(), "Escape");
        assert_eq!(Keybind::parse("kp_6").unwrap().as_str(), "Numpad6");
        assert_eq!(Keybind::parse("KP6").unwrap().as_str(), "Numpad6");
        assert_eq!(Keybind::parse("a").unwrap().as_str(), "KeyA");
        assert_eq!(Keybind::parse("7").unwrap().as_str(), "Digit7");
        assert_eq!(Keybind::parse("f8").unwrap().as_str(), "F8");
        assert_eq!(Keybind::parse("page_down").unwrap().as_str(), "PageDown");
        assert_eq!(Keybind::parse(";").unwrap().as_str(), "Semicolon");
    }

    #[test]
    fn passes_through_canonical_names() {
        let key = Keybind::parse("ShiftRight").unwrap();
        assert_eq!(key.as_str(), "ShiftRight");
        assert!(key.matches("shiftright"));
        assert!(!key.matches("ShiftLeft"));
    }

    #[test]
    fn rejects_names_with_symbols() {
        assert!(matches!(
            Keybind::parse("ctrl+a"),
            Err(ConfigError::InvalidKey(_))
        ));
        assert!(matches!(Keybind::parse("  "), Err(ConfigError::InvalidKey(_))));
    }

    #[test]
    fn maps_glfw_codes() {
        assert_eq!(Keybind::from_glfw_code(326).unwrap().as_str(), "Numpad6");
        assert_eq!(Keybind::from_glfw_code(65).unwrap().as_str(), "KeyA");
        assert_eq!(Keybind::from_glfw_code(256).unwrap().as_str(), "Escape");
        assert_eq!(Keybind::from_glfw_code(297).unwrap().as_str(), "F8");
        assert!(Keybind::from_glfw_code(-1).is_none());
    }

    #[test]
    fn default_is_numpad_six() {
        assert_eq!(Keybind::default().as_str(), DEFAULT_KEYBIND);
        assert_eq!(Keybind::exit_default().as_str(), DEFAULT_EXIT_KEY);
    }
}
