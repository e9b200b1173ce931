use winit::keyboard::PhysicalKey;

/// Returns the name a physical key is stored under in the keybind config.
///
/// The name is the `KeyCode` variant (`Numpad6`, `KeyA`, `F8`), which is
/// layout-independent. Keys the platform cannot identify have no name.
pub(crate) fn key_name(key: PhysicalKey) -> Option<String> {
    match key {
        PhysicalKey::Code(code) => Some(format!("{code:?}")),
        PhysicalKey::Unidentified(native) => {
            tracing::debug!(?native, "ignoring unidentified key");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyconfig::Keybind;
    use winit::keyboard::{KeyCode, NativeKeyCode};

    #[test]
    fn names_match_parsed_keybinds() {
        let cases = [
            (KeyCode::Numpad6, "kp_6"),
            (KeyCode::KeyA, "a"),
            (KeyCode::Digit1, "1"),
            (KeyCode::F8, "f8"),
            (KeyCode::Escape, "esc"),
            (KeyCode::Space, "space"),
            (KeyCode::ArrowUp, "up"),
        ];
        for (code, alias) in cases {
            let name = key_name(PhysicalKey::Code(code)).unwrap();
            assert!(
                Keybind::parse(alias).unwrap().matches(&name),
                "{alias} should match {name}"
            );
        }
    }

    #[test]
    fn unidentified_keys_have_no_name() {
        assert!(key_name(PhysicalKey::Unidentified(NativeKeyCode::Unidentified)).is_none());
    }
}
