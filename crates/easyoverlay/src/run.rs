use std::path::Path;

use anyhow::{Context, Result};
use keyconfig::{Keybind, KeybindConfig};
use renderer::{capture_key, run_overlay, HotkeyHandler, OverlayConfig, Placement, TextureOptions};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{DisplayArgs, SetKeybindArgs};

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

pub fn run_set_keybind(config_path: &Path, args: SetKeybindArgs) -> Result<()> {
    let mut config = KeybindConfig::load_or_default(config_path);
    println!("Current keybind: {}", config.keybind);

    let keybind = match args.key {
        Some(key) => key,
        None => {
            println!("Press a key in the capture window to set it as the toggle key.");
            let Some(name) = capture_key().context("failed to capture a key")? else {
                println!("No key captured; keybind unchanged.");
                return Ok(());
            };
            Keybind::parse(&name)
                .with_context(|| format!("captured key '{name}' cannot be used as a keybind"))?
        }
    };

    config.keybind = keybind;
    config.persist(config_path).with_context(|| {
        format!("failed to write keybind config {}", config_path.display())
    })?;
    info!(path = %config_path.display(), keybind = %config.keybind, "keybind saved");
    println!("Keybind set to: {}", config.keybind);
    Ok(())
}

pub fn run_display(config_path: &Path, args: DisplayArgs) -> Result<()> {
    let hotkeys = display_hotkeys(config_path, args.key);

    let placement = match args.at {
        Some((center_x, center_y)) => Placement::Pixels { center_x, center_y },
        None => Placement::Centered,
    };
    let config = OverlayConfig {
        image_path: args.image,
        surface_size: args.size,
        placement,
        texture: TextureOptions {
            resize: args.resize,
            flip_vertical: !args.no_flip,
        },
        click_through: args.click_through,
        ..OverlayConfig::default()
    };

    println!(
        "Press {} to toggle the overlay, {} to close it.",
        hotkeys.keybind(),
        hotkeys.exit_key()
    );
    run_overlay(config, hotkeys).context("overlay failed")
}

/// Hotkeys for one overlay run. An override key replaces the saved toggle
/// key for this run only; the config file is never written.
fn display_hotkeys(config_path: &Path, override_key: Option<Keybind>) -> HotkeyHandler {
    let mut keys = KeybindConfig::load_or_default(config_path);
    if let Some(key) = override_key {
        info!(key = %key, saved = %keys.keybind, "using one-off keybind override");
        keys.keybind = key;
    }
    HotkeyHandler::from_config(&keys)
}

pub fn run_show_keybind(config_path: &Path) -> Result<()> {
    let config = KeybindConfig::load_or_default(config_path);
    println!("Keybind: {}", config.keybind);
    println!("Exit key: {}", config.exit_key());
    Ok(())
}

pub fn run_where(config_path: &Path) -> Result<()> {
    println!("{}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn display_override_leaves_saved_keybind_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        KeybindConfig::new(Keybind::parse("f8").unwrap())
            .persist(&path)
            .unwrap();
        let before = fs::read_to_string(&path).unwrap();

        let hotkeys = display_hotkeys(&path, Some(Keybind::parse("kp_5").unwrap()));
        assert_eq!(hotkeys.keybind().as_str(), "Numpad5");
        assert_eq!(hotkeys.exit_key().as_str(), "Escape");

        assert_eq!(fs::read_to_string(&path).unwrap(), before);
        assert_eq!(KeybindConfig::load(&path).unwrap().keybind.as_str(), "F8");
    }

    #[test]
    fn display_without_override_uses_saved_keybind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        KeybindConfig::new(Keybind::parse("f8").unwrap())
            .persist(&path)
            .unwrap();

        assert_eq!(display_hotkeys(&path, None).keybind().as_str(), "F8");
    }

    #[test]
    fn display_override_does_not_create_missing_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let hotkeys = display_hotkeys(&path, Some(Keybind::parse("a").unwrap()));
        assert_eq!(hotkeys.keybind().as_str(), "KeyA");
        assert!(!path.exists());
    }
}
