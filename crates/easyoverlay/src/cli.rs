use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use keyconfig::Keybind;

#[derive(Parser, Debug)]
#[command(
    name = "easyoverlay",
    author,
    version,
    about = "Transparent always-on-top image overlay with a toggle hotkey"
)]
pub struct Cli {
    /// Keybind config file to use instead of the default location (`.json` or `.toml`).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Capture a key press and save it as the toggle keybind.
    SetKeybind(SetKeybindArgs),
    /// Show the overlay until its window is closed or the exit key is pressed.
    #[command(visible_aliases = ["start-overlay", "display-overlay"])]
    Display(DisplayArgs),
    /// Print the keybind the overlay would use.
    ShowKeybind,
    /// Print the resolved config file path.
    Where,
}

#[derive(Args, Debug)]
pub struct SetKeybindArgs {
    /// Save this key without opening the capture window (e.g. `F8`, `kp_6`, `a`).
    #[arg(long, value_name = "NAME", value_parser = parse_keybind)]
    pub key: Option<Keybind>,
}

#[derive(Args, Debug)]
pub struct DisplayArgs {
    /// Image to display.
    #[arg(value_name = "IMAGE", default_value = "assets/test.png")]
    pub image: PathBuf,

    /// Overlay window size.
    #[arg(long, value_name = "WIDTHxHEIGHT", default_value = "800x600", value_parser = parse_dimensions)]
    pub size: (u32, u32),

    /// Center the image on this window pixel instead of the window center.
    #[arg(long, value_name = "X,Y", value_parser = parse_position)]
    pub at: Option<(u32, u32)>,

    /// Resample the image to this size before upload (e.g. `500x500`).
    #[arg(long, value_name = "WIDTHxHEIGHT", value_parser = parse_dimensions)]
    pub resize: Option<(u32, u32)>,

    /// Upload image rows top-down instead of flipping them.
    #[arg(long)]
    pub no_flip: bool,

    /// Let mouse clicks pass through the overlay.
    #[arg(long)]
    pub click_through: bool,

    /// Toggle with this key for this run only; the saved keybind is untouched.
    #[arg(long, value_name = "NAME", value_parser = parse_keybind)]
    pub key: Option<Keybind>,
}

pub fn parse() -> Cli {
    Cli::parse()
}

fn parse_keybind(value: &str) -> Result<Keybind, String> {
    Keybind::parse(value).map_err(|err| err.to_string())
}

fn parse_dimensions(value: &str) -> Result<(u32, u32), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| "expected WIDTHxHEIGHT".to_string())?;
    let width = w
        .trim()
        .parse::<u32>()
        .map_err(|_| "invalid width".to_string())?;
    let height = h
        .trim()
        .parse::<u32>()
        .map_err(|_| "invalid height".to_string())?;
    if width == 0 || height == 0 {
        return Err("dimensions must be greater than zero".into());
    }
    Ok((width, height))
}

fn parse_position(value: &str) -> Result<(u32, u32), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| "expected X,Y".to_string())?;
    let x = x
        .trim()
        .parse::<u32>()
        .map_err(|_| "invalid x coordinate".to_string())?;
    let y = y
        .trim()
        .parse::<u32>()
        .map_err(|_| "invalid y coordinate".to_string())?;
    Ok((x, y))
}
