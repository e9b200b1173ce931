mod cli;
mod paths;
mod run;

use anyhow::Result;
use cli::Command;

fn main() -> Result<()> {
    let cli = cli::parse();
    run::initialise_tracing();

    let config_path = paths::resolve_config_file(cli.config)?;
    tracing::debug!(path = %config_path.display(), "resolved keybind config");

    match cli.command {
        Command::SetKeybind(args) => run::run_set_keybind(&config_path, args),
        Command::Display(args) => run::run_display(&config_path, args),
        Command::ShowKeybind => run::run_show_keybind(&config_path),
        Command::Where => run::run_where(&config_path),
    }
}
