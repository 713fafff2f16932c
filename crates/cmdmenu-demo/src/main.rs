//! Demo menu: a small account/developer console built with `cmdmenu`.
//!
//! ```text
//! cmdmenu-demo [--config menu.yaml] [--show-path] [--border rounded] [-v]
//! ```
//!
//! Set `RUST_LOG` to override the log filter, e.g. `RUST_LOG=cmdmenu=debug`.

mod menu;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use cmdmenu::{BorderStyle, MenuConfig, MenuContext, Streams};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cmdmenu-demo", version, about = "Interactive numbered menu demo")]
struct Cli {
    /// YAML file with menu labels, messages and loop policy
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Show the menu path above each menu
    #[arg(long)]
    show_path: bool,

    /// Table border: none, ascii, light, heavy, double or rounded
    #[arg(long, value_name = "STYLE")]
    border: Option<BorderStyle>,

    /// Log more (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Loads the config file, if any, and applies flag overrides.
    fn menu_config(&self) -> anyhow::Result<MenuConfig> {
        let mut config = match &self.config {
            Some(path) => MenuConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => MenuConfig::default(),
        };
        if self.show_path {
            config.show_path = true;
        }
        if let Some(border) = self.border {
            config.border = border;
        }
        Ok(config)
    }

    fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| cli.log_level().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.menu_config()?;
    let router = menu::build(config, Streams::stdio())?;
    router.run(&mut MenuContext::new());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "border: double\nexit_label: Quit").unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::parse_from(["cmdmenu-demo", "--config", path, "--border", "rounded"]);
        let config = cli.menu_config().unwrap();

        assert_eq!(config.border, BorderStyle::Rounded);
        assert_eq!(config.exit_label, "Quit");
        assert!(!config.show_path);
    }

    #[test]
    fn test_show_path_flag() {
        let cli = Cli::parse_from(["cmdmenu-demo", "--show-path"]);
        assert!(cli.menu_config().unwrap().show_path);
    }

    #[test]
    fn test_bad_border_is_rejected() {
        assert!(Cli::try_parse_from(["cmdmenu-demo", "--border", "wavy"]).is_err());
    }

    #[test]
    fn test_missing_config_names_file() {
        let cli = Cli::parse_from(["cmdmenu-demo", "--config", "/no/such/menu.yaml"]);
        let err = cli.menu_config().unwrap_err();
        assert!(format!("{err:#}").contains("/no/such/menu.yaml"));
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(Cli::parse_from(["cmdmenu-demo"]).log_level(), "warn");
        assert_eq!(Cli::parse_from(["cmdmenu-demo", "-v"]).log_level(), "info");
        assert_eq!(Cli::parse_from(["cmdmenu-demo", "-vvv"]).log_level(), "debug");
    }
}
