//! One simulated page load per invocation.

use std::path::{Path, PathBuf};

use theme_toggle::{
    detect_color_mode, FileStore, MemoryPage, ThemeController, ThemeMode, ToggleConfig,
    VirtualScheduler,
};
use tracing::debug;

use crate::cli::{Cli, Command, OutputMode, SchemeArg};
use crate::error::CliError;
use crate::report::{Event, Report};

pub type FileController = ThemeController<FileStore, MemoryPage, VirtualScheduler>;

/// `<config dir>/theme-toggle/storage.json`, if the platform has a config dir.
pub fn default_store_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("theme-toggle").join("storage.json"))
}

/// Applies the stored theme to a fresh page and mounts the toggle.
pub fn load_page(store_path: &Path, config: ToggleConfig) -> FileController {
    let mut controller = ThemeController::initialize(
        FileStore::new(store_path),
        MemoryPage::new(),
        VirtualScheduler::new(),
        config,
    );
    controller.mount_toggle();
    controller
}

pub fn execute(controller: &mut FileController, command: &Command) -> Result<Event, CliError> {
    let event = match command {
        Command::Show | Command::Html => Event::Loaded,
        Command::Toggle => {
            let to = controller.toggle()?;
            let steps = controller.settle();
            Event::Toggled { to, steps }
        }
        Command::System { scheme } => {
            let scheme = match scheme {
                SchemeArg::Light => ThemeMode::Light,
                SchemeArg::Dark => ThemeMode::Dark,
                SchemeArg::Detect => detect_color_mode().ok_or(CliError::NoSystemScheme)?,
            };
            let applied = controller.on_system_change(scheme);
            Event::System { scheme, applied }
        }
        Command::Clear => {
            controller.clear_preference()?;
            Event::Cleared
        }
    };
    Ok(event)
}

/// Runs the parsed command line and returns what should be printed.
pub fn run(cli: &Cli) -> Result<String, CliError> {
    let config = match &cli.config {
        Some(path) => ToggleConfig::load(path)?,
        None => ToggleConfig::default(),
    };
    let store_path = cli
        .store
        .clone()
        .or_else(default_store_path)
        .ok_or(CliError::NoStoreLocation)?;
    debug!(store = %store_path.display(), "loading page");

    let mut controller = load_page(&store_path, config);
    let event = execute(&mut controller, &cli.command)?;

    if let Command::Html = cli.command {
        if cli.output != OutputMode::Json {
            return Ok(controller.page().to_html());
        }
    }
    let report = Report::capture(&controller, store_path.display().to_string(), event);
    Ok(report.render(cli.output)?)
}
