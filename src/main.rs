//! datagrid - browse a JSON or CSV dataset in a sortable, expandable table
//!
//! Wires the terminal, the App component and the event loop together.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use crossterm::event::Event;
use datagrid::action::Action;
use datagrid::app::App;
use datagrid::component::Component;
use datagrid::config::Config;
use datagrid::logging;
use datagrid::model::Sample;
use datagrid::tui::Tui;
use log::{info, warn};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SampleArg {
    /// Flat user list
    Users,
    /// HTTP events with expandable details
    Events,
}

impl From<SampleArg> for Sample {
    fn from(arg: SampleArg) -> Self {
        match arg {
            SampleArg::Users => Sample::Users,
            SampleArg::Events => Sample::Events,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "datagrid")]
#[command(about = "Sortable, expandable table view for JSON and CSV datasets")]
struct Args {
    /// Config file (JSON or YAML). Defaults to ~/.datagrid/config.json
    config: Option<PathBuf>,

    /// Show a built-in sample dataset instead of a config
    #[arg(long, value_enum, conflicts_with = "config")]
    sample: Option<SampleArg>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    match logging::init() {
        Ok(path) => info!("logging to {}", path.display()),
        Err(e) => eprintln!("Warning: file logging disabled: {:#}", e),
    }

    let mut app = build_app(&args)?;

    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(250));
    tui.enter()?;

    let result = run_app(&mut tui, &mut app);

    tui.exit()?;

    if let Err(err) = result {
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

fn build_app(args: &Args) -> Result<App> {
    if let Some(sample) = args.sample {
        return Ok(App::from_sample(sample.into()));
    }

    if let Some(path) = &args.config {
        let config = Config::load_from(path)?;
        info!("using config {}", path.display());
        return Ok(App::from_config(config, Some(path.as_path())));
    }

    match Config::load()? {
        Some(config) => {
            let path = Config::default_path();
            Ok(App::from_config(config, path.as_deref()))
        }
        None => {
            warn!("no config found, showing the users sample");
            Ok(App::from_sample(Sample::Users))
        }
    }
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            let area = frame.area();
            if let Err(e) = app.draw(frame, area) {
                log::error!("draw error: {:#}", e);
            }
        })?;

        let action = match tui.next_event()? {
            Some(Event::Key(key)) => app.handle_key_event(key)?,
            Some(Event::Mouse(mouse)) => app.handle_mouse_event(mouse)?,
            Some(Event::Resize(w, h)) => Some(Action::Resize(w, h)),
            Some(_) => None,
            None => Some(Action::Tick),
        };

        // An action may produce a follow-up action
        let mut current = action;
        while let Some(action) = current {
            current = app.update(action)?;
        }
    }

    Ok(())
}
