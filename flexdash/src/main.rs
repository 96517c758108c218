#![warn(clippy::all)]
#![allow(clippy::missing_errors_doc, clippy::doc_markdown)]

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use clap::ValueEnum;
use color_eyre::Result;
use flexdash::Dashboard;
use flexdash::DATA_DIR;
use flexdash::SETTINGS_PATH;
use flexdash::SearchEngine;
use flexdash::Settings;
use flexdash::ShortcutSize;
use flexdash_layouts::GridSize;
use flexdash_layouts::LayoutMode;
use flexdash_layouts::PositionMap;
use flexdash_layouts::Viewport;
use serde::Serialize;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;

fn setup() -> Result<WorkerGuard> {
    // SAFETY: runs first thing in main, before any other thread exists
    unsafe {
        if std::env::var("RUST_LIB_BACKTRACE").is_err() {
            std::env::set_var("RUST_LIB_BACKTRACE", "1");
        }
    }

    color_eyre::install()?;

    // SAFETY: as above
    unsafe {
        if std::env::var("RUST_LOG").is_err() {
            std::env::set_var("RUST_LOG", "info");
        }
    }

    std::fs::create_dir_all(&*DATA_DIR)?;
    let appender = tracing_appender::rolling::never(&*DATA_DIR, "flexdash.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt::Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .finish()
            .with(
                tracing_subscriber::fmt::Layer::default()
                    .with_writer(non_blocking)
                    .with_ansi(false),
            ),
    )?;

    // Record panics as `ERROR` events so they end up in the log file too
    std::panic::set_hook(Box::new(|panic| {
        if let Some(location) = panic.location() {
            tracing::error!(
                message = %panic,
                panic.file = location.file(),
                panic.line = location.line(),
                panic.column = location.column(),
            );
        } else {
            tracing::error!(message = %panic);
        }
    }));

    Ok(guard)
}

#[derive(Parser)]
#[clap(author, about, version)]
struct Opts {
    /// Settings file to use (json or yaml; default: the flexdash data directory)
    #[clap(long, global = true)]
    settings: Option<PathBuf>,
    /// Viewport width in pixels
    #[clap(long, global = true, default_value_t = 1920)]
    width: i32,
    /// Viewport height in pixels
    #[clap(long, global = true, default_value_t = 1080)]
    height: i32,
    #[clap(subcommand)]
    subcmd: SubCommand,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Switch {
    On,
    Off,
}

#[derive(Parser)]
struct Mode {
    #[clap(value_enum)]
    layout_mode: LayoutMode,
}

#[derive(Parser)]
struct GridSizeArg {
    /// Grid pitch in pixels (at least 1)
    pixels: i32,
}

#[derive(Parser)]
struct Drag {
    /// Widget id
    id: String,
    /// Drop x coordinate
    #[clap(allow_negative_numbers = true)]
    x: i32,
    /// Drop y coordinate
    #[clap(allow_negative_numbers = true)]
    y: i32,
}

#[derive(Parser)]
struct Resize {
    /// Widget id
    id: String,
    /// New width in pixels
    width: i32,
    /// New height in pixels
    height: i32,
}

#[derive(Parser)]
struct AddShortcut {
    /// Target url
    url: String,
    /// Display name
    #[clap(long)]
    name: Option<String>,
    /// Icon (an emoji or short text)
    #[clap(long)]
    icon: Option<String>,
    #[clap(long, value_enum, default_value_t = ShortcutSize::Medium)]
    size: ShortcutSize,
}

#[derive(Parser)]
struct RemoveShortcut {
    /// Shortcut id
    id: String,
}

#[derive(Parser)]
struct Weather {
    #[clap(value_enum)]
    state: Switch,
    /// Location to show the weather for
    #[clap(long)]
    location: Option<String>,
}

#[derive(Parser)]
struct Message {
    /// Message text (an empty string hides the widget)
    text: String,
}

#[derive(Parser)]
struct SearchUrl {
    /// Search terms
    query: String,
    /// Use this engine instead of the configured one
    #[clap(long, value_enum)]
    engine: Option<SearchEngine>,
}

#[derive(Parser)]
enum SubCommand {
    /// Show the current layout as JSON
    Show,
    /// Re-run the active layout over every widget
    Layout,
    /// Switch between freeform and grid mode
    ToggleMode,
    /// Set the layout mode
    #[clap(arg_required_else_help = true)]
    Mode(Mode),
    /// Set the grid size
    #[clap(arg_required_else_help = true)]
    GridSize(GridSizeArg),
    /// Drop a widget at a position
    #[clap(arg_required_else_help = true)]
    Drag(Drag),
    /// Resize a widget
    #[clap(arg_required_else_help = true)]
    Resize(Resize),
    /// Add a shortcut
    #[clap(arg_required_else_help = true)]
    AddShortcut(AddShortcut),
    /// Remove a shortcut
    #[clap(arg_required_else_help = true)]
    RemoveShortcut(RemoveShortcut),
    /// Enable or disable the weather widget
    #[clap(arg_required_else_help = true)]
    Weather(Weather),
    /// Set the personal message
    #[clap(arg_required_else_help = true)]
    Message(Message),
    /// Print the search url for a query
    #[clap(arg_required_else_help = true)]
    SearchUrl(SearchUrl),
    /// Print the JSON schema of the settings file
    #[cfg(feature = "schemars")]
    SettingsSchema,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot {
    layout_mode: LayoutMode,
    grid_size: GridSize,
    viewport: Viewport,
    positions: PositionMap,
}

impl From<&Dashboard> for Snapshot {
    fn from(dashboard: &Dashboard) -> Self {
        Self {
            layout_mode: dashboard.layout_mode(),
            grid_size: dashboard.settings().grid_size,
            viewport: dashboard.viewport(),
            positions: dashboard.positions(),
        }
    }
}

fn print_snapshot(dashboard: &Dashboard) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&Snapshot::from(dashboard))?
    );

    Ok(())
}

fn main() -> Result<()> {
    let opts: Opts = Opts::parse();
    let _guard = setup()?;

    let path = opts.settings.unwrap_or_else(|| SETTINGS_PATH.clone());
    let viewport = Viewport::new(opts.width, opts.height);
    let settings = Settings::load_or_default(&path, viewport)?;
    let mut dashboard = Dashboard::new(settings, viewport);
    let now = Instant::now();

    match opts.subcmd {
        SubCommand::Show => {
            print_snapshot(&dashboard)?;
        }
        SubCommand::Layout => {
            dashboard.relayout(now);
            print_snapshot(&dashboard)?;
        }
        SubCommand::ToggleMode => {
            dashboard.toggle_layout_mode(now);
            print_snapshot(&dashboard)?;
        }
        SubCommand::Mode(arg) => {
            dashboard.set_layout_mode(arg.layout_mode, now);
            print_snapshot(&dashboard)?;
        }
        SubCommand::GridSize(arg) => {
            dashboard.set_grid_size(GridSize::new(arg.pixels)?, now);
            print_snapshot(&dashboard)?;
        }
        SubCommand::Drag(arg) => {
            dashboard.drag_stop(&arg.id, arg.x, arg.y, now)?;
            print_snapshot(&dashboard)?;
        }
        SubCommand::Resize(arg) => {
            dashboard.resize_stop(&arg.id, arg.width, arg.height, now)?;
            print_snapshot(&dashboard)?;
        }
        SubCommand::AddShortcut(arg) => {
            let id = dashboard.add_shortcut(&arg.url, arg.name, arg.icon, arg.size, now)?;
            println!("{id}");
        }
        SubCommand::RemoveShortcut(arg) => {
            dashboard.remove_shortcut(&arg.id, now)?;
        }
        SubCommand::Weather(arg) => {
            dashboard.set_weather_enabled(matches!(arg.state, Switch::On), arg.location, now);
            print_snapshot(&dashboard)?;
        }
        SubCommand::Message(arg) => {
            dashboard.set_personal_message(&arg.text, now);
            print_snapshot(&dashboard)?;
        }
        SubCommand::SearchUrl(arg) => {
            let engine = arg.engine.unwrap_or(dashboard.settings().search_engine);
            match engine.query_url(&arg.query) {
                Some(url) => println!("{url}"),
                None => tracing::warn!("ignoring blank search query"),
            }
        }
        #[cfg(feature = "schemars")]
        SubCommand::SettingsSchema => {
            let schema = schemars::schema_for!(Settings);
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }

    if dashboard.has_pending_save() {
        dashboard.settings().write(&path)?;
    }

    Ok(())
}
