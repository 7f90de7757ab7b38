//! exthost demo host
//!
//! Loads the bundled plugins, drives their `Activatable` extensions
//! through one full lifecycle against a demo window and prints what the
//! window looked like at each step.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use exthost_core::AppResult;
use exthost_core::config::AppConfig;
use exthost_plugin::capability::Capability;
use exthost_plugin::host::{HostObject, HostWindow, WidgetKind};
use exthost_plugin::params::ConstructParams;
use exthost_plugin::{ActivationReport, ActivationSet, PluginEngine, PluginExport};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "exthost-demo", version, about = "Drive exthost plugins against a demo window")]
struct Cli {
    /// Configuration environment overlay (`config/{env}`).
    #[arg(long, default_value = "development")]
    env: String,

    /// Load only these plugins (repeatable); overrides `engine.plugins`.
    #[arg(long = "plugin", value_name = "ID")]
    plugins: Vec<String>,

    /// List registered plugins and exit.
    #[arg(long)]
    list: bool,
}

fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config, cli.list) {
        tracing::error!(error = %e, "Demo failed");
        std::process::exit(1);
    }
}

/// Load configuration and apply command-line overrides.
fn load_configuration(cli: &Cli) -> AppResult<AppConfig> {
    let mut config = AppConfig::load(&cli.env)?;
    if !cli.plugins.is_empty() {
        config.engine.load_all = false;
        config.engine.plugins = cli.plugins.clone();
    }
    Ok(config)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

fn bundled_exports() -> Vec<PluginExport> {
    let mut exports = plugin_demo::exports();
    exports.extend(plugin_introspection::exports());
    exports
}

fn run(config: AppConfig, list_only: bool) -> AppResult<()> {
    tracing::info!("Starting exthost demo v{}", env!("CARGO_PKG_VERSION"));

    let mut engine = PluginEngine::from_config(&config.engine, bundled_exports())?;

    if list_only {
        for info in engine.list_plugins() {
            let state = if engine.is_loaded(&info.id) {
                "loaded"
            } else if !engine.is_available(&info.id) {
                "unavailable"
            } else {
                "registered"
            };
            println!("{:<24} {:<10} {:<12} {}", info.id, info.version, state, info.name);
        }
        return Ok(());
    }

    let mut window = HostWindow::new(config.demo.window_title.as_str());
    let before = window.snapshot();

    let (mut set, report) = ActivationSet::new(&engine);
    log_report("bind", &report);

    let report = set.activate_all(&mut window);
    log_report("activate", &report);
    print_window("after activate", &window);

    for cycle in 0..config.demo.update_cycles {
        let report = set.update_state_all(&mut window);
        tracing::debug!(cycle, ok = report.is_ok(), "Window state update delivered");
    }

    for plugin_id in engine.loaded_plugins() {
        if !engine.provides_extension(&plugin_id, Capability::Configurable) {
            continue;
        }
        let extension =
            engine.create_extension(&plugin_id, Capability::Configurable, ConstructParams::new())?;
        let widget = extension.create_configure_widget()?;
        println!("configure {plugin_id}: {}", describe(&widget.kind));
    }

    let report = set.shutdown(&mut window);
    log_report("deactivate", &report);
    print_window("after deactivate", &window);

    if window.snapshot() != before {
        tracing::warn!("Window was not restored to its pre-activation state");
    }

    engine.unload_all()?;
    tracing::info!("exthost demo finished");
    Ok(())
}

fn log_report(step: &str, report: &ActivationReport) {
    for (plugin_id, error) in &report.failed {
        tracing::warn!(step, plugin_id = %plugin_id, error = %error, "Plugin step failed");
    }
}

fn describe(kind: &WidgetKind) -> String {
    match kind {
        WidgetKind::Label { text } => format!("label \"{text}\""),
        WidgetKind::Dialog(dialog) => format!("dialog \"{}\"", dialog.title),
    }
}

fn print_window(title: &str, window: &HostWindow) {
    println!("[{title}] window \"{}\"", window.title());
    for widget in window.container().children() {
        println!("  - {}", describe(&widget.kind));
    }
}
