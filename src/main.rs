use std::io::{self, IsTerminal};

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use bootmenu::app::MenuShell;
use bootmenu::executor::ConsoleExecutor;
use bootmenu::model::builder::build_root_menu;
use bootmenu::model::config::AppConfig;
use bootmenu::plugin::PluginManager;
use bootmenu::plugin::builtin::register_builtin;
use bootmenu::plugin::registry::StaticUnits;

fn main() -> Result<()> {
    // Initialize logging to file (never stdout, which carries the menu)
    let log_dir = directories::ProjectDirs::from("", "", "bootmenu")
        .map(|d| d.data_dir().to_path_buf())
        .unwrap_or_else(|| std::path::PathBuf::from("/tmp"));
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "bootmenu.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bootmenu=info")),
        )
        .init();

    tracing::info!("bootmenu starting");

    let config = AppConfig::load()?;
    let mut tree = build_root_menu();
    let root = tree.root();

    let mut units = StaticUnits::new();
    register_builtin(&mut units);
    let mut plugins = PluginManager::from_config(&config, units);

    if config.plugins.enabled {
        println!("Loading plugins...");
        let report = plugins.load_all(&mut tree, root);
        for notice in report.startup_notifications() {
            println!("{notice}");
        }
        for row in plugins.list_notifications() {
            println!("{row}");
        }
    } else {
        tracing::info!("plugins disabled by configuration");
    }

    let shell_config = config.shell.clone().for_output(io::stdout().is_terminal());
    let mut shell = MenuShell::new(tree, ConsoleExecutor, shell_config);
    let result = shell.run(io::stdin().lock(), io::stdout().lock());

    for err in plugins.unload_all() {
        eprintln!("{err}");
    }
    tracing::info!("bootmenu stopped");

    result?;
    Ok(())
}
