use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use bookmarks_config::{folder_state_path, AppConfig, FolderStateFile};
use bookmarks_manager::observers::{DisplayObserver, FolderStatePersister};
use bookmarks_manager::tree::{default_tree, load_tree};
use bookmarks_manager::{logger, App, Flow};

fn main() -> Result<()> {
    let log_file = logger::init()?;
    log::info!("Starting bookmarks-manager, logging to {:?}", log_file);

    let config = AppConfig::load();
    let tree_path = bookmarks_path(&config)?;
    let tree = if tree_path.exists() {
        load_tree(&tree_path)?
    } else {
        log::info!("No bookmarks at {:?}, starting empty", tree_path);
        default_tree()
    };

    let mut app = App::new(config.clone(), tree_path);
    app.add_observer(DisplayObserver::stdout(config.show_urls));

    let mut folder_overrides = Vec::new();
    if config.persist_folder_state {
        folder_overrides.extend(FolderStateFile::load().folders);
        match folder_state_path() {
            Ok(path) => {
                app.add_observer(FolderStatePersister::new(path));
            }
            Err(e) => log::warn!("Folder state will not be saved: {:#}", e),
        }
    }

    app.start(&tree, folder_overrides)?;

    let result = run_shell(&mut app);

    log::info!("Exiting bookmarks-manager");
    result
}

/// Bookmarks file from the first argument, the config, or the default location
fn bookmarks_path(config: &AppConfig) -> Result<PathBuf> {
    if let Some(path) = std::env::args().nth(1) {
        return Ok(PathBuf::from(path));
    }
    config.bookmarks_path()
}

fn run_shell(app: &mut App) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("Failed to read command")? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        match app.execute_line(&line) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Message(message)) => println!("{}", message.trim_end()),
            Ok(Flow::Quit) => break,
            Err(e) => {
                log::warn!("Command {:?} failed: {}", line.trim(), e);
                eprintln!("error: {}", e);
            }
        }
    }

    Ok(())
}
