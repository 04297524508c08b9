//! The Bank - classroom wealth and inflation session
//!
//! Loads the ledger, starts the session task and hands stdin to the
//! command loop:
//! - Groups, deposits and withdrawals
//! - Inflation countdown with start / stop / end
//! - Table and proportional charts after every change
//! - Save on demand

mod render;
mod ui;

use bank_runtime::{init_tracing, spawn_session, SessionConfig, SessionController};
use bank_store::CsvStore;
use tracing::info;

use render::TerminalPresenter;
use ui::SessionUI;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    println!("╔════════════════════════════════════════════════════════════╗");
    println!("║                        The Bank                            ║");
    println!("║          Group wealth, questions and inflation             ║");
    println!("╚════════════════════════════════════════════════════════════╝");
    println!();

    let config = SessionConfig::from_env()?;
    let store = CsvStore::new(&config.data_path);
    println!("Ledger file: {}", store.path().display());
    let presenter = TerminalPresenter::stdout();
    let controller = SessionController::new(&config, Box::new(store), Box::new(presenter))?;

    let (handle, task) = spawn_session(
        controller,
        config.timer.tick_interval,
        config.command_buffer,
    );

    let mut ui = SessionUI::new(handle.clone());
    ui.show_help();
    ui.run().await?;
    info!("command loop finished");

    handle.shutdown().await;
    task.await?;

    println!("Goodbye!");
    Ok(())
}
