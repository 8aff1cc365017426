pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod notifications;
pub mod providers;
pub mod storage;
pub mod store;
pub mod sync;

use std::sync::Arc;

pub use commands::Session;
pub use config::Config;
pub use error::{DirectoryError, DirectoryResult};
pub use model::{Directory, Entry, EntryId};
pub use store::DirectoryStore;
pub use sync::{HydrationSource, SyncController, SyncState};

use cli::{Cli, Command};
use notifications::{ConsoleNotifier, Notifier};
use providers::HttpProvider;
use storage::FileStore;

/// Wire the file store, HTTP provider and console notifier together,
/// hydrate once, then run the requested command.
pub async fn run(cli: Cli) -> DirectoryResult<()> {
    let config = cli.config();
    log::debug!("Using {:?}", config);

    let storage = Arc::new(FileStore::new(&config.data_dir));
    let provider = Arc::new(HttpProvider::new(&config.endpoint, config.request_timeout)?);
    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);

    let store = DirectoryStore::new(storage, provider, &config.storage_key);
    let controller = SyncController::new(store, notifier);

    eprintln!("Loading...");
    let mut session = controller.initialize().await;

    match cli.command() {
        Command::List => print_entries(&session),
        Command::Add { name } => {
            if let Some(entry) = session.request_add(&name.join(" ")) {
                println!("{}\t{}\t{}", entry.id, entry.name, entry.email);
            }
        }
        Command::Remove { id } => {
            session.request_remove(&EntryId::new(id));
        }
        Command::Source => println!("All information from: {}", config.endpoint),
    }

    Ok(())
}

fn print_entries(session: &Session) {
    if session.entries().is_empty() {
        println!("(no entries)");
        return;
    }
    for entry in session.entries() {
        println!("{}\t{}\t{}", entry.id, entry.name, entry.email);
    }
}
