//! CLI command implementations

pub mod account;
pub mod campaigns;
pub mod init;
pub mod notifications;
pub mod review;
pub mod shop;
pub mod status;
pub mod submit;
pub mod watch;

use std::path::Path;

use anyhow::{Context, Result};

use tokenverse::auth::Identity;
use tokenverse::config::Config;
use tokenverse::domain::User;
use tokenverse::ledger::Ledger;
use tokenverse::store::Store;

/// Everything a command needs, wired from the config file
pub struct App {
    pub config: Config,
    pub store: Store,
    pub ledger: Ledger,
    pub identity: Identity,
}

/// Open the store and service layers for one command invocation.
pub fn open_app(config_override: Option<&Path>) -> Result<App> {
    let config = match config_override {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    let store = Store::open(&config.store_path())?;
    let ledger = Ledger::new(store.clone());
    let identity = Identity::new(store.clone(), Config::session_path());

    Ok(App {
        config,
        store,
        ledger,
        identity,
    })
}

impl App {
    /// The account behind the persisted session.
    pub fn current_user(&self) -> Result<User> {
        self.identity
            .current_user()
            .context("Not signed in. Run `tokenverse signin` first.")
    }
}
