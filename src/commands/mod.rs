//! Subcommand implementations

pub mod allocation;
pub mod basket;
pub mod baskets;
pub mod behavior;
pub mod dashboard;
pub mod insights;
pub mod mtf;
pub mod order;
pub mod portfolio;
pub mod route;
pub mod stock;
pub mod validate;
pub mod watchlist;

use anyhow::{bail, Result};
use broker_desk::session::{Session, UserData, UserId};
use broker_desk::{Config, FixtureStore};
use tracing::info;

const RULE_WIDTH: usize = 60;

/// Loaded config, fixtures and the active user
pub struct Desk {
    pub config: Config,
    pub store: FixtureStore,
    pub session: Session,
}

/// Load the config and apply the `--user` override
pub fn load_config(path: &str, user: Option<&str>) -> Result<Config> {
    let mut config = Config::load(path)?;
    if let Some(user) = user {
        match UserId::parse(user) {
            Some(id) => config.default_user = id,
            None => bail!("Unknown user '{}'. Available users: u1, u2, u3", user),
        }
    }
    Ok(config)
}

impl Desk {
    pub fn new(config: Config) -> Result<Self> {
        let store = config.load_fixtures()?;
        let session = Session::new(store.users.clone(), config.default_user);
        info!(
            "Active user: {} ({})",
            session.current_user().profile.name,
            session.active_id()
        );
        Ok(Self {
            config,
            store,
            session,
        })
    }

    pub fn user(&self) -> &UserData {
        self.session.current_user()
    }
}

pub fn header(title: &str) {
    println!("\n{}", "=".repeat(RULE_WIDTH));
    println!("{}", title);
    println!("{}", "=".repeat(RULE_WIDTH));
}

pub fn rule() {
    println!("{}", "-".repeat(RULE_WIDTH));
}

pub fn footer() {
    println!("{}", "=".repeat(RULE_WIDTH));
}

/// "+1.23" / "-1.23"
pub fn signed(value: f64) -> String {
    format!("{:+.2}", value)
}
