//! Broker Desk
//!
//! Logic layer of a retail brokerage desk: portfolio metrics over fixture
//! data, a what-if market simulator, watchlist groups, basket plans,
//! behavioral risk bands and a hash-route table.
//!
//! ## Example
//! ```no_run
//! use broker_desk::{fixtures::FixtureStore, metrics, session::{Session, UserId}};
//!
//! let store = FixtureStore::builtin();
//! let session = Session::new(store.users.clone(), UserId::JohnDoe);
//! let totals = metrics::portfolio_totals(&session.current_user().holdings);
//! println!("P&L: {} ({:.2}%)", totals.total_pnl, totals.total_pnl_percent);
//! ```

pub mod basket;
pub mod behavior;
pub mod config;
pub mod fixtures;
pub mod metrics;
pub mod orders;
pub mod routes;
pub mod scenario;
pub mod sentiment;
pub mod session;
pub mod types;
pub mod watchlist;

pub use config::Config;
pub use fixtures::FixtureStore;
pub use routes::Route;
pub use session::{Session, UserId};
pub use types::*;
