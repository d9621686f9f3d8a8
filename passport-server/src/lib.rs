//! passport-server: track the countries each user has visited
//!
//! Server-rendered pages over three tables (`users`, `countries`,
//! `visited_countries`). Handlers talk to persistence only through the
//! [`VisitStore`] trait; [`PgStore`] is the production backend and
//! [`MemoryStore`] backs tests and demos.

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, MemoryStore, PgStore, StoreError, VisitStore};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
