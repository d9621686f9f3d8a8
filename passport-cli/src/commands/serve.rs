//! HTTP server command

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::builder::BoolishValueParser;
use clap::{Parser, ValueEnum};

use passport_server::db::{create_pool_with, MemoryStore, PgStore, VisitStore};
use passport_server::http::server::DEFAULT_TIMEOUT_SECS;
use passport_server::http::{run_server, ServerConfig};
use passport_server::models::{ActiveUserPolicy, VisitPolicy};

use crate::config;

/// Which member the home page shows when none is selected
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveUser {
    /// Lowest user id
    First,
    /// Most recently created user
    MostRecent,
}

impl From<ActiveUser> for ActiveUserPolicy {
    fn from(value: ActiveUser) -> Self {
        match value {
            ActiveUser::First => ActiveUserPolicy::First,
            ActiveUser::MostRecent => ActiveUserPolicy::MostRecent,
        }
    }
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Database URL (overrides the PG* environment variables)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Record each country at most once per user
    #[arg(long, env = "PASSPORT_UNIQUE_VISITS", value_parser = BoolishValueParser::new())]
    pub unique_visits: bool,

    /// Member shown on the home page by default
    #[arg(long, env = "PASSPORT_ACTIVE_USER", value_enum, default_value_t = ActiveUser::First)]
    pub active_user: ActiveUser,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Serve from a seeded in-memory store instead of PostgreSQL (ignores the database URL)
    #[arg(long)]
    pub in_memory: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let store: Arc<dyn VisitStore> = if args.in_memory {
        tracing::warn!("Using in-memory store; data is lost on exit");
        Arc::new(MemoryStore::demo())
    } else {
        let options = config::connect_options(args.database_url.as_deref())?;
        tracing::info!(database = %config::describe(&options), "Connecting to database");

        let pool = create_pool_with(options)
            .await
            .context("Failed to create database pool")?;
        Arc::new(PgStore::new(pool))
    };

    let config = ServerConfig {
        bind_addr: args.bind,
        request_timeout: Duration::from_secs(args.timeout),
        visit_policy: VisitPolicy::from_unique_flag(args.unique_visits),
        active_user: args.active_user.into(),
    };

    // Run server (blocks until shutdown)
    run_server(store, config).await.context("Server error")?;

    Ok(())
}
