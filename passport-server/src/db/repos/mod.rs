//! Query functions for the three tables
//!
//! Each function takes any Postgres executor so the same statement runs
//! against the pool or inside a transaction.

pub mod countries;
pub mod users;
pub mod visits;
