//! # HODL Racing Backend
//!
//! Backend server for the HODL Racing DAO rewards platform: bridges
//! iRacing OAuth logins to wallet-bound EIP-712 claim signatures,
//! aggregates on-chain `Claimed` events into a leaderboard and serves
//! the halving summary read from the claim contract.

pub mod args;
pub mod chain;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod http_server;
pub mod metrics;
pub mod middlewares;
pub mod models;
pub mod repositories;
pub mod reward;
pub mod routes;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use http_server::AppState;
pub use storage::Storage;
