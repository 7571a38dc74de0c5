pub mod auth;
pub mod claim;
pub mod contract;
pub mod leaderboard;
pub mod profile;
