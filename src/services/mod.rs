pub mod chain_client;
pub mod claim_signer;
pub mod iracing;
pub mod leaderboard;
pub mod oauth_store;
