//! Persistence layer. `Storage::connect` is an explicit async
//! constructor: the caller gets a ready-to-use handle or an error,
//! never a lazily-initialized singleton. When no database URL is
//! configured the profile cache degrades to a process-local map.

use std::collections::HashMap;

use sqlx::{postgres::PgPoolOptions, PgPool};
use tokio::sync::RwLock;

use crate::{
    models::profile::{RacerProfile, RacerProfileInput},
    repositories::{profiles::ProfileRepository, users::UserRepository, DbResult},
};

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

#[derive(Debug)]
pub struct Storage {
    pub profiles: ProfileStore,
}

impl Storage {
    pub async fn connect(database_url: Option<&str>) -> DbResult<Self> {
        match database_url {
            Some(url) => {
                let pool = PgPoolOptions::new().max_connections(10).connect(url).await?;
                sqlx::migrate!().run(&pool).await?;
                Ok(Self {
                    profiles: ProfileStore::postgres(&pool),
                })
            }
            None => {
                tracing::warn!("No database configured; using in-memory profile store");
                Ok(Self {
                    profiles: ProfileStore::memory(),
                })
            }
        }
    }
}

/// Participant-profile name cache with a Postgres or in-memory
/// backend, selected once at startup.
#[derive(Debug)]
pub enum ProfileStore {
    Postgres {
        profiles: ProfileRepository,
        users: UserRepository,
    },
    Memory(MemoryProfiles),
}

impl ProfileStore {
    pub fn postgres(pool: &PgPool) -> Self {
        Self::Postgres {
            profiles: ProfileRepository::new(pool),
            users: UserRepository::new(pool),
        }
    }

    pub fn memory() -> Self {
        Self::Memory(MemoryProfiles::default())
    }

    pub async fn upsert(&self, input: &RacerProfileInput) -> DbResult<RacerProfile> {
        match self {
            Self::Postgres { profiles, .. } => profiles.upsert(input).await,
            Self::Memory(mem) => Ok(mem.upsert(input).await),
        }
    }

    pub async fn find_by_id(&self, iracing_id: i64) -> DbResult<Option<RacerProfile>> {
        match self {
            Self::Postgres { profiles, .. } => profiles.find_by_id(iracing_id).await,
            Self::Memory(mem) => Ok(mem.find_by_id(iracing_id).await),
        }
    }

    pub async fn display_names(&self, ids: &[i64]) -> DbResult<HashMap<i64, String>> {
        match self {
            Self::Postgres { profiles, .. } => profiles.display_names(ids).await,
            Self::Memory(mem) => Ok(mem.display_names(ids).await),
        }
    }

    pub async fn link_wallet(&self, wallet_address: &str, iracing_id: i64) -> DbResult<()> {
        match self {
            Self::Postgres { users, .. } => users.link_wallet(wallet_address, iracing_id).await,
            Self::Memory(mem) => {
                mem.link_wallet(wallet_address, iracing_id).await;
                Ok(())
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryProfiles {
    profiles: RwLock<HashMap<i64, RacerProfile>>,
    wallets: RwLock<HashMap<String, i64>>,
}

impl MemoryProfiles {
    async fn upsert(&self, input: &RacerProfileInput) -> RacerProfile {
        let profile = RacerProfile {
            iracing_id: input.iracing_id,
            display_name: input.display_name.clone(),
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            updated_at: Some(chrono::Utc::now()),
        };
        self.profiles
            .write()
            .await
            .insert(input.iracing_id, profile.clone());
        profile
    }

    async fn find_by_id(&self, iracing_id: i64) -> Option<RacerProfile> {
        self.profiles.read().await.get(&iracing_id).cloned()
    }

    async fn display_names(&self, ids: &[i64]) -> HashMap<i64, String> {
        let profiles = self.profiles.read().await;
        ids.iter()
            .filter_map(|id| profiles.get(id).map(|p| (*id, p.display_name.clone())))
            .collect()
    }

    async fn link_wallet(&self, wallet_address: &str, iracing_id: i64) {
        self.wallets
            .write()
            .await
            .insert(wallet_address.to_string(), iracing_id);
    }
}
