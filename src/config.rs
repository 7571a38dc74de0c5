use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub chain: ChainSettings,
    pub iracing: IracingConfig,
    pub signer: SignerConfig,
    pub jwt: JwtConfig,
    pub data: DataConfig,
    pub logging: LoggingConfig,
    pub paymaster: PaymasterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
}

/// Raw chain settings as configured; resolved into a validated
/// [`crate::chain::ChainConfig`] at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSettings {
    pub network: String,
    pub rpc_url: String,
    pub claim_contract: String,
    pub token_contract: String,
    pub deployment_block: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IracingConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_base_url: String,
    pub api_base_url: String,
}

impl IracingConfig {
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignerConfig {
    pub private_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub exp_in_hours: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub database_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymasterConfig {
    pub url: String,
}

impl Config {
    pub fn load(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::new(config_path, config::FileFormat::Toml))
            .add_source(config::Environment::with_prefix("HODL").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn get_jwt_expiration(&self) -> chrono::Duration {
        chrono::Duration::hours(self.jwt.exp_in_hours)
    }

    /// `None` when no database is configured, selecting the in-memory
    /// profile store.
    pub fn database_url(&self) -> Option<&str> {
        if self.data.database_url.is_empty() {
            None
        } else {
            Some(&self.data.database_url)
        }
    }

    pub fn paymaster_url(&self) -> Option<&str> {
        if self.paymaster.url.is_empty() {
            None
        } else {
            Some(&self.paymaster.url)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                frontend_url: "http://localhost:5173".to_string(),
            },
            chain: ChainSettings {
                network: "testnet".to_string(),
                rpc_url: String::new(),
                claim_contract: "0x1111111111111111111111111111111111111111".to_string(),
                token_contract: "0x2222222222222222222222222222222222222222".to_string(),
                deployment_block: 1,
            },
            iracing: IracingConfig {
                client_id: String::new(),
                client_secret: String::new(),
                redirect_uri: "http://localhost:3000/api/auth/callback".to_string(),
                auth_base_url: "https://oauth.iracing.com".to_string(),
                api_base_url: "https://members-ng.iracing.com".to_string(),
            },
            signer: SignerConfig {
                private_key: String::new(),
            },
            jwt: JwtConfig {
                secret: "Change-in-production".to_string(),
                exp_in_hours: 24,
            },
            data: DataConfig {
                database_url: String::new(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            paymaster: PaymasterConfig { url: String::new() },
        }
    }
}
