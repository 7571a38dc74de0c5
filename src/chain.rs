use alloy::primitives::Address;

use crate::config::ChainSettings;

#[derive(Debug, thiserror::Error)]
pub enum ChainConfigError {
    #[error("Unknown network: {0} (expected \"mainnet\" or \"testnet\")")]
    UnknownNetwork(String),
    #[error("Invalid {field} address: {value}")]
    InvalidAddress { field: &'static str, value: String },
    #[error("Deployment block must be greater than zero")]
    MissingDeploymentBlock,
}

/// Immutable per-process chain configuration. Resolved once at
/// startup; a missing contract address or deployment block is fatal.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub network: String,
    pub chain_id: u64,
    pub rpc_url: String,
    pub block_explorer: String,
    pub claim_contract: Address,
    pub token_contract: Address,
    pub deployment_block: u64,
}

struct NetworkPreset {
    chain_id: u64,
    default_rpc_url: &'static str,
    block_explorer: &'static str,
}

const BASE_MAINNET: NetworkPreset = NetworkPreset {
    chain_id: 8453,
    default_rpc_url: "https://mainnet.base.org",
    block_explorer: "https://basescan.org",
};

const BASE_SEPOLIA: NetworkPreset = NetworkPreset {
    chain_id: 84532,
    default_rpc_url: "https://sepolia.base.org",
    block_explorer: "https://sepolia.basescan.org",
};

impl ChainConfig {
    pub fn resolve(settings: &ChainSettings) -> Result<Self, ChainConfigError> {
        let preset = match settings.network.as_str() {
            "mainnet" => BASE_MAINNET,
            "testnet" => BASE_SEPOLIA,
            other => return Err(ChainConfigError::UnknownNetwork(other.to_string())),
        };

        let claim_contract: Address =
            settings
                .claim_contract
                .parse()
                .map_err(|_| ChainConfigError::InvalidAddress {
                    field: "claim_contract",
                    value: settings.claim_contract.clone(),
                })?;
        let token_contract: Address =
            settings
                .token_contract
                .parse()
                .map_err(|_| ChainConfigError::InvalidAddress {
                    field: "token_contract",
                    value: settings.token_contract.clone(),
                })?;

        if settings.deployment_block == 0 {
            return Err(ChainConfigError::MissingDeploymentBlock);
        }

        let rpc_url = if settings.rpc_url.is_empty() {
            preset.default_rpc_url.to_string()
        } else {
            settings.rpc_url.clone()
        };

        Ok(Self {
            network: settings.network.clone(),
            chain_id: preset.chain_id,
            rpc_url,
            block_explorer: preset.block_explorer.to_string(),
            claim_contract,
            token_contract,
            deployment_block: settings.deployment_block,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ChainSettings {
        ChainSettings {
            network: "testnet".to_string(),
            rpc_url: String::new(),
            claim_contract: "0x1111111111111111111111111111111111111111".to_string(),
            token_contract: "0x2222222222222222222222222222222222222222".to_string(),
            deployment_block: 1234,
        }
    }

    #[test]
    fn resolves_testnet_preset() {
        let chain = ChainConfig::resolve(&settings()).unwrap();
        assert_eq!(chain.chain_id, 84532);
        assert_eq!(chain.rpc_url, "https://sepolia.base.org");
        assert_eq!(chain.deployment_block, 1234);
    }

    #[test]
    fn resolves_mainnet_preset_with_rpc_override() {
        let mut s = settings();
        s.network = "mainnet".to_string();
        s.rpc_url = "https://base.example.org".to_string();
        let chain = ChainConfig::resolve(&s).unwrap();
        assert_eq!(chain.chain_id, 8453);
        assert_eq!(chain.rpc_url, "https://base.example.org");
    }

    #[test]
    fn rejects_unknown_network() {
        let mut s = settings();
        s.network = "devnet".to_string();
        assert!(matches!(
            ChainConfig::resolve(&s),
            Err(ChainConfigError::UnknownNetwork(_))
        ));
    }

    #[test]
    fn rejects_missing_claim_contract() {
        let mut s = settings();
        s.claim_contract = String::new();
        assert!(matches!(
            ChainConfig::resolve(&s),
            Err(ChainConfigError::InvalidAddress { field: "claim_contract", .. })
        ));
    }

    #[test]
    fn rejects_zero_deployment_block() {
        let mut s = settings();
        s.deployment_block = 0;
        assert!(matches!(
            ChainConfig::resolve(&s),
            Err(ChainConfigError::MissingDeploymentBlock)
        ));
    }
}
