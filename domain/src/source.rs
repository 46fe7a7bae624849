//! Configuration source lists.
//!
//! Each deployment environment publishes one JSON document per service plus
//! a shared `common-config` document. A sync run processes the service
//! document first and the common document second; each source is reconciled
//! independently, so a later source can overwrite keys an earlier one set.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default base URL the configuration documents are published under.
pub const DEFAULT_CONFIG_BASE_URL: &str =
    "https://raw.githubusercontent.com/backend-developers-ltd/compute-horde-dynamic-config/master";

/// Deployment environment a sync run targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Preprod,
    Prod,
    Staging,
    Testing,
    Testnet,
}

impl Environment {
    /// All recognized environments, for CLI help output.
    pub const ALL: [Environment; 5] = [
        Environment::Preprod,
        Environment::Prod,
        Environment::Staging,
        Environment::Testing,
        Environment::Testnet,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Environment::Preprod => "preprod",
            Environment::Prod => "prod",
            Environment::Staging => "staging",
            Environment::Testing => "testing",
            Environment::Testnet => "testnet",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An environment name that is not recognized.
#[derive(Error, Debug)]
#[error("Unknown environment: {0} (expected one of preprod, prod, staging, testing, testnet)")]
pub struct EnvironmentParseError(String);

impl FromStr for Environment {
    type Err = EnvironmentParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Environment::ALL
            .iter()
            .find(|env| env.as_str() == s)
            .copied()
            .ok_or_else(|| EnvironmentParseError(s.to_string()))
    }
}

/// Build the ordered source list for one sync run: the service-specific
/// document, then the shared common document as fallback.
pub fn config_urls(base_url: &str, service: &str, env: Environment) -> Vec<String> {
    let base_url = base_url.trim_end_matches('/');
    vec![
        format!("{base_url}/{service}-config-{env}.json"),
        format!("{base_url}/common-config-{env}.json"),
    ]
}
