use serde::{Deserialize, Serialize};

/// A configured origin: a hostname, an IPv4 address or a CIDR block.
/// One entry may carry both fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Origin {
    pub fn host(host: impl Into<String>) -> Self {
        Self {
            host: Some(host.into()),
            address: None,
        }
    }

    pub fn address(address: impl Into<String>) -> Self {
        Self {
            host: None,
            address: Some(address.into()),
        }
    }
}
