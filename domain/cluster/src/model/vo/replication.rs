use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// How strictly synchronous replicas are required to acknowledge writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataDurability {
    Required,
    #[default]
    Preferred,
}

impl DataDurability {
    pub fn as_str(self) -> &'static str {
        match self {
            DataDurability::Required => "required",
            DataDurability::Preferred => "preferred",
        }
    }
}

impl fmt::Display for DataDurability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataDurability {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "required" => Ok(DataDurability::Required),
            "preferred" => Ok(DataDurability::Preferred),
            _ => anyhow::bail!("unknown data durability: {s}"),
        }
    }
}

/// Connection pooler mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolerMode {
    Session,
    Transaction,
    Statement,
}

impl PoolerMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PoolerMode::Session => "session",
            PoolerMode::Transaction => "transaction",
            PoolerMode::Statement => "statement",
        }
    }
}

impl fmt::Display for PoolerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PoolerMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "session" => Ok(PoolerMode::Session),
            "transaction" => Ok(PoolerMode::Transaction),
            "statement" => Ok(PoolerMode::Statement),
            _ => anyhow::bail!("unknown pooler mode: {s}"),
        }
    }
}
