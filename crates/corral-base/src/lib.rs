use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Block used to build the enclosure.
///
/// Barrier and bedrock are indestructible; barrier is also invisible to the
/// agent. Glass is visible and transparent.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    #[default]
    Barrier,
    Bedrock,
    Glass,
}

impl BlockType {
    pub const ALL: [BlockType; 3] = [BlockType::Barrier, BlockType::Bedrock, BlockType::Glass];

    pub const fn as_str(&self) -> &'static str {
        match self {
            BlockType::Barrier => "barrier",
            BlockType::Bedrock => "bedrock",
            BlockType::Glass => "glass",
        }
    }

    /// Namespaced identifier as accepted by `/fill`.
    pub const fn resource_id(&self) -> &'static str {
        match self {
            BlockType::Barrier => "minecraft:barrier",
            BlockType::Bedrock => "minecraft:bedrock",
            BlockType::Glass => "minecraft:glass",
        }
    }

    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(BlockType::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|block| block.as_str() == text)
            .ok_or_else(|| Error::InvalidConfiguration {
                value: text.to_string(),
                valid: Self::valid_names(),
            })
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("block_type must be one of [{valid}], got '{value}'")]
    InvalidConfiguration { value: String, valid: String },
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("simulator rejected command `{command}`")]
    CommandFailed {
        command: String,
        #[source]
        source: BoxError,
    },
    #[error("simulator error")]
    Simulator(#[source] BoxError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
