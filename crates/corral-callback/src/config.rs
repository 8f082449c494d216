use corral_base::{BlockType, Error, Result};
use corral_geometry::{EnclosureBounds, FillRegion, enclosure_faces, fill_regions};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Top-level configuration document, keyed by callback name.
pub type ConfigData = serde_json::Map<String, Value>;

/// Where callback configuration comes from.
#[derive(Clone, Debug)]
pub enum ConfigSource {
    Path(PathBuf),
    Mapping(Value),
}

impl ConfigSource {
    /// Reads the source into a mapping. Files are parsed as YAML whatever their
    /// extension, which also covers JSON; an empty document loads as an empty
    /// mapping.
    pub fn load(&self) -> Result<ConfigData> {
        let value = match self {
            ConfigSource::Path(path) => read_document(path)?,
            ConfigSource::Mapping(value) => value.clone(),
        };

        match value {
            Value::Object(map) => Ok(map),
            Value::Null => Ok(ConfigData::new()),
            other => Err(Error::InvalidParameter(format!(
                "config document must be a mapping, got {}",
                kind_of(&other)
            ))),
        }
    }
}

impl From<PathBuf> for ConfigSource {
    fn from(path: PathBuf) -> Self {
        ConfigSource::Path(path)
    }
}

impl From<&Path> for ConfigSource {
    fn from(path: &Path) -> Self {
        ConfigSource::Path(path.to_path_buf())
    }
}

impl From<Value> for ConfigSource {
    fn from(value: Value) -> Self {
        ConfigSource::Mapping(value)
    }
}

impl From<ConfigData> for ConfigSource {
    fn from(map: ConfigData) -> Self {
        ConfigSource::Mapping(Value::Object(map))
    }
}

fn read_document(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&text)?)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct BoxSection {
    size: i64,
    height: i64,
    block_type: String,
    #[serde(deserialize_with = "yaml_bool")]
    include_floor: bool,
    #[serde(deserialize_with = "yaml_bool")]
    include_ceiling: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Text(String),
}

/// Accepts YAML 1.1 spellings (`yes`/`no`, `on`/`off`, `y`/`n`) next to plain
/// booleans.
fn yaml_bool<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => Ok(value),
        Flag::Text(text) => match text.to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "on" => Ok(true),
            "false" | "no" | "n" | "off" => Ok(false),
            _ => Err(serde::de::Error::invalid_value(
                serde::de::Unexpected::Str(&text),
                &"a boolean",
            )),
        },
    }
}

impl Default for BoxSection {
    fn default() -> Self {
        Self {
            size: BoxConfig::DEFAULT_SIZE,
            height: BoxConfig::DEFAULT_HEIGHT,
            block_type: BlockType::default().as_str().to_string(),
            include_floor: false,
            include_ceiling: false,
        }
    }
}

/// Validated enclosure parameters.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct BoxConfig {
    size: i64,
    height: i64,
    block_type: BlockType,
    include_floor: bool,
    include_ceiling: bool,
}

impl Default for BoxConfig {
    fn default() -> Self {
        Self {
            size: Self::DEFAULT_SIZE,
            height: Self::DEFAULT_HEIGHT,
            block_type: BlockType::default(),
            include_floor: false,
            include_ceiling: false,
        }
    }
}

impl BoxConfig {
    pub const DEFAULT_SIZE: i64 = 25;
    pub const DEFAULT_HEIGHT: i64 = 10;

    /// Fails with [`Error::InvalidConfiguration`] when `block_type` is not one
    /// of `barrier`, `bedrock` or `glass`. Size and height are taken as given.
    pub fn new(
        size: i64,
        height: i64,
        block_type: &str,
        include_floor: bool,
        include_ceiling: bool,
    ) -> Result<Self> {
        Ok(Self {
            size,
            height,
            block_type: block_type.parse()?,
            include_floor,
            include_ceiling,
        })
    }

    /// Builds the config from the value stored under a `barrier_box` key.
    /// Missing fields fall back to their defaults; a null value means all
    /// defaults.
    pub fn from_section(value: &Value) -> Result<Self> {
        let section = match value {
            Value::Null => BoxSection::default(),
            Value::Object(_) => BoxSection::deserialize(value)?,
            other => {
                return Err(Error::InvalidParameter(format!(
                    "barrier_box must be a mapping, got {}",
                    kind_of(other)
                )));
            }
        };

        Self::new(
            section.size,
            section.height,
            &section.block_type,
            section.include_floor,
            section.include_ceiling,
        )
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    pub fn height(&self) -> i64 {
        self.height
    }

    pub fn block_type(&self) -> BlockType {
        self.block_type
    }

    pub fn include_floor(&self) -> bool {
        self.include_floor
    }

    pub fn include_ceiling(&self) -> bool {
        self.include_ceiling
    }

    pub fn bounds(&self, center_x: i64, center_z: i64, base_y: i64) -> Result<EnclosureBounds> {
        EnclosureBounds::around(center_x, center_z, base_y, self.size, self.height)
    }

    /// Fill regions for the enclosure: north, south, west, east, then floor
    /// and ceiling when enabled. Fails only when a corner overflows `i64`.
    pub fn generate_regions(
        &self,
        center_x: i64,
        center_z: i64,
        base_y: i64,
    ) -> Result<Vec<FillRegion>> {
        let faces = enclosure_faces(self.include_floor, self.include_ceiling);
        let bounds = self.bounds(center_x, center_z, base_y)?;
        Ok(fill_regions(&bounds, &faces, self.block_type))
    }

    pub fn generate_box_commands(
        &self,
        center_x: i64,
        center_z: i64,
        base_y: i64,
    ) -> Result<Vec<String>> {
        Ok(self
            .generate_regions(center_x, center_z, base_y)?
            .iter()
            .map(FillRegion::command)
            .collect())
    }
}
