use dfe_core::errors::DfeError;
use serde::{de::DeserializeOwned, Serialize};

/// Serializes a value into pretty-printed JSON. Object keys come out sorted because
/// `serde_json` maps are ordered by key.
pub fn to_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, DfeError> {
    serde_json::to_vec_pretty(value).map_err(|err| DfeError::serde("json_serialize", err))
}

/// Deserializes a report or other value from JSON bytes.
pub fn from_json_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, DfeError> {
    serde_json::from_slice(data).map_err(|err| DfeError::serde("json_deserialize", err))
}

/// Serializes an analysis configuration into YAML.
pub fn to_yaml_string<T: Serialize>(value: &T) -> Result<String, DfeError> {
    serde_yaml::to_string(value).map_err(|err| DfeError::serde("yaml_serialize", err))
}

/// Deserializes a YAML analysis configuration.
pub fn from_yaml_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, DfeError> {
    serde_yaml::from_slice(data).map_err(|err| DfeError::serde("yaml_deserialize", err))
}
