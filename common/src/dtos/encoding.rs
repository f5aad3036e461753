use serde::{de::DeserializeOwned, Serialize};

use crate::helper::error_chain_fmt;

/// JSON encoding shared by every DTO exchanged with the backend
pub trait JsonDto: Serialize + DeserializeOwned {
    fn try_parsing(data: &[u8]) -> Result<Self, DtoEncodingError> {
        let data = std::str::from_utf8(data)?;
        let dto = serde_json::from_str(data)
            .map_err(|e| DtoEncodingError::InvalidJsonData(e, data.to_string()))?;

        Ok(dto)
    }

    fn try_serializing(&self) -> Result<String, DtoEncodingError> {
        serde_json::to_string(self).map_err(DtoEncodingError::InvalidDto)
    }
}

#[derive(thiserror::Error)]
pub enum DtoEncodingError {
    #[error("Data could not be converted from utf8 u8 vector to string")]
    InvalidStringData(#[from] std::str::Utf8Error),

    #[error("Data did not represent a valid JSON object: {0}. Data: {1}")]
    InvalidJsonData(serde_json::Error, String),

    #[error("DTO could not be serialized into its JSON representation: {0}")]
    InvalidDto(serde_json::Error),
}

impl std::fmt::Debug for DtoEncodingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
