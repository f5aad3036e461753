use serde::{Deserialize, Serialize};

use super::JsonDto;

/// Digest of a resource collection, served by `/postitsHash` and `/anchorsHash`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HashMessageDto {
    pub hash: String,
}

impl JsonDto for HashMessageDto {}
