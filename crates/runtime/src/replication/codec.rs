use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to encode replication packet")]
    Encode(#[source] bincode::Error),

    #[error("failed to decode replication packet")]
    Decode(#[source] bincode::Error),
}

pub fn encode<T: Serialize>(packet: &T) -> Result<Vec<u8>, CodecError> {
    bincode::serialize(packet).map_err(CodecError::Encode)
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    bincode::deserialize(bytes).map_err(CodecError::Decode)
}
