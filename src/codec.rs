//! Product list codec
//!
//! Converts the whole product list to and from the string stored in the
//! distributed cache.

use crate::errors::CodecError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

pub trait ListCodec<T>: Send + Sync + Debug {
    fn encode(&self, items: &[T]) -> Result<String, CodecError>;

    fn decode(&self, payload: &str) -> Result<Vec<T>, CodecError>;
}

/// JSON array encoding
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonListCodec;

impl<T> ListCodec<T> for JsonListCodec
where
    T: Serialize + DeserializeOwned,
{
    fn encode(&self, items: &[T]) -> Result<String, CodecError> {
        serde_json::to_string(items).map_err(CodecError::Encode)
    }

    fn decode(&self, payload: &str) -> Result<Vec<T>, CodecError> {
        serde_json::from_str(payload).map_err(CodecError::Decode)
    }
}
