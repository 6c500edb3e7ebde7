use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreResult;

/// A serialized record payload.
///
/// `Blob` is the unit of storage. Backends move its bytes around verbatim;
/// only the JSON helpers here know that the bytes are a `serde_json`
/// document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blob {
    pub data: Vec<u8>,
}

impl Blob {
    /// Create a new blob from raw bytes.
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Serialize a value into a JSON blob.
    pub fn encode<T: Serialize + ?Sized>(value: &T) -> StoreResult<Self> {
        Ok(Self {
            data: serde_json::to_vec(value)?,
        })
    }

    /// Deserialize the blob as JSON into `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> StoreResult<T> {
        Ok(serde_json::from_slice(&self.data)?)
    }

    /// Size of the payload in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Profile {
        name: String,
        tags: Vec<String>,
    }

    #[test]
    fn encode_then_decode_struct() {
        let profile = Profile {
            name: "Ada".into(),
            tags: vec!["Rust".into()],
        };
        let blob = Blob::encode(&profile).unwrap();
        assert!(!blob.is_empty());
        assert_eq!(blob.decode::<Profile>().unwrap(), profile);
    }

    #[test]
    fn decode_garbage_is_serialization_error() {
        let blob = Blob::new(b"not json".to_vec());
        let err = blob.decode::<Profile>().unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn len_counts_bytes() {
        let blob = Blob::new(b"12345".to_vec());
        assert_eq!(blob.len(), 5);
    }
}
