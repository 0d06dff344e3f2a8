//! JSON encoding of sparse volumes.

use super::SinkError;
use crate::encoder::SparseVolume;

pub(super) fn encode_json(volume: &SparseVolume) -> Result<Vec<u8>, SinkError> {
    Ok(serde_json::to_vec(volume)?)
}

pub(super) fn decode_json(bytes: &[u8]) -> Result<SparseVolume, SinkError> {
    let volume: SparseVolume = serde_json::from_slice(bytes)?;
    volume.validate()?;
    Ok(volume)
}
