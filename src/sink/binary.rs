//! Compact binary encoding of sparse volumes.
//!
//! Layout, all integers little-endian:
//!
//! ```text
//! magic      4 bytes   "VOXL"
//! version    u8        1
//! tag_len    u8        length of the method tag
//! tag        tag_len   "height" | "color" | "structure"
//! shape      3 x u32   width, height, depth
//! count      u32       number of voxels
//! positions  count x 3 x u32
//! colors     count x 3 x u8
//! checksum   32 bytes  SHA-256 of everything above
//! ```

use sha2::{Digest, Sha256};

use super::SinkError;
use crate::encoder::SparseVolume;
use crate::voxel::{GridShape, Method, Rgb};

pub const BINARY_MAGIC: &[u8; 4] = b"VOXL";
pub const BINARY_VERSION: u8 = 1;

const CHECKSUM_LEN: usize = 32;

fn fit<T: TryFrom<usize>>(field: &'static str, value: usize) -> Result<T, SinkError> {
    T::try_from(value).map_err(|_| SinkError::TooLarge { field, value })
}

/// Serialize `volume` into the binary layout.
///
/// # Errors
/// [`SinkError::TooLarge`] if a dimension or the voxel count exceeds `u32`.
pub fn encode_binary(volume: &SparseVolume) -> Result<Vec<u8>, SinkError> {
    let tag = volume.method.as_str().as_bytes();
    let tag_len: u8 = fit("tag_len", tag.len())?;
    let dims: [u32; 3] = [
        fit("width", volume.shape.width)?,
        fit("height", volume.shape.height)?,
        fit("depth", volume.shape.depth)?,
    ];
    let count: u32 = fit("count", volume.len())?;

    let mut out = Vec::with_capacity(4 + 2 + tag.len() + 16 + volume.len() * 15 + CHECKSUM_LEN);

    out.extend_from_slice(BINARY_MAGIC);
    out.push(BINARY_VERSION);
    out.push(tag_len);
    out.extend_from_slice(tag);

    for dim in dims {
        out.extend_from_slice(&dim.to_le_bytes());
    }
    out.extend_from_slice(&count.to_le_bytes());

    for position in &volume.positions {
        for c in position {
            out.extend_from_slice(&c.to_le_bytes());
        }
    }
    for color in &volume.colors {
        out.extend_from_slice(&[color.r, color.g, color.b]);
    }

    let digest = Sha256::digest(&out);
    out.extend_from_slice(&digest);
    Ok(out)
}

/// Bounds-checked reader over the body.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], SinkError> {
        let end = self.pos.checked_add(n).ok_or(SinkError::Truncated)?;
        let slice = self.bytes.get(self.pos..end).ok_or(SinkError::Truncated)?;
        self.pos = end;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8, SinkError> {
        Ok(self.take(1)?[0])
    }

    fn u32(&mut self) -> Result<u32, SinkError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }
}

/// Parse and verify a binary volume.
pub fn decode_binary(bytes: &[u8]) -> Result<SparseVolume, SinkError> {
    if bytes.len() < BINARY_MAGIC.len() {
        return Err(SinkError::Truncated);
    }
    if &bytes[..4] != BINARY_MAGIC {
        return Err(SinkError::BadMagic);
    }
    if bytes.len() < 4 + 1 + CHECKSUM_LEN {
        return Err(SinkError::Truncated);
    }

    let (body, checksum) = bytes.split_at(bytes.len() - CHECKSUM_LEN);
    let actual = Sha256::digest(body);
    if actual.as_slice() != checksum {
        return Err(SinkError::ChecksumMismatch {
            expected: hex::encode(checksum),
            actual: hex::encode(actual),
        });
    }

    let mut reader = Reader { bytes: body, pos: 4 };
    let version = reader.u8()?;
    if version != BINARY_VERSION {
        return Err(SinkError::UnsupportedVersion(version));
    }

    let tag_len = reader.u8()? as usize;
    let tag = String::from_utf8_lossy(reader.take(tag_len)?).into_owned();
    let method: Method = tag.parse().map_err(|_| SinkError::UnknownMethod(tag.clone()))?;

    let shape = GridShape::new(
        reader.u32()? as usize,
        reader.u32()? as usize,
        reader.u32()? as usize,
    );
    let count = reader.u32()? as usize;

    // Refuse counts the remaining bytes cannot hold before allocating.
    if count.saturating_mul(15) > body.len() - reader.pos {
        return Err(SinkError::Truncated);
    }

    let mut positions = Vec::with_capacity(count);
    for _ in 0..count {
        positions.push([reader.u32()?, reader.u32()?, reader.u32()?]);
    }
    let mut colors = Vec::with_capacity(count);
    for _ in 0..count {
        let c = reader.take(3)?;
        colors.push(Rgb::new(c[0], c[1], c[2]));
    }

    let volume = SparseVolume {
        method,
        shape,
        positions,
        colors,
    };
    volume.validate()?;
    Ok(volume)
}
