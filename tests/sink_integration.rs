//! Integration tests for saving and loading sparse volumes.

use image_voxelizer::encoder::{encode, SparseVolume};
use image_voxelizer::sampler::PixelBuffer;
use image_voxelizer::sink::{self, Format, SinkError};
use image_voxelizer::voxel::*;
use tempfile::TempDir;

fn sample_volume() -> SparseVolume {
    let image = PixelBuffer::from_fn(6, 6, |x, y| Rgb::new((x * 40) as u8, (y * 40) as u8, 120)).unwrap();
    let result = Strategy::Height(HeightParams {
        resolution: 6,
        max_height: 8,
    })
    .run(&image)
    .unwrap();
    encode(&result)
}

#[test]
fn test_binary_round_trip() {
    let dir = TempDir::new().unwrap();
    let volume = sample_volume();
    let path = sink::save(&volume, &dir.path().join("height_voxels.bin")).unwrap();
    assert_eq!(sink::load(&path).unwrap(), volume);
}

#[test]
fn test_json_round_trip() {
    let dir = TempDir::new().unwrap();
    let volume = sample_volume();
    let path = sink::save(&volume, &dir.path().join("height_voxels.json")).unwrap();
    assert_eq!(sink::load(&path).unwrap(), volume);

    let text = std::fs::read_to_string(&path).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(doc["method"], "height");
    assert_eq!(doc["shape"], serde_json::json!([6, 6, 8]));
    assert_eq!(doc["positions"].as_array().unwrap().len(), volume.len());
}

#[test]
fn test_both_formats_hold_same_volume() {
    let dir = TempDir::new().unwrap();
    let volume = sample_volume();
    for format in [Format::Binary, Format::Json] {
        let path = dir.path().join(sink::file_name(volume.method, format));
        sink::save(&volume, &path).unwrap();
    }
    let from_bin = sink::load(&dir.path().join("height_voxels.bin")).unwrap();
    let from_json = sink::load(&dir.path().join("height_voxels.json")).unwrap();
    assert_eq!(from_bin, from_json);
}

#[test]
fn test_save_creates_nested_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a").join("b").join("structure_voxels.bin");
    sink::save(&sample_volume(), &path).unwrap();
    assert!(path.exists());
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let err = sink::save(&sample_volume(), &dir.path().join("voxels.npz")).unwrap_err();
    assert!(matches!(err, SinkError::UnsupportedFormat { .. }));
    assert!(!dir.path().join("voxels.npz").exists());
}

#[test]
fn test_tampered_binary_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = sink::save(&sample_volume(), &dir.path().join("height_voxels.bin")).unwrap();

    let mut bytes = std::fs::read(&path).unwrap();
    // Last color byte sits right before the 32-byte checksum
    let index = bytes.len() - 33;
    bytes[index] ^= 0xff;
    std::fs::write(&path, bytes).unwrap();

    assert!(matches!(
        sink::load(&path).unwrap_err(),
        SinkError::ChecksumMismatch { .. }
    ));
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = sink::load(&dir.path().join("missing.bin")).unwrap_err();
    assert!(matches!(err, SinkError::Io(_)));
}

#[test]
fn test_json_with_unsorted_positions_is_corrupt() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("color_voxels.json");
    std::fs::write(
        &path,
        r#"{"method":"color","shape":[2,2,2],"positions":[[1,0,0],[0,0,0]],"colors":[[1,2,3],[4,5,6]]}"#,
    )
    .unwrap();
    assert!(matches!(sink::load(&path).unwrap_err(), SinkError::Corrupt(_)));
}
