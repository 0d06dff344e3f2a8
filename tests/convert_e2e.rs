//! End-to-end tests for the conversion orchestrator.
//!
//! Covers method selection, parameter validation, parallel execution and
//! the full file -> voxels -> file pipeline.

use image_voxelizer::convert::{ConversionParams, Converter};
use image_voxelizer::encoder::encode;
use image_voxelizer::loader::load_image;
use image_voxelizer::sampler::PixelBuffer;
use image_voxelizer::sink;
use image_voxelizer::voxel::*;
use image_voxelizer::VoxelError;
use tempfile::TempDir;

fn test_image() -> PixelBuffer {
    PixelBuffer::from_fn(20, 14, |x, y| {
        if x > 6 && x < 14 && y > 3 && y < 10 {
            Rgb::new(30, 200, 60)
        } else {
            Rgb::new((x * 12) as u8, 80, (y * 18) as u8)
        }
    })
    .unwrap()
}

// ==================== Method Selection ====================

#[test]
fn test_all_runs_three_methods_in_order() {
    let converter = Converter::new(ConversionParams::default().with_resolution(12));
    let results = converter.convert(&test_image(), MethodSelector::All).unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(
        results.methods().collect::<Vec<_>>(),
        vec![Method::Height, Method::Color, Method::Structure]
    );
    for (method, result) in results.iter() {
        assert_eq!(result.method(), method);
        assert_eq!(result.count(), result.occupancy().count());
    }
}

#[test]
fn test_single_method() {
    let converter = Converter::new(ConversionParams::default().with_resolution(8));
    let results = converter
        .convert(&test_image(), "structure".parse().unwrap())
        .unwrap();
    assert_eq!(results.len(), 1);
    assert!(results.get(Method::Structure).is_some());
    assert!(results.get(Method::Height).is_none());
}

#[test]
fn test_unknown_method_selector() {
    assert_eq!(
        "voxels".parse::<MethodSelector>().unwrap_err(),
        VoxelError::UnknownMethod("voxels".to_string())
    );
}

#[test]
fn test_default_shapes_per_method() {
    let results = Converter::default()
        .convert(&test_image(), MethodSelector::All)
        .unwrap();
    assert_eq!(results.get(Method::Height).unwrap().shape(), GridShape::new(64, 64, 32));
    assert_eq!(results.get(Method::Color).unwrap().shape(), GridShape::new(48, 48, 16));
    assert_eq!(results.get(Method::Structure).unwrap().shape(), GridShape::new(56, 56, 24));
}

#[test]
fn test_custom_parameters() {
    let params = ConversionParams::default()
        .with_resolution(10)
        .with_max_height(5)
        .with_layers(3)
        .with_depth_levels(7);
    let results = Converter::new(params)
        .convert(&test_image(), MethodSelector::All)
        .unwrap();
    assert_eq!(results.get(Method::Height).unwrap().shape(), GridShape::new(10, 10, 5));
    assert_eq!(results.get(Method::Color).unwrap().shape(), GridShape::new(10, 10, 3));
    assert_eq!(results.get(Method::Structure).unwrap().shape(), GridShape::new(10, 10, 7));
}

// ==================== Validation ====================

#[test]
fn test_invalid_parameter_fails_whole_conversion() {
    let converter = Converter::new(ConversionParams::default().with_resolution(8).with_layers(0));
    assert_eq!(
        converter.convert(&test_image(), MethodSelector::All).unwrap_err(),
        VoxelError::InvalidParameter {
            name: "layers",
            value: 0
        }
    );
}

#[test]
fn test_invalid_parameter_in_unselected_method_is_ignored() {
    let converter = Converter::new(ConversionParams::default().with_resolution(8).with_layers(0));
    let results = converter
        .convert(&test_image(), MethodSelector::Single(Method::Height))
        .unwrap();
    assert_eq!(results.len(), 1);
}

#[test]
fn test_zero_resolution() {
    let converter = Converter::new(ConversionParams::default().with_resolution(0));
    assert_eq!(
        converter.convert(&test_image(), MethodSelector::All).unwrap_err(),
        VoxelError::InvalidResolution(0)
    );
}

#[test]
fn test_resolution_one() {
    let converter = Converter::new(ConversionParams::default().with_resolution(1));
    let results = converter.convert(&test_image(), MethodSelector::All).unwrap();
    for (_, result) in results.iter() {
        assert_eq!(result.shape().width, 1);
        assert_eq!(result.shape().height, 1);
    }
    // Structure always fills z = 0
    assert!(results.get(Method::Structure).unwrap().occupancy().get(0, 0, 0));
}

// ==================== Parallelism ====================

#[test]
fn test_parallel_matches_sequential() {
    let params = ConversionParams::default().with_resolution(16);
    let image = test_image();

    let parallel = Converter::new(params).convert(&image, MethodSelector::All).unwrap();
    let sequential = Converter::new(params)
        .with_parallel(false)
        .convert(&image, MethodSelector::All)
        .unwrap();

    for method in Method::ALL {
        assert_eq!(parallel.get(method), sequential.get(method));
    }
}

#[test]
fn test_run_single_matches_convert() {
    let converter = Converter::new(ConversionParams::default().with_resolution(9));
    let image = test_image();
    let via_run = converter.run(&image, Method::Color).unwrap();
    let via_convert = converter.convert(&image, Method::Color.into()).unwrap();
    assert_eq!(via_convert.get(Method::Color), Some(&via_run));
}

// ==================== Full Pipeline ====================

#[test]
fn test_png_to_files_pipeline() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.png");
    image::RgbImage::from_fn(24, 24, |x, y| {
        if x < 12 {
            image::Rgb([200, 30, 30])
        } else {
            image::Rgb([20, 20, 20 + y as u8 * 5])
        }
    })
    .save(&input)
    .unwrap();

    let image = load_image(&input).unwrap();
    let converter = Converter::new(ConversionParams::default().with_resolution(12));
    let results = converter.convert(&image, MethodSelector::All).unwrap();

    let out_dir = dir.path().join("output");
    for (method, result) in results.iter() {
        let volume = encode(result);
        let path = out_dir.join(sink::file_name(method, sink::Format::Binary));
        sink::save(&volume, &path).unwrap();

        let loaded = sink::load(&path).unwrap();
        assert_eq!(loaded, volume);
        let (occupancy, _) = loaded.to_dense().unwrap();
        assert_eq!(&occupancy, result.occupancy());
    }

    assert!(out_dir.join("height_voxels.bin").exists());
    assert!(out_dir.join("color_voxels.bin").exists());
    assert!(out_dir.join("structure_voxels.bin").exists());
}

#[test]
fn test_missing_image() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.jpg");
    assert_eq!(
        load_image(&path).unwrap_err(),
        VoxelError::ImageNotFound { path: path.clone() }
    );
}
