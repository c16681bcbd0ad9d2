//! Upload decoding and tensor preparation.

use crate::error::IngestionError;
use image::{DynamicImage, ImageFormat, RgbImage, imageops::FilterType};
use ndarray::Array4;
use std::fs;
use std::path::Path;

/// Side length the classifier was trained on.
pub const INPUT_SIZE: u32 = 128;

/// Model input layout: batch, height, width, channel.
pub const INPUT_SHAPE: [usize; 4] = [1, INPUT_SIZE as usize, INPUT_SIZE as usize, 3];

/// Map an accepted extension to its decoder.
fn upload_format(extension: &str) -> Result<ImageFormat, IngestionError> {
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
        "png" => Ok(ImageFormat::Png),
        _ => Err(IngestionError::UnsupportedType(extension.to_string())),
    }
}

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| upload_format(ext).is_ok())
}

/// Read and decode an upload from disk.
pub fn load_path(path: &Path) -> Result<DynamicImage, IngestionError> {
    let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");
    let format = upload_format(extension)?;
    let bytes = fs::read(path).map_err(|source| IngestionError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("read {} bytes from {}", bytes.len(), path.display());
    decode(&bytes, format)
}

/// Decode upload content. `extension` is the uploaded file's extension
/// without the leading dot.
pub fn load_bytes(bytes: &[u8], extension: &str) -> Result<DynamicImage, IngestionError> {
    let format = upload_format(extension)?;
    decode(bytes, format)
}

/// The extension only gates the upload; content decides the decoder, with
/// the extension's format as fallback when the content is unrecognized.
fn decode(bytes: &[u8], by_extension: ImageFormat) -> Result<DynamicImage, IngestionError> {
    let format = image::guess_format(bytes).unwrap_or(by_extension);
    if format != by_extension {
        tracing::debug!("upload content is {format:?}, extension says {by_extension:?}");
    }
    Ok(image::load_from_memory_with_format(bytes, format)?)
}

fn resize_to_input(img: &DynamicImage) -> RgbImage {
    img.resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::Nearest)
        .to_rgb8()
}

/// Resize to [`INPUT_SIZE`] and scale RGB values to `[0, 1]`.
pub fn prepare_input(img: &DynamicImage) -> Array4<f32> {
    let resized = resize_to_input(img);
    let mut array = Array4::<f32>::zeros(INPUT_SHAPE);
    for (x, y, pixel) in resized.enumerate_pixels() {
        let (row, col) = (y as usize, x as usize);
        for (channel, &value) in pixel.0.iter().enumerate() {
            array[[0, row, col, channel]] = f32::from(value) / 255.0;
        }
    }
    array
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use image::Rgb;
    use rstest::rstest;
    use std::io::Cursor;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn png_bytes(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb(color));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[rstest]
    #[case("leaf.jpg", true)]
    #[case("leaf.JPEG", true)]
    #[case("leaf.Png", true)]
    #[case("leaf.gif", false)]
    #[case("leaf", false)]
    fn supported_extensions(#[case] name: &str, #[case] supported: bool) {
        assert_eq!(is_supported_image(&PathBuf::from(name)), supported);
    }

    #[test]
    fn prepares_nhwc_tensor_in_unit_range() {
        let img = load_bytes(&png_bytes(300, 200, [255, 0, 51]), "png").unwrap();
        let tensor = prepare_input(&img);
        assert_eq!(tensor.shape(), &INPUT_SHAPE);
        assert_relative_eq!(tensor[[0, 0, 0, 0]], 1.0);
        assert_relative_eq!(tensor[[0, 127, 127, 1]], 0.0);
        assert_relative_eq!(tensor[[0, 64, 10, 2]], 0.2);
    }

    #[test]
    fn unsupported_type_is_rejected_before_decoding() {
        let err = load_bytes(b"GIF89a", "gif").unwrap_err();
        assert!(matches!(err, IngestionError::UnsupportedType(ext) if ext == "gif"));
    }

    #[test]
    fn png_content_with_jpg_extension_decodes() {
        let img = load_bytes(&png_bytes(20, 20, [10, 200, 30]), "jpg").unwrap();
        assert_eq!((img.width(), img.height()), (20, 20));
    }

    #[test]
    fn corrupt_image_is_rejected() {
        let err = load_bytes(b"definitely not a png", "png").unwrap_err();
        assert!(matches!(err, IngestionError::Decode(_)));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("leaf.PNG");
        fs::write(&path, png_bytes(8, 8, [0, 128, 0])).unwrap();
        let img = load_path(&path).unwrap();
        assert_eq!((img.width(), img.height()), (8, 8));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempdir().unwrap();
        let err = load_path(&dir.path().join("absent.jpg")).unwrap_err();
        assert!(matches!(err, IngestionError::Read { .. }));
    }
}
