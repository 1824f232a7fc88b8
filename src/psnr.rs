//! # 峰值信噪比
//!
//! 用于量化隐写前后图像的失真程度。

use crate::constants::MAX_INTENSITY;
use crate::error::StegoError;
use image::DynamicImage;

/// 计算两幅图像 RGB 分量上的 PSNR (dB)，完全相同时返回正无穷。
///
/// # Errors
///
/// 两幅图像尺寸不同时返回 `DimensionMismatch`。
pub fn psnr(original: &DynamicImage, changed: &DynamicImage) -> Result<f64, StegoError> {
    let (a, b) = (original.to_rgba8(), changed.to_rgba8());
    if a.dimensions() != b.dimensions() {
        return Err(StegoError::DimensionMismatch(
            a.width(),
            a.height(),
            b.width(),
            b.height(),
        ));
    }

    let (sum, count) = a
        .pixels()
        .zip(b.pixels())
        .flat_map(|(p, q)| p.0.into_iter().zip(q.0).take(3))
        .fold((0u64, 0u64), |(sum, count), (x, y)| {
            let d = i64::from(x) - i64::from(y);
            (sum + (d * d) as u64, count + 1)
        });

    if sum == 0 || count == 0 {
        return Ok(f64::INFINITY);
    }

    let mse = sum as f64 / count as f64;
    let peak = f64::from(MAX_INTENSITY);
    Ok(10.0 * (peak * peak / mse).log10())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn solid(value: u8) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([value, value, value, 255])))
    }

    #[test]
    fn identical_images_have_infinite_psnr() {
        assert_eq!(psnr(&solid(10), &solid(10)), Ok(f64::INFINITY));
    }

    #[test]
    fn uniform_error_matches_closed_form() {
        // 每个分量相差 1：MSE = 1，PSNR = 20·log10(255)
        let value = psnr(&solid(10), &solid(11)).unwrap();
        assert!((value - 48.1308).abs() < 1e-3, "got {value}");
    }

    #[test]
    fn alpha_is_ignored() {
        let a = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 0])));
        let b = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255])));
        assert_eq!(psnr(&a, &b), Ok(f64::INFINITY));
    }

    #[test]
    fn mismatched_dimensions_are_an_error() {
        let small = DynamicImage::ImageRgba8(RgbaImage::new(2, 3));
        assert_eq!(
            psnr(&small, &solid(0)),
            Err(StegoError::DimensionMismatch(2, 3, 4, 4))
        );
    }
}
