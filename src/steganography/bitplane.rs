//! # 位平面图像隐写
//!
//! 把一幅黑白秘密图像写进载体图像的若干位平面，
//! 或把载体的位平面渲染成可见的黑白图像。

use crate::channel::BitPlane;
use crate::constants::SECRET_PIXEL_THRESHOLD;
use image::{DynamicImage, Rgba, RgbaImage};
use log::debug;

/// 把 `secret` 按像素写入 `cover` 的每条位平面指令。
///
/// 秘密图像超出载体的部分被裁掉。秘密像素的首个分量低于阈值写 0，否则写 1。
pub fn embed(cover: &DynamicImage, secret: &DynamicImage, planes: &[BitPlane]) -> DynamicImage {
    let mut out = cover.to_rgba8();
    let secret = secret.to_rgba8();
    let width = secret.width().min(out.width());
    let height = secret.height().min(out.height());

    for y in 0..height {
        for x in 0..width {
            let dark = secret.get_pixel(x, y).0[0] < SECRET_PIXEL_THRESHOLD;
            let pixel = out.get_pixel_mut(x, y);
            for plane in planes {
                let sample = &mut pixel.0[plane.channel.offset()];
                if dark {
                    *sample &= !plane.mask();
                } else {
                    *sample |= plane.mask();
                }
            }
        }
    }

    debug!("Bitplane embedded a {width}x{height} secret into {} planes", planes.len());
    DynamicImage::ImageRgba8(out)
}

/// 渲染位平面：所有指令位都为 1 的像素画成黑色，其余为白色。
pub fn extract(img: &DynamicImage, planes: &[BitPlane]) -> DynamicImage {
    let source = img.to_rgba8();
    let out = RgbaImage::from_fn(source.width(), source.height(), |x, y| {
        let pixel = source.get_pixel(x, y);
        let all_set = planes
            .iter()
            .all(|plane| pixel.0[plane.channel.offset()] & plane.mask() != 0);
        let value = if all_set { 0 } else { 255 };
        Rgba([value; 4])
    });
    DynamicImage::ImageRgba8(out)
}
