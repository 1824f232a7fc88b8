//! # 位平面替换 (LSB) 隐写
//!
//! 逐像素按行扫描，对每条位平面指令依次写入一个秘密比特。

use crate::bits::{EmbedReport, SecretCursor, bytes_to_bits, pack_bits};
use crate::channel::BitPlane;
use crate::pixel_buffer::PixelBuffer;
use crate::steganography::scan::ScanOrder;
use image::DynamicImage;
use log::{debug, warn};

fn modify(sample: &mut u8, plane: BitPlane, bit: bool) {
    if bit {
        *sample |= plane.mask();
    } else {
        *sample &= !plane.mask();
    }
}

fn recover(sample: u8, plane: BitPlane) -> bool {
    sample & plane.mask() != 0
}

/// 图像在给定指令下能容纳的比特数：像素数 × 指令数。
pub fn capacity(buffer: &PixelBuffer, planes: &[BitPlane]) -> usize {
    buffer.width() as usize * buffer.height() as usize * planes.len()
}

/// 把秘密比特原地写入 `buffer`，写完即停止。
///
/// 容量不足时写入尽可能多的比特并记录警告。
pub fn embed(buffer: &mut PixelBuffer, planes: &[BitPlane], secret: &[bool]) -> EmbedReport {
    let mut cursor = SecretCursor::new(secret);
    let positions = ScanOrder::RowLinear.positions(buffer.width(), buffer.height());
    let layout = buffer.layout();
    let samples = buffer.samples_mut();

    'pixels: for (x, y) in positions {
        for &plane in planes {
            let Some(bit) = cursor.next_bit() else {
                break 'pixels;
            };
            modify(&mut samples[layout.offset(x, y, plane.channel)], plane, bit);
        }
    }

    let report = EmbedReport {
        embedded: cursor.position(),
        requested: cursor.total(),
    };
    if report.is_partial() {
        warn!(
            "Image too small with given bitplane inputs -- only {}/{} bits embedded",
            report.embedded, report.requested
        );
    } else {
        debug!("LSB embedded {} bits into {} planes", report.embedded, planes.len());
    }
    report
}

/// 按嵌入时的顺序读出每个像素、每条指令上的比特。
pub fn extract(buffer: &PixelBuffer, planes: &[BitPlane]) -> Vec<bool> {
    let layout = buffer.layout();
    let samples = buffer.samples();

    ScanOrder::RowLinear
        .positions(buffer.width(), buffer.height())
        .flat_map(|(x, y)| {
            planes
                .iter()
                .map(move |&plane| recover(samples[layout.offset(x, y, plane.channel)], plane))
        })
        .collect()
}

/// 把 `secret` 的全部字节写入 `cover` 的 RGBA 副本。
pub fn embed_image(
    cover: &DynamicImage,
    planes: &[BitPlane],
    secret: &[u8],
) -> (DynamicImage, EmbedReport) {
    let mut buffer = PixelBuffer::rgba_from_image(cover);
    let report = embed(&mut buffer, planes, &bytes_to_bits(secret));
    (buffer.into_image(), report)
}

pub fn extract_image(img: &DynamicImage, planes: &[BitPlane]) -> Vec<u8> {
    pack_bits(&extract(&PixelBuffer::rgba_from_image(img), planes))
}
