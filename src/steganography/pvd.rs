//! # 像素值差分 (PVD) 隐写
//!
//! 沿扫描顺序把选定通道上的像素两两配对，
//! 用每一对像素的强度差承载可变数量的秘密比特：
//! 差值落在范围表的哪个区间，就能嵌入该区间对应的比特数。
//!
//! 嵌入数据中没有长度字段，也没有任何完整性校验。提取总是读完整张图，
//! 由调用方负责截断到真实长度；嵌入与提取的参数不一致时只会得到错误的数据。

use crate::bits::{EmbedReport, SecretCursor, bytes_to_bits, pack_bits};
use crate::channel::Channel;
use crate::constants::MAX_INTENSITY;
use crate::error::StegoError;
use crate::pixel_buffer::{PixelBuffer, PlaneLayout};
use crate::steganography::range_table::RangeTable;
use crate::steganography::scan::{Direction, ScanOrder, ScanPositions};
use image::DynamicImage;
use log::{debug, warn};

/// 一次 PVD 嵌入/提取所需的全部参数。
///
/// 嵌入和提取必须使用相同的范围表、扫描顺序和通道。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PvdCodec {
    range_table: RangeTable,
    order: ScanOrder,
    channel: Channel,
}

impl PvdCodec {
    pub fn new(range_table: RangeTable, order: ScanOrder, channel: Channel) -> Self {
        Self {
            range_table,
            order,
            channel,
        }
    }

    /// 从命令行形式的参数构造编解码器。
    ///
    /// # Errors
    ///
    /// * 任一范围宽度不是正整数时返回 `InvalidRangeWidth`。
    /// * `plane` 不是 R/G/B/A 之一时返回 `InvalidChannel`。
    pub fn from_args<S: AsRef<str>>(
        range_widths: &[S],
        direction: Direction,
        zigzag: bool,
        plane: &str,
    ) -> Result<Self, StegoError> {
        let range_table = RangeTable::from_widths(range_widths)?;
        let channel = plane.parse()?;
        Ok(Self::new(
            range_table,
            ScanOrder::new(direction, zigzag),
            channel,
        ))
    }

    pub fn range_table(&self) -> &RangeTable {
        &self.range_table
    }

    fn pairs(&self, buffer: &PixelBuffer) -> PixelPairs {
        PixelPairs {
            positions: self.order.positions(buffer.width(), buffer.height()),
            layout: buffer.layout(),
            channel: self.channel,
        }
    }

    /// 在当前像素值下，整张图最多能嵌入的比特数。
    ///
    /// 只要范围表不超出 `[0, 255]`，嵌入后的差值总是留在原来的区间内，
    /// 这个值就是精确的。区间越过 255 时，新差值可能超出像素域而被截断，
    /// 此时该像素对仍计入容量，但提取结果不再可靠。
    pub fn capacity(&self, buffer: &PixelBuffer) -> usize {
        let samples = buffer.samples();
        self.pairs(buffer)
            .map(|(prev, curr)| {
                let diff = (i32::from(samples[prev]) - i32::from(samples[curr])).unsigned_abs();
                self.range_table.lookup(diff).1 as usize
            })
            .sum()
    }

    /// 把秘密比特原地嵌入 `buffer`。
    ///
    /// 秘密数据写完即停止；图像容量不足时写入尽可能多的比特，
    /// 记录一条警告，并在返回的报告中体现实际写入量。
    pub fn embed(&self, buffer: &mut PixelBuffer, secret: &[bool]) -> EmbedReport {
        let mut cursor = SecretCursor::new(secret);

        if !cursor.is_exhausted() {
            for (prev, curr) in self.pairs(buffer) {
                let samples = buffer.samples_mut();
                let (p, c) = self.embed_pair(samples[prev], samples[curr], &mut cursor);
                samples[prev] = p;
                samples[curr] = c;

                if cursor.is_exhausted() {
                    break;
                }
            }
        }

        let report = EmbedReport {
            embedded: cursor.position(),
            requested: cursor.total(),
        };
        if report.is_partial() {
            warn!(
                "Image too small with given secret -- only {}/{} bits embedded",
                report.embedded, report.requested
            );
        } else {
            debug!("PVD embedded {} bits ({:?}, {})", report.embedded, self.order, self.channel);
        }
        report
    }

    fn embed_pair(&self, prev: u8, curr: u8, cursor: &mut SecretCursor<'_>) -> (u8, u8) {
        let diff = i32::from(prev) - i32::from(curr);
        let (lower, bits) = self.range_table.lookup(diff.unsigned_abs());
        // 没有容量的像素对保持原样
        if bits == 0 {
            return (prev, curr);
        }

        let (payload, _) = cursor.take(bits);
        // 自定义区间可以远大于像素域，必须在 i64 中计算
        let diff = i64::from(diff);
        let magnitude = i64::from(lower) + i64::from(payload);
        let new_diff = if diff < 0 { -magnitude } else { magnitude };

        let delta = diff - new_diff;
        let floor = delta.div_euclid(2);
        let ceil = delta - floor;
        let (mut p, mut c) = if diff % 2 == 0 {
            (i64::from(prev) - floor, i64::from(curr) + ceil)
        } else {
            (i64::from(prev) - ceil, i64::from(curr) + floor)
        };

        let max = i64::from(MAX_INTENSITY);
        // 越界时把超出部分整体平移到另一个像素，差值保持不变
        if p < 0 {
            c -= p;
            p = 0;
        } else if c < 0 {
            p -= c;
            c = 0;
        } else if p > max {
            c -= p - max;
            p = max;
        } else if c > max {
            p -= c - max;
            c = max;
        }

        (p.clamp(0, max) as u8, c.clamp(0, max) as u8)
    }

    /// 沿扫描顺序读出图像所能给出的全部比特。
    pub fn extract_bits(&self, buffer: &PixelBuffer) -> Vec<bool> {
        let samples = buffer.samples();
        let mut bits = Vec::with_capacity(self.capacity(buffer));

        for (prev, curr) in self.pairs(buffer) {
            let diff = (i32::from(samples[prev]) - i32::from(samples[curr])).unsigned_abs();
            let (lower, width) = self.range_table.lookup(diff);
            let secret = diff - lower;
            bits.extend((0..width).rev().map(|i| (secret >> i) & 1 == 1));
        }

        debug!("PVD extracted {} bits ({:?}, {})", bits.len(), self.order, self.channel);
        bits
    }

    /// 提取并按 MSB 在前打包为字节，末尾不足一字节的比特被丢弃。
    pub fn extract(&self, buffer: &PixelBuffer) -> Vec<u8> {
        pack_bits(&self.extract_bits(buffer))
    }

    /// 复制 `cover` 的像素，嵌入 `secret` 的全部字节，返回新图像和嵌入报告。
    pub fn embed_image(&self, cover: &DynamicImage, secret: &[u8]) -> (DynamicImage, EmbedReport) {
        let mut buffer = PixelBuffer::from_image(cover);
        let report = self.embed(&mut buffer, &bytes_to_bits(secret));
        (buffer.into_image(), report)
    }

    pub fn extract_image(&self, img: &DynamicImage) -> Vec<u8> {
        self.extract(&PixelBuffer::from_image(img))
    }
}

/// 沿扫描顺序两两配对的样本下标 `(previous, current)`。
///
/// 每次调用都重新开始配对，奇数个位置时最后一个被忽略。
struct PixelPairs {
    positions: ScanPositions,
    layout: PlaneLayout,
    channel: Channel,
}

impl Iterator for PixelPairs {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (px, py) = self.positions.next()?;
        let (cx, cy) = self.positions.next()?;
        Some((
            self.layout.offset(px, py, self.channel),
            self.layout.offset(cx, cy, self.channel),
        ))
    }
}
