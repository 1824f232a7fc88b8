//! # 像素缓冲区
//!
//! 隐写算法操作的是一块独占的、可原地修改的像素内存。
//! 灰度图像每个位置只有一个分量，其余颜色模型统一转换为 8 位 RGBA。

use crate::channel::Channel;
use image::{DynamicImage, GrayImage, RgbaImage};

/// 缓冲区的几何信息，负责 `(x, y, channel)` 到样本下标的映射。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneLayout {
    pub width: u32,
    pub components: usize,
}

impl PlaneLayout {
    /// 单分量图像忽略 `channel`。
    pub fn offset(&self, x: u32, y: u32, channel: Channel) -> usize {
        let position = y as usize * self.width as usize + x as usize;
        if self.components == 1 {
            position
        } else {
            position * self.components + channel.offset()
        }
    }
}

/// 从源图像复制出来的像素网格，由单次嵌入/提取调用独占。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelBuffer {
    Gray(GrayImage),
    Rgba(RgbaImage),
}

impl PixelBuffer {
    /// 按图像的颜色模型复制像素：灰度保持单分量，其余转为 RGBA。
    pub fn from_image(img: &DynamicImage) -> Self {
        match img {
            DynamicImage::ImageLuma8(_) | DynamicImage::ImageLuma16(_) => {
                PixelBuffer::Gray(img.to_luma8())
            }
            _ => PixelBuffer::Rgba(img.to_rgba8()),
        }
    }

    /// 无论源图像是什么颜色模型都复制为 RGBA。
    pub fn rgba_from_image(img: &DynamicImage) -> Self {
        PixelBuffer::Rgba(img.to_rgba8())
    }

    pub fn width(&self) -> u32 {
        match self {
            PixelBuffer::Gray(img) => img.width(),
            PixelBuffer::Rgba(img) => img.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            PixelBuffer::Gray(img) => img.height(),
            PixelBuffer::Rgba(img) => img.height(),
        }
    }

    /// 每个位置的分量个数 (1 或 4)。
    pub fn components(&self) -> usize {
        match self {
            PixelBuffer::Gray(_) => 1,
            PixelBuffer::Rgba(_) => 4,
        }
    }

    pub fn layout(&self) -> PlaneLayout {
        PlaneLayout {
            width: self.width(),
            components: self.components(),
        }
    }

    /// `(x, y, channel)` 到扁平样本数组的下标映射。
    pub fn offset(&self, x: u32, y: u32, channel: Channel) -> usize {
        self.layout().offset(x, y, channel)
    }

    pub fn samples(&self) -> &[u8] {
        match self {
            PixelBuffer::Gray(img) => &**img,
            PixelBuffer::Rgba(img) => &**img,
        }
    }

    pub fn samples_mut(&mut self) -> &mut [u8] {
        match self {
            PixelBuffer::Gray(img) => &mut **img,
            PixelBuffer::Rgba(img) => &mut **img,
        }
    }

    pub fn get(&self, x: u32, y: u32, channel: Channel) -> u8 {
        self.samples()[self.offset(x, y, channel)]
    }

    /// 交还缓冲区，得到可直接编码保存的图像。
    pub fn into_image(self) -> DynamicImage {
        match self {
            PixelBuffer::Gray(img) => DynamicImage::ImageLuma8(img),
            PixelBuffer::Rgba(img) => DynamicImage::ImageRgba8(img),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb, RgbImage, Rgba};

    #[test]
    fn gray_images_stay_single_channel() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(3, 2, Luma([9])));
        let buffer = PixelBuffer::from_image(&img);
        assert_eq!(buffer.components(), 1);
        assert_eq!(buffer.offset(2, 1, Channel::Blue), 5);
        assert_eq!(buffer.get(2, 1, Channel::Alpha), 9);
    }

    #[test]
    fn rgb_images_become_rgba() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([1, 2, 3])));
        let buffer = PixelBuffer::from_image(&img);
        assert_eq!(buffer.components(), 4);
        assert_eq!(buffer.offset(1, 1, Channel::Green), 13);
        assert_eq!(buffer.get(1, 1, Channel::Blue), 3);
        assert_eq!(buffer.get(0, 0, Channel::Alpha), 255);
    }

    #[test]
    fn sample_writes_reach_the_image() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 0])));
        let mut buffer = PixelBuffer::from_image(&img);
        let index = buffer.offset(1, 0, Channel::Green);
        buffer.samples_mut()[index] = 200;
        let out = buffer.into_image().to_rgba8();
        assert_eq!(out.get_pixel(1, 0), &Rgba([0, 200, 0, 0]));
    }
}
