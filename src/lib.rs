//! # stego_pvd 库
//!
//! 本库包含 PVD、LSB 与位平面隐写工具的核心逻辑。

// 声明库包含的所有模块。

pub mod bits;
pub mod channel;
pub mod cli;
pub mod constants;
pub mod error;
pub mod handler;
pub mod pixel_buffer;
pub mod psnr;
pub mod steganography;
