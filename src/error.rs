//! # 错误类型模块
//!
//! 隐写核心库返回的所有错误都定义在 `StegoError` 中。
//! 命令处理层 (`handler`) 再通过 `anyhow` 为其附加上下文信息。

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StegoError {
    /// 量化范围宽度不是正整数，例如 `"abc"`、`"0"` 或 `"-8"`
    #[error("Invalid range width item '{0}' given (must be a positive integer)")]
    InvalidRangeWidth(String),

    /// 颜色通道不是 R/G/B/A 之一
    #[error("Invalid plane '{0}' given. Only R/G/B/A are valid")]
    InvalidChannel(String),

    /// 位平面指令格式错误，应形如 `R0`、`B7`
    #[error("Invalid bitplane string '{0}'. Should be in format 'R0', 'B7' etc")]
    InvalidBitPlane(String),

    /// 位平面编号超出 0-7
    #[error("Invalid bit position '{0}'. Must be an int between 0-7")]
    InvalidBitPosition(u32),

    #[error("Bit positions must be given, i.e., \"R0\", or \"B2 R1\"")]
    MissingBitPlanes,

    /// 两幅图像尺寸不一致，无法逐像素比较
    #[error("Image dimensions differ: {0}x{1} vs {2}x{3}")]
    DimensionMismatch(u32, u32, u32, u32),
}
