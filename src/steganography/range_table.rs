//! # 量化范围表
//!
//! PVD 把像素差值域 `[0, 255]` 划分为若干连续区间，
//! 每个区间能承载 `floor(log2(宽度))` 个秘密比特。

use crate::constants::{DEFAULT_RANGE_WIDTHS, MAX_INTENSITY};
use crate::error::StegoError;

/// 范围表中的一个区间 `[lower, upper]`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bin {
    pub lower: u32,
    pub upper: u32,
    pub bits: u32,
}

/// 由区间宽度构造的不可变范围表。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeTable {
    bins: Vec<Bin>,
}

impl RangeTable {
    /// 从宽度字符串构造范围表，例如 `["8", "8", "16", "32", "64", "128"]`。
    ///
    /// 未提供任何宽度时使用默认表。
    ///
    /// # Errors
    ///
    /// 任一宽度不是正整数时返回 `InvalidRangeWidth`。
    pub fn from_widths<S: AsRef<str>>(tokens: &[S]) -> Result<Self, StegoError> {
        if tokens.is_empty() {
            return Ok(Self::default());
        }

        let widths = tokens
            .iter()
            .map(|token| {
                let token = token.as_ref();
                token
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|&width| width > 0)
                    .ok_or_else(|| StegoError::InvalidRangeWidth(token.to_owned()))
            })
            .collect::<Result<Vec<u32>, _>>()?;

        let mut start: u32 = 0;
        let mut bins = Vec::with_capacity(widths.len());
        for (token, width) in tokens.iter().zip(widths) {
            let next = start
                .checked_add(width)
                .ok_or_else(|| StegoError::InvalidRangeWidth(token.as_ref().to_owned()))?;
            bins.push(Bin {
                lower: start,
                upper: next - 1,
                bits: width.ilog2(),
            });
            start = next;
        }

        Ok(Self { bins })
    }

    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    /// 查找包含 `diff` 的第一个区间，返回 `(lower, bits)`。
    ///
    /// 没有区间包含 `diff` 时返回 `(0, 0)`，即该像素对不承载数据。
    /// 这是刻意保留的宽松行为：宽度之和不足 256 的自定义表
    /// 在大差值处会静默地放弃容量，而不是报错。
    pub fn lookup(&self, diff: u32) -> (u32, u32) {
        self.bins
            .iter()
            .find(|bin| bin.lower <= diff && diff <= bin.upper)
            .map_or((0, 0), |bin| (bin.lower, bin.bits))
    }

    /// 范围表是否覆盖了完整的差值域 `[0, 255]`。
    pub fn covers_full_domain(&self) -> bool {
        self.bins
            .last()
            .is_some_and(|bin| bin.upper >= MAX_INTENSITY as u32)
    }
}

impl Default for RangeTable {
    /// `8 8 16 32 64 128`
    fn default() -> Self {
        // 默认宽度都是正整数，不会失败
        Self::from_widths(&DEFAULT_RANGE_WIDTHS).unwrap_or(Self { bins: Vec::new() })
    }
}
