//! # 比特流工具
//!
//! 秘密数据在算法内部一律以 MSB 在前的比特序列表示。

/// 把字节序列展开为比特序列，每个字节最高位在前。
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<bool> {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |i| (byte >> i) & 1 == 1))
        .collect()
}

/// 每 8 个比特按 MSB 在前打包成一个字节，末尾不足一字节的比特被丢弃。
pub fn pack_bits(bits: &[bool]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | bit as u8))
        .collect()
}

/// 秘密比特流上的读取游标，记录已经嵌入了多少比特。
#[derive(Debug)]
pub struct SecretCursor<'a> {
    bits: &'a [bool],
    position: usize,
}

impl<'a> SecretCursor<'a> {
    pub fn new(bits: &'a [bool]) -> Self {
        Self { bits, position: 0 }
    }

    /// 读取至多 `width` 个比特，返回 `(数值, 实际读取的比特数)`。
    ///
    /// 剩余比特不足 `width` 时，读到的比特放在高位、低位补零，
    /// 这样提取端按 `width` 位还原出的比特串仍以原始比特开头。
    pub fn take(&mut self, width: u32) -> (u32, usize) {
        let end = (self.position + width as usize).min(self.bits.len());
        let taken = &self.bits[self.position..end];
        let value = taken.iter().fold(0u32, |acc, &bit| (acc << 1) | bit as u32);
        let consumed = taken.len();
        self.position = end;
        if consumed == 0 {
            return (0, 0);
        }
        (value << (width as usize - consumed), consumed)
    }

    /// 读取单个比特。
    pub fn next_bit(&mut self) -> Option<bool> {
        let bit = self.bits.get(self.position).copied();
        if bit.is_some() {
            self.position += 1;
        }
        bit
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn total(&self) -> usize {
        self.bits.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.bits.len()
    }
}

/// 一次嵌入的结果：实际写入的比特数与请求写入的比特数。
///
/// 图像容量不足并不是错误，调用方应通过 [`EmbedReport::is_partial`]
/// 判断秘密数据是否被静默截断。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedReport {
    pub embedded: usize,
    pub requested: usize,
}

impl EmbedReport {
    pub fn is_partial(&self) -> bool {
        self.embedded < self.requested
    }

    pub fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.embedded)
    }
}
