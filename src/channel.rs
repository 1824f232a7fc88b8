//! # 颜色通道与位平面
//!
//! 将用户输入的 `R`/`G`/`B`/`A` 以及 `R0`、`B7` 这类位平面指令
//! 在解析阶段就转换为强类型，避免在像素循环中再做校验。

use crate::error::StegoError;
use std::fmt;
use std::str::FromStr;

/// RGBA 像素中的一个颜色分量。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
}

impl Channel {
    /// 该分量在 RGBA 像素中的固定偏移。
    pub const fn offset(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
            Channel::Alpha => 3,
        }
    }

    fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'R' => Some(Channel::Red),
            'G' => Some(Channel::Green),
            'B' => Some(Channel::Blue),
            'A' => Some(Channel::Alpha),
            _ => None,
        }
    }

    const fn letter(self) -> char {
        match self {
            Channel::Red => 'R',
            Channel::Green => 'G',
            Channel::Blue => 'B',
            Channel::Alpha => 'A',
        }
    }
}

impl FromStr for Channel {
    type Err = StegoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => {
                Channel::from_letter(letter).ok_or_else(|| StegoError::InvalidChannel(s.to_owned()))
            }
            _ => Err(StegoError::InvalidChannel(s.to_owned())),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// 一条位平面指令：在 `channel` 分量的第 `bit` 位上读写数据。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitPlane {
    pub channel: Channel,
    pub bit: u8,
}

impl BitPlane {
    pub const fn mask(self) -> u8 {
        1 << self.bit
    }
}

impl FromStr for BitPlane {
    type Err = StegoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(letter), Some(digit), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(StegoError::InvalidBitPlane(s.to_owned()));
        };

        let channel =
            Channel::from_letter(letter).ok_or_else(|| StegoError::InvalidChannel(letter.to_string()))?;
        let bit = digit
            .to_digit(10)
            .ok_or_else(|| StegoError::InvalidBitPlane(s.to_owned()))?;
        if bit > 7 {
            return Err(StegoError::InvalidBitPosition(bit));
        }

        Ok(BitPlane {
            channel,
            bit: bit as u8,
        })
    }
}

impl fmt::Display for BitPlane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.channel, self.bit)
    }
}

/// 解析一组位平面指令，例如 `["R0", "B2"]`。
///
/// # Errors
///
/// * 列表为空时返回 `MissingBitPlanes`。
/// * 任一指令格式错误时返回对应的解析错误。
pub fn parse_bit_planes<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<BitPlane>, StegoError> {
    if tokens.is_empty() {
        return Err(StegoError::MissingBitPlanes);
    }
    tokens.iter().map(|token| token.as_ref().parse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_letters_map_to_rgba_offsets() {
        let offsets: Vec<usize> = ["R", "G", "B", "A"]
            .iter()
            .map(|s| s.parse::<Channel>().map(Channel::offset))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(offsets, vec![0, 1, 2, 3]);
    }

    #[test]
    fn unknown_channel_is_rejected() {
        assert_eq!(
            "X".parse::<Channel>(),
            Err(StegoError::InvalidChannel("X".into()))
        );
        assert!("".parse::<Channel>().is_err());
        assert!("RG".parse::<Channel>().is_err());
    }

    #[test]
    fn bit_plane_tokens_parse() {
        let planes = parse_bit_planes(&["R0", "B7", "A3"]).unwrap();
        assert_eq!(
            planes,
            vec![
                BitPlane {
                    channel: Channel::Red,
                    bit: 0,
                },
                BitPlane {
                    channel: Channel::Blue,
                    bit: 7,
                },
                BitPlane {
                    channel: Channel::Alpha,
                    bit: 3,
                },
            ]
        );
        assert_eq!(planes[1].mask(), 0x80);
        assert_eq!(planes[2].to_string(), "A3");
    }

    #[test]
    fn malformed_bit_planes_are_rejected() {
        assert_eq!("R8".parse::<BitPlane>(), Err(StegoError::InvalidBitPosition(8)));
        assert_eq!("Rx".parse::<BitPlane>(), Err(StegoError::InvalidBitPlane("Rx".into())));
        assert_eq!("Q1".parse::<BitPlane>(), Err(StegoError::InvalidChannel("Q".into())));
        assert_eq!("R".parse::<BitPlane>(), Err(StegoError::InvalidBitPlane("R".into())));
        assert_eq!(
            parse_bit_planes::<&str>(&[]),
            Err(StegoError::MissingBitPlanes)
        );
    }
}
