/// 默认的 PVD 量化范围宽度，对应区间
/// `[0-7] [8-15] [16-31] [32-63] [64-127] [128-255]`。
pub const DEFAULT_RANGE_WIDTHS: [&str; 6] = ["8", "8", "16", "32", "64", "128"];

/// 像素强度的最大值，所有修改后的像素都必须落在 `[0, MAX_INTENSITY]` 内。
pub const MAX_INTENSITY: i32 = 255;

/// 未指定时 PVD 使用的颜色通道。
pub const DEFAULT_PLANE: &str = "R";

/// 位平面嵌入时，秘密图像样本低于该阈值视为黑色 (写 0)。
pub const SECRET_PIXEL_THRESHOLD: u8 = 127;

/// 未指定输出路径时，嵌入结果图像的文件名前缀。
pub const EMBED_OUTPUT_PREFIX: &str = "doctored_";

/// 未指定输出路径时，提取结果文件的文件名前缀。
pub const EXTRACT_OUTPUT_PREFIX: &str = "recovered_";

/// 未指定输出路径时，位平面渲染图像的文件名前缀。
pub const BITPLANE_OUTPUT_PREFIX: &str = "bitplane_";

/// 提取出的原始数据文件扩展名。
pub const EXTRACT_OUTPUT_EXTENSION: &str = "dat";
