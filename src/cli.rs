//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::constants::DEFAULT_PLANE;
use crate::steganography::scan::Direction;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// 一款图像隐写命令行工具，支持像素值差分 (PVD)、位平面替换 (LSB) 与位平面图像隐写。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款图像隐写命令行工具，支持像素值差分 (PVD)、位平面替换 (LSB) 与位平面图像隐写。\n结果图像总是以 PNG 格式保存。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令。
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 像素值差分 (PVD)：在像素对的强度差中隐藏数据。
    #[command(subcommand)]
    Pvd(PvdCommands),

    /// 位平面替换 (LSB)：在指定位平面中逐位隐藏数据。
    #[command(subcommand)]
    Lsb(LsbCommands),

    /// 位平面图像：把黑白图像写入位平面，或渲染位平面。
    #[command(subcommand)]
    Bp(BpCommands),

    /// 计算两幅图像之间的峰值信噪比 (PSNR)。
    Psnr(PsnrArgs),
}

#[derive(Subcommand, Debug)]
pub enum PvdCommands {
    /// 通过 PVD 把秘密文件嵌入载体图像。
    Embed(PvdEmbedArgs),

    /// 通过 PVD 从图像中提取数据。
    Extract(PvdExtractArgs),
}

/// PVD 嵌入与提取共用的参数，两端必须完全一致。
#[derive(Args, Debug, Clone)]
pub struct PvdSchemeArgs {
    /// 遍历图像的方向。
    #[arg(short, long, value_enum, default_value_t = Direction::Row)]
    pub direction: Direction,

    /// 是否以之字形往返遍历行/列。
    #[arg(short, long)]
    pub zigzag: bool,

    /// RGBA 图像中用于嵌入的颜色通道 (R/G/B/A)，灰度图像忽略此项。
    #[arg(short, long, default_value = DEFAULT_PLANE)]
    pub plane: String,

    /// 量化范围宽度，例如 `2 2 4 8 16 32`。缺省为 `8 8 16 32 64 128`。
    #[arg(value_name = "RANGE_WIDTHS")]
    pub range_widths: Vec<String>,
}

/// 'pvd embed' 命令所需的参数。
#[derive(Args, Debug)]
pub struct PvdEmbedArgs {
    /// 要嵌入的秘密文件。
    #[arg(short, long)]
    pub secret: PathBuf,

    /// 载体图像文件路径。
    #[arg(short, long)]
    pub cover: PathBuf,

    /// 结果图像的输出路径。缺省为载体旁的 `doctored_<名称>.png`。
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,

    #[command(flatten)]
    pub scheme: PvdSchemeArgs,
}

/// 'pvd extract' 命令所需的参数。
#[derive(Args, Debug)]
pub struct PvdExtractArgs {
    /// 含有隐藏数据的图像。
    #[arg(short, long)]
    pub input: PathBuf,

    /// 提取数据的输出路径。缺省为输入旁的 `recovered_<名称>.dat`。
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,

    #[command(flatten)]
    pub scheme: PvdSchemeArgs,
}

#[derive(Subcommand, Debug)]
pub enum LsbCommands {
    /// 把秘密文件写入指定的位平面。
    Embed(LsbEmbedArgs),

    /// 从指定的位平面读出数据。
    Extract(LsbExtractArgs),
}

/// 'lsb embed' 命令所需的参数。
#[derive(Args, Debug)]
pub struct LsbEmbedArgs {
    /// 要嵌入的秘密文件。
    #[arg(short, long)]
    pub secret: PathBuf,

    /// 载体图像文件路径。
    #[arg(short, long)]
    pub cover: PathBuf,

    /// 结果图像的输出路径。缺省为载体旁的 `doctored_<名称>.png`。
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,

    /// 位平面指令，例如 `R0` 或 `B2 R1`。
    #[arg(value_name = "BIT_PLANES", required = true)]
    pub planes: Vec<String>,
}

/// 'lsb extract' 命令所需的参数。
#[derive(Args, Debug)]
pub struct LsbExtractArgs {
    /// 含有隐藏数据的图像。
    #[arg(short, long)]
    pub input: PathBuf,

    /// 提取数据的输出路径。缺省为输入旁的 `recovered_<名称>.dat`。
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,

    /// 位平面指令，必须与嵌入时相同。
    #[arg(value_name = "BIT_PLANES", required = true)]
    pub planes: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum BpCommands {
    /// 把秘密图像写入指定的位平面。
    Embed(BpEmbedArgs),

    /// 渲染指定位平面：所有位都为 1 的像素显示为黑色。
    Extract(BpExtractArgs),
}

/// 'bp embed' 命令所需的参数。
#[derive(Args, Debug)]
pub struct BpEmbedArgs {
    /// 要隐藏的黑白秘密图像。
    #[arg(short, long)]
    pub secret: PathBuf,

    /// 载体图像文件路径。
    #[arg(short, long)]
    pub cover: PathBuf,

    /// 结果图像的输出路径。缺省为载体旁的 `doctored_<名称>.png`。
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,

    /// 位平面指令，例如 `R0` 或 `B2 R1`。
    #[arg(value_name = "BIT_PLANES", required = true)]
    pub planes: Vec<String>,
}

/// 'bp extract' 命令所需的参数。
#[derive(Args, Debug)]
pub struct BpExtractArgs {
    /// 要渲染位平面的图像。
    #[arg(short, long)]
    pub input: PathBuf,

    /// 渲染结果的输出路径。缺省为输入旁的 `bitplane_<名称>.png`。
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,

    /// 位平面指令，例如 `R0` 或 `B2 R1`。
    #[arg(value_name = "BIT_PLANES", required = true)]
    pub planes: Vec<String>,
}

/// 'psnr' 命令所需的参数。
#[derive(Args, Debug)]
pub struct PsnrArgs {
    /// 原始图像。
    #[arg(short, long)]
    pub input: PathBuf,

    /// 修改后的图像。
    #[arg(short, long)]
    pub changed: PathBuf,
}
