//! # 命令处理逻辑模块
//!
//! 包含处理各个子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。
//!
//! 隐写数据中没有长度字段和完整性校验：提取时必须使用与嵌入时完全相同的参数，
//! 并且结果图像不能再被有损转码，否则得到的只是无意义的数据。

use crate::bits::EmbedReport;
use crate::channel::parse_bit_planes;
use crate::cli::{
    BpEmbedArgs, BpExtractArgs, LsbEmbedArgs, LsbExtractArgs, PsnrArgs, PvdEmbedArgs,
    PvdExtractArgs, PvdSchemeArgs,
};
use crate::constants::{
    BITPLANE_OUTPUT_PREFIX, EMBED_OUTPUT_PREFIX, EXTRACT_OUTPUT_EXTENSION, EXTRACT_OUTPUT_PREFIX,
};
use crate::psnr::psnr;
use crate::steganography::pvd::PvdCodec;
use crate::steganography::{bitplane, lsb};
use anyhow::{Context, Result};
use colored::Colorize;
use image::{DynamicImage, ImageFormat};
use std::fs;
use std::path::{Path, PathBuf};

fn read_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })
}

fn read_secret(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| {
        format!(
            "Unable to read secret file: {}",
            path.to_string_lossy().red().bold()
        )
    })
}

/// 确定输出路径：未指定时在源文件旁生成 `<前缀><文件名>.<扩展名>`。
///
/// # Errors
///
/// 目标文件已存在且未使用 `--force` 时返回错误。
fn resolve_output(
    explicit: Option<PathBuf>,
    source: &Path,
    prefix: &str,
    extension: &str,
    force: bool,
) -> Result<PathBuf> {
    let path = explicit.unwrap_or_else(|| {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        source.with_file_name(format!("{prefix}{stem}.{extension}"))
    });

    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );

    Ok(path)
}

fn save_png(img: &DynamicImage, path: &Path) -> Result<()> {
    img.save_with_format(path, ImageFormat::Png).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            path.to_string_lossy().red().bold()
        )
    })
}

fn write_data(data: &[u8], path: &Path) -> Result<()> {
    fs::write(path, data).with_context(|| {
        format!(
            "Unable to write to target file: {}",
            path.to_string_lossy().red().bold()
        )
    })
}

/// 容量不足的警告由算法层记录，这里只输出带颜色的结果摘要。
fn print_embed_summary(report: &EmbedReport, output: &Path) {
    let embedded = report.embedded.to_string();
    let embedded = if report.is_partial() {
        embedded.red().bold()
    } else {
        embedded.green().bold()
    };
    println!(
        "The secret has been embedded ({}/{} bits) and saved: {}",
        embedded,
        report.requested.to_string().green().bold(),
        output.to_string_lossy().green().bold()
    );
}

fn build_codec(scheme: &PvdSchemeArgs) -> Result<PvdCodec> {
    let codec = PvdCodec::from_args(
        &scheme.range_widths,
        scheme.direction,
        scheme.zigzag,
        &scheme.plane,
    )
    .context("Invalid PVD parameters")?;

    if !codec.range_table().covers_full_domain() {
        log::warn!("Range table does not cover pixel differences up to 255");
        eprintln!(
            "{} The range widths do not cover every pixel difference up to 255. \nPairs with larger differences will carry no data.",
            "WARNING:".yellow().bold()
        );
    }

    Ok(codec)
}

/// 处理 'pvd embed' 命令的执行逻辑。
///
/// 先校验范围宽度和颜色通道，再读取秘密文件与载体图像，
/// 嵌入后以 PNG 格式保存结果。容量不足不会导致失败，只会打印警告。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 范围宽度或颜色通道无效。
/// * 无法读取秘密文件或载体图像。
/// * 目标文件已存在且未指定 `--force`。
/// * 无法写入目标图像文件。
pub fn handle_pvd_embed(args: PvdEmbedArgs) -> Result<()> {
    let codec = build_codec(&args.scheme)?;
    let output = resolve_output(args.output, &args.cover, EMBED_OUTPUT_PREFIX, "png", args.force)?;

    let secret = read_secret(&args.secret)?;
    let cover = read_image(&args.cover)?;

    let (stego, report) = codec.embed_image(&cover, &secret);
    save_png(&stego, &output)?;

    print_embed_summary(&report, &output);
    Ok(())
}

/// 处理 'pvd extract' 命令的执行逻辑。
///
/// 沿扫描顺序读完整张图像，写出所有完整字节。
/// 真实的秘密长度需要调用方自己知道并截断。
///
/// # Errors
///
/// * 范围宽度或颜色通道无效。
/// * 无法读取输入图像或写入目标文件。
pub fn handle_pvd_extract(args: PvdExtractArgs) -> Result<()> {
    let codec = build_codec(&args.scheme)?;
    let output = resolve_output(
        args.output,
        &args.input,
        EXTRACT_OUTPUT_PREFIX,
        EXTRACT_OUTPUT_EXTENSION,
        args.force,
    )?;

    let img = read_image(&args.input)?;
    let data = codec.extract_image(&img);
    write_data(&data, &output)?;

    println!(
        "{} bytes have been extracted and saved: {}",
        data.len().to_string().green().bold(),
        output.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'lsb embed' 命令的执行逻辑。
///
/// # Errors
///
/// * 位平面指令无效或为空。
/// * 无法读取输入文件或写入目标图像。
pub fn handle_lsb_embed(args: LsbEmbedArgs) -> Result<()> {
    let planes = parse_bit_planes(&args.planes).context("Invalid bit plane instructions")?;
    let output = resolve_output(args.output, &args.cover, EMBED_OUTPUT_PREFIX, "png", args.force)?;

    let secret = read_secret(&args.secret)?;
    let cover = read_image(&args.cover)?;

    let (stego, report) = lsb::embed_image(&cover, &planes, &secret);
    save_png(&stego, &output)?;

    print_embed_summary(&report, &output);
    Ok(())
}

/// 处理 'lsb extract' 命令的执行逻辑。
///
/// # Errors
///
/// * 位平面指令无效或为空。
/// * 无法读取输入图像或写入目标文件。
pub fn handle_lsb_extract(args: LsbExtractArgs) -> Result<()> {
    let planes = parse_bit_planes(&args.planes).context("Invalid bit plane instructions")?;
    let output = resolve_output(
        args.output,
        &args.input,
        EXTRACT_OUTPUT_PREFIX,
        EXTRACT_OUTPUT_EXTENSION,
        args.force,
    )?;

    let img = read_image(&args.input)?;
    let data = lsb::extract_image(&img, &planes);
    write_data(&data, &output)?;

    println!(
        "{} bytes have been extracted and saved: {}",
        data.len().to_string().green().bold(),
        output.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'bp embed' 命令的执行逻辑。
///
/// # Errors
///
/// * 位平面指令无效或为空。
/// * 无法读取任一图像或写入目标图像。
pub fn handle_bp_embed(args: BpEmbedArgs) -> Result<()> {
    let planes = parse_bit_planes(&args.planes).context("Invalid bit plane instructions")?;
    let output = resolve_output(args.output, &args.cover, EMBED_OUTPUT_PREFIX, "png", args.force)?;

    let cover = read_image(&args.cover)?;
    let secret = read_image(&args.secret)?;

    let stego = bitplane::embed(&cover, &secret, &planes);
    save_png(&stego, &output)?;

    println!(
        "The secret image has been successfully embedded and saved: {}",
        output.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'bp extract' 命令的执行逻辑。
///
/// # Errors
///
/// * 位平面指令无效或为空。
/// * 无法读取输入图像或写入目标图像。
pub fn handle_bp_extract(args: BpExtractArgs) -> Result<()> {
    let planes = parse_bit_planes(&args.planes).context("Invalid bit plane instructions")?;
    let output = resolve_output(
        args.output,
        &args.input,
        BITPLANE_OUTPUT_PREFIX,
        "png",
        args.force,
    )?;

    let img = read_image(&args.input)?;
    save_png(&bitplane::extract(&img, &planes), &output)?;

    println!(
        "The bit plane has been rendered and saved: {}",
        output.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'psnr' 命令的执行逻辑。
///
/// # Errors
///
/// * 无法读取任一图像。
/// * 两幅图像尺寸不一致。
pub fn handle_psnr(args: PsnrArgs) -> Result<f64> {
    let original = read_image(&args.input)?;
    let changed = read_image(&args.changed)?;

    let value = psnr(&original, &changed).with_context(|| {
        format!(
            "Unable to compare {} with {}",
            args.input.to_string_lossy().red().bold(),
            args.changed.to_string_lossy().red().bold()
        )
    })?;

    println!("PSNR: {}", format!("{value:.4}").green().bold());
    Ok(value)
}
