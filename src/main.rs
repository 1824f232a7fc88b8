use clap::Parser;

use stego_pvd::{
    cli::{BpCommands, Cli, Commands, LsbCommands, PvdCommands},
    handler::{
        handle_bp_embed, handle_bp_extract, handle_lsb_embed, handle_lsb_extract, handle_psnr,
        handle_pvd_embed, handle_pvd_extract,
    },
};

/// 程序的主入口点
///
/// 负责初始化日志、解析命令行参数，并根据指定的子命令
/// 将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    // RUST_LOG=debug 可查看算法内部的诊断信息
    env_logger::init();

    // 解析命令行参数
    let cli = Cli::parse();

    // 根据子命令调用相应的处理函数
    match cli.command {
        Commands::Pvd(PvdCommands::Embed(args)) => handle_pvd_embed(args),
        Commands::Pvd(PvdCommands::Extract(args)) => handle_pvd_extract(args),
        Commands::Lsb(LsbCommands::Embed(args)) => handle_lsb_embed(args),
        Commands::Lsb(LsbCommands::Extract(args)) => handle_lsb_extract(args),
        Commands::Bp(BpCommands::Embed(args)) => handle_bp_embed(args),
        Commands::Bp(BpCommands::Extract(args)) => handle_bp_extract(args),
        Commands::Psnr(args) => handle_psnr(args).map(|_| ()),
    }
}
