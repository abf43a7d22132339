//! # sasmodels - 小角散射模型命令行工具
//!
//! ## 子命令
//! - `list`  - 列出内置模型
//! - `info`  - 显示模型参数、演示参数与有效半径模式
//! - `eval`  - 计算 I(q) / I(qx, qy)，输出表格、CSV、XY 或图像
//! - `er`    - 计算有效半径
//! - `check` - 运行模型回归测试向量
//! - `batch` - 按参数文件批量计算曲线

use clap::Parser;
use sasmodels::cli::Cli;
use sasmodels::{commands, utils};

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
