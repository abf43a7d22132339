//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `engine/`, `curve/`, `utils/`
//! - 子模块: model, eval, check, batch

pub mod batch;
pub mod check;
pub mod eval;
pub mod model;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::List(args) => model::execute_list(args),
        Commands::Info(args) => model::execute_info(args),
        Commands::Eval(args) => eval::execute(args),
        Commands::Er(args) => eval::execute_er(args),
        Commands::Check(args) => check::execute(args),
        Commands::Batch(args) => batch::execute(args),
    }
}
