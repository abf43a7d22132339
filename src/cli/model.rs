//! # list / info 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/model.rs`

use clap::Args;

/// list 子命令参数
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show models whose category starts with this prefix (e.g., "shape")
    #[arg(short, long)]
    pub category: Option<String>,
}

/// info 子命令参数
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Model name (see `sasmodels list`)
    pub model: String,
}
