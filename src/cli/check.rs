//! # check 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/check.rs`

use clap::Args;
use std::path::PathBuf;

/// check 子命令参数
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Models to check (all models when omitted)
    pub models: Vec<String>,

    /// Relative tolerance for comparing against the expected values
    #[arg(short, long, default_value_t = 1e-3)]
    pub tolerance: f64,

    /// Write the per-case results to a CSV file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Only print failing cases
    #[arg(long, default_value_t = false)]
    pub failures_only: bool,
}
