//! # batch 子命令 CLI 定义
//!
//! 对目录中的每个参数文件 (.pars) 计算一条 I(q) 曲线。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/batch.rs`

use super::eval::{CurveFormat, SpacingArg};
use clap::Args;
use std::path::PathBuf;

/// batch 子命令参数
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Input: parameter file or directory containing parameter files
    pub input: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "curves")]
    pub output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: CurveFormat,

    /// q range "min-max" in 1/Ang
    #[arg(short = 'r', long, default_value = "1e-3-0.5")]
    pub q_range: String,

    /// Number of points on the q range
    #[arg(short = 'n', long, default_value_t = 200)]
    pub points: usize,

    /// Spacing of the q range
    #[arg(long, value_enum, default_value = "log")]
    pub spacing: SpacingArg,

    /// Glob pattern for input files (e.g., "*.pars,*.txt")
    #[arg(long, default_value = "*.pars")]
    pub pattern: String,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Recurse into subdirectories
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 800)]
    pub height: u32,
}
