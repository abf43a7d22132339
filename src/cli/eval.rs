//! # eval / er 子命令 CLI 定义
//!
//! 参数覆盖通过重复的 `--set name=value` 给出，`--demo` 以模型的
//! 演示参数为起点。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 和 `cli/batch.rs` 使用
//! - 参数传递给 `commands/eval.rs`

use crate::curve::Spacing;

use clap::{Args, ValueEnum};
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────
// 公共参数
// ─────────────────────────────────────────────────────────────

/// 模型参数覆盖
#[derive(Args, Debug, Clone, Default)]
pub struct ParameterArgs {
    /// Override a parameter, e.g. --set radius=20 (repeatable)
    #[arg(short, long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(String, f64)>,

    /// Start from the model's demo parameters instead of its defaults
    #[arg(long, default_value_t = false)]
    pub demo: bool,
}

/// 解析 `name=value`
pub fn parse_assignment(input: &str) -> Result<(String, f64), String> {
    let (name, value) = input
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", input))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing parameter name in '{}'", input));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", value.trim()))?;
    Ok((name.to_string(), value))
}

/// 解析 `qx,qy`
pub fn parse_qxy(input: &str) -> Result<(f64, f64), String> {
    let (qx, qy) = input
        .split_once(',')
        .ok_or_else(|| format!("expected QX,QY, got '{}'", input))?;
    let qx: f64 = qx.trim().parse().map_err(|_| format!("invalid qx '{}'", qx.trim()))?;
    let qy: f64 = qy.trim().parse().map_err(|_| format!("invalid qy '{}'", qy.trim()))?;
    Ok((qx, qy))
}

/// q 网格间隔
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum SpacingArg {
    /// Logarithmic spacing
    #[default]
    Log,
    /// Linear spacing
    Linear,
}

impl From<SpacingArg> for Spacing {
    fn from(arg: SpacingArg) -> Self {
        match arg {
            SpacingArg::Log => Spacing::Log,
            SpacingArg::Linear => Spacing::Linear,
        }
    }
}

/// 曲线输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum CurveFormat {
    /// CSV data file (q, qx, qy, intensity)
    Csv,
    /// XY text file with a parameter header
    Xy,
    /// PNG log-log plot
    Png,
    /// SVG log-log plot
    Svg,
}

impl CurveFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            CurveFormat::Csv => "csv",
            CurveFormat::Xy => "xy",
            CurveFormat::Png => "png",
            CurveFormat::Svg => "svg",
        }
    }
}

// ─────────────────────────────────────────────────────────────
// eval 子命令
// ─────────────────────────────────────────────────────────────

/// eval 子命令参数
#[derive(Args, Debug)]
pub struct EvalArgs {
    /// Model name (see `sasmodels list`)
    pub model: String,

    #[command(flatten)]
    pub params: ParameterArgs,

    /// Explicit q values in 1/Ang, comma separated
    #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
    pub q: Vec<f64>,

    /// q range "min-max" in 1/Ang (e.g., "1e-3-0.5")
    #[arg(short = 'r', long)]
    pub q_range: Option<String>,

    /// Number of points on the q range
    #[arg(short = 'n', long, default_value_t = 100)]
    pub points: usize,

    /// Spacing of the q range
    #[arg(long, value_enum, default_value = "log")]
    pub spacing: SpacingArg,

    /// Detector point "qx,qy" in 1/Ang (repeatable)
    #[arg(long, value_name = "QX,QY", value_parser = parse_qxy, allow_negative_numbers = true)]
    pub qxy: Vec<(f64, f64)>,

    /// Output file; prints a table when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<CurveFormat>,

    /// Title for the plot (default: model name)
    #[arg(long)]
    pub title: Option<String>,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 800)]
    pub height: u32,
}

// ─────────────────────────────────────────────────────────────
// er 子命令
// ─────────────────────────────────────────────────────────────

/// er 子命令参数
#[derive(Args, Debug)]
pub struct ErArgs {
    /// Model name (see `sasmodels list`)
    pub model: String,

    #[command(flatten)]
    pub params: ParameterArgs,

    /// Effective radius mode (1-based); all modes when omitted
    #[arg(short, long)]
    pub mode: Option<usize>,
}
