//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `list`: 列出内置模型
//! - `info`: 显示模型描述符
//! - `eval`: 计算 I(q) / I(qx, qy)
//! - `er`: 计算有效半径
//! - `check`: 运行模型回归测试向量
//! - `batch`: 批量处理参数文件
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: model, eval, check, batch

pub mod batch;
pub mod check;
pub mod eval;
pub mod model;

use clap::{Parser, Subcommand};

/// sasmodels - 小角散射形状因子模型
#[derive(Parser)]
#[command(name = "sasmodels")]
#[command(version)]
#[command(about = "Small-angle scattering form-factor models", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// List the built-in models
    List(model::ListArgs),

    /// Show parameters, demo values and tests of a model
    Info(model::InfoArgs),

    /// Evaluate a model at q values or (qx, qy) points
    Eval(eval::EvalArgs),

    /// Compute the effective radius of a model
    Er(eval::ErArgs),

    /// Run the reference test vectors of the models
    Check(check::CheckArgs),

    /// Evaluate every parameter file in a directory
    Batch(batch::BatchArgs),
}
