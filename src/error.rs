//! # 统一错误处理模块
//!
//! 定义 sasmodels 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// sasmodels 统一错误类型
#[derive(Error, Debug)]
pub enum SasError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse parameter file: {path}\nReason: {reason}")]
    ParseError { path: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 模型定义错误（加载/校验时报告）
    // ─────────────────────────────────────────────────────────────
    #[error("Unknown model '{0}' (run `sasmodels list` to see available models)")]
    UnknownModel(String),

    #[error("Model '{model}' has no parameter named '{name}'")]
    UnknownParameter { model: String, name: String },

    #[error("Invalid definition for model '{model}': {reason}")]
    InvalidDescriptor { model: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 定义域错误（计算时报告）
    // ─────────────────────────────────────────────────────────────
    #[error("Parameter '{name}' = {value} is outside [{lower}, {upper}]")]
    OutOfBounds {
        name: String,
        value: f64,
        lower: f64,
        upper: f64,
    },

    #[error("Domain error: {0}")]
    DomainError(String),

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid range format: {0}")]
    InvalidRange(String),

    // ─────────────────────────────────────────────────────────────
    // 回归测试
    // ─────────────────────────────────────────────────────────────
    #[error("{failed} of {total} model test cases failed")]
    TestFailures { failed: usize, total: usize },

    // ─────────────────────────────────────────────────────────────
    // CSV / 绘图错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Plot error: {0}")]
    PlotError(String),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("No matching files found with pattern: {pattern}")]
    NoFilesFound { pattern: String },

    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, SasError>;
