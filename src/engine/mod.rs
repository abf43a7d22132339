//! # 求值引擎
//!
//! ## 子模块
//! - `direct`: 绑定参数的模型求值（scale、体积归一化、背景、定义域检查）
//! - `harness`: 描述符测试向量的回归执行器
//!
//! ## 依赖关系
//! - 使用 `shapes/` 与 `models/`
//! - 被 `commands/` 使用

pub mod direct;
pub mod harness;

pub use direct::DirectModel;
pub use harness::{run_model_tests, run_tests, CaseOutcome, HarnessConfig, TestReport};
