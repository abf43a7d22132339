//! # 数据模型模块
//!
//! 定义模型描述符、参数表与回归测试向量。
//!
//! ## 依赖关系
//! - 被 `shapes/`、`engine/` 和 `commands/` 使用
//! - 子模块: parameter, descriptor

pub mod descriptor;
pub mod parameter;

pub use descriptor::{ModelDescriptor, Probe, TestCase};
pub use parameter::{ParameterRole, ParameterSpec, Parameters};
