//! # 解析器模块
//!
//! 读取批量计算使用的参数文件。
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 使用
//! - 子模块: parfile

pub mod parfile;

pub use parfile::{parse_par_content, parse_par_file, ParameterFile};
