//! # sasmodels - 小角散射形状因子模型库
//!
//! 对形状模型求取向平均后的散射强度 I(q)、固定取向的二维强度
//! I(qx, qy) 与有效半径，并用内置测试向量回归校验每个模型。
//!
//! ## 模块结构
//! ```text
//! lib.rs
//!   ├── kernels/   (特殊函数、Gauss-Legendre 求积、取向投影、体积与半径)
//!   ├── models/    (参数声明、模型描述符与测试向量)
//!   ├── shapes/    (各散射模型与注册表)
//!   ├── engine/    (scale/背景组装、定义域检查、回归测试)
//!   ├── curve/     (q 网格、CSV/XY 导出、绘图)
//!   ├── parsers/   (参数文件)
//!   ├── batch/     (文件收集与并行执行)
//!   ├── cli/       (命令行参数定义)
//!   ├── commands/  (命令执行逻辑)
//!   ├── utils/     (输出样式、进度条)
//!   └── error.rs   (错误处理)
//! ```

pub mod batch;
pub mod cli;
pub mod commands;
pub mod curve;
pub mod engine;
pub mod error;
pub mod kernels;
pub mod models;
pub mod parsers;
pub mod shapes;
pub mod utils;

pub use engine::{DirectModel, HarnessConfig, TestReport};
pub use error::{Result, SasError};
pub use shapes::{all_models, load_model, Model};
