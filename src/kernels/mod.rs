//! # 数值核心模块
//!
//! 形状因子计算所需的底层数值例程。
//!
//! ## 子模块
//! - `special`: 贝塞尔类特殊函数（含可去奇点处理）
//! - `quadrature`: Gauss–Legendre 求积表
//! - `orientation`: 粒子取向与二维 q 投影
//! - `radius`: 几何体积与有效半径
//!
//! ## 依赖关系
//! - 被 `shapes/` 调用
//! - 无 crate 内其他依赖

pub mod orientation;
pub mod quadrature;
pub mod radius;
pub mod special;

pub use orientation::{Orientation, QProjection};
pub use quadrature::{GaussRule, GAUSS76};
