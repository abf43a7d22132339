//! # I(q) 曲线模块
//!
//! 模型求值结果的组织、导出与绘图。
//!
//! ## 子模块
//! - `grid`: q 网格（线性/对数）与范围解析
//! - `export`: 数据导出 (CSV/XY)
//! - `plot`: 图表生成 (PNG/SVG)
//!
//! ## 依赖关系
//! - 被 `commands/eval.rs` 和 `commands/batch.rs` 使用
//! - 使用 `engine/` 求值

pub mod export;
pub mod grid;
pub mod plot;

pub use grid::{QGrid, Spacing};

use crate::engine::DirectModel;
use crate::error::Result;

use serde::Serialize;

/// 一维曲线上的点
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CurvePoint {
    pub q: f64,
    pub intensity: f64,
}

/// 探测器平面上的点
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DetectorPoint {
    pub qx: f64,
    pub qy: f64,
    pub intensity: f64,
}

/// 一次求值得到的完整曲线
#[derive(Debug, Clone)]
pub struct IqCurve {
    /// 模型名称
    pub model: String,
    /// 参数 (名称, 值)，用于导出文件头
    pub parameters: Vec<(String, f64)>,
    pub points: Vec<CurvePoint>,
    pub detector: Vec<DetectorPoint>,
}

impl IqCurve {
    /// 在给定的 q 列表和 (qx, qy) 列表上求值
    pub fn compute(model: &DirectModel, q: &[f64], qxy: &[(f64, f64)]) -> Result<Self> {
        let intensity = model.curve(q)?;
        let intensity_xy = model.curve_xy(qxy)?;

        Ok(Self {
            model: model.name().to_string(),
            parameters: model
                .parameters()
                .iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
            points: q
                .iter()
                .zip(intensity)
                .map(|(&q, intensity)| CurvePoint { q, intensity })
                .collect(),
            detector: qxy
                .iter()
                .zip(intensity_xy)
                .map(|(&(qx, qy), intensity)| DetectorPoint { qx, qy, intensity })
                .collect(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.detector.is_empty()
    }
}
