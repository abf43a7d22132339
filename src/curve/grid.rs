//! # q 网格
//!
//! 生成线性或对数间隔的 q 值，并解析 "min-max" 形式的范围字符串。
//! 范围两端允许科学计数法，如 `1e-3-0.5`。

use crate::error::{Result, SasError};

use regex::Regex;
use std::sync::LazyLock;

/// 网格间隔方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Spacing {
    Linear,
    #[default]
    Log,
}

/// q 网格
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QGrid {
    pub min: f64,
    pub max: f64,
    pub points: usize,
    pub spacing: Spacing,
}

impl QGrid {
    pub fn new(min: f64, max: f64, points: usize, spacing: Spacing) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min < 0.0 || max < min {
            return Err(SasError::InvalidRange(format!(
                "{}-{} (must be 0 <= min <= max)",
                min, max
            )));
        }
        if spacing == Spacing::Log && min == 0.0 {
            return Err(SasError::InvalidRange(format!(
                "{}-{} (log spacing needs min > 0)",
                min, max
            )));
        }
        if points == 0 {
            return Err(SasError::InvalidArgument("grid needs at least one point".to_string()));
        }
        Ok(Self {
            min,
            max,
            points,
            spacing,
        })
    }

    /// 由范围字符串构造
    pub fn parse(range: &str, points: usize, spacing: Spacing) -> Result<Self> {
        let (min, max) = parse_range(range)?;
        Self::new(min, max, points, spacing)
    }

    /// 网格上的 q 值（含两端点）
    pub fn values(&self) -> Vec<f64> {
        if self.points == 1 {
            return vec![self.min];
        }
        let last = (self.points - 1) as f64;
        match self.spacing {
            Spacing::Linear => {
                let step = (self.max - self.min) / last;
                (0..self.points).map(|i| self.min + i as f64 * step).collect()
            }
            Spacing::Log => {
                let (lo, hi) = (self.min.ln(), self.max.ln());
                let step = (hi - lo) / last;
                (0..self.points).map(|i| (lo + i as f64 * step).exp()).collect()
            }
        }
    }
}

static RANGE_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d*\.?\d+(?:[eE][-+]?\d+)?)\s*[-:]\s*(\d*\.?\d+(?:[eE][-+]?\d+)?)\s*$").ok()
});

/// 解析 q 范围 "min-max"（也接受 "min:max"）
pub fn parse_range(range: &str) -> Result<(f64, f64)> {
    let re = RANGE_RE
        .as_ref()
        .ok_or_else(|| SasError::Other("range pattern failed to compile".to_string()))?;
    let caps = re
        .captures(range)
        .ok_or_else(|| SasError::InvalidRange(range.to_string()))?;

    let min: f64 = caps[1]
        .parse()
        .map_err(|_| SasError::InvalidRange(range.to_string()))?;
    let max: f64 = caps[2]
        .parse()
        .map_err(|_| SasError::InvalidRange(range.to_string()))?;

    if max <= min {
        return Err(SasError::InvalidRange(format!("{} (must be min < max)", range)));
    }

    Ok((min, max))
}
