//! # 模型参数定义
//!
//! 每个参数是一条声明式记录：名称、单位、默认值、上下限、角色与说明。
//! 角色决定参数在平均计算中的处理方式：
//! - `Volume`: 决定粒子体积的尺寸参数（多分散性作用于此类参数）
//! - `Sld`: 散射长度密度，普通标量
//! - `Orientation`: 取向角，仅二维计算使用
//! - `Plain`: 其他参数
//!
//! ## 依赖关系
//! - 被 `models/descriptor.rs` 和 `shapes/` 使用
//! - 被 `engine/` 用于参数解析与定义域检查

use serde::Serialize;
use std::fmt;
use std::ops::Index;

/// 参数角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterRole {
    Plain,
    Volume,
    Sld,
    Orientation,
}

impl fmt::Display for ParameterRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterRole::Plain => write!(f, ""),
            ParameterRole::Volume => write!(f, "volume"),
            ParameterRole::Sld => write!(f, "sld"),
            ParameterRole::Orientation => write!(f, "orientation"),
        }
    }
}

/// 单个参数的声明
#[derive(Debug, Clone, Serialize)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub units: &'static str,
    pub default: f64,
    /// (下限, 上限)，可为 ±∞
    pub limits: (f64, f64),
    pub role: ParameterRole,
    pub description: &'static str,
}

impl ParameterSpec {
    pub const fn new(
        name: &'static str,
        units: &'static str,
        default: f64,
        limits: (f64, f64),
        role: ParameterRole,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            units,
            default,
            limits,
            role,
            description,
        }
    }

    /// 值是否落在上下限内（NaN 永远不在范围内）
    pub fn contains(&self, value: f64) -> bool {
        value >= self.limits.0 && value <= self.limits.1
    }
}

/// 所有模型共有的参数，排在参数表最前
pub fn common_parameters() -> [ParameterSpec; 2] {
    [
        ParameterSpec::new(
            "scale",
            "",
            1.0,
            (0.0, f64::INFINITY),
            ParameterRole::Plain,
            "Source intensity",
        ),
        ParameterSpec::new(
            "background",
            "1/cm",
            0.0,
            (f64::NEG_INFINITY, f64::INFINITY),
            ParameterRole::Plain,
            "Source background",
        ),
    ]
}

/// 解析后的完整参数值集合（与模型参数表一一对应，顺序一致）
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    names: Vec<&'static str>,
    values: Vec<f64>,
}

impl Parameters {
    /// 由参数表默认值构造
    pub fn from_specs(specs: &[ParameterSpec]) -> Self {
        Self {
            names: specs.iter().map(|p| p.name).collect(),
            values: specs.iter().map(|p| p.default).collect(),
        }
    }

    /// 按名称取值
    pub fn get(&self, name: &str) -> Option<f64> {
        self.position(name).map(|i| self.values[i])
    }

    /// 按名称赋值；名称不存在时返回 false
    pub fn set(&mut self, name: &str, value: f64) -> bool {
        match self.position(name) {
            Some(i) => {
                self.values[i] = value;
                true
            }
            None => false,
        }
    }

    /// 遍历 (名称, 值)
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.names.iter().copied().zip(self.values.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| *n == name)
    }
}

/// 按名称索引，名称不存在时 panic（与 `HashMap` 的索引语义一致）
///
/// 仅供模型内核读取自身声明过的参数。
impl Index<&str> for Parameters {
    type Output = f64;

    fn index(&self, name: &str) -> &f64 {
        match self.position(name) {
            Some(i) => &self.values[i],
            None => panic!("no parameter named '{}'", name),
        }
    }
}
