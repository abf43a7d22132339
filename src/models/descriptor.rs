//! # 模型描述符
//!
//! 每个模型的静态定义：名称、标题、分类、参数表、演示参数与回归测试向量。
//! 描述符在模型加载时校验（`validate`），之后不再修改。
//!
//! ## 校验规则
//! - 参数名唯一且非空
//! - 下限 ≤ 默认值 ≤ 上限
//! - 演示参数与测试向量中引用的参数名必须存在
//! - 每个测试向量的探测点与期望值一一对应
//!
//! ## 依赖关系
//! - 被 `shapes/` 各模型定义使用
//! - 被 `engine/` 用于参数解析、定义域检查与回归测试
//! - 使用 `models/parameter.rs`

use crate::error::{Result, SasError};
use crate::models::parameter::{common_parameters, ParameterRole, ParameterSpec, Parameters};

use std::collections::HashSet;
use std::fmt;

/// 测试向量中的探测点
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Probe {
    /// 一维：|q|
    Q(f64),
    /// 二维：(qx, qy)
    Qxy(f64, f64),
    /// 有效半径（默认模式）
    EffectiveRadius,
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Probe::Q(q) => write!(f, "q={}", q),
            Probe::Qxy(qx, qy) => write!(f, "(qx,qy)=({}, {})", qx, qy),
            Probe::EffectiveRadius => write!(f, "ER"),
        }
    }
}

/// 回归测试向量
#[derive(Debug, Clone)]
pub struct TestCase {
    /// 覆盖默认值的参数
    pub overrides: Vec<(&'static str, f64)>,
    pub probes: Vec<Probe>,
    pub expected: Vec<f64>,
}

impl TestCase {
    /// 单个探测点的测试向量
    pub fn new(overrides: &[(&'static str, f64)], probe: Probe, expected: f64) -> Self {
        Self {
            overrides: overrides.to_vec(),
            probes: vec![probe],
            expected: vec![expected],
        }
    }

    /// 多个探测点共享同一组参数
    pub fn many(overrides: &[(&'static str, f64)], probes: &[Probe], expected: &[f64]) -> Self {
        Self {
            overrides: overrides.to_vec(),
            probes: probes.to_vec(),
            expected: expected.to_vec(),
        }
    }
}

/// 模型描述符
#[derive(Debug, Clone)]
pub struct ModelDescriptor {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    /// 完整参数表（公共参数 scale、background 在前）
    pub parameters: Vec<ParameterSpec>,
    /// 数值内核源文件名（仅作说明）
    pub source: Vec<&'static str>,
    pub demo: Vec<(&'static str, f64)>,
    pub tests: Vec<TestCase>,
}

impl ModelDescriptor {
    /// 创建新的描述符，参数表只含公共参数
    pub fn new(name: &'static str, title: &'static str, category: &'static str) -> Self {
        Self {
            name,
            title,
            description: "",
            category,
            parameters: common_parameters().to_vec(),
            source: Vec::new(),
            demo: Vec::new(),
            tests: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// 追加模型自身的参数（排在公共参数之后）
    pub fn with_parameters(mut self, parameters: Vec<ParameterSpec>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    pub fn with_source(mut self, source: &[&'static str]) -> Self {
        self.source = source.to_vec();
        self
    }

    pub fn with_demo(mut self, demo: &[(&'static str, f64)]) -> Self {
        self.demo = demo.to_vec();
        self
    }

    pub fn with_tests(mut self, tests: Vec<TestCase>) -> Self {
        self.tests = tests;
        self
    }

    /// 按名称查找参数
    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// 模型自身的参数（不含公共参数）
    pub fn model_parameters(&self) -> &[ParameterSpec] {
        &self.parameters[common_parameters().len()..]
    }

    /// 校验描述符的内部一致性
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(self.invalid("model name is empty"));
        }

        let mut seen = HashSet::new();
        for p in &self.parameters {
            if p.name.is_empty() {
                return Err(self.invalid("parameter with empty name"));
            }
            if !seen.insert(p.name) {
                return Err(self.invalid(&format!("duplicate parameter '{}'", p.name)));
            }
            let (lower, upper) = p.limits;
            if !(lower <= upper) {
                return Err(self.invalid(&format!(
                    "parameter '{}' has inverted bounds [{}, {}]",
                    p.name, lower, upper
                )));
            }
            if !p.default.is_finite() || !p.contains(p.default) {
                return Err(self.invalid(&format!(
                    "default {} of '{}' is outside [{}, {}]",
                    p.default, p.name, lower, upper
                )));
            }
        }

        for (name, _) in &self.demo {
            if self.parameter(name).is_none() {
                return Err(self.invalid(&format!("demo references unknown parameter '{}'", name)));
            }
        }

        for (index, case) in self.tests.iter().enumerate() {
            for (name, _) in &case.overrides {
                if self.parameter(name).is_none() {
                    return Err(self.invalid(&format!(
                        "test {} references unknown parameter '{}'",
                        index, name
                    )));
                }
            }
            if case.probes.is_empty() || case.probes.len() != case.expected.len() {
                return Err(self.invalid(&format!(
                    "test {} has {} probes but {} expected values",
                    index,
                    case.probes.len(),
                    case.expected.len()
                )));
            }
        }

        Ok(())
    }

    /// 默认参数值
    pub fn defaults(&self) -> Parameters {
        Parameters::from_specs(&self.parameters)
    }

    /// 在默认值上应用覆盖值
    pub fn resolve<I, K>(&self, overrides: I) -> Result<Parameters>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut pars = self.defaults();
        for (name, value) in overrides {
            let name = name.as_ref();
            if !pars.set(name, value) {
                return Err(SasError::UnknownParameter {
                    model: self.name.to_string(),
                    name: name.to_string(),
                });
            }
        }
        Ok(pars)
    }

    /// 演示参数集
    pub fn demo_parameters(&self) -> Result<Parameters> {
        self.resolve(self.demo.iter().copied())
    }

    /// 定义域检查：所有参数在上下限内，尺寸参数非负
    ///
    /// 壳层尺寸是否大于核尺寸不在此检查。
    pub fn check_domain(&self, pars: &Parameters) -> Result<()> {
        for spec in &self.parameters {
            let value = pars.get(spec.name).ok_or_else(|| SasError::UnknownParameter {
                model: self.name.to_string(),
                name: spec.name.to_string(),
            })?;

            if spec.role == ParameterRole::Volume && value < 0.0 {
                return Err(SasError::DomainError(format!(
                    "dimension '{}' of model '{}' is negative ({})",
                    spec.name, self.name, value
                )));
            }

            if !spec.contains(value) {
                return Err(SasError::OutOfBounds {
                    name: spec.name.to_string(),
                    value,
                    lower: spec.limits.0,
                    upper: spec.limits.1,
                });
            }
        }
        Ok(())
    }

    fn invalid(&self, reason: &str) -> SasError {
        SasError::InvalidDescriptor {
            model: self.name.to_string(),
            reason: reason.to_string(),
        }
    }
}
