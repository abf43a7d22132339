//! # 回归测试执行器
//!
//! 逐个运行模型描述符中登记的测试向量：把覆盖值合并到默认参数上，
//! 对每个探测点求值，再与期望值比较。
//!
//! ## 判定规则
//! |actual − expected| ≤ rel·|expected|，期望值为 0 时改用绝对下限。
//! 求值出错（定义域错误等）记为失败并保留错误信息。
//!
//! ## 依赖关系
//! - 被 `commands/check.rs` 调用
//! - 使用 `engine/direct.rs` 求值
//! - 使用 `rayon` 在模型之间并行

use crate::engine::DirectModel;
use crate::error::{Result, SasError};
use crate::shapes::Model;

use rayon::prelude::*;
use serde::Serialize;

/// 比较容差
#[derive(Debug, Clone, Copy)]
pub struct HarnessConfig {
    /// 相对容差
    pub rel_tolerance: f64,
    /// 期望值为 0 时使用的绝对容差
    pub abs_tolerance: f64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            rel_tolerance: 1e-3,
            abs_tolerance: 1e-12,
        }
    }
}

impl HarnessConfig {
    pub fn with_tolerance(rel_tolerance: f64) -> Self {
        Self {
            rel_tolerance,
            ..Self::default()
        }
    }

    /// 判断实际值是否在容差内
    pub fn accepts(&self, expected: f64, actual: f64) -> bool {
        let diff = (actual - expected).abs();
        if expected == 0.0 {
            diff <= self.abs_tolerance
        } else {
            diff <= self.rel_tolerance * expected.abs()
        }
    }
}

/// 单个探测点的比较结果
#[derive(Debug, Clone, Serialize)]
pub struct CaseOutcome {
    pub model: String,
    /// 测试向量编号（从 0 开始）
    pub case: usize,
    pub probe: String,
    pub expected: f64,
    pub actual: Option<f64>,
    pub rel_error: Option<f64>,
    pub passed: bool,
    pub error: Option<String>,
}

/// 一组模型的测试结果
#[derive(Debug, Clone, Default)]
pub struct TestReport {
    pub outcomes: Vec<CaseOutcome>,
}

impl TestReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }

    /// 存在失败时转为错误
    pub fn into_result(self) -> Result<Self> {
        if self.all_passed() {
            Ok(self)
        } else {
            Err(SasError::TestFailures {
                failed: self.failed(),
                total: self.total(),
            })
        }
    }
}

/// 运行单个模型的全部测试向量
pub fn run_model_tests(model: &'static dyn Model, config: &HarnessConfig) -> Vec<CaseOutcome> {
    let descriptor = model.descriptor();
    let mut outcomes = Vec::new();

    for (index, case) in descriptor.tests.iter().enumerate() {
        let direct = DirectModel::with_overrides(model, case.overrides.iter().copied());

        for (&probe, &expected) in case.probes.iter().zip(&case.expected) {
            let result = direct.as_ref().map_err(|e| e.to_string()).and_then(|direct| {
                direct.evaluate(probe).map_err(|e| e.to_string())
            });

            let outcome = match result {
                Ok(actual) => {
                    let rel_error = if expected != 0.0 {
                        Some((actual - expected).abs() / expected.abs())
                    } else {
                        None
                    };
                    CaseOutcome {
                        model: descriptor.name.to_string(),
                        case: index,
                        probe: probe.to_string(),
                        expected,
                        actual: Some(actual),
                        rel_error,
                        passed: config.accepts(expected, actual),
                        error: None,
                    }
                }
                Err(error) => CaseOutcome {
                    model: descriptor.name.to_string(),
                    case: index,
                    probe: probe.to_string(),
                    expected,
                    actual: None,
                    rel_error: None,
                    passed: false,
                    error: Some(error),
                },
            };
            outcomes.push(outcome);
        }
    }

    outcomes
}

/// 并行运行多个模型的测试，结果按模型顺序排列
pub fn run_tests(models: &[&'static dyn Model], config: &HarnessConfig) -> TestReport {
    let per_model: Vec<Vec<CaseOutcome>> = models
        .par_iter()
        .map(|&model| run_model_tests(model, config))
        .collect();

    TestReport {
        outcomes: per_model.into_iter().flatten().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{all_models, find_model};

    #[test]
    fn test_all_registered_vectors_pass() {
        let models: Vec<_> = all_models().collect();
        let report = run_tests(&models, &HarnessConfig::default());
        assert!(report.total() > 0);
        for failure in report.failures() {
            eprintln!("{:?}", failure);
        }
        assert!(report.all_passed(), "{} of {} failed", report.failed(), report.total());
    }

    #[test]
    fn test_every_model_has_vectors() {
        for model in all_models() {
            assert!(!model.descriptor().tests.is_empty(), "{}", model.descriptor().name);
        }
    }

    #[test]
    fn test_run_is_idempotent() {
        let models: Vec<_> = all_models().collect();
        let config = HarnessConfig::default();
        let a = run_tests(&models, &config);
        let b = run_tests(&models, &config);
        assert_eq!(a.total(), b.total());
        for (x, y) in a.outcomes.iter().zip(&b.outcomes) {
            assert_eq!(x.actual.map(f64::to_bits), y.actual.map(f64::to_bits));
        }
    }

    #[test]
    fn test_tight_tolerance_reports_failures() {
        let model = find_model("core_shell_ellipsoid").unwrap();
        let report = run_tests(&[model], &HarnessConfig::with_tolerance(1e-12));
        assert!(!report.all_passed());
        assert!(matches!(report.into_result(), Err(SasError::TestFailures { .. })));
    }

    #[test]
    fn test_accepts() {
        let config = HarnessConfig::default();
        assert!(config.accepts(100.0, 100.05));
        assert!(!config.accepts(100.0, 100.2));
        assert!(config.accepts(0.0, 1e-13));
        assert!(!config.accepts(0.0, 1e-6));
    }
}
