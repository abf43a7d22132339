//! # check 命令实现
//!
//! 对所选模型运行回归测试向量并汇总结果。存在失败时返回错误，
//! 使进程以非零状态退出。
//!
//! ## 依赖关系
//! - 使用 `cli/check.rs` 定义的参数
//! - 使用 `engine/harness.rs` 运行测试
//! - 使用 `csv` 写出逐条结果

use crate::cli::check::CheckArgs;
use crate::engine::{run_tests, CaseOutcome, HarnessConfig};
use crate::error::{Result, SasError};
use crate::shapes::{self, all_models, Model};
use crate::utils::output;

use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

/// 执行 check 命令
pub fn execute(args: CheckArgs) -> Result<()> {
    output::print_header("Model Validation");

    let models: Vec<&'static dyn Model> = if args.models.is_empty() {
        all_models().collect()
    } else {
        args.models
            .iter()
            .map(|name| shapes::load_model(name))
            .collect::<Result<_>>()?
    };

    if !args.tolerance.is_finite() || args.tolerance <= 0.0 {
        return Err(SasError::InvalidArgument(format!(
            "tolerance must be positive, got {}",
            args.tolerance
        )));
    }

    output::print_info(&format!(
        "Checking {} models (relative tolerance {:e})",
        models.len(),
        args.tolerance
    ));

    let report = run_tests(&models, &HarnessConfig::with_tolerance(args.tolerance));

    let shown: Vec<&CaseOutcome> = if args.failures_only {
        report.failures().collect()
    } else {
        report.outcomes.iter().collect()
    };
    if !shown.is_empty() {
        print_outcomes(&shown);
    }

    if let Some(path) = &args.report {
        write_report(&report.outcomes, path)?;
        output::print_info(&format!("Report written to '{}'", path.display()));
    }

    output::print_separator();
    if report.all_passed() {
        output::print_success(&format!("All {} test points passed", report.total()));
    } else {
        output::print_warning(&format!(
            "{} of {} test points failed",
            report.failed(),
            report.total()
        ));
    }

    report.into_result().map(|_| ())
}

fn print_outcomes(outcomes: &[&CaseOutcome]) {
    #[derive(Tabled)]
    struct OutcomeRow {
        #[tabled(rename = "Model")]
        model: String,
        #[tabled(rename = "Case")]
        case: usize,
        #[tabled(rename = "Probe")]
        probe: String,
        #[tabled(rename = "Expected")]
        expected: String,
        #[tabled(rename = "Actual")]
        actual: String,
        #[tabled(rename = "Rel. error")]
        rel_error: String,
        #[tabled(rename = "Status")]
        status: &'static str,
    }

    let rows: Vec<OutcomeRow> = outcomes
        .iter()
        .map(|o| OutcomeRow {
            model: o.model.clone(),
            case: o.case,
            probe: o.probe.clone(),
            expected: format!("{:.6e}", o.expected),
            actual: match (&o.actual, &o.error) {
                (Some(v), _) => format!("{:.6e}", v),
                (None, Some(e)) => e.clone(),
                (None, None) => "-".to_string(),
            },
            rel_error: o
                .rel_error
                .map(|r| format!("{:.2e}", r))
                .unwrap_or_else(|| "-".to_string()),
            status: if o.passed { "ok" } else { "FAIL" },
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

/// 把逐条结果写入 CSV
pub fn write_report(outcomes: &[CaseOutcome], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for outcome in outcomes {
        wtr.serialize(outcome)?;
    }
    wtr.flush().map_err(|e| SasError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::run_model_tests;

    #[test]
    fn test_write_report() {
        let dir = std::env::temp_dir().join("sasmodels_check_report");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("report.csv");

        let model = shapes::load_model("sphere").unwrap();
        let outcomes = run_model_tests(model, &HarnessConfig::default());
        write_report(&outcomes, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("model,case,probe,expected,actual"));
        assert_eq!(lines.count(), outcomes.len());
    }

    #[test]
    fn test_unknown_model_rejected() {
        let args = CheckArgs {
            models: vec!["teapot".to_string()],
            tolerance: 1e-3,
            report: None,
            failures_only: false,
        };
        assert!(matches!(execute(args), Err(SasError::UnknownModel(_))));
    }
}
