//! # batch 命令实现
//!
//! 对每个参数文件 (.pars) 计算一条 I(q) 曲线并写入输出目录，
//! 输出文件名为 `<文件名>.<扩展名>`。
//!
//! ## 依赖关系
//! - 使用 `cli/batch.rs` 定义的 BatchArgs
//! - 使用 `batch/` 模块收集文件并并行处理
//! - 使用 `parsers/parfile.rs` 读取参数文件

use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::batch::BatchArgs;
use crate::cli::eval::CurveFormat;
use crate::commands::eval::write_curve;
use crate::curve::{plot::PlotOptions, IqCurve, QGrid};
use crate::engine::DirectModel;
use crate::error::{Result, SasError};
use crate::parsers;
use crate::utils::output;

use std::fs;
use std::path::{Path, PathBuf};

/// 批量处理配置
struct BatchConfig {
    output_dir: PathBuf,
    q: Vec<f64>,
    format: CurveFormat,
    width: u32,
    height: u32,
    overwrite: bool,
}

/// 执行 batch 命令
pub fn execute(args: BatchArgs) -> Result<()> {
    output::print_header("Batch I(q) Calculation");

    if !args.input.exists() {
        return Err(SasError::FileNotFound {
            path: args.input.display().to_string(),
        });
    }

    let collector = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)
        .recursive(args.recursive);
    let files = collector.collect()?;

    if files.is_empty() {
        return Err(SasError::NoFilesFound {
            pattern: args.pattern.clone(),
        });
    }

    if collector.is_directory() {
        output::print_info(&format!(
            "Batch mode: {} parameter files in '{}'",
            files.len(),
            args.input.display()
        ));
    } else {
        output::print_info(&format!("Single file mode: '{}'", args.input.display()));
    }

    let grid = QGrid::parse(&args.q_range, args.points, args.spacing.into())?;
    output::print_info(&format!(
        "q grid: {:e} - {:e} 1/Ang, {} points",
        grid.min, grid.max, grid.points
    ));
    output::print_info(&format!("Output format: {:?}", args.format));

    fs::create_dir_all(&args.output).map_err(|e| SasError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    let config = BatchConfig {
        output_dir: args.output.clone(),
        q: grid.values(),
        format: args.format,
        width: args.width,
        height: args.height,
        overwrite: args.overwrite,
    };

    let runner = BatchRunner::new(args.jobs);
    let result = runner.run(files, |file| process_file(file, &config));

    output::print_separator();
    output::print_success(&format!(
        "Batch complete: {} success, {} skipped, {} failed",
        result.success, result.skipped, result.failed
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed files:");
        for (path, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    Ok(())
}

/// 处理单个参数文件
fn process_file(input: &Path, config: &BatchConfig) -> ProcessResult {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let output_file = config
        .output_dir
        .join(format!("{}.{}", stem, config.format.extension()));

    if output_file.exists() && !config.overwrite {
        return ProcessResult::Skipped(format!(
            "Output exists, skipping: {}",
            output_file.display()
        ));
    }

    match compute_and_write(input, &output_file, config) {
        Ok(()) => {
            ProcessResult::Success(format!("{} -> {}", input.display(), output_file.display()))
        }
        Err(e) => ProcessResult::Failed(input.display().to_string(), e.to_string()),
    }
}

fn compute_and_write(input: &Path, output: &Path, config: &BatchConfig) -> Result<()> {
    let parfile = parsers::parse_par_file(input)?;
    let model = DirectModel::load(&parfile.model, parfile.overrides.iter().cloned())?;
    let curve = IqCurve::compute(&model, &config.q, &[])?;

    let options = PlotOptions {
        title: format!("{} ({})", parfile.name, parfile.model),
        width: config.width,
        height: config.height,
    };
    write_curve(&curve, output, config.format, &options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(dir: &Path, overwrite: bool) -> BatchConfig {
        BatchConfig {
            output_dir: dir.to_path_buf(),
            q: vec![0.01, 0.05, 0.1],
            format: CurveFormat::Csv,
            width: 400,
            height: 300,
            overwrite,
        }
    }

    #[test]
    fn test_process_file() {
        let dir = std::env::temp_dir().join("sasmodels_batch_process");
        let out = dir.join("out");
        fs::create_dir_all(&out).unwrap();

        let good = dir.join("good.pars");
        fs::write(&good, "model = sphere\nradius = 40\n").unwrap();
        let bad = dir.join("bad.pars");
        fs::write(&bad, "model = sphere\nteapot = 1\n").unwrap();
        let _ = fs::remove_file(out.join("good.csv"));

        assert!(matches!(
            process_file(&good, &config(&out, false)),
            ProcessResult::Success(_)
        ));
        assert!(out.join("good.csv").exists());
        assert!(matches!(
            process_file(&good, &config(&out, false)),
            ProcessResult::Skipped(_)
        ));
        assert!(matches!(
            process_file(&good, &config(&out, true)),
            ProcessResult::Success(_)
        ));
        assert!(matches!(
            process_file(&bad, &config(&out, true)),
            ProcessResult::Failed(_, _)
        ));
    }
}
