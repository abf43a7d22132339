//! # eval / er 命令实现
//!
//! 对单个模型在 q 列表、q 网格或探测器点上求强度，或计算有效半径。
//!
//! ## 功能
//! - `--q` 与 `--q-range` 可同时给出，按先列表后网格的顺序合并
//! - 两者都未给出且没有 `--qxy` 时使用默认网格 1e-3 - 0.5 Å⁻¹
//! - 未指定输出文件时打印表格，否则按格式（或扩展名）写出
//!
//! ## 依赖关系
//! - 使用 `cli/eval.rs` 定义的参数
//! - 使用 `engine/` 求值，`curve/` 导出与绘图

use crate::cli::eval::{CurveFormat, ErArgs, EvalArgs, ParameterArgs};
use crate::curve::{self, plot::PlotOptions, IqCurve, QGrid, Spacing};
use crate::engine::DirectModel;
use crate::error::Result;
use crate::shapes;
use crate::utils::output;

use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

const DEFAULT_Q_MIN: f64 = 1e-3;
const DEFAULT_Q_MAX: f64 = 0.5;

/// 按 `--demo` 与 `--set` 构造求值器
pub fn build_model(name: &str, params: &ParameterArgs) -> Result<DirectModel> {
    let model = shapes::load_model(name)?;
    let mut overrides: Vec<(String, f64)> = Vec::new();
    if params.demo {
        overrides.extend(
            model
                .descriptor()
                .demo
                .iter()
                .map(|&(k, v)| (k.to_string(), v)),
        );
    }
    overrides.extend(params.set.iter().cloned());
    DirectModel::with_overrides(model, overrides)
}

/// 合并显式 q 值与 q 网格
fn collect_q(args: &EvalArgs) -> Result<Vec<f64>> {
    let mut q = args.q.clone();
    if let Some(range) = &args.q_range {
        q.extend(QGrid::parse(range, args.points, args.spacing.into())?.values());
    } else if q.is_empty() && args.qxy.is_empty() {
        q = QGrid::new(DEFAULT_Q_MIN, DEFAULT_Q_MAX, args.points, Spacing::Log)?.values();
    }
    Ok(q)
}

/// 执行 eval 命令
pub fn execute(args: EvalArgs) -> Result<()> {
    output::print_header("Scattering Intensity");

    let model = build_model(&args.model, &args.params)?;
    let q = collect_q(&args)?;

    output::print_info(&format!(
        "Model '{}': {} q values, {} detector points",
        model.name(),
        q.len(),
        args.qxy.len()
    ));
    output::print_parameters(model.parameters().iter());

    let curve = IqCurve::compute(&model, &q, &args.qxy)?;

    match &args.output {
        None => print_curve(&curve),
        Some(path) => {
            let format = args.format.unwrap_or_else(|| guess_format_from_extension(path));
            let title = args.title.clone().unwrap_or_else(|| curve.model.clone());
            let options = PlotOptions {
                title,
                width: args.width,
                height: args.height,
            };
            write_curve(&curve, path, format, &options)?;
            output::print_success(&format!("Curve saved to '{}'", path.display()));
        }
    }

    Ok(())
}

/// 按格式写出曲线
pub fn write_curve(
    curve: &IqCurve,
    path: &Path,
    format: CurveFormat,
    options: &PlotOptions,
) -> Result<()> {
    match format {
        CurveFormat::Csv => curve::export::to_csv(curve, path),
        CurveFormat::Xy => curve::export::to_xy(curve, path),
        CurveFormat::Png | CurveFormat::Svg => {
            curve::plot::generate_iq_plot(curve, path, options, format == CurveFormat::Svg)
        }
    }
}

/// 根据扩展名推断输出格式
pub fn guess_format_from_extension(path: &Path) -> CurveFormat {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .as_deref()
    {
        Some("png") => CurveFormat::Png,
        Some("svg") => CurveFormat::Svg,
        Some("xy") | Some("dat") | Some("txt") => CurveFormat::Xy,
        _ => CurveFormat::Csv,
    }
}

fn print_curve(curve: &IqCurve) {
    #[derive(Tabled)]
    struct PointRow {
        #[tabled(rename = "q (1/Ang)")]
        q: String,
        #[tabled(rename = "I(q) (1/cm)")]
        intensity: String,
    }

    #[derive(Tabled)]
    struct DetectorRow {
        #[tabled(rename = "qx (1/Ang)")]
        qx: String,
        #[tabled(rename = "qy (1/Ang)")]
        qy: String,
        #[tabled(rename = "I(qx,qy) (1/cm)")]
        intensity: String,
    }

    if !curve.points.is_empty() {
        let rows: Vec<PointRow> = curve
            .points
            .iter()
            .map(|p| PointRow {
                q: format!("{:.6e}", p.q),
                intensity: format!("{:.6e}", p.intensity),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{}", table);
    }

    if !curve.detector.is_empty() {
        let rows: Vec<DetectorRow> = curve
            .detector
            .iter()
            .map(|p| DetectorRow {
                qx: format!("{:.6e}", p.qx),
                qy: format!("{:.6e}", p.qy),
                intensity: format!("{:.6e}", p.intensity),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{}", table);
    }
}

/// 执行 er 命令
pub fn execute_er(args: ErArgs) -> Result<()> {
    output::print_header("Effective Radius");

    let model = build_model(&args.model, &args.params)?;
    let names = model.model().effective_radius_modes();
    output::print_info(&format!("Model '{}'", model.name()));
    output::print_parameters(model.parameters().iter());

    #[derive(Tabled)]
    struct RadiusRow {
        #[tabled(rename = "Mode")]
        mode: usize,
        #[tabled(rename = "Definition")]
        name: &'static str,
        #[tabled(rename = "R_eff (Ang)")]
        radius: String,
    }

    let modes: Vec<usize> = match args.mode {
        Some(mode) => vec![mode],
        None => (1..=names.len()).collect(),
    };

    let rows = modes
        .into_iter()
        .map(|mode| {
            let radius = model.effective_radius(mode)?;
            Ok(RadiusRow {
                mode,
                name: names.get(mode - 1).copied().unwrap_or(""),
                radius: format!("{:.6}", radius),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if rows.is_empty() {
        output::print_warning(&format!(
            "Model '{}' does not define an effective radius",
            model.name()
        ));
        return Ok(());
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::eval::SpacingArg;
    use std::path::PathBuf;

    fn eval_args(q: Vec<f64>, q_range: Option<&str>, qxy: Vec<(f64, f64)>) -> EvalArgs {
        EvalArgs {
            model: "sphere".to_string(),
            params: ParameterArgs::default(),
            q,
            q_range: q_range.map(|s| s.to_string()),
            points: 10,
            spacing: SpacingArg::Log,
            qxy,
            output: None,
            format: None,
            title: None,
            width: 800,
            height: 600,
        }
    }

    #[test]
    fn test_build_model_demo_then_set() {
        let params = ParameterArgs {
            set: vec![("radius".to_string(), 12.0)],
            demo: true,
        };
        let model = build_model("sphere", &params).unwrap();
        assert_eq!(model.parameters().get("radius"), Some(12.0));

        let bad = ParameterArgs {
            set: vec![("teapot".to_string(), 1.0)],
            demo: false,
        };
        assert!(build_model("sphere", &bad).is_err());
        assert!(build_model("teapot", &ParameterArgs::default()).is_err());
    }

    #[test]
    fn test_collect_q() {
        let q = collect_q(&eval_args(vec![0.1, 0.2], None, vec![])).unwrap();
        assert_eq!(q, vec![0.1, 0.2]);

        let q = collect_q(&eval_args(vec![0.5], Some("0.01-0.1"), vec![])).unwrap();
        assert_eq!(q.len(), 11);
        assert_eq!(q[0], 0.5);

        let q = collect_q(&eval_args(vec![], None, vec![])).unwrap();
        assert_eq!(q.len(), 10);
        assert!((q[0] - DEFAULT_Q_MIN).abs() < 1e-15);

        let q = collect_q(&eval_args(vec![], None, vec![(0.01, 0.02)])).unwrap();
        assert!(q.is_empty());
    }

    #[test]
    fn test_guess_format_from_extension() {
        assert_eq!(guess_format_from_extension(&PathBuf::from("a.PNG")), CurveFormat::Png);
        assert_eq!(guess_format_from_extension(&PathBuf::from("a.svg")), CurveFormat::Svg);
        assert_eq!(guess_format_from_extension(&PathBuf::from("a.dat")), CurveFormat::Xy);
        assert_eq!(guess_format_from_extension(&PathBuf::from("a")), CurveFormat::Csv);
    }
}
