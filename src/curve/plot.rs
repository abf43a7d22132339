//! # I(q) 图表生成
//!
//! 使用 `plotters` 绘制双对数 I(q) 曲线，支持 PNG 和 SVG 输出。
//! 只绘制一维点中 q > 0 且 I > 0 的部分。
//!
//! ## 依赖关系
//! - 被 `commands/eval.rs` 和 `commands/batch.rs` 调用
//! - 使用 `curve/mod.rs` 的 IqCurve 结构

use crate::curve::IqCurve;
use crate::error::{Result, SasError};

use plotters::prelude::*;
use std::path::Path;

/// 图表尺寸与标题
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

/// 生成 I(q) 图表
pub fn generate_iq_plot(
    curve: &IqCurve,
    output_path: &Path,
    options: &PlotOptions,
    use_svg: bool,
) -> Result<()> {
    let data = plottable(curve);
    if data.len() < 2 {
        return Err(SasError::PlotError(format!(
            "need at least two points with q > 0 and I > 0, got {}",
            data.len()
        )));
    }

    if use_svg {
        let root = SVGBackend::new(output_path, (options.width, options.height)).into_drawing_area();
        draw_chart(&root, &data, &options.title)?;
        root.present()
            .map_err(|e| SasError::PlotError(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(output_path, (options.width, options.height)).into_drawing_area();
        draw_chart(&root, &data, &options.title)?;
        root.present()
            .map_err(|e| SasError::PlotError(e.to_string()))?;
    }
    Ok(())
}

/// 可在双对数坐标下绘制的点
fn plottable(curve: &IqCurve) -> Vec<(f64, f64)> {
    curve
        .points
        .iter()
        .filter(|p| p.q > 0.0 && p.intensity > 0.0 && p.intensity.is_finite())
        .map(|p| (p.q, p.intensity))
        .collect()
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    data: &[(f64, f64)],
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| SasError::PlotError(format!("{:?}", e)))?;

    let x_min = data.iter().map(|(x, _)| *x).fold(f64::INFINITY, f64::min);
    let x_max = data.iter().map(|(x, _)| *x).fold(f64::NEG_INFINITY, f64::max);
    let y_min = data.iter().map(|(_, y)| *y).fold(f64::INFINITY, f64::min);
    let y_max = data.iter().map(|(_, y)| *y).fold(f64::NEG_INFINITY, f64::max);

    // 纵轴上下各留半个数量级
    let (y_lo, y_hi) = (y_min / 3.0, y_max * 3.0);

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d((x_min..x_max).log_scale(), (y_lo..y_hi).log_scale())
        .map_err(|e| SasError::PlotError(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .x_desc("q (1/Å)")
        .y_desc("I(q) (1/cm)")
        .x_label_formatter(&|x| format!("{:.0e}", x))
        .y_label_formatter(&|y| format!("{:.0e}", y))
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(|e| SasError::PlotError(format!("{:?}", e)))?;

    let line_color = RGBColor(0, 102, 204);
    chart
        .draw_series(LineSeries::new(
            data.iter().copied(),
            line_color.stroke_width(2),
        ))
        .map_err(|e| SasError::PlotError(format!("{:?}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::CurvePoint;

    #[test]
    fn test_plottable_drops_nonpositive_points() {
        let curve = IqCurve {
            model: "sphere".to_string(),
            parameters: Vec::new(),
            points: vec![
                CurvePoint { q: 0.0, intensity: 10.0 },
                CurvePoint { q: 0.01, intensity: 5.0 },
                CurvePoint { q: 0.02, intensity: 0.0 },
                CurvePoint { q: 0.03, intensity: 1.0 },
            ],
            detector: Vec::new(),
        };
        assert_eq!(plottable(&curve), vec![(0.01, 5.0), (0.03, 1.0)]);
    }

    #[test]
    fn test_too_few_points_is_error() {
        let curve = IqCurve {
            model: "sphere".to_string(),
            parameters: Vec::new(),
            points: vec![CurvePoint { q: 0.01, intensity: 5.0 }],
            detector: Vec::new(),
        };
        let options = PlotOptions {
            title: "sphere".to_string(),
            width: 800,
            height: 600,
        };
        let path = std::env::temp_dir().join("sasmodels-never-written.svg");
        assert!(matches!(
            generate_iq_plot(&curve, &path, &options, true),
            Err(SasError::PlotError(_))
        ));
    }
}
