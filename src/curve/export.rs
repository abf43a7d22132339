//! # 曲线数据导出
//!
//! ## 支持格式
//! - CSV: 每行一个点，列为 q, qx, qy, intensity（一维点的 qx/qy 为空）
//! - XY: 以 `#` 开头的文件头（模型与参数），随后为制表符分隔的数据列
//!
//! ## 依赖关系
//! - 被 `commands/eval.rs` 和 `commands/batch.rs` 调用
//! - 使用 `csv` + `serde` 写入 CSV 文件

use crate::curve::IqCurve;
use crate::error::{Result, SasError};

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Serialize)]
struct CsvRow {
    q: f64,
    qx: Option<f64>,
    qy: Option<f64>,
    intensity: f64,
}

/// 导出为 CSV 格式
pub fn to_csv(curve: &IqCurve, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for point in &curve.points {
        wtr.serialize(CsvRow {
            q: point.q,
            qx: None,
            qy: None,
            intensity: point.intensity,
        })?;
    }
    for point in &curve.detector {
        wtr.serialize(CsvRow {
            q: point.qx.hypot(point.qy),
            qx: Some(point.qx),
            qy: Some(point.qy),
            intensity: point.intensity,
        })?;
    }

    wtr.flush().map_err(|e| SasError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 导出为 XY 格式
pub fn to_xy(curve: &IqCurve, output_path: &Path) -> Result<()> {
    let write_err = |e: std::io::Error| SasError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    };

    let file = File::create(output_path).map_err(write_err)?;
    let mut out = BufWriter::new(file);
    write_xy(curve, &mut out).map_err(write_err)?;
    out.flush().map_err(write_err)?;

    Ok(())
}

fn write_xy<W: Write>(curve: &IqCurve, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "# Model: {}", curve.model)?;
    for (name, value) in &curve.parameters {
        writeln!(out, "# {} = {}", name, value)?;
    }
    writeln!(out, "#")?;

    if !curve.points.is_empty() {
        writeln!(out, "# Columns: q (1/Ang), I(q) (1/cm)")?;
        for point in &curve.points {
            writeln!(out, "{:.8e}\t{:.8e}", point.q, point.intensity)?;
        }
    }

    if !curve.detector.is_empty() {
        writeln!(out, "# Columns: qx (1/Ang), qy (1/Ang), I(qx,qy) (1/cm)")?;
        for point in &curve.detector {
            writeln!(out, "{:.8e}\t{:.8e}\t{:.8e}", point.qx, point.qy, point.intensity)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{CurvePoint, DetectorPoint};

    fn sample() -> IqCurve {
        IqCurve {
            model: "sphere".to_string(),
            parameters: vec![("scale".to_string(), 1.0), ("radius".to_string(), 50.0)],
            points: vec![
                CurvePoint { q: 0.01, intensity: 100.0 },
                CurvePoint { q: 0.02, intensity: 50.0 },
            ],
            detector: vec![DetectorPoint { qx: 0.03, qy: 0.04, intensity: 7.0 }],
        }
    }

    #[test]
    fn test_xy_layout() {
        let mut buf = Vec::new();
        write_xy(&sample(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("# Model: sphere\n"));
        assert!(text.contains("# radius = 50\n"));
        let data: Vec<&str> = text.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(data.len(), 3);
        assert_eq!(data[0].split('\t').count(), 2);
        assert_eq!(data[2].split('\t').count(), 3);
    }

    #[test]
    fn test_csv_roundtrip_columns() {
        let dir = std::env::temp_dir().join(format!("sasmodels-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("curve.csv");
        to_csv(&sample(), &path).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["q", "qx", "qy", "intensity"]);
        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][1], "");
        assert!((rows[2][0].parse::<f64>().unwrap() - 0.05).abs() < 1e-12);

        std::fs::remove_dir_all(&dir).ok();
    }
}
