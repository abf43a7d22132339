//! # 参数文件 (.pars) 解析器
//!
//! ## 格式说明
//! ```text
//! # 注释行
//! model = cylinder
//! radius = 20
//! length = 400      # 行尾注释
//! sld_solvent: 6.3
//! ```
//!
//! - 每行一个 `name = value`（也接受 `:`），`#` 之后为注释
//! - 必须有且只有一行 `model = <名称>`
//! - 其余取值必须是数值，参数名是否属于该模型由求值时检查
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 使用
//! - 使用 `regex` 匹配键值行

use crate::error::{Result, SasError};

use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static LINE_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*[=:]\s*(\S+)\s*$").ok());

/// 解析后的参数文件
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterFile {
    /// 文件名（不含扩展名），用于输出命名
    pub name: String,
    pub model: String,
    /// 按出现顺序排列的参数覆盖值
    pub overrides: Vec<(String, f64)>,
}

/// 解析 .pars 文件
pub fn parse_par_file(path: &Path) -> Result<ParameterFile> {
    let content = fs::read_to_string(path).map_err(|e| SasError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");

    parse_par_content(&content, name).map_err(|e| match e {
        SasError::ParseError { reason, .. } => SasError::ParseError {
            path: path.display().to_string(),
            reason,
        },
        other => other,
    })
}

/// 从字符串内容解析参数文件
pub fn parse_par_content(content: &str, name: &str) -> Result<ParameterFile> {
    let re = LINE_RE
        .as_ref()
        .ok_or_else(|| SasError::Other("parameter line pattern failed to compile".to_string()))?;
    let fail = |reason: String| SasError::ParseError {
        path: name.to_string(),
        reason,
    };

    let mut model: Option<String> = None;
    let mut overrides: Vec<(String, f64)> = Vec::new();

    for (lineno, raw) in content.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let caps = re
            .captures(line)
            .ok_or_else(|| fail(format!("line {}: expected 'name = value', got '{}'", lineno + 1, line)))?;
        let key = &caps[1];
        let value = &caps[2];

        if key == "model" {
            if model.is_some() {
                return Err(fail(format!("line {}: model given twice", lineno + 1)));
            }
            model = Some(value.to_string());
            continue;
        }

        let number: f64 = value
            .parse()
            .map_err(|_| fail(format!("line {}: '{}' is not a number", lineno + 1, value)))?;

        if overrides.iter().any(|(k, _)| k == key) {
            return Err(fail(format!("line {}: parameter '{}' given twice", lineno + 1, key)));
        }
        overrides.push((key.to_string(), number));
    }

    let model = model.ok_or_else(|| fail("missing 'model = <name>' line".to_string()))?;

    Ok(ParameterFile {
        name: name.to_string(),
        model,
        overrides,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# cylinder in D2O
model = cylinder
radius = 20
length: 4e2   # Ang

sld_solvent = 6.3
";

    #[test]
    fn test_parse_sample() {
        let pars = parse_par_content(SAMPLE, "rod").unwrap();
        assert_eq!(pars.name, "rod");
        assert_eq!(pars.model, "cylinder");
        assert_eq!(
            pars.overrides,
            vec![
                ("radius".to_string(), 20.0),
                ("length".to_string(), 400.0),
                ("sld_solvent".to_string(), 6.3),
            ]
        );
    }

    #[test]
    fn test_missing_model() {
        let err = parse_par_content("radius = 1\n", "x").unwrap_err();
        match err {
            SasError::ParseError { reason, .. } => assert!(reason.contains("model")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_bad_lines() {
        assert!(parse_par_content("model = sphere\nradius = big\n", "x").is_err());
        assert!(parse_par_content("model = sphere\nradius 20\n", "x").is_err());
        assert!(parse_par_content("model = sphere\nmodel = cylinder\n", "x").is_err());
        assert!(parse_par_content("model = sphere\nradius = 1\nradius = 2\n", "x").is_err());
    }
}
