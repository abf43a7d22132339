//! # 直接求值器
//!
//! 把模型内核组装为可观测强度：
//!
//! ```text
//! I(q) = scale · iq(q) / V + background
//! ```
//!
//! 其中 V 为 `Model::form_volume`。V ≤ 0 时（尺寸退化）只返回背景。
//!
//! 求值前检查参数定义域（上下限、尺寸非负）与 q 的有效性，
//! 超出定义域时报告 `DomainError` / `OutOfBounds`，不返回错误数值。
//!
//! ## 依赖关系
//! - 被 `engine/harness.rs` 与 `commands/` 调用
//! - 使用 `shapes/` 的 `Model` 接口和 `models/` 的参数
//! - 使用 `rayon` 并行计算 q 网格

use crate::error::{Result, SasError};
use crate::models::{Parameters, Probe};
use crate::shapes::{self, Model};

use rayon::prelude::*;

/// 绑定了参数值的模型
#[derive(Clone)]
pub struct DirectModel {
    model: &'static dyn Model,
    pars: Parameters,
}

impl DirectModel {
    /// 使用默认参数
    pub fn new(model: &'static dyn Model) -> Self {
        Self {
            model,
            pars: model.descriptor().defaults(),
        }
    }

    /// 在默认参数上应用覆盖值
    pub fn with_overrides<I, K>(model: &'static dyn Model, overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let pars = model.descriptor().resolve(overrides)?;
        Ok(Self { model, pars })
    }

    /// 按名称加载模型并应用覆盖值
    pub fn load<I, K>(name: &str, overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let model = shapes::load_model(name)?;
        Self::with_overrides(model, overrides)
    }

    pub fn model(&self) -> &'static dyn Model {
        self.model
    }

    pub fn name(&self) -> &'static str {
        self.model.descriptor().name
    }

    pub fn parameters(&self) -> &Parameters {
        &self.pars
    }

    /// 修改单个参数
    pub fn set(&mut self, name: &str, value: f64) -> Result<()> {
        if self.pars.set(name, value) {
            Ok(())
        } else {
            Err(SasError::UnknownParameter {
                model: self.name().to_string(),
                name: name.to_string(),
            })
        }
    }

    /// 参数定义域检查
    pub fn check_domain(&self) -> Result<()> {
        self.model.descriptor().check_domain(&self.pars)
    }

    /// 一维强度 I(q)
    pub fn intensity(&self, q: f64) -> Result<f64> {
        self.check_domain()?;
        self.intensity_in_domain(q)
    }

    /// 二维强度 I(qx, qy)
    pub fn intensity_xy(&self, qx: f64, qy: f64) -> Result<f64> {
        self.check_domain()?;
        self.intensity_xy_in_domain(qx, qy)
    }

    /// 指定模式的有效半径（模式从 1 开始）
    pub fn effective_radius(&self, mode: usize) -> Result<f64> {
        self.check_domain()?;
        self.model.effective_radius(mode, &self.pars).ok_or_else(|| {
            let modes = self.model.effective_radius_modes().len();
            if modes == 0 {
                SasError::InvalidArgument(format!("model '{}' has no effective radius", self.name()))
            } else {
                SasError::InvalidArgument(format!(
                    "effective radius mode {} is not in 1..={} for model '{}'",
                    mode,
                    modes,
                    self.name()
                ))
            }
        })
    }

    /// 对单个探测点求值
    pub fn evaluate(&self, probe: Probe) -> Result<f64> {
        match probe {
            Probe::Q(q) => self.intensity(q),
            Probe::Qxy(qx, qy) => self.intensity_xy(qx, qy),
            Probe::EffectiveRadius => self.effective_radius(1),
        }
    }

    /// 并行计算一维曲线，输出顺序与输入一致
    pub fn curve(&self, q: &[f64]) -> Result<Vec<f64>> {
        self.check_domain()?;
        q.par_iter().map(|&q| self.intensity_in_domain(q)).collect()
    }

    /// 并行计算二维点列，输出顺序与输入一致
    pub fn curve_xy(&self, points: &[(f64, f64)]) -> Result<Vec<f64>> {
        self.check_domain()?;
        points
            .par_iter()
            .map(|&(qx, qy)| self.intensity_xy_in_domain(qx, qy))
            .collect()
    }

    /// 参数已通过定义域检查后的一维求值，只校验 q
    fn intensity_in_domain(&self, q: f64) -> Result<f64> {
        if !q.is_finite() || q < 0.0 {
            return Err(SasError::DomainError(format!("q must be finite and non-negative, got {}", q)));
        }
        Ok(self.assemble(|| self.model.iq(q, &self.pars)))
    }

    fn intensity_xy_in_domain(&self, qx: f64, qy: f64) -> Result<f64> {
        if !qx.is_finite() || !qy.is_finite() {
            return Err(SasError::DomainError(format!(
                "(qx, qy) must be finite, got ({}, {})",
                qx, qy
            )));
        }
        Ok(self.assemble(|| self.model.iqxy(qx, qy, &self.pars)))
    }

    fn assemble<F: FnOnce() -> f64>(&self, kernel: F) -> f64 {
        let scale = self.pars["scale"];
        let background = self.pars["background"];
        let volume = self.model.form_volume(&self.pars);
        if volume > 0.0 {
            scale * kernel() / volume + background
        } else {
            background
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_and_background() {
        let base = DirectModel::load("sphere", [("background", 0.0)]).unwrap();
        let scaled = DirectModel::load("sphere", [("scale", 2.5), ("background", 0.3)]).unwrap();
        let a = base.intensity(0.04).unwrap();
        let b = scaled.intensity(0.04).unwrap();
        assert!((b - (2.5 * a + 0.3)).abs() < 1e-12 * b);
    }

    #[test]
    fn test_zero_contrast_gives_background() {
        let model = DirectModel::load(
            "core_shell_ellipsoid",
            [("sld_core", 3.0), ("sld_shell", 3.0), ("sld_solvent", 3.0), ("background", 0.02)],
        )
        .unwrap();
        for &q in &[0.0, 0.001, 0.1, 1.0] {
            let v = model.intensity(q).unwrap();
            assert!((v - 0.02).abs() < 1e-15, "q={} gave {}", q, v);
        }
        let v = model.intensity_xy(0.1, 0.2).unwrap();
        assert!((v - 0.02).abs() < 1e-15);
    }

    #[test]
    fn test_forward_limit() {
        // I(0) = scale·Δρ²·V·10⁻⁴ + background
        let model = DirectModel::load("cylinder", [("background", 0.5)]).unwrap();
        let v = std::f64::consts::PI * 20.0 * 20.0 * 400.0;
        let expected = 9.0 * v * 1e-4 + 0.5;
        let got = model.intensity(0.0).unwrap();
        assert!((got - expected).abs() < 1e-10 * expected);
    }

    #[test]
    fn test_negative_dimension_is_domain_error() {
        let model = DirectModel::load("ellipsoid", [("radius_polar", -3.0)]).unwrap();
        assert!(matches!(model.intensity(0.1), Err(SasError::DomainError(_))));
        assert!(matches!(model.effective_radius(1), Err(SasError::DomainError(_))));
    }

    #[test]
    fn test_invalid_q_is_domain_error() {
        let model = DirectModel::new(shapes::load_model("sphere").unwrap());
        assert!(matches!(model.intensity(-0.1), Err(SasError::DomainError(_))));
        assert!(matches!(model.intensity(f64::NAN), Err(SasError::DomainError(_))));
        assert!(matches!(model.intensity_xy(f64::INFINITY, 0.0), Err(SasError::DomainError(_))));
    }

    #[test]
    fn test_out_of_bounds_fraction() {
        let model = DirectModel::load("multilayer_vesicle", [("volfraction", 1.5)]).unwrap();
        assert!(matches!(model.intensity(0.1), Err(SasError::OutOfBounds { .. })));
    }

    #[test]
    fn test_zero_volume_gives_background() {
        let model = DirectModel::load("cylinder", [("radius", 0.0), ("background", 0.1)]).unwrap();
        assert_eq!(model.intensity(0.05).unwrap(), 0.1);
    }

    #[test]
    fn test_effective_radius_modes() {
        let cylinder = DirectModel::load("cylinder", std::iter::empty::<(&str, f64)>()).unwrap();
        assert!((cylinder.effective_radius(1).unwrap() - 73.3401).abs() < 1e-3);
        assert!(matches!(cylinder.effective_radius(2), Err(SasError::InvalidArgument(_))));

        let fractal = DirectModel::load("mass_surface_fractal", std::iter::empty::<(&str, f64)>()).unwrap();
        assert!(fractal.evaluate(Probe::EffectiveRadius).is_err());
    }

    #[test]
    fn test_curve_preserves_order_and_is_reproducible() {
        let model = DirectModel::load("core_shell_ellipsoid", [("background", 0.001)]).unwrap();
        let q: Vec<f64> = (0..64).map(|i| 1e-3 * 1.1_f64.powi(i)).collect();
        let parallel = model.curve(&q).unwrap();
        let again = model.curve(&q).unwrap();
        for (i, &qi) in q.iter().enumerate() {
            let serial = model.intensity(qi).unwrap();
            assert_eq!(parallel[i].to_bits(), serial.to_bits(), "q={}", qi);
            assert_eq!(parallel[i].to_bits(), again[i].to_bits());
        }
    }

    #[test]
    fn test_curve_checks_domain_once_and_each_q() {
        let bad = DirectModel::load("ellipsoid", [("radius_polar", -3.0)]).unwrap();
        assert!(matches!(bad.curve(&[0.01, 0.1]), Err(SasError::DomainError(_))));
        assert!(matches!(bad.curve_xy(&[(0.01, 0.0)]), Err(SasError::DomainError(_))));

        let model = DirectModel::load("sphere", std::iter::empty::<(&str, f64)>()).unwrap();
        assert!(matches!(model.curve(&[0.01, -0.1]), Err(SasError::DomainError(_))));
        assert!(matches!(model.curve_xy(&[(0.01, f64::NAN)]), Err(SasError::DomainError(_))));

        let xy = model.curve_xy(&[(0.03, 0.04), (0.0, 0.05)]).unwrap();
        assert_eq!(xy[0].to_bits(), model.intensity_xy(0.03, 0.04).unwrap().to_bits());
        assert_eq!(xy[1].to_bits(), model.intensity_xy(0.0, 0.05).unwrap().to_bits());
    }

    #[test]
    fn test_set_unknown_parameter() {
        let mut model = DirectModel::new(shapes::load_model("sphere").unwrap());
        assert!(model.set("radius", 10.0).is_ok());
        assert_eq!(model.parameters()["radius"], 10.0);
        assert!(matches!(model.set("length", 1.0), Err(SasError::UnknownParameter { .. })));
    }
}
