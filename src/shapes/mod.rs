//! # 形状模型模块
//!
//! 所有散射模型的统一接口与注册表。
//!
//! ## 接口层次
//! - `AxisymmetricShape`: 轴对称形状的振幅 F(q, α) 与体积，
//!   由 `orientation_average` / `oriented_amplitude_squared` 统一完成取向处理
//! - `Model`: 完整模型（描述符 + ⟨F²⟩ + 二维强度 + 有效半径），
//!   由 `engine/` 负责 scale、体积归一化与背景
//!
//! ## 子模块
//! - `sphere`, `ellipsoid`, `core_shell_ellipsoid`, `cylinder`: 几何形状
//! - `multilayer_vesicle`: 多层囊泡
//! - `hollow_rectangular_prism`: 空心长方体（非轴对称）
//! - `mass_surface_fractal`: 质量/表面分形（与形状无关）
//!
//! ## 依赖关系
//! - 使用 `kernels/` 的特殊函数、求积与取向例程
//! - 使用 `models/` 的描述符与参数
//! - 被 `engine/` 和 `commands/` 使用

pub mod core_shell_ellipsoid;
pub mod cylinder;
pub mod ellipsoid;
pub mod hollow_rectangular_prism;
pub mod mass_surface_fractal;
pub mod multilayer_vesicle;
pub mod sphere;

use crate::error::{Result, SasError};
use crate::kernels::{Orientation, GAUSS76};
use crate::models::{ModelDescriptor, Parameters};

use std::sync::LazyLock;

/// Å³·(10⁻⁶ Å⁻²)² → cm⁻¹
pub const CM_CONVERSION: f64 = 1.0e-4;

/// 散射模型
///
/// 强度由 `engine` 组装为 I = scale·iq/form_volume + background。
pub trait Model: Send + Sync {
    fn descriptor(&self) -> &ModelDescriptor;

    /// 归一化体积；内部已归一化的模型返回 1
    fn form_volume(&self, _pars: &Parameters) -> f64 {
        1.0
    }

    /// 取向平均后的 ⟨F²⟩（已换算到 cm⁻¹·Å³）
    fn iq(&self, q: f64, pars: &Parameters) -> f64;

    /// 固定取向下的 F²；各向同性模型退化为 iq(|q|)
    fn iqxy(&self, qx: f64, qy: f64, pars: &Parameters) -> f64 {
        self.iq(qx.hypot(qy), pars)
    }

    /// 有效半径模式名称，模式编号从 1 开始
    fn effective_radius_modes(&self) -> &'static [&'static str] {
        &[]
    }

    /// 指定模式的有效半径；模型不支持该模式时返回 None
    fn effective_radius(&self, _mode: usize, _pars: &Parameters) -> Option<f64> {
        None
    }
}

/// 轴对称形状的散射振幅
pub trait AxisymmetricShape {
    /// F(q, α)，已包含 Δρ·V
    fn amplitude(&self, q: f64, sin_alpha: f64, cos_alpha: f64) -> f64;

    fn volume(&self) -> f64;
}

/// 均匀取向平均 ⟨F²⟩ = ∫₀¹ F²(q, α) d(cos α)
pub fn orientation_average<S: AxisymmetricShape>(shape: &S, q: f64) -> f64 {
    GAUSS76.integrate(0.0, 1.0, |cos_alpha| {
        let sin_alpha = (1.0 - cos_alpha * cos_alpha).sqrt();
        let f = shape.amplitude(q, sin_alpha, cos_alpha);
        f * f
    })
}

/// 固定取向下的 F²
pub fn oriented_amplitude_squared<S: AxisymmetricShape>(
    shape: &S,
    qx: f64,
    qy: f64,
    orientation: Orientation,
) -> f64 {
    let (q, sin_alpha, cos_alpha) = orientation.symmetric_angles(qx, qy);
    let f = shape.amplitude(q, sin_alpha, cos_alpha);
    f * f
}

// ─────────────────────────────────────────────────────────────
// 模型注册表
// ─────────────────────────────────────────────────────────────

/// 所有内置模型（显式列出，不做自动发现）
static MODELS: LazyLock<Vec<Box<dyn Model>>> = LazyLock::new(|| {
    vec![
        Box::new(sphere::Sphere),
        Box::new(ellipsoid::Ellipsoid),
        Box::new(core_shell_ellipsoid::CoreShellEllipsoid),
        Box::new(cylinder::Cylinder),
        Box::new(hollow_rectangular_prism::HollowRectangularPrism),
        Box::new(multilayer_vesicle::MultilayerVesicle),
        Box::new(mass_surface_fractal::MassSurfaceFractal),
    ]
});

/// 所有注册的模型
pub fn all_models() -> impl Iterator<Item = &'static dyn Model> {
    MODELS.iter().map(|m| m.as_ref())
}

/// 按名称查找模型（不校验）
pub fn find_model(name: &str) -> Option<&'static dyn Model> {
    all_models().find(|m| m.descriptor().name == name)
}

/// 加载模型：查找并校验描述符
pub fn load_model(name: &str) -> Result<&'static dyn Model> {
    let model = find_model(name).ok_or_else(|| SasError::UnknownModel(name.to_string()))?;
    model.descriptor().validate()?;
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_names_unique() {
        let names: Vec<_> = all_models().map(|m| m.descriptor().name).collect();
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names.len(), sorted.len());
    }

    #[test]
    fn test_all_descriptors_validate() {
        for model in all_models() {
            let d = model.descriptor();
            assert!(d.validate().is_ok(), "{} failed validation: {:?}", d.name, d.validate());
        }
    }

    #[test]
    fn test_load_unknown_model() {
        assert!(matches!(load_model("teapot"), Err(SasError::UnknownModel(_))));
        assert!(load_model("cylinder").is_ok());
    }

    #[test]
    fn test_defaults_and_demo_evaluate_finite() {
        for model in all_models() {
            let d = model.descriptor();
            let demo = d.demo_parameters().unwrap();
            for pars in [d.defaults(), demo] {
                for &q in &[0.0, 1e-3, 0.05, 0.3] {
                    let v = model.iq(q, &pars);
                    assert!(v.is_finite() && v >= 0.0, "{} iq({}) = {}", d.name, q, v);
                }
                let v = model.iqxy(0.03, -0.02, &pars);
                assert!(v.is_finite() && v >= 0.0, "{} iqxy = {}", d.name, v);
            }
        }
    }

    /// 简单球形振幅，用于检验取向平均本身
    struct Ball {
        radius: f64,
    }

    impl AxisymmetricShape for Ball {
        fn amplitude(&self, q: f64, _sin_alpha: f64, _cos_alpha: f64) -> f64 {
            crate::kernels::special::sas_3j1x_x(q * self.radius)
        }

        fn volume(&self) -> f64 {
            crate::kernels::radius::sphere_volume(self.radius)
        }
    }

    #[test]
    fn test_orientation_average_of_isotropic_shape() {
        let ball = Ball { radius: 30.0 };
        let f = crate::kernels::special::sas_3j1x_x(0.1 * 30.0);
        let avg = orientation_average(&ball, 0.1);
        assert!((avg - f * f).abs() < 1e-14);
        assert!(ball.volume() > 0.0);
    }
}
