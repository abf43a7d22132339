//! # 多层囊泡
//!
//! 溶剂填充的核外包 N 对"壳层 + 溶剂层"。第 i 对（从 0 计）：
//!
//! ```text
//! rᵢ = r_c + i·(t_s + t_w)      壳层内半径
//! Rᵢ = rᵢ + t_s                 壳层外半径
//! F  = (ρ_solv − ρ_shell)·Σᵢ [V(rᵢ)·3j₁(qrᵢ)/(qrᵢ) − V(Rᵢ)·3j₁(qRᵢ)/(qRᵢ)]
//! P  = φ·F²·10⁻⁴ / V(R_{N−1})
//! ```
//!
//! 模型内部已按最外层壳体积归一化，`form_volume` 恒为 1。
//! N 取 n_shells 四舍五入后的整数，上限 `MAX_SHELLS`（求值耗时与 N 成正比，
//! 超出上限由定义域检查报告 `OutOfBounds`）。
//!
//! ## 依赖关系
//! - 复用 `sphere::SphereShape` 的均匀球振幅

use crate::kernels::radius::sphere_volume;
use crate::models::{ModelDescriptor, ParameterRole, ParameterSpec, Parameters, Probe, TestCase};
use crate::shapes::sphere::SphereShape;
use crate::shapes::{AxisymmetricShape, Model, CM_CONVERSION};

use std::sync::LazyLock;

const INF: f64 = f64::INFINITY;

/// n_shells 上限
pub const MAX_SHELLS: f64 = 10_000.0;

static DESCRIPTOR: LazyLock<ModelDescriptor> = LazyLock::new(|| {
    let reference: [(&'static str, f64); 8] = [
        ("radius", 60.0),
        ("thick_shell", 10.0),
        ("thick_solvent", 10.0),
        ("sld_solvent", 6.4),
        ("sld", 0.4),
        ("n_shells", 2.0),
        ("scale", 1.0),
        ("background", 0.001),
    ];
    let mut dense = reference.to_vec();
    dense.push(("volfraction", 1.0));

    ModelDescriptor::new("multilayer_vesicle", "P(Q) for a Multi-lamellar vesicle", "shape:sphere")
        .with_description(
            "multilayer_vesicle model parameters;\n\
             scale : scale factor for abs intensity if needed else 1.0\n\
             volfraction: volume fraction\n\
             radius : Core radius of the multishell\n\
             thick_shell: shell thickness\n\
             thick_solvent: water thickness\n\
             sld_solvent: solvent scattering length density\n\
             sld: shell scattering length density\n\
             n_shells:number of \"shell plus solvent\" layer pairs\n\
             background: incoherent background",
        )
        .with_parameters(vec![
            ParameterSpec::new("volfraction", "", 0.05, (0.0, 1.0), ParameterRole::Plain, "volume fraction of vesicles"),
            ParameterSpec::new("radius", "Ang", 60.0, (0.0, INF), ParameterRole::Volume, "radius of solvent filled core"),
            ParameterSpec::new("thick_shell", "Ang", 10.0, (0.0, INF), ParameterRole::Volume, "thickness of one shell"),
            ParameterSpec::new("thick_solvent", "Ang", 10.0, (0.0, INF), ParameterRole::Volume, "solvent thickness between shells"),
            ParameterSpec::new("sld_solvent", "1e-6/Ang^2", 6.4, (-INF, INF), ParameterRole::Sld, "solvent scattering length density"),
            ParameterSpec::new("sld", "1e-6/Ang^2", 0.4, (-INF, INF), ParameterRole::Sld, "Shell scattering length density"),
            ParameterSpec::new("n_shells", "", 2.0, (1.0, MAX_SHELLS), ParameterRole::Volume, "Number of shell plus solvent layer pairs"),
        ])
        .with_source(&["lib/sas_3j1x_x.c", "multilayer_vesicle.c"])
        .with_demo(&[
            ("scale", 1.0),
            ("background", 0.0),
            ("volfraction", 0.05),
            ("radius", 60.0),
            ("thick_shell", 10.0),
            ("thick_solvent", 10.0),
            ("sld_solvent", 6.4),
            ("sld", 0.4),
            ("n_shells", 2.0),
        ])
        .with_tests(vec![
            TestCase::new(&reference, Probe::Q(0.001), 122.1405),
            TestCase::new(&dense, Probe::Qxy(0.001, 0.30903), 1.61873),
        ])
});

/// 层对数：四舍五入取整
fn shell_count(n_shells: f64) -> usize {
    (n_shells + 0.5).floor().max(0.0) as usize
}

/// 多层囊泡模型
pub struct MultilayerVesicle;

impl MultilayerVesicle {
    /// 返回 (振幅, 最外层壳外半径)
    fn amplitude(q: f64, pars: &Parameters) -> (f64, f64) {
        let contrast = pars["sld_solvent"] - pars["sld"];
        let core = pars["radius"];
        let thick_shell = pars["thick_shell"];
        let thick_solvent = pars["thick_solvent"];

        let mut f = 0.0;
        let mut outer = core;
        for i in 0..shell_count(pars["n_shells"]) {
            let inner = core + i as f64 * (thick_shell + thick_solvent);
            outer = inner + thick_shell;
            f += SphereShape { radius: inner, contrast }.amplitude(q, 0.0, 1.0);
            f -= SphereShape { radius: outer, contrast }.amplitude(q, 0.0, 1.0);
        }
        (f, outer)
    }
}

impl Model for MultilayerVesicle {
    fn descriptor(&self) -> &ModelDescriptor {
        &DESCRIPTOR
    }

    fn iq(&self, q: f64, pars: &Parameters) -> f64 {
        let (f, outer) = Self::amplitude(q, pars);
        let volume = sphere_volume(outer);
        if volume <= 0.0 {
            return 0.0;
        }
        pars["volfraction"] * CM_CONVERSION * f * f / volume
    }

    fn effective_radius_modes(&self) -> &'static [&'static str] {
        &["outer radius"]
    }

    fn effective_radius(&self, mode: usize, pars: &Parameters) -> Option<f64> {
        (mode == 1).then(|| {
            let n = shell_count(pars["n_shells"]) as f64;
            pars["radius"] + n * (pars["thick_shell"] + pars["thick_solvent"]) - pars["thick_solvent"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::DirectModel;
    use crate::error::SasError;

    #[test]
    fn test_shell_count_rounding() {
        assert_eq!(shell_count(1.0), 1);
        assert_eq!(shell_count(2.49), 2);
        assert_eq!(shell_count(2.5), 3);
    }

    #[test]
    fn test_single_shell_is_hollow_sphere() {
        let pars = DESCRIPTOR
            .resolve([("n_shells", 1.0), ("volfraction", 1.0)])
            .unwrap();
        let q = 0.02;
        let contrast = 6.4 - 0.4;
        let f = SphereShape { radius: 60.0, contrast }.amplitude(q, 0.0, 1.0)
            - SphereShape { radius: 70.0, contrast }.amplitude(q, 0.0, 1.0);
        let expected = CM_CONVERSION * f * f / sphere_volume(70.0);
        let got = MultilayerVesicle.iq(q, &pars);
        assert!((got - expected).abs() < 1e-12 * expected);
    }

    #[test]
    fn test_shell_count_capped() {
        let huge = DirectModel::with_overrides(&MultilayerVesicle, [("n_shells", 1e12)]).unwrap();
        assert!(matches!(huge.intensity(0.01), Err(SasError::OutOfBounds { .. })));
        assert!(matches!(huge.effective_radius(1), Err(SasError::OutOfBounds { .. })));

        let many = DirectModel::with_overrides(&MultilayerVesicle, [("n_shells", MAX_SHELLS)]).unwrap();
        assert!(many.intensity(0.01).unwrap().is_finite());
    }

    #[test]
    fn test_effective_radius() {
        let pars = DESCRIPTOR.defaults();
        let er = MultilayerVesicle.effective_radius(1, &pars).unwrap();
        assert!((er - 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_collapsed_vesicle_is_zero() {
        let pars = DESCRIPTOR
            .resolve([("radius", 0.0), ("thick_shell", 0.0), ("thick_solvent", 0.0)])
            .unwrap();
        assert_eq!(MultilayerVesicle.iq(0.1, &pars), 0.0);
    }

    #[test]
    fn test_2d_equals_1d() {
        let pars = DESCRIPTOR.defaults();
        let a = MultilayerVesicle.iqxy(0.03, 0.04, &pars);
        let b = MultilayerVesicle.iq(0.05, &pars);
        assert!((a - b).abs() <= 1e-14 * b);
    }
}
