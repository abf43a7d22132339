//! # 空心长方体
//!
//! 外尺寸 A × B × C（B = A·b2a_ratio，C = A·c2a_ratio），
//! 六个面壁厚均为 t。振幅为外长方体减去内腔：
//!
//! ```text
//! A(q) = V_out ·Π sinc(qᵢ·Lᵢ/2) − V_core·Π sinc(qᵢ·(Lᵢ/2 − t))
//! V_core = (A − 2t)(B − 2t)(C − 2t)
//! ```
//!
//! 一维强度对 θ, φ ∈ [0, π/2] 做双重 76 点 Gauss 积分（权重 sin θ），
//! 再除以 π/2 归一化。二维强度通过 (θ, φ, ψ) 坐标系把 q 投影到
//! 三条棱上。按外体积归一化。
//!
//! 壁厚超过最短棱的一半时内腔体积为负，不做检查。
//!
//! ## 依赖关系
//! - 取向投影使用 `kernels/orientation.rs`
//! - 有效半径模式 1 复用柱体第二维里系数半径

use crate::kernels::radius::{cylinder_excluded_volume_radius, sphere_volume};
use crate::kernels::special::sas_sinx_x;
use crate::kernels::{Orientation, GAUSS76};
use crate::models::{ModelDescriptor, ParameterRole, ParameterSpec, Parameters, Probe, TestCase};
use crate::shapes::{Model, CM_CONVERSION};

use std::f64::consts::{FRAC_PI_2, PI};
use std::sync::LazyLock;

const INF: f64 = f64::INFINITY;

/// 空心长方体几何
#[derive(Debug, Clone, Copy)]
struct HollowBox {
    half: [f64; 3],
    thickness: f64,
}

impl HollowBox {
    fn from_parameters(pars: &Parameters) -> Self {
        let a = pars["length_a"];
        Self {
            half: [0.5 * a, 0.5 * a * pars["b2a_ratio"], 0.5 * a * pars["c2a_ratio"]],
            thickness: pars["thickness"],
        }
    }

    fn outer_volume(&self) -> f64 {
        8.0 * self.half[0] * self.half[1] * self.half[2]
    }

    fn core_volume(&self) -> f64 {
        let t = self.thickness;
        8.0 * (self.half[0] - t) * (self.half[1] - t) * (self.half[2] - t)
    }

    /// 沿三条棱的 q 分量下的振幅（不含衬度）
    fn amplitude(&self, qa: f64, qb: f64, qc: f64) -> f64 {
        let t = self.thickness;
        let [a, b, c] = self.half;
        let outer = self.outer_volume() * sas_sinx_x(qa * a) * sas_sinx_x(qb * b) * sas_sinx_x(qc * c);
        let core = self.core_volume()
            * sas_sinx_x(qa * (a - t))
            * sas_sinx_x(qb * (b - t))
            * sas_sinx_x(qc * (c - t));
        outer - core
    }

    /// 取向平均 ⟨A²⟩
    fn average_squared(&self, q: f64) -> f64 {
        let total = GAUSS76.integrate(0.0, FRAC_PI_2, |theta| {
            let (sin_t, cos_t) = theta.sin_cos();
            let inner = GAUSS76.integrate(0.0, FRAC_PI_2, |phi| {
                let (sin_p, cos_p) = phi.sin_cos();
                let f = self.amplitude(q * sin_t * sin_p, q * sin_t * cos_p, q * cos_t);
                f * f
            });
            inner * sin_t
        });
        total / FRAC_PI_2
    }
}

static DESCRIPTOR: LazyLock<ModelDescriptor> = LazyLock::new(|| {
    ModelDescriptor::new(
        "hollow_rectangular_prism",
        "Hollow rectangular parallelepiped with uniform scattering length density.",
        "shape:parallelepiped",
    )
    .with_description(
        "I(q)= scale*P(q)/V + background\n\
         with P(q) the form factor averaged over orientations\n\
         of a hollow parallelepiped of outer sides A, B, C\n\
         and uniform wall thickness.\n\
         sld: shell scattering length density\n\
         sld_solvent: solvent scattering length density\n\
         length_a: outer length along a\n\
         b2a_ratio: ratio B/A\n\
         c2a_ratio: ratio C/A\n\
         thickness: wall thickness",
    )
    .with_parameters(vec![
        ParameterSpec::new("sld", "1e-6/Ang^2", 6.3, (-INF, INF), ParameterRole::Sld, "Parallelepiped scattering length density"),
        ParameterSpec::new("sld_solvent", "1e-6/Ang^2", 1.0, (-INF, INF), ParameterRole::Sld, "Solvent scattering length density"),
        ParameterSpec::new("length_a", "Ang", 35.0, (0.0, INF), ParameterRole::Volume, "Shorter side of the parallelepiped"),
        ParameterSpec::new("b2a_ratio", "", 1.0, (0.0, INF), ParameterRole::Volume, "Ratio sides b/a"),
        ParameterSpec::new("c2a_ratio", "", 1.0, (0.0, INF), ParameterRole::Volume, "Ratio sides c/a"),
        ParameterSpec::new("thickness", "Ang", 1.0, (0.0, INF), ParameterRole::Volume, "Thickness of parallelepiped"),
        ParameterSpec::new("theta", "degrees", 0.0, (-360.0, 360.0), ParameterRole::Orientation, "c axis to beam angle"),
        ParameterSpec::new("phi", "degrees", 0.0, (-360.0, 360.0), ParameterRole::Orientation, "rotation about beam"),
        ParameterSpec::new("psi", "degrees", 0.0, (-360.0, 360.0), ParameterRole::Orientation, "rotation about c axis"),
    ])
    .with_source(&["lib/gauss76.c", "hollow_rectangular_prism.c"])
    .with_demo(&[
        ("scale", 1.0),
        ("background", 0.0),
        ("sld", 6.3),
        ("sld_solvent", 1.0),
        ("length_a", 35.0),
        ("b2a_ratio", 1.0),
        ("c2a_ratio", 1.0),
        ("thickness", 1.0),
        ("theta", 45.0),
        ("phi", 30.0),
        ("psi", 10.0),
    ])
    .with_tests(vec![
        TestCase::new(&[], Probe::Q(0.05), 2.07687),
        TestCase::new(&[], Probe::EffectiveRadius, 23.1418),
        TestCase::new(
            &[("b2a_ratio", 2.0), ("c2a_ratio", 3.0), ("thickness", 5.0), ("theta", 30.0), ("phi", 45.0), ("psi", 20.0)],
            Probe::Qxy(0.03, 0.04),
            9.67640,
        ),
    ])
});

/// 空心长方体模型
pub struct HollowRectangularPrism;

impl Model for HollowRectangularPrism {
    fn descriptor(&self) -> &ModelDescriptor {
        &DESCRIPTOR
    }

    fn form_volume(&self, pars: &Parameters) -> f64 {
        HollowBox::from_parameters(pars).outer_volume()
    }

    fn iq(&self, q: f64, pars: &Parameters) -> f64 {
        let contrast = pars["sld"] - pars["sld_solvent"];
        CM_CONVERSION * contrast * contrast * HollowBox::from_parameters(pars).average_squared(q)
    }

    fn iqxy(&self, qx: f64, qy: f64, pars: &Parameters) -> f64 {
        let orientation = Orientation::new(pars["theta"], pars["phi"], pars["psi"]);
        let proj = orientation.project(qx, qy);
        let f = (pars["sld"] - pars["sld_solvent"])
            * HollowBox::from_parameters(pars).amplitude(proj.qa, proj.qb, proj.qc);
        CM_CONVERSION * f * f
    }

    fn effective_radius_modes(&self) -> &'static [&'static str] {
        &[
            "equivalent cylinder excluded volume",
            "equivalent outer volume sphere",
            "half length_a",
            "half length_b",
            "half length_c",
            "equivalent outer circular cross-section",
            "half ab diagonal",
            "half diagonal",
        ]
    }

    fn effective_radius(&self, mode: usize, pars: &Parameters) -> Option<f64> {
        let a = pars["length_a"];
        let b = a * pars["b2a_ratio"];
        let c = a * pars["c2a_ratio"];
        // 与 a × b 截面等面积的圆
        let r_equiv = (a * b / PI).sqrt();
        let radius = match mode {
            1 => cylinder_excluded_volume_radius(r_equiv, c),
            2 => (a * b * c / sphere_volume(1.0)).cbrt(),
            3 => 0.5 * a,
            4 => 0.5 * b,
            5 => 0.5 * c,
            6 => r_equiv,
            7 => 0.5 * a.hypot(b),
            8 => 0.5 * (a * a + b * b + c * c).sqrt(),
            _ => return None,
        };
        Some(radius)
    }
}
