//! # 核壳旋转椭球
//!
//! 核与外壳均为同轴旋转椭球，振幅为两者之和：
//!
//! ```text
//! F(q, α) = F(q, r_e,core, r_p,core, α; ρ_core − ρ_shell)
//!         + F(q, r_e,shell, r_p,shell, α; ρ_shell − ρ_solvent)
//! P(q)    = scale/V_outer·⟨F²⟩ + background
//! ```
//!
//! 归一化体积取外壳体积 (4/3)π·r_p,shell·r_e,shell²。
//! [CHECK] 外壳体积归一化有待复核。
//!
//! 壳半径应不小于核半径，但不做检查：两者都多分散时重叠的配置仍可计算，
//! 只是物理上无意义。
//!
//! ## 依赖关系
//! - 复用 `ellipsoid::SpheroidShape` 的振幅
//! - 有效半径取外壳的椭球维里半径

use crate::kernels::radius::{ellipsoid_excluded_volume_radius, spheroid_volume};
use crate::kernels::Orientation;
use crate::models::{ModelDescriptor, ParameterRole, ParameterSpec, Parameters, Probe, TestCase};
use crate::shapes::ellipsoid::SpheroidShape;
use crate::shapes::{
    orientation_average, oriented_amplitude_squared, AxisymmetricShape, Model, CM_CONVERSION,
};

use std::f64::consts::PI;
use std::sync::LazyLock;

const INF: f64 = f64::INFINITY;

/// 核壳椭球振幅
#[derive(Debug, Clone, Copy)]
pub struct CoreShellSpheroidShape {
    /// 核，衬度为 ρ_core − ρ_shell
    pub core: SpheroidShape,
    /// 外壳外边界，衬度为 ρ_shell − ρ_solvent
    pub shell: SpheroidShape,
}

impl AxisymmetricShape for CoreShellSpheroidShape {
    fn amplitude(&self, q: f64, sin_alpha: f64, cos_alpha: f64) -> f64 {
        self.core.amplitude(q, sin_alpha, cos_alpha) + self.shell.amplitude(q, sin_alpha, cos_alpha)
    }

    fn volume(&self) -> f64 {
        self.shell.volume()
    }
}

// 与 2D 测试向量对应的探测点：|q| = 0.1，方位角 π/6
const Q_TEST: f64 = 0.1;

static DESCRIPTOR: LazyLock<ModelDescriptor> = LazyLock::new(|| {
    let swapped: [(&'static str, f64); 7] = [
        ("radius_equat_core", 20.0),
        ("radius_polar_core", 200.0),
        ("radius_equat_shell", 54.0),
        ("radius_polar_shell", 3.0),
        ("sld_core", 20.0),
        ("sld_shell", 10.0),
        ("sld_solvent", 6.0),
    ];
    let with_common = |background: f64, scale: f64| {
        let mut overrides = swapped.to_vec();
        overrides.push(("background", background));
        overrides.push(("scale", scale));
        overrides
    };

    ModelDescriptor::new(
        "core_shell_ellipsoid",
        "Form factor for an spheroid ellipsoid particle with a core shell structure.",
        "shape:ellipsoid",
    )
    .with_description(
        "[SpheroidCoreShellModel] Calculates the form factor for an spheroid\n\
         ellipsoid particle with a core_shell structure.\n\
         The form factor is averaged over all possible\n\
         orientations of the ellipsoid such that P(q)\n\
         = scale*<f^2>/Vol + bkg, where f is the\n\
         single particle scattering amplitude.\n\
         Note: it is the users' responsibility to ensure\n\
         that shell radii are larger than core radii,\n\
         especially if both are polydisperse.\n\
         oblate: polar radius < equatorial radius\n\
         prolate: polar radius > equatorial radius",
    )
    .with_parameters(vec![
        ParameterSpec::new("radius_equat_core", "Ang", 200.0, (0.0, INF), ParameterRole::Volume, "Equatorial radius of core, r minor core"),
        ParameterSpec::new("radius_polar_core", "Ang", 10.0, (0.0, INF), ParameterRole::Volume, "Polar radius of core, r major core"),
        ParameterSpec::new("radius_equat_shell", "Ang", 250.0, (0.0, INF), ParameterRole::Volume, "Equatorial radius of shell, r minor outer"),
        ParameterSpec::new("radius_polar_shell", "Ang", 30.0, (0.0, INF), ParameterRole::Volume, "Polar radius of shell, r major outer"),
        ParameterSpec::new("sld_core", "1e-6/Ang^2", 2.0, (-INF, INF), ParameterRole::Sld, "Core scattering length density"),
        ParameterSpec::new("sld_shell", "1e-6/Ang^2", 1.0, (-INF, INF), ParameterRole::Sld, "Shell scattering length density"),
        ParameterSpec::new("sld_solvent", "1e-6/Ang^2", 6.3, (-INF, INF), ParameterRole::Sld, "Solvent scattering length density"),
        ParameterSpec::new("theta", "degrees", 0.0, (-INF, INF), ParameterRole::Orientation, "Oblate orientation wrt incoming beam"),
        ParameterSpec::new("phi", "degrees", 0.0, (-INF, INF), ParameterRole::Orientation, "Oblate orientation in the plane of the detector"),
    ])
    .with_source(&["lib/sph_j1c.c", "lib/gfn.c", "lib/gauss76.c", "core_shell_ellipsoid.c"])
    .with_demo(&[
        ("scale", 1.0),
        ("background", 0.001),
        ("radius_equat_core", 200.0),
        ("radius_polar_core", 10.0),
        ("radius_equat_shell", 250.0),
        ("radius_polar_shell", 30.0),
        ("sld_core", 2.0),
        ("sld_shell", 1.0),
        ("sld_solvent", 6.3),
        ("theta", 0.0),
        ("phi", 0.0),
    ])
    .with_tests(vec![
        TestCase::new(
            &[
                ("radius_equat_core", 200.0),
                ("radius_polar_core", 20.0),
                ("radius_equat_shell", 250.0),
                ("radius_polar_shell", 30.0),
                ("sld_core", 2.0),
                ("sld_shell", 1.0),
                ("sld_solvent", 6.3),
                ("background", 0.001),
                ("scale", 1.0),
            ],
            Probe::Q(1.0),
            0.00189402,
        ),
        TestCase::new(&[("background", 0.01)], Probe::Q(0.1), 8.86741),
        TestCase::new(&with_common(0.0, 1.0), Probe::Q(0.01), 26150.4),
        TestCase::new(&[("background", 0.001)], Probe::Qxy(0.4, 0.5), 0.00170471),
        TestCase::new(
            &with_common(0.01, 0.01),
            Probe::Qxy(Q_TEST * (PI / 6.0).cos(), Q_TEST * (PI / 6.0).sin()),
            0.105764,
        ),
        TestCase::new(&[], Probe::EffectiveRadius, 174.237),
    ])
});

/// 核壳旋转椭球模型
pub struct CoreShellEllipsoid;

impl CoreShellEllipsoid {
    fn shape(pars: &Parameters) -> CoreShellSpheroidShape {
        CoreShellSpheroidShape {
            core: SpheroidShape {
                radius_polar: pars["radius_polar_core"],
                radius_equatorial: pars["radius_equat_core"],
                contrast: pars["sld_core"] - pars["sld_shell"],
            },
            shell: SpheroidShape {
                radius_polar: pars["radius_polar_shell"],
                radius_equatorial: pars["radius_equat_shell"],
                contrast: pars["sld_shell"] - pars["sld_solvent"],
            },
        }
    }
}

impl Model for CoreShellEllipsoid {
    fn descriptor(&self) -> &ModelDescriptor {
        &DESCRIPTOR
    }

    fn form_volume(&self, pars: &Parameters) -> f64 {
        spheroid_volume(pars["radius_polar_shell"], pars["radius_equat_shell"])
    }

    fn iq(&self, q: f64, pars: &Parameters) -> f64 {
        CM_CONVERSION * orientation_average(&Self::shape(pars), q)
    }

    fn iqxy(&self, qx: f64, qy: f64, pars: &Parameters) -> f64 {
        let orientation = Orientation::symmetric(pars["theta"], pars["phi"]);
        CM_CONVERSION * oriented_amplitude_squared(&Self::shape(pars), qx, qy, orientation)
    }

    fn effective_radius_modes(&self) -> &'static [&'static str] {
        &["excluded volume of outer shell"]
    }

    fn effective_radius(&self, mode: usize, pars: &Parameters) -> Option<f64> {
        (mode == 1).then(|| {
            ellipsoid_excluded_volume_radius(pars["radius_polar_shell"], pars["radius_equat_shell"])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::DirectModel;

    #[test]
    fn test_matched_core_reduces_to_ellipsoid() {
        // ρ_core = ρ_shell 时核不可见，只剩外壳椭球
        let pars = DESCRIPTOR.resolve([("sld_core", 1.0)]).unwrap();
        let shell = SpheroidShape {
            radius_polar: 30.0,
            radius_equatorial: 250.0,
            contrast: 1.0 - 6.3,
        };
        for &q in &[0.001, 0.02, 0.2] {
            let expected = CM_CONVERSION * orientation_average(&shell, q);
            let got = CoreShellEllipsoid.iq(q, &pars);
            assert!((got - expected).abs() <= 1e-12 * expected, "q={}", q);
        }
    }

    #[test]
    fn test_inverted_shell_is_tolerated() {
        let pars = DESCRIPTOR
            .resolve([("radius_equat_shell", 100.0), ("radius_polar_shell", 5.0)])
            .unwrap();
        let v = CoreShellEllipsoid.iq(0.05, &pars);
        assert!(v.is_finite());
    }

    #[test]
    fn test_effective_radius_uses_outer_shell() {
        let pars = DESCRIPTOR.defaults();
        let er = CoreShellEllipsoid.effective_radius(1, &pars).unwrap();
        assert!((er - ellipsoid_excluded_volume_radius(30.0, 250.0)).abs() < 1e-12);
        assert!(CoreShellEllipsoid.effective_radius(2, &pars).is_none());
    }

    #[test]
    fn test_effective_radius_of_flat_shell_is_finite() {
        let model = DirectModel::with_overrides(
            &CoreShellEllipsoid,
            [("radius_polar_core", 1e-8), ("radius_polar_shell", 1e-7)],
        )
        .unwrap();
        let er = model.effective_radius(1).unwrap();
        assert!(er.is_finite(), "ER = {}", er);
        // 扁盘极限 ½·(¾π·r_equat³)^{1/3}
        let limit = 0.5 * (0.75 * PI * 250.0_f64.powi(3)).cbrt();
        assert!((er - limit).abs() < 1e-3, "ER = {}", er);
    }
}
