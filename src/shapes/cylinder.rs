//! # 直圆柱
//!
//! ```text
//! F(q, α) = 2·Δρ·V·sinc(qL·cos α/2)·J₁(qr·sin α)/(qr·sin α)
//! V       = π·r²·L
//! ```
//!
//! α 为柱轴与 q 的夹角。α → 0 与 α → π/2 处的可去奇点由
//! `sas_2j1x_x` / `sas_sinx_x` 的小参数展开处理。
//!
//! ## 依赖关系
//! - 有效半径使用 `kernels/radius.rs` 的柱体第二维里系数半径

use crate::kernels::radius::{cylinder_excluded_volume_radius, cylinder_volume};
use crate::kernels::special::{sas_2j1x_x, sas_sinx_x};
use crate::kernels::Orientation;
use crate::models::{ModelDescriptor, ParameterRole, ParameterSpec, Parameters, Probe, TestCase};
use crate::shapes::{
    orientation_average, oriented_amplitude_squared, AxisymmetricShape, Model, CM_CONVERSION,
};

use std::sync::LazyLock;

const INF: f64 = f64::INFINITY;

/// 均匀圆柱的振幅
#[derive(Debug, Clone, Copy)]
pub struct CylinderShape {
    pub radius: f64,
    pub length: f64,
    pub contrast: f64,
}

impl AxisymmetricShape for CylinderShape {
    fn amplitude(&self, q: f64, sin_alpha: f64, cos_alpha: f64) -> f64 {
        // 2J₁(x)/x 已含系数 2
        self.contrast
            * self.volume()
            * sas_sinx_x(0.5 * q * self.length * cos_alpha)
            * sas_2j1x_x(q * self.radius * sin_alpha)
    }

    fn volume(&self) -> f64 {
        cylinder_volume(self.radius, self.length)
    }
}

static DESCRIPTOR: LazyLock<ModelDescriptor> = LazyLock::new(|| {
    ModelDescriptor::new(
        "cylinder",
        "Cylinder with uniform scattering length density",
        "shape:cylinder",
    )
    .with_description(
        "f(q)= 2*(sld - sld_solvent)*V*sin(qLcos(alpha)/2)\n\
         /[qLcos(alpha)/2]*J1(qRsin(alpha))/[qRsin(alpha)]\n\
         P(q,alpha)= scale/V*f(q)^(2)+background\n\
         V: Volume of the cylinder\n\
         R: Radius of the cylinder\n\
         L: Length of the cylinder\n\
         J1: The bessel function\n\
         alpha: angle between the axis of the\n\
         cylinder and the q-vector for 1D\n\
         :the output is P(q)=scale/V*integral\n\
         from pi/2 to zero of...\n\
         f(q)^(2)*sin(alpha)*dalpha+ bkg",
    )
    .with_parameters(vec![
        ParameterSpec::new("sld", "1e-6/Ang^2", 4.0, (-INF, INF), ParameterRole::Sld, "Cylinder scattering length density"),
        ParameterSpec::new("sld_solvent", "1e-6/Ang^2", 1.0, (-INF, INF), ParameterRole::Sld, "Solvent scattering length density"),
        ParameterSpec::new("radius", "Ang", 20.0, (0.0, INF), ParameterRole::Volume, "Cylinder radius"),
        ParameterSpec::new("length", "Ang", 400.0, (0.0, INF), ParameterRole::Volume, "Cylinder length"),
        ParameterSpec::new("theta", "degrees", 60.0, (-INF, INF), ParameterRole::Orientation, "In plane angle"),
        ParameterSpec::new("phi", "degrees", 60.0, (-INF, INF), ParameterRole::Orientation, "Out of plane angle"),
    ])
    .with_source(&["lib/J1.c", "lib/gauss76.c", "lib/cylkernel.c", "cylinder.c"])
    .with_demo(&[
        ("scale", 1.0),
        ("background", 0.0),
        ("sld", 6.0),
        ("sld_solvent", 1.0),
        ("radius", 20.0),
        ("length", 300.0),
        ("theta", 60.0),
        ("phi", 60.0),
    ])
    .with_tests(vec![
        TestCase::new(&[], Probe::EffectiveRadius, 73.3401),
        TestCase::new(&[], Probe::Q(0.1), 11.8935),
        TestCase::new(&[("background", 0.01)], Probe::Qxy(0.02, 0.01), 9.32252),
    ])
});

/// 圆柱模型
pub struct Cylinder;

impl Cylinder {
    fn shape(pars: &Parameters) -> CylinderShape {
        CylinderShape {
            radius: pars["radius"],
            length: pars["length"],
            contrast: pars["sld"] - pars["sld_solvent"],
        }
    }
}

impl Model for Cylinder {
    fn descriptor(&self) -> &ModelDescriptor {
        &DESCRIPTOR
    }

    fn form_volume(&self, pars: &Parameters) -> f64 {
        cylinder_volume(pars["radius"], pars["length"])
    }

    fn iq(&self, q: f64, pars: &Parameters) -> f64 {
        CM_CONVERSION * orientation_average(&Self::shape(pars), q)
    }

    fn iqxy(&self, qx: f64, qy: f64, pars: &Parameters) -> f64 {
        let orientation = Orientation::symmetric(pars["theta"], pars["phi"]);
        CM_CONVERSION * oriented_amplitude_squared(&Self::shape(pars), qx, qy, orientation)
    }

    fn effective_radius_modes(&self) -> &'static [&'static str] {
        &["excluded volume"]
    }

    fn effective_radius(&self, mode: usize, pars: &Parameters) -> Option<f64> {
        (mode == 1).then(|| cylinder_excluded_volume_radius(pars["radius"], pars["length"]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::GAUSS76;

    #[test]
    fn test_forward_scattering_limit() {
        let pars = DESCRIPTOR.defaults();
        let v = Cylinder.form_volume(&pars);
        let expected = CM_CONVERSION * 9.0 * v * v;
        let got = Cylinder.iq(0.0, &pars);
        assert!((got - expected).abs() < 1e-10 * expected, "{} vs {}", got, expected);
    }

    #[test]
    fn test_zero_contrast_vanishes() {
        let pars = DESCRIPTOR.resolve([("sld", 1.0)]).unwrap();
        for &q in &[0.0, 0.01, 0.5] {
            assert_eq!(Cylinder.iq(q, &pars), 0.0);
            assert_eq!(Cylinder.iqxy(q, 0.3 * q, &pars), 0.0);
        }
    }

    #[test]
    fn test_1d_equals_sphere_average_of_2d() {
        // ĉ 在单位球面上均匀分布：面元 cos θ dθ dφ，总面积 4π
        let half_pi = std::f64::consts::FRAC_PI_2;
        let pi = std::f64::consts::PI;
        for &q in &[0.005, 0.01, 0.02] {
            let base = DESCRIPTOR.defaults();
            let avg = GAUSS76.integrate(-half_pi, half_pi, |theta| {
                theta.cos()
                    * GAUSS76.integrate(-pi, pi, |phi| {
                        let mut pars = base.clone();
                        pars.set("theta", theta.to_degrees());
                        pars.set("phi", phi.to_degrees());
                        Cylinder.iqxy(q, 0.0, &pars)
                    })
            }) / (4.0 * pi);
            let one_d = Cylinder.iq(q, &base);
            assert!(
                (avg - one_d).abs() < 1e-6 * one_d,
                "q={}: 2D average {} vs 1D {}",
                q,
                avg,
                one_d
            );
        }
    }

    #[test]
    fn test_axis_along_q_has_no_radial_term() {
        // θ = φ = 0 时柱轴沿 qx，只剩长度方向的 sinc
        let pars = DESCRIPTOR.resolve([("theta", 0.0), ("phi", 0.0)]).unwrap();
        let v = Cylinder.form_volume(&pars);
        let q = 0.01;
        let f = 3.0 * v * sas_sinx_x(0.5 * q * 400.0);
        let got = Cylinder.iqxy(q, 0.0, &pars);
        let expected = CM_CONVERSION * f * f;
        assert!((got - expected).abs() < 1e-12 * expected);
    }
}
