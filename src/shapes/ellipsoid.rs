//! # 旋转椭球
//!
//! 极轴半径 r_p，赤道半径 r_e，α 为极轴与 q 的夹角：
//!
//! ```text
//! F(q, α) = Δρ·V·3j₁(u)/u
//! u = q·sqrt(r_p²cos²α + r_e²(1 − cos²α))
//! V = (4/3)π·r_p·r_e²
//! ```
//!
//! r_p > r_e 为长椭球，r_p < r_e 为扁椭球。
//!
//! ## 依赖关系
//! - `SpheroidShape` 被 `core_shell_ellipsoid` 复用
//! - 有效半径使用 `kernels/radius.rs` 的椭球维里半径

use crate::kernels::radius::{ellipsoid_excluded_volume_radius, spheroid_volume};
use crate::kernels::special::sas_3j1x_x;
use crate::kernels::Orientation;
use crate::models::{ModelDescriptor, ParameterRole, ParameterSpec, Parameters, Probe, TestCase};
use crate::shapes::{
    orientation_average, oriented_amplitude_squared, AxisymmetricShape, Model, CM_CONVERSION,
};

use std::sync::LazyLock;

const INF: f64 = f64::INFINITY;

/// 均匀旋转椭球的振幅
#[derive(Debug, Clone, Copy)]
pub struct SpheroidShape {
    pub radius_polar: f64,
    pub radius_equatorial: f64,
    pub contrast: f64,
}

impl AxisymmetricShape for SpheroidShape {
    fn amplitude(&self, q: f64, _sin_alpha: f64, cos_alpha: f64) -> f64 {
        let c2 = cos_alpha * cos_alpha;
        let r = (self.radius_polar * self.radius_polar * c2
            + self.radius_equatorial * self.radius_equatorial * (1.0 - c2))
            .sqrt();
        self.contrast * self.volume() * sas_3j1x_x(q * r)
    }

    fn volume(&self) -> f64 {
        spheroid_volume(self.radius_polar, self.radius_equatorial)
    }
}

static DESCRIPTOR: LazyLock<ModelDescriptor> = LazyLock::new(|| {
    ModelDescriptor::new(
        "ellipsoid",
        "Ellipsoid of revolution with uniform scattering length density",
        "shape:ellipsoid",
    )
    .with_description(
        "P(q.alpha)= scale*f(q)^2 + background, where f(q)= 3*(sld-sld_solvent)*V*[sin(q*r(Rp,Re,alpha))\n\
         -q*r*cos(q*r(Rp,Re,alpha))]/[q*r(Rp,Re,alpha)]^3\n\
         r(Rp,Re,alpha)= [Re^(2)*(sin(alpha))^2 + Rp^(2)*(cos(alpha))^2]^(1/2)\n\
         sld: SLD of the ellipsoid\n\
         sld_solvent: SLD of the solvent\n\
         V: volume of the ellipsoid\n\
         Rp: polar radius of the ellipsoid\n\
         Re: equatorial radius of the ellipsoid",
    )
    .with_parameters(vec![
        ParameterSpec::new("sld", "1e-6/Ang^2", 4.0, (-INF, INF), ParameterRole::Sld, "Ellipsoid scattering length density"),
        ParameterSpec::new("sld_solvent", "1e-6/Ang^2", 1.0, (-INF, INF), ParameterRole::Sld, "Solvent scattering length density"),
        ParameterSpec::new("radius_polar", "Ang", 20.0, (0.0, INF), ParameterRole::Volume, "Polar radius"),
        ParameterSpec::new("radius_equatorial", "Ang", 400.0, (0.0, INF), ParameterRole::Volume, "Equatorial radius"),
        ParameterSpec::new("theta", "degrees", 60.0, (-INF, INF), ParameterRole::Orientation, "In plane angle"),
        ParameterSpec::new("phi", "degrees", 60.0, (-INF, INF), ParameterRole::Orientation, "Out of plane angle"),
    ])
    .with_source(&["lib/sas_3j1x_x.c", "lib/gauss76.c", "ellipsoid.c"])
    .with_demo(&[
        ("scale", 1.0),
        ("background", 0.0),
        ("sld", 6.0),
        ("sld_solvent", 1.0),
        ("radius_polar", 50.0),
        ("radius_equatorial", 30.0),
        ("theta", 30.0),
        ("phi", 15.0),
    ])
    .with_tests(vec![
        TestCase::new(&[], Probe::Q(0.05), 54.8516),
        TestCase::new(&[("radius_polar", 50.0), ("radius_equatorial", 50.0)], Probe::EffectiveRadius, 50.0),
    ])
});

/// 旋转椭球模型
pub struct Ellipsoid;

impl Ellipsoid {
    fn shape(pars: &Parameters) -> SpheroidShape {
        SpheroidShape {
            radius_polar: pars["radius_polar"],
            radius_equatorial: pars["radius_equatorial"],
            contrast: pars["sld"] - pars["sld_solvent"],
        }
    }
}

impl Model for Ellipsoid {
    fn descriptor(&self) -> &ModelDescriptor {
        &DESCRIPTOR
    }

    fn form_volume(&self, pars: &Parameters) -> f64 {
        spheroid_volume(pars["radius_polar"], pars["radius_equatorial"])
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
        (mode == 1).then(|| {
            ellipsoid_excluded_volume_radius(pars["radius_polar"], pars["radius_equatorial"])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::DirectModel;

    #[test]
    fn test_spherical_limit_matches_sphere() {
        let pars = DESCRIPTOR
            .resolve([("radius_polar", 40.0), ("radius_equatorial", 40.0)])
            .unwrap();
        let sphere = crate::shapes::sphere::SphereShape {
            radius: 40.0,
            contrast: 3.0,
        };
        for &q in &[0.0, 0.01, 0.1, 0.37] {
            let f = sphere.amplitude(q, 0.0, 1.0);
            let expected = CM_CONVERSION * f * f;
            let got = Ellipsoid.iq(q, &pars);
            assert!(
                (got - expected).abs() <= 1e-12 * expected.max(1e-30),
                "q={} got {} expected {}",
                q,
                got,
                expected
            );
        }
    }

    #[test]
    fn test_polar_axis_along_q() {
        // θ = φ = 0 时极轴沿 qx，F 只由极轴半径决定
        let pars = DESCRIPTOR
            .resolve([("theta", 0.0), ("phi", 0.0)])
            .unwrap();
        let shape = Ellipsoid::shape(&pars);
        let along = CM_CONVERSION * shape.amplitude(0.1, 0.0, 1.0).powi(2);
        let got = Ellipsoid.iqxy(0.1, 0.0, &pars);
        assert!((got - along).abs() <= 1e-12 * along);
    }

    #[test]
    fn test_flat_ellipsoid_effective_radius() {
        for rp in [1e-3, 1e-6, 1e-7] {
            let model = DirectModel::with_overrides(
                &Ellipsoid,
                [("radius_polar", rp), ("radius_equatorial", 400.0)],
            )
            .unwrap();
            let er = model.effective_radius(1).unwrap();
            assert!((er - 266.134).abs() < 1e-3, "ER({}, 400) = {}", rp, er);
            assert!(model.intensity(0.05).unwrap().is_finite());
        }
    }
}
