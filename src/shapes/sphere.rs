//! # 均匀球
//!
//! ```text
//! F(q) = Δρ·V·3j₁(qr)/(qr),  V = (4/3)πr³
//! P(q) = scale/V·F² + background
//! ```
//!
//! 有效半径即球半径。
//!
//! ## 依赖关系
//! - 被 `multilayer_vesicle` 复用球壳振幅

use crate::kernels::radius::sphere_volume;
use crate::kernels::special::sas_3j1x_x;
use crate::models::{ModelDescriptor, ParameterRole, ParameterSpec, Parameters, Probe, TestCase};
use crate::shapes::{orientation_average, AxisymmetricShape, Model, CM_CONVERSION};

use std::sync::LazyLock;

const INF: f64 = f64::INFINITY;

/// 均匀球的振幅
#[derive(Debug, Clone, Copy)]
pub struct SphereShape {
    pub radius: f64,
    pub contrast: f64,
}

impl AxisymmetricShape for SphereShape {
    fn amplitude(&self, q: f64, _sin_alpha: f64, _cos_alpha: f64) -> f64 {
        self.contrast * self.volume() * sas_3j1x_x(q * self.radius)
    }

    fn volume(&self) -> f64 {
        sphere_volume(self.radius)
    }
}

static DESCRIPTOR: LazyLock<ModelDescriptor> = LazyLock::new(|| {
    ModelDescriptor::new("sphere", "Spheres with uniform scattering length density", "shape:sphere")
        .with_description(
            "P(q)=(scale/V)*[3V(sld-sld_solvent)*(sin(qr)-qr cos(qr))/(qr)^3]^2 + background\n\
             r: radius of sphere\n\
             V: volume of sphere",
        )
        .with_parameters(vec![
            ParameterSpec::new("sld", "1e-6/Ang^2", 1.0, (-INF, INF), ParameterRole::Sld, "Layer scattering length density"),
            ParameterSpec::new("sld_solvent", "1e-6/Ang^2", 6.0, (-INF, INF), ParameterRole::Sld, "Solvent scattering length density"),
            ParameterSpec::new("radius", "Ang", 50.0, (0.0, INF), ParameterRole::Volume, "Sphere radius"),
        ])
        .with_source(&["lib/sas_3j1x_x.c", "sphere.c"])
        .with_demo(&[
            ("scale", 1.0),
            ("background", 0.0),
            ("sld", 6.0),
            ("sld_solvent", 1.0),
            ("radius", 120.0),
        ])
        .with_tests(vec![
            TestCase::new(&[], Probe::Q(0.2), 0.725362),
            TestCase::new(&[], Probe::EffectiveRadius, 50.0),
            TestCase::new(&[("radius", 20.0), ("background", 0.001)], Probe::Qxy(0.05, 0.05), 55.4789),
        ])
});

/// 均匀球模型
pub struct Sphere;

impl Sphere {
    fn shape(pars: &Parameters) -> SphereShape {
        SphereShape {
            radius: pars["radius"],
            contrast: pars["sld"] - pars["sld_solvent"],
        }
    }
}

impl Model for Sphere {
    fn descriptor(&self) -> &ModelDescriptor {
        &DESCRIPTOR
    }

    fn form_volume(&self, pars: &Parameters) -> f64 {
        sphere_volume(pars["radius"])
    }

    fn iq(&self, q: f64, pars: &Parameters) -> f64 {
        CM_CONVERSION * orientation_average(&Self::shape(pars), q)
    }

    fn iqxy(&self, qx: f64, qy: f64, pars: &Parameters) -> f64 {
        let f = Self::shape(pars).amplitude(qx.hypot(qy), 0.0, 1.0);
        CM_CONVERSION * f * f
    }

    fn effective_radius_modes(&self) -> &'static [&'static str] {
        &["radius"]
    }

    fn effective_radius(&self, mode: usize, pars: &Parameters) -> Option<f64> {
        (mode == 1).then(|| pars["radius"])
    }
}
