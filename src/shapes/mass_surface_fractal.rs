//! # 质量/表面分形
//!
//! 由一次粒子（表面分形）聚集成的质量分形团簇：
//!
//! ```text
//! P(q) = {[1 + q²a]^(Dm/2) · [1 + q²b]^((6 − Ds − Dm)/2)}⁻¹
//! a    = Rg²/(3·Dm/2)
//! b    = rg²/(3·(6 − Ds − Dm)/2)
//! ```
//!
//! 与形状无关，`form_volume` 恒为 1，没有有效半径。
//!
//! 参考: Schmidt, J Appl Cryst (1991) 24, 414-435, eq.(19);
//! Hurd, Schaefer, Martin, Phys Rev A (1987) 35, 2361-2364, eq.(2)

use crate::models::{ModelDescriptor, ParameterRole, ParameterSpec, Parameters, Probe, TestCase};
use crate::shapes::Model;

use std::sync::LazyLock;

const INF: f64 = f64::INFINITY;

static DESCRIPTOR: LazyLock<ModelDescriptor> = LazyLock::new(|| {
    ModelDescriptor::new("mass_surface_fractal", "Mass Surface Fractal model", "shape-independent")
        .with_description(
            "The scattering intensity  I(x) = scale*P(x)*S(x) + background, where\n\
             p(x)= {[1+(x^2*a)]^(Dm/2) * [1+(x^2*b)]^(6-Ds-Dm)/2}^(-1)\n\
             a = Rg^2/(3*Dm/2)\n\
             b = rg^2/(3*(6-Ds-Dm)/2)\n\
             scale        =  scale factor * N*Volume^2*contrast^2\n\
             mass_dim       =  Dm (mass fractal dimension)\n\
             surface_dim  =  Ds\n\
             cluster_rg  =  Rg\n\
             primary_rg    =  rg\n\
             background   =  background\n\
             Note that 0 < Ds< 6 and 0 < Dm < 6.",
        )
        .with_parameters(vec![
            ParameterSpec::new("mass_dim", "", 1.8, (1e-16, 6.0), ParameterRole::Plain, "Mass fractal dimension"),
            ParameterSpec::new("surface_dim", "", 2.3, (1e-16, 6.0), ParameterRole::Plain, "Surface fractal dimension"),
            ParameterSpec::new("cluster_rg", "Ang", 86.7, (0.0, INF), ParameterRole::Plain, "Cluster radius of gyration"),
            ParameterSpec::new("primary_rg", "Ang", 4000.0, (0.0, INF), ParameterRole::Plain, "Primary particle radius of gyration"),
        ])
        .with_source(&["mass_surface_fractal.c"])
        .with_demo(&[
            ("scale", 1.0),
            ("background", 0.0),
            ("mass_dim", 1.8),
            ("surface_dim", 2.3),
            ("cluster_rg", 86.7),
            ("primary_rg", 4000.0),
        ])
        .with_tests(vec![
            TestCase::new(
                &[("mass_dim", 1.8), ("surface_dim", 2.3), ("cluster_rg", 86.7), ("primary_rg", 4000.0)],
                Probe::Q(0.05),
                1.77537e-05,
            ),
            TestCase::new(
                &[("mass_dim", 3.3), ("surface_dim", 1.0), ("cluster_rg", 90.0), ("primary_rg", 4000.0)],
                Probe::Q(0.001),
                0.18462699016,
            ),
            TestCase::new(
                &[
                    ("mass_dim", 1.3),
                    ("surface_dim", 1.0),
                    ("cluster_rg", 90.0),
                    ("primary_rg", 2000.0),
                    ("background", 0.8),
                ],
                Probe::Q(0.001),
                1.16539753641,
            ),
            TestCase::new(
                &[
                    ("mass_dim", 2.3),
                    ("surface_dim", 1.0),
                    ("cluster_rg", 90.0),
                    ("primary_rg", 1000.0),
                    ("scale", 10.0),
                ],
                Probe::Q(0.051),
                0.000169548800377,
            ),
        ])
});

/// 质量/表面分形模型
pub struct MassSurfaceFractal;

impl Model for MassSurfaceFractal {
    fn descriptor(&self) -> &ModelDescriptor {
        &DESCRIPTOR
    }

    fn iq(&self, q: f64, pars: &Parameters) -> f64 {
        let mass = 0.5 * pars["mass_dim"];
        let total = 0.5 * (6.0 - pars["surface_dim"] - pars["mass_dim"]);
        let cluster = pars["cluster_rg"];
        let primary = pars["primary_rg"];

        let a = cluster * cluster / (3.0 * mass);
        let b = primary * primary / (3.0 * total);
        let q2 = q * q;
        let denominator = (1.0 + q2 * a).powf(mass) * (1.0 + q2 * b).powf(total);
        if denominator > 0.0 && denominator.is_finite() {
            1.0 / denominator
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_forward_scattering() {
        let pars = DESCRIPTOR.defaults();
        assert!((MassSurfaceFractal.iq(0.0, &pars) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_high_q_power_law() {
        // q ≫ 1/rg 时 P ∝ q^-(6 − Ds)
        let pars = DESCRIPTOR.defaults();
        let (q1, q2) = (10.0, 20.0);
        let slope = (MassSurfaceFractal.iq(q2, &pars) / MassSurfaceFractal.iq(q1, &pars)).ln()
            / (q2 / q1).ln();
        assert!((slope + (6.0 - 2.3)).abs() < 1e-3, "slope = {}", slope);
    }

    #[test]
    fn test_monotonic_decay() {
        let pars = DESCRIPTOR.defaults();
        let mut last = MassSurfaceFractal.iq(0.0, &pars);
        for i in 1..50 {
            let v = MassSurfaceFractal.iq(i as f64 * 0.01, &pars);
            assert!(v < last);
            last = v;
        }
    }
}
