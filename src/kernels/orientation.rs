//! # 粒子取向与二维 q 投影
//!
//! 将探测器平面上的 (qx, qy) 投影到粒子自身坐标系。
//!
//! ## 坐标约定
//! 实验室坐标系 (x, y, z)，z 沿入射束方向，q = (qx, qy, 0)。
//! 粒子对称轴 ĉ 由 θ、φ（度）给出：
//!
//! ```text
//! ĉ = (cos θ cos φ, sin θ, cos θ sin φ)
//! â₀ = ∂ĉ/∂θ            = (−sin θ cos φ, cos θ, −sin θ sin φ)
//! b̂₀ = (∂ĉ/∂φ) / cos θ  = (−sin φ, 0, cos φ)
//! ```
//!
//! 第三个角 ψ 绕 ĉ 旋转 (â₀, b̂₀)，只对非轴对称形状有意义。
//! 对轴对称形状，cos α = q̂·ĉ 即 q 与对称轴夹角的余弦。
//!
//! ## 依赖关系
//! - 被 `shapes/` 中的二维强度计算调用
//! - 无外部依赖

/// 粒子坐标系下的 q 分量
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QProjection {
    /// |q|
    pub q: f64,
    /// 沿 â 的分量
    pub qa: f64,
    /// 沿 b̂ 的分量
    pub qb: f64,
    /// 沿对称轴 ĉ 的分量
    pub qc: f64,
}

/// 粒子取向（角度制）
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    pub theta: f64,
    pub phi: f64,
    pub psi: f64,
}

impl Orientation {
    /// 轴对称形状的取向（ψ 无意义）
    pub fn symmetric(theta: f64, phi: f64) -> Self {
        Self {
            theta,
            phi,
            psi: 0.0,
        }
    }

    /// 一般形状的取向
    pub fn new(theta: f64, phi: f64, psi: f64) -> Self {
        Self { theta, phi, psi }
    }

    /// 粒子坐标轴 (â, b̂, ĉ) 在实验室坐标系中的表示
    pub fn frame(&self) -> [[f64; 3]; 3] {
        let (sin_t, cos_t) = self.theta.to_radians().sin_cos();
        let (sin_p, cos_p) = self.phi.to_radians().sin_cos();
        let (sin_s, cos_s) = self.psi.to_radians().sin_cos();

        let c = [cos_t * cos_p, sin_t, cos_t * sin_p];
        let a0 = [-sin_t * cos_p, cos_t, -sin_t * sin_p];
        let b0 = [-sin_p, 0.0, cos_p];

        let a = [
            cos_s * a0[0] + sin_s * b0[0],
            cos_s * a0[1] + sin_s * b0[1],
            cos_s * a0[2] + sin_s * b0[2],
        ];
        let b = [
            -sin_s * a0[0] + cos_s * b0[0],
            -sin_s * a0[1] + cos_s * b0[1],
            -sin_s * a0[2] + cos_s * b0[2],
        ];

        [a, b, c]
    }

    /// 将探测器平面上的 (qx, qy) 投影到粒子坐标系
    pub fn project(&self, qx: f64, qy: f64) -> QProjection {
        let [a, b, c] = self.frame();
        QProjection {
            q: qx.hypot(qy),
            qa: a[0] * qx + a[1] * qy,
            qb: b[0] * qx + b[1] * qy,
            qc: c[0] * qx + c[1] * qy,
        }
    }

    /// 轴对称形状：返回 (q, sin α, cos α)
    ///
    /// q = 0 时 α 无定义，取 cos α = 1（前向散射与取向无关）。
    pub fn symmetric_angles(&self, qx: f64, qy: f64) -> (f64, f64, f64) {
        let (sin_t, cos_t) = self.theta.to_radians().sin_cos();
        let (sin_p, cos_p) = self.phi.to_radians().sin_cos();
        let q = qx.hypot(qy);
        if q == 0.0 {
            return (0.0, 0.0, 1.0);
        }
        let cos_alpha = ((cos_t * cos_p * qx + sin_t * qy) / q).clamp(-1.0, 1.0);
        let sin_alpha = (1.0 - cos_alpha * cos_alpha).sqrt();
        (q, sin_alpha, cos_alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot(u: &[f64; 3], v: &[f64; 3]) -> f64 {
        u[0] * v[0] + u[1] * v[1] + u[2] * v[2]
    }

    #[test]
    fn test_frame_is_orthonormal() {
        let orient = Orientation::new(23.0, -71.0, 140.0);
        let frame = orient.frame();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                let got = dot(&frame[i], &frame[j]);
                assert!(
                    (got - expected).abs() < 1e-14,
                    "frame[{}]·frame[{}] = {}",
                    i,
                    j,
                    got
                );
            }
        }
    }

    #[test]
    fn test_projection_preserves_length() {
        let orient = Orientation::new(10.0, 35.0, 60.0);
        let p = orient.project(0.3, -0.4);
        let len = (p.qa * p.qa + p.qb * p.qb + p.qc * p.qc).sqrt();
        assert!((len - 0.5).abs() < 1e-14);
        assert!((p.q - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_symmetric_angles_agree_with_frame() {
        let orient = Orientation::symmetric(30.0, 45.0);
        let (q, sin_alpha, cos_alpha) = orient.symmetric_angles(0.1, 0.2);
        let p = orient.project(0.1, 0.2);
        assert!((cos_alpha - p.qc / q).abs() < 1e-14);
        assert!((sin_alpha * sin_alpha + cos_alpha * cos_alpha - 1.0).abs() < 1e-14);
    }

    #[test]
    fn test_zero_angles_put_axis_along_qx() {
        let orient = Orientation::symmetric(0.0, 0.0);
        let (_, sin_alpha, cos_alpha) = orient.symmetric_angles(0.4, 0.0);
        assert!((cos_alpha - 1.0).abs() < 1e-15);
        assert!(sin_alpha.abs() < 1e-7);

        let (_, _, cos_alpha) = orient.symmetric_angles(0.0, 0.4);
        assert!(cos_alpha.abs() < 1e-15);
    }

    #[test]
    fn test_zero_q_is_forward_limit() {
        let orient = Orientation::symmetric(12.0, 34.0);
        assert_eq!(orient.symmetric_angles(0.0, 0.0), (0.0, 0.0, 1.0));
    }
}
