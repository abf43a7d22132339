//! # 特殊函数
//!
//! 形状因子振幅所需的贝塞尔类函数，均在小参数处处理可去奇点。
//!
//! ## 函数
//! - `sas_3j1x_x(x)` = 3·j₁(x)/x，球贝塞尔函数，x → 0 时趋于 1
//! - `sas_2j1x_x(x)` = 2·J₁(x)/x，柱贝塞尔函数，x → 0 时趋于 1
//! - `sas_j1(x)`     = J₁(x)，柱贝塞尔函数（Cephes 有理逼近）
//! - `sas_sinx_x(x)` = sin(x)/x，x → 0 时趋于 1
//!
//! ## 依赖关系
//! - 被 `shapes/` 各模型的振幅计算调用
//! - 纯函数，无外部依赖

/// 3·j₁(x)/x 在此阈值以下改用 Taylor 级数
///
/// 直接计算 (sin x − x cos x)/x³ 时分子会发生灾难性相消。
const SPH_J1C_CUTOFF: f64 = 0.1;

/// 2·J₁(x)/x 与 sin(x)/x 的级数阈值
const SERIES_CUTOFF: f64 = 1e-4;

/// 3·j₁(x)/x = 3(sin x − x cos x)/x³
pub fn sas_3j1x_x(x: f64) -> f64 {
    if x.abs() < SPH_J1C_CUTOFF {
        // 1 − x²/10 + x⁴/280 − x⁶/15120 + x⁸/1330560
        let x2 = x * x;
        1.0 - x2 / 10.0 * (1.0 - x2 / 28.0 * (1.0 - x2 / 54.0 * (1.0 - x2 / 88.0)))
    } else {
        let (sn, cn) = x.sin_cos();
        3.0 * (sn - x * cn) / (x * x * x)
    }
}

/// 2·J₁(x)/x
pub fn sas_2j1x_x(x: f64) -> f64 {
    if x.abs() < SERIES_CUTOFF {
        // 1 − x²/8 + x⁴/192
        let x2 = x * x;
        1.0 - x2 / 8.0 * (1.0 - x2 / 24.0)
    } else {
        2.0 * sas_j1(x) / x
    }
}

/// sin(x)/x
pub fn sas_sinx_x(x: f64) -> f64 {
    if x.abs() < SERIES_CUTOFF {
        1.0 - x * x / 6.0
    } else {
        x.sin() / x
    }
}

// ─────────────────────────────────────────────────────────────
// J₁(x)：Cephes j1.c 的双精度有理逼近
// ─────────────────────────────────────────────────────────────

const RP: [f64; 4] = [
    -8.99971225705559398224E8,
    4.52228297998194034323E11,
    -7.27494245221818276015E13,
    3.68295732863852883286E15,
];

const RQ: [f64; 8] = [
    6.20836478118054335476E2,
    2.56987256757748830383E5,
    8.35146791431949253037E7,
    2.21511595479792499675E10,
    4.74914122079991414898E12,
    7.84369607876235854894E14,
    8.95222336184627338078E16,
    5.32278620332680085395E18,
];

const PP: [f64; 7] = [
    7.62125616208173112003E-4,
    7.31397056940917570436E-2,
    1.12719608129684925192E0,
    5.11207951146807644818E0,
    8.42404590141772420927E0,
    5.21451598682361504063E0,
    1.00000000000000000254E0,
];

const PQ: [f64; 7] = [
    5.71323128072548699714E-4,
    6.88455908754495404082E-2,
    1.10514232634061696926E0,
    5.07386386128601488557E0,
    8.39985554327604159757E0,
    5.20982848682361821619E0,
    9.99999999999999997461E-1,
];

const QP: [f64; 8] = [
    5.10862594750176621635E-2,
    4.98213872951233449420E0,
    7.58238284132545283818E1,
    3.66779609360150777800E2,
    7.10856304998926107277E2,
    5.97489612400613639965E2,
    2.11688757100572135698E2,
    2.52070205858023719784E1,
];

const QQ: [f64; 7] = [
    7.42373277035675149943E1,
    1.05644886038262816351E3,
    4.98641058337653607651E3,
    9.56231892404756170795E3,
    7.99704160447350683650E3,
    2.82619278517639096600E3,
    3.36093607810698293419E2,
];

/// J₁ 的前两个零点的平方
const Z1: f64 = 1.46819706421238932572E1;
const Z2: f64 = 4.92184563216946036703E1;

/// 3π/4
const THPIO4: f64 = 2.35619449019234492885;

/// sqrt(2/π)
const SQ2OPI: f64 = 0.79788456080286535588;

/// 柱贝塞尔函数 J₁(x)
pub fn sas_j1(x: f64) -> f64 {
    if x < 0.0 {
        return -sas_j1(-x);
    }

    if x <= 5.0 {
        let z = x * x;
        let w = polevl(z, &RP) / p1evl(z, &RQ);
        return w * x * (z - Z1) * (z - Z2);
    }

    let w = 5.0 / x;
    let z = w * w;
    let p = polevl(z, &PP) / polevl(z, &PQ);
    let q = polevl(z, &QP) / p1evl(z, &QQ);
    let (sn, cn) = (x - THPIO4).sin_cos();
    (p * cn - w * q * sn) * SQ2OPI / x.sqrt()
}

/// 多项式求值，系数按降幂排列
fn polevl(x: f64, coef: &[f64]) -> f64 {
    coef.iter().fold(0.0, |acc, &c| acc * x + c)
}

/// 首项系数为 1 的多项式求值（首项不存储）
fn p1evl(x: f64, coef: &[f64]) -> f64 {
    coef.iter().fold(1.0, |acc, &c| acc * x + c)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// J₁(x) = (1/π)∫₀^π cos(τ − x sin τ) dτ，梯形法（周期被积函数收敛极快）
    fn j1_integral(x: f64) -> f64 {
        let n = 2000;
        let h = std::f64::consts::PI / n as f64;
        let mut sum = 0.0;
        for k in 0..=n {
            let t = k as f64 * h;
            let w = if k == 0 || k == n { 0.5 } else { 1.0 };
            sum += w * (t - x * t.sin()).cos();
        }
        sum * h / std::f64::consts::PI
    }

    #[test]
    fn test_j1_matches_integral_representation() {
        for &x in &[0.001, 0.5, 1.0, 2.5, 4.9, 5.0, 5.1, 8.0, 12.0, 30.0, 100.0] {
            let got = sas_j1(x);
            let want = j1_integral(x);
            assert!(
                (got - want).abs() < 1e-12,
                "J1({}) = {}, expected {}",
                x,
                got,
                want
            );
        }
    }

    #[test]
    fn test_j1_is_odd() {
        assert_eq!(sas_j1(-3.7), -sas_j1(3.7));
        assert_eq!(sas_j1(0.0), 0.0);
    }

    #[test]
    fn test_sph_j1c_continuous_at_cutoff() {
        let below = sas_3j1x_x(SPH_J1C_CUTOFF * (1.0 - 1e-12));
        let above = sas_3j1x_x(SPH_J1C_CUTOFF * (1.0 + 1e-12));
        assert!((below - above).abs() < 1e-12);
    }

    #[test]
    fn test_removable_singularities() {
        assert_eq!(sas_3j1x_x(0.0), 1.0);
        assert_eq!(sas_2j1x_x(0.0), 1.0);
        assert_eq!(sas_sinx_x(0.0), 1.0);

        for &x in &[1e-9, 1e-6, 1e-3] {
            assert!((sas_3j1x_x(x) - 1.0).abs() < x * x);
            assert!((sas_2j1x_x(x) - 1.0).abs() < x * x);
            assert!((sas_sinx_x(x) - 1.0).abs() < x * x);
        }
    }

    #[test]
    fn test_sph_j1c_first_zero() {
        // tan x = x 的第一个正根
        let x0 = 4.493409457909064;
        assert!(sas_3j1x_x(x0).abs() < 1e-12);
    }
}
