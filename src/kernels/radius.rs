//! # 几何体积与有效半径
//!
//! 各形状共用的纯几何函数。有效半径 (ER) 用于 P(q)·S(q) 耦合时
//! 代替球半径传给结构因子。
//!
//! ## 依赖关系
//! - 被 `shapes/` 各模型的 `form_volume` 与 `effective_radius` 调用
//! - 无外部依赖

use std::f64::consts::PI;

/// 球体积 (4/3)πr³
pub fn sphere_volume(r: f64) -> f64 {
    4.0 / 3.0 * PI * r * r * r
}

/// 旋转椭球体积 (4/3)π·r_polar·r_equat²
pub fn spheroid_volume(radius_polar: f64, radius_equatorial: f64) -> f64 {
    4.0 / 3.0 * PI * radius_polar * radius_equatorial * radius_equatorial
}

/// 圆柱体积 πr²L
pub fn cylinder_volume(radius: f64, length: f64) -> f64 {
    PI * radius * radius * length
}

/// 圆柱的第二维里系数等效半径
///
/// ER = ½·[¾·r·(2rL + (L + r)(L + πr))]^{1/3}
pub fn cylinder_excluded_volume_radius(radius: f64, length: f64) -> f64 {
    let ddd = 0.75 * radius * (2.0 * radius * length + (length + radius) * (length + PI * radius));
    0.5 * ddd.cbrt()
}

/// 旋转椭球的第二维里系数等效半径
///
/// 以离心率 e 表示：
/// ```text
/// b1 = 1 + arcsin(e) / (e·sqrt(1 − e²))
/// b2 = 1 + (1 − e²)/(2e) · ln[(1 + e)/(1 − e)]
/// δ  = ¾·b1·b2
/// ER = ½·[2(δ + 1)·r_polar·r_equat²]^{1/3}
/// ```
/// sqrt(1 − e²) 直接取短长轴比 s = r_min/r_max，1 − e = s²/(1 + e)，
/// 因此极扁或极长时仍趋于有限极限（扁椭球 ER → ½·(¾π·r_equat³)^{1/3}）。
/// 球形时 ER = r。任一半径为 0 时返回 0。
pub fn ellipsoid_excluded_volume_radius(radius_polar: f64, radius_equatorial: f64) -> f64 {
    if radius_polar * radius_equatorial == 0.0 {
        return 0.0;
    }
    if radius_polar == radius_equatorial {
        return radius_polar;
    }

    let (r_min, r_max) = if radius_polar < radius_equatorial {
        (radius_polar, radius_equatorial)
    } else {
        (radius_equatorial, radius_polar)
    };
    let s = r_min / r_max;
    let bd = s * s;
    let e1 = ((1.0 - s) * (1.0 + s)).sqrt();

    let b1 = 1.0 + e1.asin() / (e1 * s);
    // ln[(1 + e)/(1 − e)]
    let log_ratio = if e1 < 0.5 {
        2.0 * e1.atanh()
    } else {
        2.0 * (e1.ln_1p() - s.ln())
    };
    let b2 = 1.0 + bd / (2.0 * e1) * log_ratio;
    let delta = 0.75 * b1 * b2;

    let ddd = 2.0 * (delta + 1.0) * radius_polar * radius_equatorial * radius_equatorial;
    0.5 * ddd.cbrt()
}
