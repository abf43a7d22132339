//! # Gauss–Legendre 求积
//!
//! 提供取向平均使用的固定阶 Gauss–Legendre 求积表（默认 76 点）。
//!
//! ## 算法
//! 节点为 Legendre 多项式 P_n 的零点，用 Newton 迭代从 Chebyshev 初值求得：
//! xᵢ ← xᵢ − P_n(xᵢ)/P_n'(xᵢ)，权重 wᵢ = 2 / [(1 − xᵢ²) P_n'(xᵢ)²]。
//!
//! ## 依赖关系
//! - 被 `kernels/orientation.rs` 和 `shapes/` 中的积分调用
//! - 纯静态数据，首次访问时构建

use std::f64::consts::PI;
use std::sync::LazyLock;

/// 取向平均使用的积分阶数
pub const GAUSS_N: usize = 76;

/// Gauss–Legendre 求积规则，节点在 [-1, 1] 上升序排列
#[derive(Debug, Clone)]
pub struct GaussRule {
    /// 节点 zᵢ ∈ (-1, 1)
    pub z: Vec<f64>,
    /// 权重 wᵢ，总和为 2
    pub w: Vec<f64>,
}

impl GaussRule {
    /// 构建 n 点 Gauss–Legendre 规则
    pub fn legendre(n: usize) -> Self {
        let mut z = vec![0.0; n];
        let mut w = vec![0.0; n];

        // 节点关于 0 对称，只需求一半
        for i in 0..(n + 1) / 2 {
            let mut x = (PI * (i as f64 + 0.75) / (n as f64 + 0.5)).cos();
            for _ in 0..100 {
                let (p, d) = legendre_with_derivative(n, x);
                let dx = p / d;
                x -= dx;
                if dx.abs() < 1e-16 {
                    break;
                }
            }
            let (_, dp) = legendre_with_derivative(n, x);

            let weight = 2.0 / ((1.0 - x * x) * dp * dp);
            z[i] = -x;
            z[n - 1 - i] = x;
            w[i] = weight;
            w[n - 1 - i] = weight;
        }

        Self { z, w }
    }

    /// 节点数
    pub fn len(&self) -> usize {
        self.z.len()
    }

    /// 规则是否为空
    pub fn is_empty(&self) -> bool {
        self.z.is_empty()
    }

    /// 将第 i 个节点映射到 [a, b]
    #[inline]
    pub fn node(&self, i: usize, a: f64, b: f64) -> f64 {
        0.5 * (self.z[i] * (b - a) + a + b)
    }

    /// 计算 ∫ₐᵇ f(x) dx
    ///
    /// 按节点升序累加，保证浮点结果可复现。
    pub fn integrate<F>(&self, a: f64, b: f64, mut f: F) -> f64
    where
        F: FnMut(f64) -> f64,
    {
        let mut total = 0.0;
        for i in 0..self.len() {
            total += self.w[i] * f(self.node(i, a, b));
        }
        total * 0.5 * (b - a)
    }
}

/// 递推计算 P_n(x) 与 P_n'(x)
fn legendre_with_derivative(n: usize, x: f64) -> (f64, f64) {
    let mut p0 = 1.0;
    let mut p1 = x;
    for k in 2..=n {
        let kf = k as f64;
        let p2 = ((2.0 * kf - 1.0) * x * p1 - (kf - 1.0) * p0) / kf;
        p0 = p1;
        p1 = p2;
    }
    let d = n as f64 * (x * p1 - p0) / (x * x - 1.0);
    (p1, d)
}

/// 76 点 Gauss–Legendre 规则
pub static GAUSS76: LazyLock<GaussRule> = LazyLock::new(|| GaussRule::legendre(GAUSS_N));
