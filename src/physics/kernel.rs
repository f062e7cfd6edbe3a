//! SPH 平滑核
//!
//! 归一化系数采用 Müller 等人 (2003) 的标准形式：
//! poly6 = 315 / (64 π h^9)，spiky 梯度 = -45 / (π h^6)，粘性拉普拉斯 = 45 / (π h^6)。

use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphKernel {
    pub h: f64,
    pub h2: f64,
    pub poly6: f64,
    pub spiky_grad: f64,
    pub visc_lap: f64,
}

impl SphKernel {
    pub fn new(h: f64) -> Self {
        Self {
            h,
            h2: h * h,
            poly6: 315.0 / (64.0 * PI * h.powi(9)),
            spiky_grad: -45.0 / (PI * h.powi(6)),
            visc_lap: 45.0 / (PI * h.powi(6)),
        }
    }

    /// W_poly6(r)，参数为距离平方
    pub fn poly6_at(&self, r2: f64) -> f64 {
        if r2 >= self.h2 {
            return 0.0;
        }
        let d = self.h2 - r2;
        self.poly6 * d * d * d
    }

    /// |∇W_spiky(r)| 的有符号标量部分（沿 r̂）
    pub fn spiky_grad_at(&self, r: f64) -> f64 {
        if r >= self.h {
            return 0.0;
        }
        let d = self.h - r;
        self.spiky_grad * d * d
    }

    /// ∇²W_viscosity(r)
    pub fn visc_lap_at(&self, r: f64) -> f64 {
        if r >= self.h {
            return 0.0;
        }
        self.visc_lap * (self.h - r)
    }
}

/// 状态方程：p = max(k (ρ - ρ0), 0)，压强不为负
pub fn pressure(density: f64, gas_constant: f64, rest_density: f64) -> f64 {
    (gas_constant * (density - rest_density)).max(0.0)
}
