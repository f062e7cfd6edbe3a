use std::f64::consts::PI;

use crate::physics::{SphKernel, pressure};

#[test]
fn coefficients_follow_standard_normalisation() {
    let k = SphKernel::new(2.0);
    assert!((k.poly6 - 315.0 / (64.0 * PI * 512.0)).abs() < 1e-15);
    assert!((k.spiky_grad + 45.0 / (PI * 64.0)).abs() < 1e-15);
    assert!((k.visc_lap - 45.0 / (PI * 64.0)).abs() < 1e-15);
}

#[test]
fn kernels_vanish_outside_support() {
    let k = SphKernel::new(4.0);
    assert_eq!(k.poly6_at(16.0), 0.0);
    assert_eq!(k.poly6_at(20.0), 0.0);
    assert_eq!(k.spiky_grad_at(4.0), 0.0);
    assert_eq!(k.visc_lap_at(5.0), 0.0);
    assert!(k.poly6_at(0.0) > k.poly6_at(4.0));
    assert!(k.spiky_grad_at(1.0) < 0.0);
    assert!(k.visc_lap_at(1.0) > 0.0);
}

#[test]
fn pressure_never_negative() {
    assert_eq!(pressure(0.5, 10.0, 1.0), 0.0);
    assert_eq!(pressure(1.5, 10.0, 1.0), 5.0);
}
