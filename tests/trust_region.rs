use rpdhg::algebra::*;
use rpdhg::solver::trust_region::*;

#[test]
fn test_returns_bound_when_inside_ball() {
    let g = [1., 0., 0.];
    let l = [0., 0., 0.];
    let z = [0., 0., 0.];
    let sol = project(&g, &l, &z, 1.0).unwrap();
    assert_eq!(sol.z_hat, l.to_vec());
    assert_eq!(sol.lambda, 0.);

    // bound strictly inside the ball
    let z = [0.3, 0.4, 0.];
    let sol = project(&g, &l, &z, 1.0).unwrap();
    assert_eq!(sol.z_hat, l.to_vec());
}

#[test]
fn test_hits_radius() {
    let g = [1., 2., -1.];
    let l = [0., 0., 0.];
    let z = [1., 1., 1.];
    let r: f64 = 1.2;

    let sol = project(&g, &l, &z, r).unwrap();
    assert!((sol.z_hat.dist(&z) - r).abs() <= 1e-9);
    assert!((sol.lambda - (1.44f64 / 6.).sqrt()).abs() <= 1e-12);

    // coordinate 2 reaches its bound first, coordinate 3 never binds
    assert!(sol.z_hat[0] > 0.);
    assert!(sol.z_hat[1] > 0.);
    assert!(sol.z_hat[2] > z[2]);
}

#[test]
fn test_all_breakpoints_passed() {
    // every coordinate clamps before the radius is met, except a free one
    let g = [1., 1., 1., -1.];
    let l = [0., 0., 0., f64::NEG_INFINITY];
    let z = [0.1, 0.2, 0.3, 0.];
    let r: f64 = 2.0;

    let sol = project(&g, &l, &z, r).unwrap();
    assert_eq!(&sol.z_hat[..3], &[0., 0., 0.]);
    let f_low: f64 = 0.01 + 0.04 + 0.09;
    assert!((sol.z_hat[3] - (4. - f_low).sqrt()).abs() <= 1e-12);
    assert!((sol.z_hat.dist(&z) - r).abs() <= 1e-9);
}

#[test]
fn test_equal_breakpoints() {
    let g = [1., 2., 0.5];
    let l = [0., 0., 0.];
    let z = [1., 2., 0.5];
    let r: f64 = 1.0;

    let sol = project(&g, &l, &z, r).unwrap();
    assert!((sol.z_hat.dist(&z) - r).abs() <= 1e-9);
    assert!(sol.lambda < 1.0);
}

#[test]
fn test_errors() {
    assert!(matches!(
        project(&[1.], &[0.], &[1.], -1.0),
        Err(TrustRegionError::NonPositiveRadius)
    ));
    assert!(matches!(
        project(&[1., 1.], &[0.], &[1., 1.], 1.0),
        Err(TrustRegionError::DimensionMismatch { .. })
    ));
    assert!(matches!(
        project(&[1.], &[2.], &[1.], 1.0),
        Err(TrustRegionError::InfeasibleAnchor(0))
    ));
}
