use crate::gaussian::numerics::{
    erfc, log_normal_cdf, normal_cdf, normal_pdf, normal_pdf_cdf_ratio,
    normal_ratio_and_variance_factor, probit_tilted_moments,
};

#[test]
fn normal_cdf_reference_values() {
    let reference = [
        (0f64, 0.5f64),
        (1f64, 0.8413447460685429),
        (-1f64, 0.15865525393145707),
        (1.96f64, 0.9750021048517795),
        (-3f64, 0.0013498980316300933),
    ];
    for (x, p) in reference {
        assert!(
            ((normal_cdf(x) - p) / p).abs() < 2e-7,
            "cdf({}) = {}, expected {}",
            x,
            normal_cdf(x),
            p
        );
    }
    assert!((erfc(0.) - 1.).abs() < 2e-7);
    assert!((normal_pdf(0.) - 0.3989422804014327).abs() < 1e-15);
}

#[test]
fn left_tail_is_finite() {
    // log cdf(-40) ~ -804.6084420137538
    assert!((log_normal_cdf(-40.) + 804.6084420137538).abs() < 1e-5);
    // pdf / cdf behaves as -x in the far left tail
    let ratio = normal_pdf_cdf_ratio(-1e3);
    assert!((ratio - 1e3).abs() < 1e-2);
    assert!(normal_pdf_cdf_ratio(-5.).is_finite());
    assert!(log_normal_cdf(8.) < 0. && log_normal_cdf(8.) > -1e-14);
}

#[test]
fn tilted_moments_shrink_variance() {
    for mean in [-5000f64, -1000f64, -10f64, -1f64, 0f64, 2f64, 30f64] {
        for variance in [0.01f64, 1f64, 100f64] {
            let (log_z, m, v) = probit_tilted_moments(mean, variance, true);
            assert!(log_z <= 0.);
            assert!(m >= mean);
            assert!(v > 0. && v <= variance);
        }
    }
}

#[test]
fn tilted_moments_far_left_tail() {
    // (cavity mean, exact tilted mean, exact tilted variance) for unit cavity variance
    let reference = [
        (-50f64, -24.980031872752029367f64, 0.50039809269494301984f64),
        (-200f64, -99.995000499875046228f64, 0.50002499250312338224f64),
        (-2000f64, -999.99950000049999875f64, 0.50000024999925000312f64),
    ];
    for (cavity_mean, exact_mean, exact_variance) in reference {
        let (log_z, mean, variance) = probit_tilted_moments(cavity_mean, 1., true);
        assert!(log_z.is_finite());
        assert!(
            ((mean - exact_mean) / exact_mean).abs() < 1e-10,
            "Mean error at {}: {}",
            cavity_mean,
            (mean - exact_mean).abs()
        );
        assert!(
            ((variance - exact_variance) / exact_variance).abs() < 1e-10,
            "Variance error at {}: {}",
            cavity_mean,
            (variance - exact_variance).abs()
        );
    }
    // the continued fraction and the error function branches meet smoothly
    let below = normal_ratio_and_variance_factor(-2. - 1e-9);
    let above = normal_ratio_and_variance_factor(-2. + 1e-9);
    assert!((below.0 - above.0).abs() < 1e-6);
    assert!((below.1 - above.1).abs() < 1e-5);
}
