use super::utils::rts_smoother;
use crate::core::Message;
use crate::gaussian::schedulers::{get_standard_factor_scheduler, get_standard_variable_scheduler};
use crate::gaussian::{
    new_gaussian_builder, random_message_initializer, vague_message_initializer, GaussianFactor,
    GaussianMessage,
};
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Normal};

#[test]
fn gaussian_chain_matches_rts_smoother() {
    let steps = 50;
    let (m0, v0, q, r) = (0.5f64, 4f64, 0.3f64, 0.8f64);
    let error = 1e-10f64;
    let mut rng = StdRng::seed_from_u64(42);
    let noise = Normal::new(0f64, 1f64).unwrap();
    let observations: Vec<f64> = (0..steps)
        .map(|t| (t as f64 / 7f64).sin() + noise.sample(&mut rng))
        .collect();
    let mut fgb = new_gaussian_builder(steps, 2 * steps);
    let mut initializer = random_message_initializer(StdRng::seed_from_u64(7), 1e3);
    fgb.add_factor(GaussianFactor::prior(m0, v0), &[0], &mut initializer)
        .unwrap();
    for t in 1..steps {
        fgb.add_factor(GaussianFactor::transition(q), &[t - 1, t], &mut initializer)
            .unwrap();
    }
    for (t, y) in observations.iter().enumerate() {
        fgb.add_factor(GaussianFactor::prior(*y, r), &[t], &mut initializer)
            .unwrap();
    }
    let mut fg = fgb.build();
    let info = fg
        .run_message_passing_parallel(
            1000,
            0,
            error,
            &get_standard_factor_scheduler(0.),
            &get_standard_variable_scheduler(0.),
        )
        .unwrap();
    assert!(info.iterations_number <= 2 * steps + 2);
    let (exact_means, exact_vars) = rts_smoother(m0, v0, q, r, &observations);
    for (t, marginal) in fg.variable_marginals().iter().enumerate() {
        assert!(
            (marginal.mean - exact_means[t]).abs() < 1e-8,
            "Mean error at {}: {}",
            t,
            (marginal.mean - exact_means[t]).abs()
        );
        assert!(
            (marginal.variance - exact_vars[t]).abs() < 1e-8,
            "Variance error at {}: {}",
            t,
            (marginal.variance - exact_vars[t]).abs()
        );
    }
}

#[test]
fn damping_keeps_fixed_point() {
    let steps = 10;
    let build = || {
        let mut fgb = new_gaussian_builder(steps, 2 * steps);
        let mut initializer = vague_message_initializer(1e12);
        fgb.add_factor(GaussianFactor::prior(0., 1.), &[0], &mut initializer)
            .unwrap();
        for t in 1..steps {
            fgb.add_factor(GaussianFactor::transition(0.5), &[t - 1, t], &mut initializer)
                .unwrap();
            fgb.add_factor(GaussianFactor::probit(t % 3 != 0), &[t], &mut initializer)
                .unwrap();
        }
        fgb.build()
    };
    let mut plain = build();
    let mut damped = build();
    plain
        .run_message_passing_parallel(
            1000,
            0,
            1e-12,
            &get_standard_factor_scheduler(0.),
            &get_standard_variable_scheduler(0.),
        )
        .unwrap();
    let info = damped
        .run_message_passing_parallel(
            5000,
            0,
            1e-12,
            &get_standard_factor_scheduler(0.5),
            &get_standard_variable_scheduler(0.2),
        )
        .unwrap();
    assert!(info.discrepancy_dynamics.len() == info.iterations_number);
    for (p, d) in plain
        .variable_marginals()
        .iter()
        .zip(damped.variable_marginals())
    {
        assert!((p.mean - d.mean).abs() < 1e-8);
        assert!((p.variance - d.variance).abs() < 1e-8);
    }
}

#[test]
fn cloned_graph_is_independent() {
    let mut fgb = new_gaussian_builder(2, 3);
    let mut initializer = vague_message_initializer(1e12);
    fgb.add_factor(GaussianFactor::prior(1., 2.), &[0], &mut initializer)
        .unwrap();
    fgb.add_factor(GaussianFactor::transition(1.), &[0, 1], &mut initializer)
        .unwrap();
    fgb.add_factor(GaussianFactor::prior(-3., 0.5), &[1], &mut initializer)
        .unwrap();
    let fg = fgb.build();
    let before = fg.variable_marginals();
    let mut cloned = fg.clone();
    cloned.run_iterations(
        10,
        &get_standard_factor_scheduler(0.),
        &get_standard_variable_scheduler(0.),
    );
    assert_eq!(fg.variable_marginals(), before);
    // x0 | x1 observation: precision 1 / 2 + 1 / 1.5, exact by Gaussian algebra
    let posterior = cloned.variable_marginal(0).unwrap();
    let precision = 0.5 + 1. / 1.5;
    let mean = (1. * 0.5 + -3. / 1.5) / precision;
    assert!((posterior.variance - 1. / precision).abs() < 1e-10);
    assert!((posterior.mean - mean).abs() < 1e-10);
}

#[test]
fn gaussian_message_algebra() {
    let a = GaussianMessage::from_moments(1., 2.);
    let b = GaussianMessage::from_moments(-1., 0.5);
    let product = a * b;
    assert!((product.variance() - 0.4).abs() < 1e-12);
    assert!((product.mean() - (0.5 - 2.) * 0.4).abs() < 1e-12);
    assert!((product / b).discrepancy(&a) < 1e-12);
    let flat = GaussianMessage::from_moments(3., f64::INFINITY);
    assert_eq!(flat, GaussianMessage::uniform());
    assert!(!flat.is_proper());
    assert!(flat.variance().is_infinite());
    let damped = a.damp(&b, 0.25);
    assert!((damped.precision - (0.75 * 0.5 + 0.25 * 2.)).abs() < 1e-12);
}
