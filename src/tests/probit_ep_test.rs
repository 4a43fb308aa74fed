use super::utils::probit_posterior_by_quadrature;
use crate::core::Factor;
use crate::gaussian::factor::MIN_SITE_PRECISION;
use crate::gaussian::schedulers::{
    get_relaxing_factor_scheduler, get_standard_factor_scheduler, get_standard_variable_scheduler,
    GaussianFactorParameters,
};
use crate::gaussian::{new_gaussian_builder, vague_message_initializer, GaussianFactor, GaussianMessage};

fn single_site_posterior(mean: f64, variance: f64, observation: bool) -> (f64, f64) {
    let mut fgb = new_gaussian_builder(1, 2);
    let mut initializer = vague_message_initializer(1e12);
    fgb.add_factor(GaussianFactor::prior(mean, variance), &[0], &mut initializer)
        .unwrap();
    fgb.add_factor(GaussianFactor::probit(observation), &[0], &mut initializer)
        .unwrap();
    let mut fg = fgb.build();
    fg.run_message_passing_parallel(
        100,
        0,
        1e-12,
        &get_standard_factor_scheduler(0.),
        &get_standard_variable_scheduler(0.),
    )
    .unwrap();
    let marginal = fg.variable_marginal(0).unwrap();
    (marginal.mean, marginal.variance)
}

#[test]
fn single_probit_site_is_exact() {
    for (mean, variance, observation) in [
        (0f64, 1f64, true),
        (0f64, 1f64, false),
        (1.5f64, 0.3f64, false),
        (-2f64, 4f64, true),
        (0.7f64, 25f64, true),
    ] {
        let (ep_mean, ep_variance) = single_site_posterior(mean, variance, observation);
        let (exact_mean, exact_variance) =
            probit_posterior_by_quadrature(mean, variance, observation);
        assert!(
            (ep_mean - exact_mean).abs() < 1e-5,
            "Mean error: {}",
            (ep_mean - exact_mean).abs()
        );
        assert!(
            (ep_variance - exact_variance).abs() < 1e-5,
            "Variance error: {}",
            (ep_variance - exact_variance).abs()
        );
    }
}

#[test]
fn standard_prior_positive_observation() {
    // E[x | y = 1] = pdf(0) / (cdf(0) * sqrt(2)) for x ~ N(0, 1)
    let (mean, variance) = single_site_posterior(0., 1., true);
    let exact_mean = 1f64 / std::f64::consts::PI.sqrt();
    assert!((mean - exact_mean).abs() < 1e-6);
    assert!(variance < 1.);
    let (negative_mean, negative_variance) = single_site_posterior(0., 1., false);
    assert!((negative_mean + mean).abs() < 1e-10);
    assert!((negative_variance - variance).abs() < 1e-10);
}

#[test]
fn improper_cavity_keeps_previous_site() {
    let factor = GaussianFactor::probit(true);
    let previous = GaussianMessage::from_moments(0.3, 2.);
    let mut dst = [previous];
    factor.send_messages(
        &[GaussianMessage::uniform()],
        &mut dst,
        &GaussianFactorParameters { damping: 0. },
    );
    assert_eq!(dst[0], previous);
}

#[test]
fn extreme_cavity_gives_finite_site() {
    let factor = GaussianFactor::probit(true);
    let mut dst = [GaussianMessage::uniform()];
    factor.send_messages(
        &[GaussianMessage::from_moments(-60., 1.)],
        &mut dst,
        &GaussianFactorParameters { damping: 0. },
    );
    assert!(dst[0].precision.is_finite() && dst[0].precision > 0.);
    assert!(dst[0].precision_mean.is_finite());
}

#[test]
fn uninformative_site_is_clamped() {
    // the cavity already explains the observation, moment matching changes nothing
    let factor = GaussianFactor::probit(true);
    let mut dst = [GaussianMessage::uniform()];
    factor.send_messages(
        &[GaussianMessage::from_moments(20., 1.)],
        &mut dst,
        &GaussianFactorParameters { damping: 0. },
    );
    assert_eq!(dst[0].precision, MIN_SITE_PRECISION);
    assert!(dst[0].precision_mean.abs() < 1e-10);
}

#[test]
fn far_tail_site_carries_information() {
    let factor = GaussianFactor::probit(true);
    let mut dst = [GaussianMessage::uniform()];
    factor.send_messages(
        &[GaussianMessage::from_moments(-5000., 1.)],
        &mut dst,
        &GaussianFactorParameters { damping: 0. },
    );
    // tilted variance tends to 1 / 2, so the site precision tends to 1
    assert!((dst[0].precision - 1.).abs() < 1e-5);
}

#[test]
fn transition_passes_flat_messages() {
    let factor = GaussianFactor::transition(2.);
    let mut dst = [GaussianMessage::uniform(); 2];
    factor.send_messages(
        &[
            GaussianMessage::from_moments(1., 3.),
            GaussianMessage::uniform(),
        ],
        &mut dst,
        &GaussianFactorParameters { damping: 0. },
    );
    assert_eq!(dst[0], GaussianMessage::uniform());
    assert!((dst[1].mean() - 1.).abs() < 1e-12);
    assert!((dst[1].variance() - 5.).abs() < 1e-12);
}

#[test]
fn relaxing_scheduler_approaches_end_value() {
    let scheduler = get_relaxing_factor_scheduler(0.9, 0.1, 10.);
    assert!((scheduler(0).damping - 0.9).abs() < 1e-12);
    assert!(scheduler(5).damping > scheduler(6).damping);
    assert!((scheduler(1000).damping - 0.1).abs() < 1e-12);
}
