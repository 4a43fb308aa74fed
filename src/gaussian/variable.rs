use super::message::{Gaussian, GaussianMessage};
use crate::core::Variable;

/// Scalar Gaussian variable
#[derive(Debug, Clone, Copy)]
pub struct GaussianVariable;

impl Variable for GaussianVariable {
    type Message = GaussianMessage;
    /// Damping of outgoing messages
    type Parameters = f64;
    type Marginal = Gaussian;

    #[inline(always)]
    fn new() -> Self {
        GaussianVariable
    }

    #[inline(always)]
    fn send_messages(&self, src: &[Self::Message], dst: &mut [Self::Message], parameters: &f64) {
        let product = src
            .iter()
            .fold(GaussianMessage::uniform(), |acc, msg| acc * *msg);
        for (d, s) in dst.iter_mut().zip(src) {
            let prev = *d;
            *d = (product / *s).damp(&prev, *parameters);
        }
    }

    #[inline(always)]
    fn marginal(&self, messages: &[Self::Message]) -> Self::Marginal {
        messages
            .iter()
            .fold(GaussianMessage::uniform(), |acc, msg| acc * *msg)
            .into()
    }
}
