use std::{convert::Infallible, marker::PhantomData};

/// Transition and reward oracle for a finite MDP.
///
/// The solver treats both methods as pure functions of `(state, action)`.
/// `transition` must return one probability per state, aligned with the
/// state order passed to the solver. Distributions are used as given: they
/// are not renormalized or checked to sum to one.
pub trait MdpModel<S, A> {
    type Error;

    /// Probability of moving to each state after taking `action` in `state`.
    fn transition(&self, state: &S, action: &A) -> Result<Vec<f64>, Self::Error>;

    /// Immediate reward for taking `action` in `state`.
    fn reward(&self, state: &S, action: &A) -> Result<f64, Self::Error>;
}

/// Model built from a pair of infallible closures.
pub struct FnModel<S, A, P, R> {
    probs: P,
    rewards: R,
    _marker: PhantomData<fn(&S, &A)>,
}

impl<S, A, P, R> FnModel<S, A, P, R>
where
    P: Fn(&S, &A) -> Vec<f64>,
    R: Fn(&S, &A) -> f64,
{
    pub fn new(probs: P, rewards: R) -> Self {
        FnModel {
            probs,
            rewards,
            _marker: PhantomData,
        }
    }
}

impl<S, A, P, R> MdpModel<S, A> for FnModel<S, A, P, R>
where
    P: Fn(&S, &A) -> Vec<f64>,
    R: Fn(&S, &A) -> f64,
{
    type Error = Infallible;

    fn transition(&self, state: &S, action: &A) -> Result<Vec<f64>, Infallible> {
        Ok((self.probs)(state, action))
    }

    fn reward(&self, state: &S, action: &A) -> Result<f64, Infallible> {
        Ok((self.rewards)(state, action))
    }
}
