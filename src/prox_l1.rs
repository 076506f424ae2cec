use num_traits::Float;
use core::marker::PhantomData;
use crate::solver::{Prox, LinAlg};

//

/// Soft-threshold \\(\max(0, v - t) - \max(0, -v - t)\\).
///
/// Written in the two-max form so that no sign branch is taken; \\(v = 0\\) maps to \\(0\\).
pub fn soft_threshold<F: Float>(t: F, v: F) -> F
{
    let f0 = F::zero();

    (v - t).max(f0) - (-v - t).max(f0)
}

//

/// Proximal operator of \\(\lambda \\|x\\|_1\\)
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// Elementwise soft-threshold at \\(\gamma\lambda\\):
/// \\[
/// y_i = \max(0, x_i - \gamma\lambda) - \max(0, -x_i - \gamma\lambda).
/// \\]
pub struct ProxL1<L: LinAlg>
{
    ph_l: PhantomData<L>,
    lambda: L::F,
}

impl<L: LinAlg> ProxL1<L>
{
    /// Creates an instance.
    ///
    /// Returns [`ProxL1`] instance.
    /// * `lambda` is a penalty weight \\(\lambda \ge 0\\).
    pub fn new(lambda: L::F) -> Self
    {
        ProxL1 {
            ph_l: PhantomData,
            lambda,
        }
    }

    /// Penalty weight \\(\lambda\\).
    pub fn lambda(&self) -> L::F
    {
        self.lambda
    }
}

impl<L: LinAlg> Prox<L> for ProxL1<L>
{
    fn prox(&mut self, gamma: L::F, x: &mut[L::F])
    {
        let t = gamma * self.lambda;

        for e in x {
            *e = soft_threshold(t, *e);
        }
    }
}

//

/// Proximal operator of the convex conjugate of \\(\lambda \\|x\\|_1\\)
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// By Moreau's decomposition,
/// \\[
/// {\bf prox}\_{\gamma h^\*}(x) = x - \gamma\ {\bf prox}\_{\gamma^{-1} h}(x / \gamma),
/// \quad h = \lambda \\|\cdot\\|_1,
/// \\]
/// which projects each element onto \\([-\lambda, \lambda]\\).
/// \\(\gamma\\) shall be positive.
pub struct ProxL1Conj<L: LinAlg>
{
    ph_l: PhantomData<L>,
    lambda: L::F,
}

impl<L: LinAlg> ProxL1Conj<L>
{
    /// Creates an instance.
    ///
    /// Returns [`ProxL1Conj`] instance.
    /// * `lambda` is a penalty weight \\(\lambda \ge 0\\).
    pub fn new(lambda: L::F) -> Self
    {
        ProxL1Conj {
            ph_l: PhantomData,
            lambda,
        }
    }

    /// Penalty weight \\(\lambda\\).
    pub fn lambda(&self) -> L::F
    {
        self.lambda
    }
}

impl<L: LinAlg> Prox<L> for ProxL1Conj<L>
{
    fn prox(&mut self, gamma: L::F, x: &mut[L::F])
    {
        let gamma_inv = gamma.recip();
        let t = gamma_inv * self.lambda;

        for e in x {
            *e = *e - gamma * soft_threshold(t, *e * gamma_inv);
        }
    }
}

//

#[test]
fn test_soft_threshold1()
{
    assert_eq!(soft_threshold(1., 3.), 2.);
    assert_eq!(soft_threshold(1., -3.), -2.);
    assert_eq!(soft_threshold(1., 0.5), 0.);
    assert_eq!(soft_threshold(1., -0.5), 0.);
    assert_eq!(soft_threshold(0., 0.), 0.);
    assert_eq!(soft_threshold(0., -2.), -2.);
}

#[test]
fn test_prox_l1_conj_clip()
{
    use float_eq::assert_float_eq;
    use crate::FloatGeneric;

    let mut p = ProxL1Conj::<FloatGeneric<f64>>::new(0.5);
    let x = &mut[-2., -0.25, 0., 0.3, 7.];

    p.prox(0.1, x);
    assert_float_eq!(x.as_ref(), [-0.5, -0.25, 0., 0.3, 0.5].as_ref(), abs_all <= 1e-12);
}
