//! Step size control

use num_traits::Float;

/// Step size policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepPolicy
{
    /// Keeps the initial step sizes for all iterations.
    Fixed,
    /// Barzilai-Borwein-style spectral estimate recomputed after every iteration.
    /// Usually faster, but without the convergence guarantee of [`StepPolicy::Fixed`].
    Spectral,
}

/// Pair of primal and dual step sizes \\((\gamma_1, \gamma_2)\\).
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
#[derive(Debug, Clone, PartialEq)]
pub struct StepSize<F: Float>
{
    gamma1: F,
    gamma2: F,
    policy: StepPolicy,
}

impl<F: Float> StepSize<F>
{
    /// Creates an instance.
    ///
    /// Returns [`StepSize`] with \\(\gamma_1 = \gamma_2 = c / \\|K\\|\\),
    /// or `None` if the norm estimate is not positive and finite.
    /// * `margin` is a safety constant \\(c < 1\\); \\(\gamma \\|K\\| < 1\\) is required for convergence.
    /// * `norm_est` is an estimate of \\(\\|K\\|\\).
    /// * `policy` is the update policy.
    pub fn new(margin: F, norm_est: F, policy: StepPolicy) -> Option<Self>
    {
        if !(norm_est > F::zero()) || !norm_est.is_finite() {
            return None;
        }

        let gamma = margin / norm_est;

        Some(StepSize {
            gamma1: gamma,
            gamma2: gamma,
            policy,
        })
    }

    /// Current step sizes.
    ///
    /// Returns a tuple of \\(\gamma_1\\) (primal) and \\(\gamma_2\\) (dual).
    pub fn gamma(&self) -> (F, F)
    {
        (self.gamma1, self.gamma2)
    }

    /// Update policy.
    pub fn policy(&self) -> StepPolicy
    {
        self.policy
    }

    /// Updates the step sizes from the current iterates.
    ///
    /// With \\(K\\) the coupling operator:
    /// \\(\gamma_1 \leftarrow x^T K^T u / \\|K^T u\\|_2^2\\),
    /// \\(\gamma_2 \leftarrow x^T K^T u / \\|K x\\|_2^2\\).
    /// Each estimate whose denominator is zero, or which is not positive and finite, is skipped
    /// and the previous value is retained. Does nothing for [`StepPolicy::Fixed`].
    /// * `x_ktu` is \\(x^T K^T u\\).
    /// * `sq_norm_ktu` is \\(\\|K^T u\\|_2^2\\).
    /// * `sq_norm_kx` is \\(\\|K x\\|_2^2\\).
    pub fn update(&mut self, x_ktu: F, sq_norm_ktu: F, sq_norm_kx: F)
    {
        if self.policy == StepPolicy::Fixed {
            return;
        }

        if let Some(g) = Self::spectral(x_ktu, sq_norm_ktu) {
            self.gamma1 = g;
        }
        else {
            log::trace!("gamma1 kept");
        }

        if let Some(g) = Self::spectral(x_ktu, sq_norm_kx) {
            self.gamma2 = g;
        }
        else {
            log::trace!("gamma2 kept");
        }
    }

    fn spectral(num: F, den: F) -> Option<F>
    {
        if den == F::zero() {
            return None;
        }

        let g = num / den;
        if g > F::zero() && g.is_finite() {
            Some(g)
        }
        else {
            None
        }
    }
}

//

#[test]
fn test_stepsize_fixed()
{
    let mut s = StepSize::new(0.95, 2., StepPolicy::Fixed).unwrap();
    assert_eq!(s.gamma(), (0.475, 0.475));

    s.update(1., 2., 4.);
    assert_eq!(s.gamma(), (0.475, 0.475));
}

#[test]
fn test_stepsize_spectral()
{
    let mut s = StepSize::new(0.99, 1., StepPolicy::Spectral).unwrap();
    assert_eq!(s.gamma(), (0.99, 0.99));

    s.update(1., 2., 4.);
    assert_eq!(s.gamma(), (0.5, 0.25));

    // zero denominators keep the previous values
    s.update(1., 0., 0.);
    assert_eq!(s.gamma(), (0.5, 0.25));

    s.update(0., 0., 0.);
    assert_eq!(s.gamma(), (0.5, 0.25));

    s.update(3., 0., 4.);
    assert_eq!(s.gamma(), (0.5, 0.75));

    // non-positive estimates are not taken
    s.update(-1., 2., 4.);
    assert_eq!(s.gamma(), (0.5, 0.75));
}

#[test]
fn test_stepsize_invalid_norm()
{
    assert!(StepSize::new(0.99, 0., StepPolicy::Fixed).is_none());
    assert!(StepSize::new(0.99, -1., StepPolicy::Fixed).is_none());
    assert!(StepSize::new(0.99, f64::NAN, StepPolicy::Fixed).is_none());
    assert!(StepSize::new(0.99, f64::INFINITY, StepPolicy::Fixed).is_none());
}
