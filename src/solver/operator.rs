//! Linear operator

use crate::solver::LinAlg;

/// Linear operator trait
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// Expresses a linear operator \\(K: \mathbb{R}^n \to \mathbb{R}^m\\) (or a matrix \\(K \in \mathbb{R}^{m \times n}\\)).
/// The solver only sees an operator through its action, the action of its transpose
/// and an estimate of its operator norm.
pub trait Operator<L: LinAlg>
{
    /// Size of \\(K\\).
    ///
    /// Returns a tuple of \\(m\\) and \\(n\\).
    fn size(&self) -> (usize, usize);

    /// Calculate \\(\alpha K x + \beta y\\).
    ///
    /// * `alpha` is a scalar \\(\alpha\\).
    /// * `x` is a vector \\(x\\).
    ///   The length of `x` shall be \\(n\\).
    /// * `beta` is a scalar \\(\beta\\).
    /// * `y` is a vector \\(y\\) before entry,
    ///   \\(\alpha K x + \beta y\\) on exit.
    ///   The length of `y` shall be \\(m\\).
    fn op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F]);

    /// Calculate \\(\alpha K^T x + \beta y\\).
    ///
    /// * `alpha` is a scalar \\(\alpha\\).
    /// * `x` is a vector \\(x\\).
    ///   The length of `x` shall be \\(m\\).
    /// * `beta` is a scalar \\(\beta\\).
    /// * `y` is a vector \\(y\\) before entry,
    ///   \\(\alpha K^T x + \beta y\\) on exit.
    ///   The length of `y` shall be \\(n\\).
    fn trans_op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F]);

    /// Estimate of the operator norm \\(\\|K\\|\\), the largest singular value of \\(K\\).
    ///
    /// Returns the estimate, which shall be positive.
    /// An upper bound is acceptable: it only makes the step sizes more conservative.
    fn norm_est(&self) -> L::F;
}

impl<L: LinAlg, O: Operator<L> + ?Sized> Operator<L> for &O
{
    fn size(&self) -> (usize, usize)
    {
        (**self).size()
    }

    fn op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        (**self).op(alpha, x, beta, y)
    }

    fn trans_op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        (**self).trans_op(alpha, x, beta, y)
    }

    fn norm_est(&self) -> L::F
    {
        (**self).norm_est()
    }
}
