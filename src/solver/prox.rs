//! Proximal operator

use crate::solver::LinAlg;

/// Proximal operator trait
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// Expresses \\({\bf prox}\_{\gamma h}\\) of a closed convex function \\(h\\):
/// \\[
/// {\bf prox}\_{\gamma h}(x) = \arg\min_y \left( h(y) + {1 \over 2\gamma} \\|y - x\\|_2^2 \right).
/// \\]
/// Parameters specific to \\(h\\) (data vector, penalty weight, ...) are held by the implementor.
pub trait Prox<L: LinAlg>
{
    /// Calculates \\({\bf prox}\_{\gamma h}(x)\\).
    ///
    /// * `gamma` is a step size \\(\gamma > 0\\).
    /// * `x` is \\(x\\) before entry, and shall be replaced with the proximal point on exit.
    fn prox(&mut self, gamma: L::F, x: &mut[L::F]);
}
