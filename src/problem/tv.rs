use alloc::vec;
use alloc::vec::Vec;
use num_traits::{Zero, One};
use crate::solver::{LinAlg, Operator, Prox, PrimalDual, SolverError};
use crate::{ProxLsqOp, ProxL1Conj};

//

/// Regularized least squares with a penalty on \\(Lx\\)
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// The problem is
/// \\[
/// {\rm minimize} \ {1 \over 2} \\|Ax - b\\|_2^2 + \lambda \\|Lx\\|_1,
/// \\]
/// where
/// - variables \\( x \in \mathbb{R}^n \\)
/// - \\( A \in \mathbb{R}^{m \times n},\ b \in \mathbb{R}^m \\)
/// - \\( L \in \mathbb{R}^{p \times n} \\), typically [`crate::DiffOp`] (total variation) or [`crate::IdOp`]
/// - \\( \lambda \ge 0 \\).
///
/// The saddle point representation is
/// \\[
/// \min_x \max_u \ {1 \over 2} \\|Ax - b\\|_2^2 + \langle Lx, u \rangle - \iota\_{\\|u\\|\_\infty \le \lambda}(u),
/// \\]
/// so that \\(K = L\\), \\(F\\) is handled by [`ProxLsqOp`] and \\(G^\*\\) by [`ProxL1Conj`].
/// The returned signal is the primal \\(x\\).
/// The optimality residual is \\(\\|A^T(Ax - b) + L^T u\\|_2\\), with \\(\lambda\\) carried inside \\(u\\).
/// The data step is linearized, so for \\(\lambda > 0\\) this residual levels off above zero
/// and runs normally terminate by `prog_tol`; lowering `opt_tol` has no effect there.
pub struct ProbTV<L, OA, OL>
where L: LinAlg, OA: Operator<L>, OL: Operator<L>
{
    op_l: OL,
    lambda: L::F,
    prox_f: ProxLsqOp<L, OA>,
    prox_g: ProxL1Conj<L>,

    w_n: Vec<L::F>,
    w_p: Vec<L::F>,
}

impl<L, OA, OL> ProbTV<L, OA, OL>
where L: LinAlg, OA: Operator<L>, OL: Operator<L>
{
    /// Creates a problem with given data.
    ///
    /// Returns a [`ProbTV`] instance.
    /// * `op_a` is \\(A\\).
    /// * `op_l` is \\(L\\).
    /// * `vec_b` is \\(b\\).
    /// * `lambda` is \\(\lambda\\).
    ///
    /// Sizes are checked later by [`crate::solver::Solver::solve`].
    pub fn new(op_a: OA, op_l: OL, vec_b: &[L::F], lambda: L::F) -> Self
    {
        let f0 = L::F::zero();
        let n = op_a.size().1;
        let p = op_l.size().0;

        ProbTV {
            op_l,
            lambda,
            prox_f: ProxLsqOp::new(op_a, vec_b),
            prox_g: ProxL1Conj::new(lambda),
            w_n: vec![f0; n],
            w_p: vec![f0; p],
        }
    }

    /// Penalty weight \\(\lambda\\).
    pub fn lambda(&self) -> L::F
    {
        self.lambda
    }
}

impl<L, OA, OL> PrimalDual<L> for ProbTV<L, OA, OL>
where L: LinAlg, OA: Operator<L>, OL: Operator<L>
{
    fn validate(&self) -> Result<(usize, usize), SolverError>
    {
        if !(self.lambda >= L::F::zero()) {
            log::error!("Invalid lambda");
            return Err(SolverError::InvalidParam);
        }

        let (m, n) = self.prox_f.op_a().size();
        let (p, n_) = self.op_l.size();
        let len_b = self.prox_f.vec_b().len();

        if n != n_ || len_b != m {
            log::error!("Size mismatch: op_a{:?}, op_l{:?}, vec_b({})", (m, n), (p, n_), len_b);
            return Err(SolverError::InvalidOp);
        }

        Ok((n, p))
    }

    fn default_max_iter(&self) -> usize
    {
        1000
    }

    fn step_margin(&self) -> f64
    {
        0.95
    }

    fn norm_est(&self) -> L::F
    {
        self.op_l.norm_est()
    }

    fn spectral_step(&self) -> bool
    {
        false
    }

    fn op_k(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        self.op_l.op(alpha, x, beta, y);
    }

    fn trans_op_k(&self, alpha: L::F, u: &[L::F], beta: L::F, y: &mut[L::F])
    {
        self.op_l.trans_op(alpha, u, beta, y);
    }

    fn prox_primal(&mut self, gamma: L::F, x: &mut[L::F])
    {
        self.prox_f.prox(gamma, x);
    }

    fn prox_dual(&mut self, gamma: L::F, u: &mut[L::F])
    {
        self.prox_g.prox(gamma, u);
    }

    fn residual(&mut self, x: &[L::F], u: &[L::F]) -> L::F
    {
        // A^T (A x - b) + L^T u
        self.prox_f.grad(x, &mut self.w_n);
        self.op_l.trans_op(L::F::one(), u, L::F::one(), &mut self.w_n);

        L::norm(&self.w_n)
    }

    fn objective(&mut self, x: &[L::F], _u: &[L::F]) -> (L::F, L::F)
    {
        let f = self.prox_f.loss(x);

        self.op_l.op(L::F::one(), x, L::F::zero(), &mut self.w_p);
        let g = self.lambda * L::abssum(&self.w_p);

        (f, g)
    }

    fn signal_is_dual(&self) -> bool
    {
        false
    }
}
