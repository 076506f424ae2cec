use alloc::vec;
use alloc::vec::Vec;
use num_traits::{Zero, One};
use crate::solver::{LinAlg, Operator, Prox, PrimalDual, SolverError};
use crate::{TransOp, ProxLsq, ProxL1};

//

/// Lasso in the dual form
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// The problem is
/// \\[
/// {\rm minimize} \ {1 \over 2} \\|Au - b\\|_2^2 + \lambda \\|u\\|_1,
/// \\]
/// where
/// - variables \\( u \in \mathbb{R}^n \\)
/// - \\( A \in \mathbb{R}^{m \times n},\ b \in \mathbb{R}^m \\)
/// - \\( \lambda \ge 0 \\).
///
/// The signal \\(u\\) is taken as the dual variable of the saddle point representation
/// with the residual \\(x \in \mathbb{R}^m\\) as the primal variable:
/// \\(K = A^T\\), \\(F\\) is handled by [`ProxLsq`] and \\(G^\*\\) by [`ProxL1`].
/// The returned signal is therefore the dual \\(u\\).
/// The optimality residual is \\(\\|x - b + Au\\|_2\\).
///
/// The spectral step size update applies to this problem if
/// [`crate::solver::SolverParam::adaptive_step`] is set.
pub struct ProbDual<L, OA>
where L: LinAlg, OA: Operator<L>
{
    op_k: TransOp<L, OA>,
    lambda: L::F,
    prox_f: ProxLsq<L>,
    prox_g: ProxL1<L>,

    w_m: Vec<L::F>,
}

impl<L, OA> ProbDual<L, OA>
where L: LinAlg, OA: Operator<L>
{
    /// Creates a problem with given data.
    ///
    /// Returns a [`ProbDual`] instance.
    /// * `op_a` is \\(A\\).
    /// * `vec_b` is \\(b\\).
    /// * `lambda` is \\(\lambda\\).
    ///
    /// Sizes are checked later by [`crate::solver::Solver::solve`].
    pub fn new(op_a: OA, vec_b: &[L::F], lambda: L::F) -> Self
    {
        let m = op_a.size().0;

        ProbDual {
            op_k: TransOp::new(op_a),
            lambda,
            prox_f: ProxLsq::new(vec_b),
            prox_g: ProxL1::new(lambda),
            w_m: vec![L::F::zero(); m],
        }
    }

    /// Penalty weight \\(\lambda\\).
    pub fn lambda(&self) -> L::F
    {
        self.lambda
    }

    fn op_a(&self) -> &OA
    {
        self.op_k.inner()
    }

    // w_m = A u - b
    fn calc_residual(&mut self, u: &[L::F])
    {
        let f1 = L::F::one();

        L::copy(self.prox_f.vec_b(), &mut self.w_m);
        self.op_k.inner().op(f1, u, -f1, &mut self.w_m);
    }
}

impl<L, OA> PrimalDual<L> for ProbDual<L, OA>
where L: LinAlg, OA: Operator<L>
{
    fn validate(&self) -> Result<(usize, usize), SolverError>
    {
        if !(self.lambda >= L::F::zero()) {
            log::error!("Invalid lambda");
            return Err(SolverError::InvalidParam);
        }

        let (m, n) = self.op_a().size();
        let len_b = self.prox_f.vec_b().len();

        if len_b != m {
            log::error!("Size mismatch: op_a{:?}, vec_b({})", (m, n), len_b);
            return Err(SolverError::InvalidOp);
        }

        Ok((m, n))
    }

    fn default_max_iter(&self) -> usize
    {
        10000
    }

    fn step_margin(&self) -> f64
    {
        0.99
    }

    fn norm_est(&self) -> L::F
    {
        self.op_k.norm_est()
    }

    fn spectral_step(&self) -> bool
    {
        true
    }

    fn op_k(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        self.op_k.op(alpha, x, beta, y);
    }

    fn trans_op_k(&self, alpha: L::F, u: &[L::F], beta: L::F, y: &mut[L::F])
    {
        self.op_k.trans_op(alpha, u, beta, y);
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
        // x - b + A u
        self.calc_residual(u);
        L::add(L::F::one(), x, &mut self.w_m);

        L::norm(&self.w_m)
    }

    fn objective(&mut self, _x: &[L::F], u: &[L::F]) -> (L::F, L::F)
    {
        let f1 = L::F::one();

        self.calc_residual(u);
        let r = L::norm(&self.w_m);

        (r * r / (f1 + f1), self.lambda * L::abssum(u))
    }

    fn signal_is_dual(&self) -> bool
    {
        true
    }
}
