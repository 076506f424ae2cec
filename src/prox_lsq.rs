use alloc::vec;
use alloc::vec::Vec;
use num_traits::{Float, Zero, One};
use core::marker::PhantomData;
use crate::solver::{Prox, LinAlg, Operator};

//

/// Linearized proximal step of \\({1 \over 2} \\|Ax - b\\|_2^2\\)
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// \\[
/// y = x - {\gamma \over 1 + \gamma} A^T (Ax - b).
/// \\]
/// This is a single gradient-type step, not the exact proximal map unless \\(A^T A = I\\).
/// It avoids solving \\((I + \gamma A^T A) y = x + \gamma A^T b\\) in each iteration.
pub struct ProxLsqOp<L: LinAlg, O: Operator<L>>
{
    ph_l: PhantomData<L>,
    op_a: O,
    vec_b: Vec<L::F>,
    w_r: Vec<L::F>,
}

impl<L: LinAlg, O: Operator<L>> ProxLsqOp<L, O>
{
    /// Creates an instance.
    ///
    /// Returns [`ProxLsqOp`] instance.
    /// * `op_a` is \\(A \in \mathbb{R}^{m \times n}\\).
    /// * `vec_b` is \\(b \in \mathbb{R}^m\\).
    pub fn new(op_a: O, vec_b: &[L::F]) -> Self
    {
        let (m, _) = op_a.size();

        ProxLsqOp {
            ph_l: PhantomData,
            op_a,
            vec_b: vec_b.to_vec(),
            w_r: vec![L::F::zero(); m],
        }
    }

    /// Operator \\(A\\).
    pub fn op_a(&self) -> &O
    {
        &self.op_a
    }

    /// Vector \\(b\\).
    pub fn vec_b(&self) -> &[L::F]
    {
        &self.vec_b
    }

    /// Calculates the gradient \\(A^T (Ax - b)\\).
    ///
    /// * `x` is \\(x\\).
    /// * `y` is the gradient on exit.
    pub fn grad(&mut self, x: &[L::F], y: &mut[L::F])
    {
        let f0 = L::F::zero();
        let f1 = L::F::one();

        self.calc_residual(x);
        self.op_a.trans_op(f1, &self.w_r, f0, y);
    }

    /// Calculates the loss \\({1 \over 2} \\|Ax - b\\|_2^2\\).
    ///
    /// Returns the loss.
    /// * `x` is \\(x\\).
    pub fn loss(&mut self, x: &[L::F]) -> L::F
    {
        let f1 = L::F::one();

        self.calc_residual(x);
        let r = L::norm(&self.w_r);

        r * r / (f1 + f1)
    }

    // w_r = A x - b
    fn calc_residual(&mut self, x: &[L::F])
    {
        let f1 = L::F::one();

        L::copy(&self.vec_b, &mut self.w_r);
        self.op_a.op(f1, x, -f1, &mut self.w_r);
    }
}

impl<L: LinAlg, O: Operator<L>> Prox<L> for ProxLsqOp<L, O>
{
    fn prox(&mut self, gamma: L::F, x: &mut[L::F])
    {
        let f1 = L::F::one();

        self.calc_residual(x);

        // x = x - gamma/(1+gamma) * A^T w_r
        self.op_a.trans_op(-gamma / (f1 + gamma), &self.w_r, f1, x);
    }
}

//

/// Proximal operator of \\({1 \over 2} \\|x - b\\|_2^2\\)
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// \\[
/// y = {x + \gamma b \over 1 + \gamma}.
/// \\]
pub struct ProxLsq<L: LinAlg>
{
    ph_l: PhantomData<L>,
    vec_b: Vec<L::F>,
}

impl<L: LinAlg> ProxLsq<L>
{
    /// Creates an instance.
    ///
    /// Returns [`ProxLsq`] instance.
    /// * `vec_b` is \\(b\\).
    pub fn new(vec_b: &[L::F]) -> Self
    {
        ProxLsq {
            ph_l: PhantomData,
            vec_b: vec_b.to_vec(),
        }
    }

    /// Vector \\(b\\).
    pub fn vec_b(&self) -> &[L::F]
    {
        &self.vec_b
    }
}

impl<L: LinAlg> Prox<L> for ProxLsq<L>
{
    fn prox(&mut self, gamma: L::F, x: &mut[L::F])
    {
        L::add(gamma, &self.vec_b, x);
        L::scale((L::F::one() + gamma).recip(), x);
    }
}

//

#[test]
fn test_prox_lsq1()
{
    use float_eq::assert_float_eq;
    use crate::FloatGeneric;

    let mut p = ProxLsq::<FloatGeneric<f64>>::new(&[1., -2., 0.]);
    let x = &mut[3., 0., 4.];

    p.prox(1., x);
    assert_float_eq!(x.as_ref(), [2., -1., 2.].as_ref(), abs_all <= 1e-12);
}

#[test]
fn test_prox_lsq_op1()
{
    use float_eq::assert_float_eq;
    use crate::{FloatGeneric, MatOp};

    type L = FloatGeneric<f64>;

    let array = &[ // column-major 3x2
        1., 0., 1.,
        0., 2., 1.,
    ];
    let a = MatOp::<L>::new((3, 2), array);
    let mut p = ProxLsqOp::new(a, &[1., 1., 1.]);

    let x = &mut[1., 1.];
    // Ax - b = [0, 1, 1], A^T (Ax - b) = [1, 3]
    assert_float_eq!(p.loss(x), 1., abs <= 1e-12);
    let g = &mut[0.; 2];
    p.grad(x, g);
    assert_float_eq!(g.as_ref(), [1., 3.].as_ref(), abs_all <= 1e-12);

    p.prox(1., x);
    assert_float_eq!(x.as_ref(), [0.5, -0.5].as_ref(), abs_all <= 1e-12);
}
