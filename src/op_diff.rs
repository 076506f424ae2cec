use num_traits::{Zero, One};
use core::marker::PhantomData;
use crate::solver::{LinAlg, Operator};

/// 1-D forward finite difference operator
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// \\(D \in \mathbb{R}^{(n-1) \times n}\\), \\((Dx)\_i = x\_{i+1} - x\_i\\).
/// Its operator norm is bounded by \\(2\\), which is reported as [`Operator::norm_est`].
#[derive(Debug, Clone)]
pub struct DiffOp<L: LinAlg>
{
    ph_l: PhantomData<L>,
    n: usize,
}

impl<L: LinAlg> DiffOp<L>
{
    /// Creates an instance.
    ///
    /// Returns [`DiffOp`] instance.
    /// * `n` is a number of points of the signal, shall be at least 2.
    pub fn new(n: usize) -> Self
    {
        DiffOp {
            ph_l: PhantomData,
            n,
        }
    }
}

impl<L: LinAlg> Operator<L> for DiffOp<L>
{
    fn size(&self) -> (usize, usize)
    {
        (self.n.saturating_sub(1), self.n)
    }

    fn op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        let (m, n) = self.size();
        assert_eq!(x.len(), n);
        assert_eq!(y.len(), m);

        for (i, e) in y.iter_mut().enumerate() {
            *e = alpha * (x[i + 1] - x[i]) + beta * *e;
        }
    }

    fn trans_op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        let (m, n) = self.size();
        assert_eq!(x.len(), m);
        assert_eq!(y.len(), n);

        let f0 = L::F::zero();

        // (D^T x)_i = x_{i-1} - x_i, out-of-range terms are zero
        for (i, e) in y.iter_mut().enumerate() {
            let prev = if i > 0 {x[i - 1]} else {f0};
            let cur = if i < m {x[i]} else {f0};
            *e = alpha * (prev - cur) + beta * *e;
        }
    }

    fn norm_est(&self) -> L::F
    {
        L::F::one() + L::F::one()
    }
}

//

#[test]
fn test_diffop1()
{
    use float_eq::assert_float_eq;
    use crate::FloatGeneric;

    type L = FloatGeneric<f64>;

    let d = DiffOp::<L>::new(4);
    assert_eq!(d.size(), (3, 4));

    let y = &mut[1., 1., 1.];
    d.op(1., &[1., 3., 2., 2.], 2., y);
    assert_float_eq!(y.as_ref(), [4., 1., 2.].as_ref(), abs_all <= 1e-12);

    // columns of D^T are rows of D
    let ref_dt = [
        [-1., 1., 0., 0.],
        [0., -1., 1., 0.],
        [0., 0., -1., 1.],
    ];
    for (i, r) in ref_dt.iter().enumerate() {
        let x = &mut[0.; 3];
        x[i] = 1.;
        let z = &mut[0.; 4];
        d.trans_op(1., x, 0., z);
        assert_float_eq!(z.as_ref(), r.as_ref(), abs_all <= 1e-12);
    }
}
