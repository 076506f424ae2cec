use crate::solver::{LinAlg, Operator};
use crate::LinAlgEx;

//

/// Matrix operator
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// Matrix struct which borrows a slice of column-major data array and implements [`Operator`].
///
/// Its [`Operator::norm_est`] is the Frobenius norm \\(\\|A\\|_F \ge \\|A\\|_2\\) by default,
/// which can be replaced by a tighter estimate with [`MatOp::with_norm_est`].
#[derive(Debug)]
pub struct MatOp<'a, L: LinAlgEx>
{
    n_row: usize,
    n_col: usize,
    array: &'a[L::F],
    norm_est: L::F,
}

impl<'a, L: LinAlgEx> MatOp<'a, L>
{
    /// Creates an instance
    ///
    /// Returns [`MatOp`] instance.
    /// * `size`: a number of rows and a number of columns.
    /// * `array`: column-major data array slice.
    pub fn new(size: (usize, usize), array: &'a[L::F]) -> Self
    {
        let (n_row, n_col) = size;
        assert_eq!(n_row * n_col, array.len());

        MatOp {
            n_row,
            n_col,
            array,
            norm_est: L::norm(array),
        }
    }

    /// Replaces the operator norm estimate.
    ///
    /// Returns [`MatOp`] with its estimate changed.
    /// * `norm_est` is an externally calculated estimate of \\(\\|A\\|_2\\), such as by power iteration.
    pub fn with_norm_est(mut self, norm_est: L::F) -> Self
    {
        self.norm_est = norm_est;
        self
    }

    fn op_impl(&self, transpose: bool, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        if self.n_row > 0 && self.n_col > 0 {
            L::transform_ge(transpose, self.n_row, self.n_col, alpha, self.array, x, beta, y)
        }
        else {
            L::scale(beta, y);
        }
    }
}

impl<'a, L: LinAlgEx> Operator<L> for MatOp<'a, L>
{
    fn size(&self) -> (usize, usize)
    {
        (self.n_row, self.n_col)
    }

    fn op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        self.op_impl(false, alpha, x, beta, y);
    }

    fn trans_op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        self.op_impl(true, alpha, x, beta, y);
    }

    fn norm_est(&self) -> L::F
    {
        self.norm_est
    }
}

impl<'a, L: LinAlgEx> AsRef<[L::F]> for MatOp<'a, L>
{
    fn as_ref(&self) -> &[L::F]
    {
        self.array
    }
}

impl<'a, L: LinAlgEx> Clone for MatOp<'a, L>
{
    fn clone(&self) -> Self
    {
        MatOp {
            n_row: self.n_row,
            n_col: self.n_col,
            array: self.array,
            norm_est: self.norm_est,
        }
    }
}

//

#[test]
fn test_matop1()
{
    use float_eq::assert_float_eq;
    use num_traits::Float;
    use crate::FloatGeneric;

    type L = FloatGeneric<f64>;

    let array = &[ // column-major
        1.,  4.,
        2.,  5.,
        3.,  6.,
    ];
    let x = &[1., 0., -1.];
    let y = &mut[1., 1.];

    let m = MatOp::<L>::new((2, 3), array);

    m.op(2., x, 1., y);
    assert_float_eq!(y.as_ref(), [-3., -3.].as_ref(), abs_all <= 1e-12);

    let z = &mut[0.; 3];
    m.trans_op(1., &[1., 1.], 0., z);
    assert_float_eq!(z.as_ref(), [5., 7., 9.].as_ref(), abs_all <= 1e-12);

    assert_float_eq!(m.norm_est(), Float::sqrt(91f64), abs <= 1e-12);
    assert_eq!(m.clone().with_norm_est(9.5).norm_est(), 9.5);
}

#[test]
fn test_matop_empty()
{
    use crate::FloatGeneric;

    type L = FloatGeneric<f64>;

    let m = MatOp::<L>::new((0, 3), &[]);
    let y: &mut[f64] = &mut[];

    m.op(1., &[1., 2., 3.], 0., y);
    assert_eq!(m.size(), (0, 3));
    assert_eq!(m.norm_est(), 0.);
}
