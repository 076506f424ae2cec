use num_traits::Float;
use core::marker::PhantomData;
use core::ops::Index;
use crate::solver::LinAlg;
use crate::LinAlgEx;

/// `num::Float`-generic [`LinAlgEx`] implementation
///
/// All numeric operations are written in pure Rust, but slow.
#[derive(Debug, Clone)]
pub struct FloatGeneric<F>
{
    ph_f: PhantomData<F>,
}

impl<F: Float> LinAlg for FloatGeneric<F>
{
    type F = F;

    fn norm(x: &[F]) -> F
    {
        let mut sum = F::zero();
        for u in x {
            sum = sum + *u * *u;
        }
        sum.sqrt()
    }

    fn inner_prod(x: &[F], y: &[F]) -> F
    {
        assert_eq!(x.len(), y.len());

        let mut sum = F::zero();
        for (u, v) in x.iter().zip(y) {
            sum = sum + *u * *v;
        }
        sum
    }

    fn copy(x: &[F], y: &mut[F])
    {
        assert_eq!(x.len(), y.len());

        for (u, v) in x.iter().zip(y) {
            *v = *u;
        }
    }

    fn scale(alpha: F, x: &mut[F])
    {
        for u in x {
            *u = alpha * *u;
        }
    }

    fn add(alpha: F, x: &[F], y: &mut[F])
    {
        assert_eq!(x.len(), y.len());

        for (u, v) in x.iter().zip(y) {
            *v = *v + alpha * *u;
        }
    }

    fn abssum(x: &[F]) -> F
    {
        let mut sum = F::zero();
        for u in x {
            sum = sum + u.abs();
        }
        sum
    }
}

//

struct MatIdx<'a, F: Float>
{
    n_row: usize,
    n_col: usize,
    mat: &'a[F],
    transpose: bool,
}

impl<'a, F: Float> MatIdx<'a, F>
{
    fn idx(&self, (r, c): (usize, usize)) -> usize
    {
        let (r, c) = if !self.transpose {(r, c)} else {(c, r)};

        assert!(r < self.n_row);
        assert!(c < self.n_col);

        c * self.n_row + r
    }
}

impl<'a, F: Float> Index<(usize, usize)> for MatIdx<'a, F>
{
    type Output = F;

    fn index(&self, index: (usize, usize)) -> &Self::Output
    {
        &self.mat[self.idx(index)]
    }
}

//

impl<F: Float> LinAlgEx for FloatGeneric<F>
{
    // y = a*mat*x + b*y
    fn transform_ge(transpose: bool, n_row: usize, n_col: usize, alpha: F, mat: &[F], x: &[F], beta: F, y: &mut[F])
    {
        assert_eq!(mat.len(), n_row * n_col);
        if transpose {
            assert_eq!(x.len(), n_row);
            assert_eq!(y.len(), n_col);
        } else {
            assert_eq!(x.len(), n_col);
            assert_eq!(y.len(), n_row);
        };

        let mat = MatIdx {
            n_row, n_col, mat, transpose,
        };

        for r in 0.. y.len() {
            let mut mat_x = F::zero();
            for c in 0.. x.len() {
                mat_x = mat_x + mat[(r, c)] * x[c];
            }
            y[r] = alpha * mat_x + beta * y[r];
        }
    }
}

//

#[test]
fn test_floatgeneric1()
{
    use float_eq::assert_float_eq;

    type L = FloatGeneric<f64>;

    let x = &[3., -4., 0.];
    let y = &mut[1., 1., 1.];

    assert_float_eq!(L::norm(x), 5., abs <= 1e-12);
    assert_float_eq!(L::abssum(x), 7., abs <= 1e-12);
    assert_float_eq!(L::inner_prod(x, y), -1., abs <= 1e-12);

    L::add(2., x, y);
    assert_float_eq!(y.as_ref(), [7., -7., 1.].as_ref(), abs_all <= 1e-12);

    L::scale(-1., y);
    assert_float_eq!(y.as_ref(), [-7., 7., -1.].as_ref(), abs_all <= 1e-12);
}

#[test]
fn test_transform_ge1()
{
    use float_eq::assert_float_eq;

    type L = FloatGeneric<f64>;

    let mat = &[ // column-major 2x3
        1., 4.,
        2., 5.,
        3., 6.,
    ];
    let x3 = &[1., 0., -1.];
    let x2 = &[1., 1.];
    let y2 = &mut[1., 1.];
    let y3 = &mut[0.; 3];

    L::transform_ge(false, 2, 3, 2., mat, x3, 1., y2);
    assert_float_eq!(y2.as_ref(), [-3., -3.].as_ref(), abs_all <= 1e-12);

    L::transform_ge(true, 2, 3, 1., mat, x2, 0., y3);
    assert_float_eq!(y3.as_ref(), [5., 7., 9.].as_ref(), abs_all <= 1e-12);
}
