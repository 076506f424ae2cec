use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut, Deref};
use num_traits::{Float, Zero};
use crate::{LinAlgEx, MatOp};

//

/// Matrix builder
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-svg.js"></script>
///
/// Matrix struct which owns a `Vec` of column-major data array and is able to be converted as [`MatOp`].
/// This struct relies on dynamic heap allocation.
#[derive(Debug, Clone)]
pub struct MatBuild<L: LinAlgEx>
{
    n_row: usize,
    n_col: usize,
    array: Vec<L::F>,
    norm_est: Option<L::F>,
}

impl<L: LinAlgEx> MatBuild<L>
{
    /// Creates an instance.
    ///
    /// Returns the [`MatBuild`] instance with zero data.
    /// * `size` is a number of rows and a number of columns.
    pub fn new(size: (usize, usize)) -> Self
    {
        let (n_row, n_col) = size;

        MatBuild {
            n_row,
            n_col,
            array: vec![L::F::zero(); n_row * n_col],
            norm_est: None,
        }
    }

    /// Size of the matrix.
    ///
    /// Returns a tuple of a number of rows and columns.
    pub fn size(&self) -> (usize, usize)
    {
        (self.n_row, self.n_col)
    }

    /// Converted as [`MatOp`].
    ///
    /// Returns the [`MatOp`] borrowing the internal data array.
    pub fn as_op(&self) -> MatOp<'_, L>
    {
        let op = MatOp::new(self.size(), &self.array);

        if let Some(n) = self.norm_est {
            op.with_norm_est(n)
        }
        else {
            op
        }
    }

    /// Operator norm estimate handed over to [`MatOp::with_norm_est`] by [`MatBuild::as_op`].
    ///
    /// * `norm_est` is an estimate of the largest singular value.
    pub fn set_norm_est(&mut self, norm_est: L::F)
    {
        self.norm_est = Some(norm_est);
    }
    /// Builder pattern of [`MatBuild::set_norm_est`].
    pub fn norm_est(mut self, norm_est: L::F) -> Self
    {
        self.set_norm_est(norm_est);
        self
    }

    /// Data by a function.
    ///
    /// * `func` takes a row and a column of the matrix and returns data of each element.
    pub fn set_by_fn<M>(&mut self, mut func: M)
    where M: FnMut(usize, usize) -> L::F
    {
        for c in 0.. self.n_col {
            for r in 0.. self.n_row {
                self[(r, c)] = func(r, c);
            }
        }
    }
    /// Builder pattern of [`MatBuild::set_by_fn`].
    pub fn by_fn<M>(mut self, func: M) -> Self
    where M: FnMut(usize, usize) -> L::F
    {
        self.set_by_fn(func);
        self
    }

    /// Data by an iterator in column-major.
    ///
    /// * `iter` iterates matrix data in column-major.
    pub fn set_iter_colmaj<T, I>(&mut self, iter: T)
    where T: IntoIterator<Item=I>, I: Deref<Target=L::F>
    {
        for (e, v) in self.array.iter_mut().zip(iter) {
            *e = *v;
        }
    }
    /// Builder pattern of [`MatBuild::set_iter_colmaj`].
    pub fn iter_colmaj<T, I>(mut self, iter: T) -> Self
    where T: IntoIterator<Item=I>, I: Deref<Target=L::F>
    {
        self.set_iter_colmaj(iter);
        self
    }

    /// Data by an iterator in row-major.
    ///
    /// * `iter` iterates matrix data in row-major.
    pub fn set_iter_rowmaj<T, I>(&mut self, iter: T)
    where T: IntoIterator<Item=I>, I: Deref<Target=L::F>
    {
        let mut i = iter.into_iter();
        let (nr, nc) = self.size();

        for r in 0.. nr {
            for c in 0.. nc {
                if let Some(v) = i.next() {
                    self[(r, c)] = *v;
                }
                else {
                    return;
                }
            }
        }
    }
    /// Builder pattern of [`MatBuild::set_iter_rowmaj`].
    pub fn iter_rowmaj<T, I>(mut self, iter: T) -> Self
    where T: IntoIterator<Item=I>, I: Deref<Target=L::F>
    {
        self.set_iter_rowmaj(iter);
        self
    }

    /// Scales by \\(\alpha\\).
    ///
    /// * `alpha` is a scalar \\(\alpha\\).
    pub fn set_scale(&mut self, alpha: L::F)
    {
        L::scale(alpha, &mut self.array);
        self.norm_est = self.norm_est.map(|n| n * alpha.abs());
    }
    /// Builder pattern of [`MatBuild::set_scale`].
    pub fn scale(mut self, alpha: L::F) -> Self
    {
        self.set_scale(alpha);
        self
    }

    fn index(&self, (r, c): (usize, usize)) -> usize
    {
        assert!(r < self.n_row);
        assert!(c < self.n_col);

        c * self.n_row + r
    }
}

//

impl<L: LinAlgEx> Index<(usize, usize)> for MatBuild<L>
{
    type Output = L::F;
    fn index(&self, index: (usize, usize)) -> &Self::Output
    {
        let i = self.index(index);

        &self.array[i]
    }
}

impl<L: LinAlgEx> IndexMut<(usize, usize)> for MatBuild<L>
{
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output
    {
        let i = self.index(index);

        &mut self.array[i]
    }
}

//

impl<L: LinAlgEx> AsRef<[L::F]> for MatBuild<L>
{
    fn as_ref(&self) -> &[L::F]
    {
        &self.array
    }
}

impl<L: LinAlgEx> AsMut<[L::F]> for MatBuild<L>
{
    fn as_mut(&mut self) -> &mut[L::F]
    {
        &mut self.array
    }
}

//

impl<L: LinAlgEx> core::fmt::Display for MatBuild<L>
where L::F: Float + core::fmt::LowerExp
{
    fn fmt(&self, f: &mut core::fmt::Formatter) -> Result<(), core::fmt::Error>
    {
        let (nr, nc) = self.size();
        if nr == 0 || nc == 0 {
            write!(f, "[ ]")?;
        }
        else {
            write!(f, "[ {:.3e}", self[(0, 0)])?;
            if nc > 2 {
                write!(f, " ...")?;
            }
            if nc > 1 {
                write!(f, " {:.3e}", self[(0, nc - 1)])?;
            }

            if nr > 2 {
                writeln!(f)?;
                write!(f, "  ...")?;
            }

            if nr > 1 {
                writeln!(f)?;
                write!(f, "  {:.3e}", self[(nr - 1, 0)])?;
                if nc > 2 {
                    write!(f, " ...")?;
                }
                if nc > 1 {
                    write!(f, " {:.3e}", self[(nr - 1, nc - 1)])?;
                }
            }
            write!(f, " ]")?;
        }

        write!(f, " ({} x {})", nr, nc)
    }
}

//

#[test]
fn test_matbuild1()
{
    use float_eq::assert_float_eq;
    use crate::FloatGeneric;
    use crate::solver::Operator;

    type L = FloatGeneric<f64>;

    let ref_array = &[ // column-major
        1., 4.,
        2., 5.,
        3., 6.,
    ];

    let m = MatBuild::<L>::new((2, 3))
            .iter_rowmaj(&[
                1., 2., 3.,
                4., 5., 6.,
            ]);
    assert_float_eq!(m.as_ref(), ref_array.as_ref(), abs_all <= 1e-12);

    let m = MatBuild::<L>::new((2, 3))
            .by_fn(|r, c| (r * 3 + c + 1) as f64)
            .norm_est(5.)
            .scale(-2.);
    assert_float_eq!(m.as_ref(), [-2., -8., -4., -10., -6., -12.].as_ref(), abs_all <= 1e-12);
    assert_eq!(m[(1, 2)], -12.);
    assert_eq!(m.as_op().norm_est(), 10.);
}
