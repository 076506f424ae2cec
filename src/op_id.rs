use num_traits::One;
use core::marker::PhantomData;
use crate::solver::{LinAlg, Operator};

/// Identity operator \\(I \in \mathbb{R}^{n \times n}\\)
///
/// Used as \\(L\\) of [`crate::ProbTV`] to regularize the signal itself instead of its differences.
#[derive(Debug, Clone)]
pub struct IdOp<L: LinAlg>
{
    ph_l: PhantomData<L>,
    n: usize,
}

impl<L: LinAlg> IdOp<L>
{
    /// Creates an instance.
    ///
    /// Returns [`IdOp`] instance.
    /// * `n` is a dimension.
    pub fn new(n: usize) -> Self
    {
        IdOp {
            ph_l: PhantomData,
            n,
        }
    }
}

impl<L: LinAlg> Operator<L> for IdOp<L>
{
    fn size(&self) -> (usize, usize)
    {
        (self.n, self.n)
    }

    fn op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        L::scale(beta, y);
        L::add(alpha, x, y);
    }

    fn trans_op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        self.op(alpha, x, beta, y);
    }

    fn norm_est(&self) -> L::F
    {
        L::F::one()
    }
}
