use core::marker::PhantomData;
use crate::solver::{LinAlg, Operator};

/// Transpose adapter
///
/// Wraps an operator \\(A\\) and behaves as \\(A^T\\), with the same norm estimate.
#[derive(Debug, Clone)]
pub struct TransOp<L: LinAlg, O: Operator<L>>
{
    ph_l: PhantomData<L>,
    op: O,
}

impl<L: LinAlg, O: Operator<L>> TransOp<L, O>
{
    /// Creates an instance.
    ///
    /// Returns [`TransOp`] instance.
    /// * `op` is an operator to be transposed.
    pub fn new(op: O) -> Self
    {
        TransOp {
            ph_l: PhantomData,
            op,
        }
    }

    /// The wrapped operator.
    pub fn inner(&self) -> &O
    {
        &self.op
    }
}

impl<L: LinAlg, O: Operator<L>> Operator<L> for TransOp<L, O>
{
    fn size(&self) -> (usize, usize)
    {
        let (m, n) = self.op.size();

        (n, m)
    }

    fn op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        self.op.trans_op(alpha, x, beta, y);
    }

    fn trans_op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        self.op.op(alpha, x, beta, y);
    }

    fn norm_est(&self) -> L::F
    {
        self.op.norm_est()
    }
}
