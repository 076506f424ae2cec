/*!
A first-order **primal-dual proximal splitting** solver for \\(\ell_1\\)-regularized least squares.

<script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
<script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>

This crate solves
\\[
{\rm minimize} \ {1 \over 2} \\|Ax - b\\|_2^2 + \lambda \\|Lx\\|_1
\\]
for a large, possibly ill-conditioned linear operator \\(A\\),
such as a projection matrix of tomography,
and a regularization operator \\(L\\) such as a finite difference or the identity.

# General usage

1. Choose a formulation:
   * [`ProbTV`] - penalty on \\(Lx\\), the signal is the primal variable.
   * [`ProbDual`] - Lasso (\\(L = I\\)) in the dual form, the signal is the dual variable,
     optionally with the spectral step size update.
1. Express \\(A\\) and \\(L\\) as [`solver::Operator`]s:
   [`MatBuild`]/[`MatOp`] for dense matrices, [`DiffOp`], [`IdOp`], or your own implementation.
1. Create a [`solver::Solver`] instance and optionally set its parameters.
1. Feed the problem to the solver and invoke [`solver::Solver::solve`] to get a [`solver::Solution`].

The crate uses the `log` crate for progress reporting; install any logger to see it.

# Examples

```
use float_eq::assert_float_eq;
use proxsplit::prelude::*;
use proxsplit::*;

type La = FloatGeneric<f64>;

// A = I, b has one large element
let mat_a = MatBuild::<La>::new((4, 4)).by_fn(|r, c| if r == c {1.} else {0.});
let vec_b = [0., 0., 2., 0.];

let s = Solver::<La>::new().par(|p| {
    p.adaptive_step = false;
});
let mut prob = ProbDual::new(mat_a.as_op(), &vec_b, 0.5);
let rslt = s.solve(&mut prob).unwrap();

// soft-threshold of b
assert!(rslt.status.is_converged());
assert_float_eq!(rslt.x.as_slice(), [0., 0., 1.5, 0.].as_ref(), abs_all <= 1e-3);
```
*/

#![no_std]

extern crate alloc;

pub mod solver;

//

mod linalg_ex;

pub use linalg_ex::*;

//

mod floatgeneric;

pub use floatgeneric::*;

//

mod matop;
mod matbuild;
mod op_id;
mod op_diff;
mod op_trans;

pub use matop::*;
pub use matbuild::*;
pub use op_id::*;
pub use op_diff::*;
pub use op_trans::*;

//

mod prox_lsq;
mod prox_l1;

pub use prox_lsq::*;
pub use prox_l1::*;

//

mod problem;

pub use problem::*;

//

#[cfg(feature = "std")]
mod set_par_by_env;

#[cfg(feature = "std")]
pub use set_par_by_env::*;

//

/// Prelude
pub mod prelude
{
    pub use crate::solver::{Solver, SolverError, SolverParam, Solution, Termination};
    pub use crate::FloatGeneric;
}
