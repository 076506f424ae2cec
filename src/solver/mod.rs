//! Solver core: traits at the seams and the primal-dual iteration

mod linalg;
mod operator;
mod prox;
mod solver_error;
mod stepsize;
mod monitor;
mod solver;

pub use linalg::*;
pub use operator::*;
pub use prox::*;
pub use solver_error::*;
pub use stepsize::*;
pub use monitor::*;
pub use solver::*;
