//! Convergence monitor

use num_traits::Float;
use core::fmt::{Display, LowerExp};
use alloc::vec::Vec;
use crate::solver::{LinAlg, SolverError};

/// Objective values of one iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Objective<F>
{
    /// Data fidelity term.
    pub f: F,
    /// Penalty term.
    pub g: F,
    /// Total cost, `f + g`.
    pub cost: F,
}

impl<F: Float> Objective<F>
{
    /// Creates an instance with `cost = f + g`.
    pub fn new(f: F, g: F) -> Self
    {
        Objective {
            f, g,
            cost: f + g,
        }
    }
}

/// Scalars recorded for one completed iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterRecord<F>
{
    /// Iterate progress \\(\\|[x; u] - [x_{prev}; u_{prev}]\\|_2\\).
    pub er: F,
    /// Optimality residual.
    pub opt: F,
    /// Step sizes \\((\gamma_1, \gamma_2)\\) used in the iteration.
    pub gamma: (F, F),
    /// Objective values, present only if [`crate::solver::SolverParam::save_history`] is set.
    pub obj: Option<Objective<F>>,
}

/// Iteration history, one [`IterRecord`] per completed iteration in iteration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct History<F>
{
    records: Vec<IterRecord<F>>,
}

impl<F: Copy> History<F>
{
    /// Number of recorded iterations.
    pub fn len(&self) -> usize
    {
        self.records.len()
    }

    /// Checks if nothing has been recorded.
    pub fn is_empty(&self) -> bool
    {
        self.records.is_empty()
    }

    /// Records in iteration order.
    pub fn records(&self) -> &[IterRecord<F>]
    {
        &self.records
    }

    /// The most recent record.
    pub fn last(&self) -> Option<&IterRecord<F>>
    {
        self.records.last()
    }

    /// Iterate progress sequence.
    pub fn er(&self) -> impl Iterator<Item=F> + '_
    {
        self.records.iter().map(|r| r.er)
    }

    /// Optimality residual sequence.
    pub fn opt(&self) -> impl Iterator<Item=F> + '_
    {
        self.records.iter().map(|r| r.opt)
    }

    /// Objective sequence; empty unless objective values were recorded.
    pub fn obj(&self) -> impl Iterator<Item=Objective<F>> + '_
    {
        self.records.iter().filter_map(|r| r.obj)
    }

    fn push(&mut self, rec: IterRecord<F>)
    {
        self.records.push(rec);
    }
}

//

/// Reason of termination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Termination<F>
{
    /// Optimality residual fell below [`crate::solver::SolverParam::opt_tol`], with its value.
    OptTol(F),
    /// Iterate progress fell below [`crate::solver::SolverParam::prog_tol`], with its value.
    ProgTol(F),
    /// Reached the max iteration number without meeting either tolerance.
    ExcessIter,
}

impl<F> Termination<F>
{
    /// Checks if either tolerance was met.
    pub fn is_converged(&self) -> bool
    {
        !matches!(self, Termination::ExcessIter)
    }
}

impl<F: LowerExp> Display for Termination<F>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result
    {
        match self {
            Termination::OptTol(v)  => write!(f, "OptTol: optimality residual {:.3e}", v),
            Termination::ProgTol(v) => write!(f, "ProgTol: iterate progress {:.3e}", v),
            Termination::ExcessIter => write!(f, "ExcessIter: exceed max iterations"),
        }
    }
}

//

/// Convergence monitor.
///
/// Checks the instantaneous iterate progress and optimality residual of every iteration
/// against their tolerances and keeps the [`History`].
#[derive(Debug, Clone)]
pub struct Monitor<F: Float>
{
    opt_tol: F,
    prog_tol: F,
    save_history: bool,
    history: History<F>,
}

impl<F: Float + LowerExp> Monitor<F>
{
    /// Creates an instance.
    ///
    /// * `opt_tol` is the tolerance of the optimality residual.
    /// * `prog_tol` is the tolerance of the iterate progress.
    /// * `save_history` enables recording of objective values.
    /// * `max_iter` is used to reserve the history.
    pub fn new(opt_tol: F, prog_tol: F, save_history: bool, max_iter: usize) -> Self
    {
        Monitor {
            opt_tol,
            prog_tol,
            save_history,
            history: History {
                records: Vec::with_capacity(max_iter.min(1 << 16)),
            },
        }
    }

    /// Whether objective values shall be supplied to [`Monitor::check`].
    pub fn save_history(&self) -> bool
    {
        self.save_history
    }

    /// Iterate progress \\(\sqrt{\\|x - x_{prev}\\|_2^2 + \\|u - u_{prev}\\|_2^2}\\).
    ///
    /// Returns the progress.
    /// * `x`, `u` are the current iterates.
    /// * `dx`, `du` are the previous iterates before entry, and are overwritten with the differences.
    pub fn progress<L>(x: &[F], u: &[F], dx: &mut[F], du: &mut[F]) -> F
    where L: LinAlg<F=F>
    {
        let f1 = F::one();

        L::add(-f1, x, dx);
        L::add(-f1, u, du);

        let nx = L::norm(dx);
        let nu = L::norm(du);

        (nx * nx + nu * nu).sqrt()
    }

    /// Records one completed iteration and decides whether to halt.
    ///
    /// Returns `Ok(Some(_))` to halt, `Ok(None)` to continue,
    /// or `Err` with [`SolverError::Divergence`] if a metric is not finite.
    /// * `er` is the iterate progress.
    /// * `opt` is the optimality residual.
    /// * `gamma` is the step sizes used.
    /// * `obj` is the objective values, ignored unless [`Monitor::save_history`].
    pub fn check(&mut self, er: F, opt: F, gamma: (F, F), obj: Option<Objective<F>>)
    -> Result<Option<Termination<F>>, SolverError>
    {
        let obj = if self.save_history {obj} else {None};

        self.history.push(IterRecord {
            er, opt, gamma, obj,
        });

        if !er.is_finite() || !opt.is_finite() {
            log::error!("Non-finite metrics: er {:.2e}, opt {:.2e}", er, opt);
            return Err(SolverError::Divergence);
        }

        if opt < self.opt_tol {
            Ok(Some(Termination::OptTol(opt)))
        }
        else if er < self.prog_tol {
            Ok(Some(Termination::ProgTol(er)))
        }
        else {
            Ok(None)
        }
    }

    /// Finishes monitoring.
    ///
    /// Returns the [`History`].
    pub fn into_history(self) -> History<F>
    {
        self.history
    }
}

//

#[test]
fn test_monitor1()
{
    let mut m = Monitor::new(1e-6, 1e-3, true, 10);

    let r = m.check(1., 1., (0.5, 0.5), Some(Objective::new(2., 3.))).unwrap();
    assert_eq!(r, None);

    let r = m.check(1e-4, 1e-2, (0.5, 0.5), Some(Objective::new(1., 1.))).unwrap();
    assert_eq!(r, Some(Termination::ProgTol(1e-4)));

    let r = m.check(1e-4, 1e-7, (0.5, 0.5), Some(Objective::new(1., 1.))).unwrap();
    assert_eq!(r, Some(Termination::OptTol(1e-7)));

    let h = m.into_history();
    assert_eq!(h.len(), 3);
    assert_eq!(h.obj().map(|o| o.cost).collect::<Vec<_>>(), [5., 2., 2.]);
}

#[test]
fn test_monitor_no_history()
{
    let mut m = Monitor::new(0., 0., false, 10);

    let r = m.check(0., 0., (1., 1.), Some(Objective::new(2., 3.))).unwrap();
    assert_eq!(r, None);

    let h = m.into_history();
    assert_eq!(h.len(), 1);
    assert_eq!(h.obj().count(), 0);
}

#[test]
fn test_monitor_divergence()
{
    let mut m = Monitor::new(1e-6, 1e-6, false, 10);

    assert_eq!(m.check(f64::NAN, 1., (1., 1.), None), Err(SolverError::Divergence));
    assert_eq!(m.check(1., f64::INFINITY, (1., 1.), None), Err(SolverError::Divergence));
}

#[test]
fn test_progress1()
{
    use float_eq::assert_float_eq;
    use crate::FloatGeneric;

    type L = FloatGeneric<f64>;

    let x = &[1., 2.];
    let u = &[3.];
    let dx = &mut[1., 5.];
    let du = &mut[7.];

    let er = Monitor::progress::<L>(x, u, dx, du);
    assert_float_eq!(er, 5., abs <= 1e-12);
    assert_float_eq!(dx.as_ref(), [0., 3.].as_ref(), abs_all <= 1e-12);
}
