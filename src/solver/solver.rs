//! First-order primal-dual proximal splitting solver

use num_traits::{Float, Num, NumCast, Zero, One};
use core::marker::PhantomData;
use core::fmt::{Debug, LowerExp};
use alloc::vec;
use alloc::vec::Vec;
use crate::solver::{LinAlg, SolverError, StepSize, StepPolicy, Monitor, Objective, Termination, History};

//

/// Solver parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverParam<F: Float>
{
    /// Max iteration number. `None` means the default of each formulation,
    /// [`PrimalDual::default_max_iter`].
    pub max_iter: Option<usize>,
    /// Tolerance of the optimality residual.
    pub opt_tol: F,
    /// Tolerance of the iterate progress.
    pub prog_tol: F,
    /// Records objective values of every iteration into [`Solution::history`].
    pub save_history: bool,
    /// Enables the spectral step size update where the formulation supports it.
    pub adaptive_step: bool,
    /// Period of iterations to output progress log(for debug/trace level).
    pub log_period: usize,
}

impl<F: Float> Default for SolverParam<F>
{
    fn default() -> Self
    {
        let two = F::one() + F::one();
        let ten = two * two * two + two;

        SolverParam {
            max_iter: None,
            opt_tol: ten.powi(-6),
            prog_tol: ten.powi(-6),
            save_history: false,
            adaptive_step: true,
            log_period: 100,
        }
    }
}

impl<F: Float> SolverParam<F>
{
    fn is_valid(&self) -> bool
    {
        let f0 = F::zero();

        self.max_iter != Some(0) && self.opt_tol >= f0 && self.prog_tol >= f0
    }
}

//

fn name_eq(name: &str, key: &str) -> bool
{
    let mut n = name.chars().filter(|c| *c != '_' && *c != '-');
    let mut k = key.chars().filter(|c| *c != '_');

    loop {
        match (n.next(), k.next()) {
            (None, None) => return true,
            (Some(a), Some(b)) if a.eq_ignore_ascii_case(&b) => {},
            _ => return false,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool>
{
    let v = value.trim();

    if v.eq_ignore_ascii_case("true") || v == "1" {
        Some(true)
    }
    else if v.eq_ignore_ascii_case("false") || v == "0" {
        Some(false)
    }
    else {
        None
    }
}

fn parse_num<N: Num>(value: &str) -> Result<N, SolverError>
{
    N::from_str_radix(value.trim(), 10).map_err(|_| {
        log::error!("Unparsable value: {}", value);
        SolverError::InvalidParam
    })
}

/// Changes one solver parameter given by a textual name and value.
///
/// Names are `max_iter`, `opt_tol`, `prog_tol`, `save_history`, `adaptive_step` and `log_period`,
/// matched case-insensitively with underscores ignored, so that `maxIter` or `MAX_ITER` are accepted as well.
///
/// Returns `Ok(true)` if the parameter is changed, `Ok(false)` if the name is unknown and ignored,
/// or `Err` with [`SolverError::InvalidParam`] if the value is unparsable.
/// * `par` is parameters to be changed.
/// * `name` is a parameter name.
/// * `value` is a parameter value.
pub fn set_par_by_name<F: Float>(par: &mut SolverParam<F>, name: &str, value: &str) -> Result<bool, SolverError>
{
    if name_eq(name, "max_iter") {
        par.max_iter = Some(parse_num(value)?);
    }
    else if name_eq(name, "opt_tol") {
        par.opt_tol = parse_num(value)?;
    }
    else if name_eq(name, "prog_tol") {
        par.prog_tol = parse_num(value)?;
    }
    else if name_eq(name, "log_period") {
        par.log_period = parse_num(value)?;
    }
    else if name_eq(name, "save_history") {
        par.save_history = parse_bool(value).ok_or(SolverError::InvalidParam)?;
    }
    else if name_eq(name, "adaptive_step") {
        par.adaptive_step = parse_bool(value).ok_or(SolverError::InvalidParam)?;
    }
    else {
        log::debug!("Ignored unknown parameter: {}", name);
        return Ok(false);
    }

    Ok(true)
}

//

/// Primal-dual problem trait
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// Expresses a saddle point problem
/// \\[
/// \min_x \max_u \ F(x) + \langle K x, u \rangle - G^\*(u),
/// \\]
/// where
/// - variables \\( x \in \mathbb{R}^n \\) (primal) and \\( u \in \mathbb{R}^p \\) (dual)
/// - \\( K \in \mathbb{R}^{p \times n} \\) is a coupling linear operator
/// - \\( F \\) and \\( G^\* \\) are closed convex functions given through their proximal operators.
///
/// [`Solver::solve`] drives the iteration only through this trait.
pub trait PrimalDual<L: LinAlg>
{
    /// Checks the problem data.
    ///
    /// Returns `Ok` with a tuple of \\(n\\) and \\(p\\),
    /// or `Err` with [`SolverError::InvalidOp`] or [`SolverError::InvalidParam`].
    fn validate(&self) -> Result<(usize, usize), SolverError>;

    /// Max iteration number used when [`SolverParam::max_iter`] is `None`.
    fn default_max_iter(&self) -> usize;

    /// Safety constant \\(c < 1\\) of the initial step sizes \\(c / \\|K\\|\\).
    fn step_margin(&self) -> f64;

    /// Estimate of \\(\\|K\\|\\).
    fn norm_est(&self) -> L::F;

    /// Checks if the spectral step size update is applicable.
    fn spectral_step(&self) -> bool;

    /// Calculate \\(\alpha K x + \beta y\\).
    fn op_k(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F]);

    /// Calculate \\(\alpha K^T u + \beta y\\).
    fn trans_op_k(&self, alpha: L::F, u: &[L::F], beta: L::F, y: &mut[L::F]);

    /// Calculates \\({\bf prox}\_{\gamma F}(x)\\) in place.
    fn prox_primal(&mut self, gamma: L::F, x: &mut[L::F]);

    /// Calculates \\({\bf prox}\_{\gamma G^\*}(u)\\) in place.
    fn prox_dual(&mut self, gamma: L::F, u: &mut[L::F]);

    /// Optimality residual at \\((x, u)\\).
    fn residual(&mut self, x: &[L::F], u: &[L::F]) -> L::F;

    /// Objective values at \\((x, u)\\).
    ///
    /// Returns a tuple of the data fidelity term and the penalty term.
    fn objective(&mut self, x: &[L::F], u: &[L::F]) -> (L::F, L::F);

    /// Checks if the signal of interest is the dual variable \\(u\\) rather than the primal \\(x\\).
    fn signal_is_dual(&self) -> bool;
}

//

/// Solution of [`Solver::solve`].
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<F>
{
    /// Recovered signal.
    /// The primal variable, or the dual variable if [`PrimalDual::signal_is_dual`].
    pub x: Vec<F>,
    /// Reason of termination.
    pub status: Termination<F>,
    /// Number of completed iterations.
    pub iter: usize,
    /// Iteration history.
    pub history: History<F>,
}

//

/// First-order primal-dual proximal splitting solver
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// For a [`PrimalDual`] problem, iterates from \\(x = 0, u = 0\\):
/// \\[
/// \begin{array}{l}
/// x \leftarrow {\bf prox}\_{\gamma_1 F}(x\_{prev} - \gamma_1 K^T u) \\\\
/// \tilde x = 2x - x\_{prev} \\\\
/// u \leftarrow {\bf prox}\_{\gamma_2 G^\*}(u\_{prev} + \gamma_2 K \tilde x)
/// \end{array}
/// \\]
/// until the optimality residual or the iterate progress falls below its tolerance.
pub struct Solver<L: LinAlg>
{
    /// solver parameters.
    pub par: SolverParam<L::F>,
}

impl<L: LinAlg> Solver<L>
{
    /// Creates an instance.
    ///
    /// Returns [`Solver`] instance.
    pub fn new() -> Self
    {
        Solver {
            par: SolverParam::default(),
        }
    }

    /// Changes solver parameters.
    ///
    /// Returns [`Solver`] with its parameters changed.
    /// * `f` is a function to change parameters given by its argument.
    pub fn par<P>(mut self, f: P) -> Self
    where P: FnOnce(&mut SolverParam<L::F>)
    {
        f(&mut self.par);
        self
    }
}

impl<L: LinAlg> Default for Solver<L>
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl<L: LinAlg> Solver<L>
where L::F: Float + Debug + LowerExp
{
    /// Starts to solve a primal-dual problem.
    ///
    /// Returns `Ok` with [`Solution`], including the case of [`Termination::ExcessIter`],
    /// or `Err` with [`SolverError`] type.
    /// * `prob` is a problem expressed by [`PrimalDual`].
    ///   It is borrowed mutably since its proximal operators may use internal work memory.
    pub fn solve<P>(self, prob: &mut P) -> Result<Solution<L::F>, SolverError>
    where P: PrimalDual<L>
    {
        if !self.par.is_valid() {
            log::error!("Invalid parameters: {:?}", self.par);
            return Err(SolverError::InvalidParam);
        }

        let (n, p) = prob.validate()?;

        let policy = if self.par.adaptive_step && prob.spectral_step() {
            StepPolicy::Spectral
        }
        else {
            StepPolicy::Fixed
        };

        let margin = <L::F as NumCast>::from(prob.step_margin()).ok_or_else(|| {
            log::error!("Unrepresentable step margin: {}", prob.step_margin());
            SolverError::InvalidParam
        })?;

        let step = StepSize::new(margin, prob.norm_est(), policy).ok_or_else(|| {
            log::error!("Invalid operator norm estimate: {:?}", prob.norm_est());
            SolverError::InvalidOp
        })?;

        let max_iter = self.par.max_iter.unwrap_or_else(|| prob.default_max_iter());

        log::debug!("{:?}", self.par);

        let core = SolverCore {
            ph_l: PhantomData::<L>,
            log_period: self.par.log_period,
            max_iter,
            step,
            monitor: Monitor::new(self.par.opt_tol, self.par.prog_tol, self.par.save_history, max_iter),
        };

        core.solve(prob, n, p)
    }
}

//

struct SolverCore<L: LinAlg>
where L::F: Float + Debug + LowerExp
{
    ph_l: PhantomData<L>,
    log_period: usize,
    max_iter: usize,
    step: StepSize<L::F>,
    monitor: Monitor<L::F>,
}

impl<L: LinAlg> SolverCore<L>
where L::F: Float + Debug + LowerExp
{
    fn solve<P>(mut self, prob: &mut P, n: usize, p: usize) -> Result<Solution<L::F>, SolverError>
    where P: PrimalDual<L>
    {
        log::info!("----- Initializing");
        let f0 = L::F::zero();

        // Initialize vectors
        let mut x = vec![f0; n];
        let mut u = vec![f0; p];
        let mut dx = vec![f0; n];
        let mut du = vec![f0; p];
        let mut x_bar = vec![f0; n];
        let mut w_p = vec![f0; p];

        log::debug!("gamma {:?}, {:?}", self.step.gamma(), self.step.policy());

        // Iteration
        log::info!("----- Started");
        let mut i = 0;
        let status = loop {
            let excess_iter = i + 1 >= self.max_iter;

            let log_trig = if self.log_period > 0 {
                i % self.log_period == 0
            }
            else {
                if i == 0 && log::log_enabled!(log::Level::Debug) {
                    log::warn!("log_period == 0: no periodic log");
                }
                false
            };

            // Update vectors
            let gamma = self.step.gamma();
            self.update_vecs(prob, gamma, &mut x, &mut u, &mut dx, &mut du, &mut x_bar);

            // Termination criteria
            let er = Monitor::<L::F>::progress::<L>(&x, &u, &mut dx, &mut du);
            let opt = prob.residual(&x, &u);
            let obj = if self.monitor.save_history() {
                let (f, g) = prob.objective(&x, &u);
                Some(Objective::new(f, g))
            }
            else {
                None
            };

            let term = self.monitor.check(er, opt, gamma, obj)?;

            if log_trig || excess_iter || term.is_some() {
                log::debug!("{}: er_opt {:.2e} {:.2e}", i, er, opt);
            }
            else {
                log::trace!("{}: er_opt {:.2e} {:.2e}", i, er, opt);
            }

            i += 1;

            if let Some(t) = term {
                log::info!("----- Converged");
                break t;
            }
            else if excess_iter {
                log::warn!("----- ExcessIter");
                break Termination::ExcessIter;
            }

            // Step sizes for the next iteration
            if self.step.policy() == StepPolicy::Spectral {
                self.update_step(prob, &x, &u, &mut dx, &mut w_p);
            }
        }; // end of loop

        log::debug!("{}", status);

        let sol = if prob.signal_is_dual() {u} else {x};

        Ok(Solution {
            x: sol,
            status,
            iter: i,
            history: self.monitor.into_history(),
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn update_vecs<P>(&self, prob: &mut P, (gamma1, gamma2): (L::F, L::F),
        x: &mut[L::F], u: &mut[L::F], x_prev: &mut[L::F], u_prev: &mut[L::F], x_bar: &mut[L::F])
    where P: PrimalDual<L>
    {
        let f1 = L::F::one();
        let f2 = f1 + f1;

        // x = prox_F(x_prev - gamma1 * K^T u)
        L::copy(x, x_prev);
        prob.trans_op_k(-gamma1, u, f1, x);
        prob.prox_primal(gamma1, x);

        // x_bar = 2 * x - x_prev
        L::copy(x, x_bar);
        L::scale(f2, x_bar);
        L::add(-f1, x_prev, x_bar);

        // u = prox_G*(u_prev + gamma2 * K x_bar)
        L::copy(u, u_prev);
        prob.op_k(gamma2, x_bar, f1, u);
        prob.prox_dual(gamma2, u);
    }

    fn update_step<P>(&mut self, prob: &P, x: &[L::F], u: &[L::F], w_n: &mut[L::F], w_p: &mut[L::F])
    where P: PrimalDual<L>
    {
        let f0 = L::F::zero();
        let f1 = L::F::one();

        // w_n = K^T u, w_p = K x
        prob.trans_op_k(f1, u, f0, w_n);
        prob.op_k(f1, x, f0, w_p);

        let x_ktu = L::inner_prod(x, w_n);
        let norm_ktu = L::norm(w_n);
        let norm_kx = L::norm(w_p);

        self.step.update(x_ktu, norm_ktu * norm_ktu, norm_kx * norm_kx);
        log::trace!("gamma {:?}", self.step.gamma());
    }
}
