extern crate std;

use num_traits::{Float, Num};
use crate::solver::SolverParam;

fn num_by_env<N: Num + std::fmt::Display>(e: &str) -> Option<N>
{
    if let Some(v) = std::env::var(e).ok()
                     .and_then(|s| {N::from_str_radix(&s, 10).ok()}) {
        log::info!("{}: {}", e, v);
        Some(v)
    }
    else {
        None
    }
}

fn bool_by_env(e: &str) -> Option<bool>
{
    let s = std::env::var(e).ok()?;

    let v = match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => true,
        "false" | "0" => false,
        _ => return None,
    };
    log::info!("{}: {}", e, v);
    Some(v)
}

/// Changes solver parameters by environment variables.
///
/// `MAX_ITER`, `OPT_TOL`, `PROG_TOL`, `SAVE_HISTORY`, `ADAPTIVE_STEP` and `LOG_PERIOD` are read.
/// Unset or unparsable variables leave the parameters as they are.
/// * `p` is parameters to be changed.
pub fn set_par_by_env<F: Float + std::fmt::Display>(p: &mut SolverParam<F>)
{
    p.max_iter = num_by_env("MAX_ITER").or(p.max_iter);
    p.opt_tol = num_by_env("OPT_TOL").unwrap_or(p.opt_tol);
    p.prog_tol = num_by_env("PROG_TOL").unwrap_or(p.prog_tol);
    p.save_history = bool_by_env("SAVE_HISTORY").unwrap_or(p.save_history);
    p.adaptive_step = bool_by_env("ADAPTIVE_STEP").unwrap_or(p.adaptive_step);
    p.log_period = num_by_env("LOG_PERIOD").unwrap_or(p.log_period);
}
