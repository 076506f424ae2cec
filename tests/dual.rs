use float_eq::assert_float_eq;
use rand::prelude::*;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use rand_distr::StandardNormal;
use proxsplit::prelude::*;
use proxsplit::solver::{Operator, Prox, LinAlg};
use proxsplit::*;

type La = FloatGeneric<f64>;

type AMatBuild = MatBuild<La>;
type ASolver = Solver<La>;

//

fn gen_instance(seed: u64, m: usize, n: usize, noise: f64) -> (AMatBuild, Vec<f64>)
{
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);

    let scale = 1. / (m as f64).sqrt();
    let mat_a = AMatBuild::new((m, n))
                .by_fn(|_, _| scale * rng.sample::<f64, _>(StandardNormal));

    // sparse
    let x_true: Vec<f64> = (0.. n).map(|i| {
        match i % 10 {
            0 => 1.,
            5 => -0.5,
            _ => 0.,
        }
    }).collect();

    let mut vec_b = vec![0.; m];
    mat_a.as_op().op(1., &x_true, 0., &mut vec_b);
    for e in vec_b.iter_mut() {
        *e += noise * rng.sample::<f64, _>(StandardNormal);
    }

    (mat_a, vec_b)
}

// violation of the Lasso optimality condition A^T (b - A u) in lambda * d||u||_1
fn kkt_violation(mat_a: &AMatBuild, vec_b: &[f64], u: &[f64], lambda: f64) -> f64
{
    let (m, n) = mat_a.size();

    let mut r = vec_b.to_vec();
    mat_a.as_op().op(-1., u, 1., &mut r);
    let mut g = vec![0.; n];
    mat_a.as_op().trans_op(1., &r, 0., &mut g);
    assert_eq!(r.len(), m);

    u.iter().zip(&g).map(|(ui, gi)| {
        if *ui > 0. {
            (gi - lambda).abs()
        }
        else if *ui < 0. {
            (gi + lambda).abs()
        }
        else {
            (gi.abs() - lambda).max(0.)
        }
    }).fold(0., f64::max)
}

//

#[test]
fn test_dual_soft_threshold()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let mat_a = AMatBuild::new((4, 4)).by_fn(|r, c| if r == c {1.} else {0.});
    let vec_b = [0.3, -2., 2., -0.7];

    let s = ASolver::new().par(|p| {
        p.adaptive_step = false;
    });
    let mut prob = ProbDual::new(mat_a.as_op(), &vec_b, 0.5);
    let rslt = s.solve(&mut prob).unwrap();
    println!("{:?}", rslt.status);

    assert!(rslt.status.is_converged());
    assert_float_eq!(rslt.x.as_slice(), [0., -1.5, 1.5, -0.2].as_ref(), abs_all <= 1e-3);
}

#[test]
fn test_dual_soft_threshold_f32()
{
    let _ = env_logger::builder().is_test(true).try_init();

    type La32 = FloatGeneric<f32>;

    let mat_a = MatBuild::<La32>::new((4, 4)).by_fn(|r, c| if r == c {1.} else {0.});
    let vec_b = [0.3, -2., 2., -0.7];

    let s = Solver::<La32>::new().par(|p| {
        p.adaptive_step = false;
        p.opt_tol = 1e-5;
        p.prog_tol = 1e-5;
    });
    let mut prob = ProbDual::new(mat_a.as_op(), &vec_b, 0.5);
    let rslt = s.solve(&mut prob).unwrap();

    assert!(rslt.status.is_converged());
    assert_float_eq!(rslt.x.as_slice(), [0., -1.5, 1.5, -0.2].as_ref(), abs_all <= 1e-3);
}

#[test]
fn test_dual_fixed()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let (m, n) = (50, 30);
    let lambda = 0.1;
    let (mat_a, vec_b) = gen_instance(10, m, n, 0.01);

    let s = ASolver::new().par(|p| {
        p.adaptive_step = false;
        p.save_history = true;
    });
    let mut prob = ProbDual::new(mat_a.as_op(), &vec_b, lambda);
    let rslt = s.solve(&mut prob).unwrap();

    assert!(rslt.status.is_converged());
    assert_eq!(rslt.x.len(), n);

    let kkt = kkt_violation(&mat_a, &vec_b, &rslt.x, lambda);
    assert!(kkt < 1e-4, "kkt {}", kkt);

    let gamma = 0.99 / mat_a.as_op().norm_est();
    for r in rslt.history.records() {
        assert_eq!(r.gamma, (gamma, gamma));
    }

    for o in rslt.history.obj() {
        assert_eq!(o.cost, o.f + o.g);
    }

    // objective of the returned signal
    let o = rslt.history.obj().last().unwrap();
    let mut r = vec_b.clone();
    mat_a.as_op().op(1., &rslt.x, -1., &mut r);
    assert_float_eq!(o.f, 0.5 * La::norm(&r).powi(2), r2nd <= 1e-9);
    assert_float_eq!(o.g, lambda * La::abssum(&rslt.x), r2nd <= 1e-9);
}

#[test]
fn test_dual_fixed_recurrence()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let (m, n) = (20, 12);
    let lambda = 0.05;
    let iter = 20;
    let (mat_a, vec_b) = gen_instance(11, m, n, 0.01);

    let s = ASolver::new().par(|p| {
        p.adaptive_step = false;
        p.max_iter = Some(iter);
        p.opt_tol = 0.;
        p.prog_tol = 0.;
    });
    let mut prob = ProbDual::new(mat_a.as_op(), &vec_b, lambda);
    let rslt = s.solve(&mut prob).unwrap();
    assert_eq!(rslt.status, Termination::ExcessIter);

    // the same recurrence written out with a constant step size
    let op_a = mat_a.as_op();
    let gamma = 0.99 / op_a.norm_est();
    let mut prox_f = ProxLsq::<La>::new(&vec_b);
    let mut prox_g = ProxL1::<La>::new(lambda);

    let mut x = vec![0.; m];
    let mut u = vec![0.; n];
    for _ in 0.. iter {
        let x_prev = x.clone();
        op_a.op(-gamma, &u, 1., &mut x);
        prox_f.prox(gamma, &mut x);

        let mut x_bar = x.clone();
        La::scale(2., &mut x_bar);
        La::add(-1., &x_prev, &mut x_bar);

        op_a.trans_op(gamma, &x_bar, 1., &mut u);
        prox_g.prox(gamma, &mut u);
    }

    assert_float_eq!(rslt.x.as_slice(), u.as_slice(), abs_all <= 1e-12);
}

#[test]
fn test_dual_adaptive()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let (m, n) = (50, 30);
    let (mat_a, vec_b) = gen_instance(12, m, n, 0.01);

    let s = ASolver::new().par(|p| {
        p.max_iter = Some(200);
    });
    let mut prob = ProbDual::new(mat_a.as_op(), &vec_b, 0.1);
    let rslt = s.solve(&mut prob).unwrap();

    let h = rslt.history.records();
    assert_eq!(h.len(), rslt.iter);
    assert!(h.iter().all(|r| r.er.is_finite() && r.opt.is_finite()));
    assert!(h.iter().all(|r| r.gamma.0 > 0. && r.gamma.1 > 0.));
    assert!(rslt.x.iter().all(|e| e.is_finite()));

    if rslt.iter > 1 {
        let g0 = h[0].gamma;
        assert!(h[1..].iter().any(|r| r.gamma != g0));
    }
}

#[test]
fn test_dual_adaptive_degenerate()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let (m, n) = (8, 5);
    let (mat_a, _) = gen_instance(13, m, n, 0.);
    let vec_b = vec![0.; m];

    let s = ASolver::new().par(|p| {
        p.max_iter = Some(5);
        p.opt_tol = 0.;
        p.prog_tol = 0.;
    });
    let mut prob = ProbDual::new(mat_a.as_op(), &vec_b, 0.1);
    let rslt = s.solve(&mut prob).unwrap();

    // all iterates stay at zero, so that every spectral denominator is zero
    assert_eq!(rslt.status, Termination::ExcessIter);
    assert_eq!(rslt.iter, 5);
    assert_eq!(rslt.x, vec![0.; n]);

    let gamma = 0.99 / mat_a.as_op().norm_est();
    for r in rslt.history.records() {
        assert_eq!(r.gamma, (gamma, gamma));
        assert_eq!(r.er, 0.);
        assert_eq!(r.opt, 0.);
    }
}

#[test]
fn test_dual_invalid()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let (m, n) = (6, 4);
    let (mat_a, vec_b) = gen_instance(14, m, n, 0.01);

    let mut prob = ProbDual::new(mat_a.as_op(), &vec_b[1..], 0.1);
    assert_eq!(ASolver::new().solve(&mut prob), Err(SolverError::InvalidOp));

    let mut prob = ProbDual::new(mat_a.as_op(), &vec_b, -0.1);
    assert_eq!(ASolver::new().solve(&mut prob), Err(SolverError::InvalidParam));

    // zero matrix gives zero norm estimate
    let mat_z = AMatBuild::new((m, n));
    let mut prob = ProbDual::new(mat_z.as_op(), &vec_b, 0.1);
    assert_eq!(ASolver::new().solve(&mut prob), Err(SolverError::InvalidOp));

    let mut prob = ProbDual::new(mat_a.as_op().with_norm_est(f64::NAN), &vec_b, 0.1);
    assert_eq!(ASolver::new().solve(&mut prob), Err(SolverError::InvalidOp));

    let mut prob = ProbDual::new(mat_a.as_op().with_norm_est(-1.), &vec_b, 0.1);
    assert_eq!(ASolver::new().solve(&mut prob), Err(SolverError::InvalidOp));
}
