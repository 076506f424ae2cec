use float_eq::assert_float_eq;
use rand::prelude::*;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use rand_distr::StandardNormal;
use proxsplit::prelude::*;
use proxsplit::solver::Operator;
use proxsplit::*;

type La = FloatGeneric<f64>;

type AMatBuild = MatBuild<La>;
type ASolver = Solver<La>;

//

fn gen_instance(seed: u64, m: usize, n: usize, noise: f64) -> (AMatBuild, Vec<f64>, Vec<f64>)
{
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);

    let scale = 1. / (m as f64).sqrt();
    let mat_a = AMatBuild::new((m, n))
                .by_fn(|_, _| scale * rng.sample::<f64, _>(StandardNormal));

    // piecewise constant
    let x_true: Vec<f64> = (0.. n).map(|i| {
        if i < n / 3 {0.} else if i < n * 2 / 3 {1.} else {-0.5}
    }).collect();

    let mut vec_b = vec![0.; m];
    mat_a.as_op().op(1., &x_true, 0., &mut vec_b);
    for e in vec_b.iter_mut() {
        *e += noise * rng.sample::<f64, _>(StandardNormal);
    }

    (mat_a, vec_b, x_true)
}

// normal equations by gaussian elimination with partial pivoting
fn lstsq(mat_a: &AMatBuild, vec_b: &[f64]) -> Vec<f64>
{
    let (m, n) = mat_a.size();

    let mut ata = vec![vec![0.; n]; n];
    let mut atb = vec![0.; n];
    for i in 0.. n {
        for j in 0.. n {
            ata[i][j] = (0.. m).map(|k| mat_a[(k, i)] * mat_a[(k, j)]).sum();
        }
        atb[i] = (0.. m).map(|k| mat_a[(k, i)] * vec_b[k]).sum();
    }

    for c in 0.. n {
        let piv = (c.. n).max_by(|&r1, &r2| ata[r1][c].abs().total_cmp(&ata[r2][c].abs())).unwrap();
        ata.swap(c, piv);
        atb.swap(c, piv);
        for r in c + 1.. n {
            let f = ata[r][c] / ata[c][c];
            for k in c.. n {
                let t = f * ata[c][k];
                ata[r][k] -= t;
            }
            let t = f * atb[c];
            atb[r] -= t;
        }
    }

    let mut x = vec![0.; n];
    for c in (0.. n).rev() {
        let s: f64 = (c + 1.. n).map(|k| ata[c][k] * x[k]).sum();
        x[c] = (atb[c] - s) / ata[c][c];
    }
    x
}

fn norm(x: &[f64]) -> f64
{
    x.iter().map(|e| e * e).sum::<f64>().sqrt()
}

//

#[test]
fn test_tv1()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let (m, n) = (50, 30);
    let (mat_a, vec_b, x_true) = gen_instance(0, m, n, 0.01);

    let s = ASolver::new().par(|p| {
        p.save_history = true;
    });
    let mut prob = ProbTV::new(mat_a.as_op(), DiffOp::new(n), &vec_b, 0.1);
    let rslt = s.solve(&mut prob).unwrap();

    // linearized data step: halts by progress, not by the residual
    assert!(matches!(rslt.status, Termination::ProgTol(_)), "{:?}", rslt.status);
    assert!(rslt.iter < 1000);
    assert_eq!(rslt.x.len(), n);
    assert_eq!(rslt.history.len(), rslt.iter);

    let first = rslt.history.records()[0].opt;
    let last = rslt.history.last().unwrap().opt;
    assert!(last < first);

    let max_err = rslt.x.iter().zip(&x_true).map(|(a, b)| (a - b).abs()).fold(0., f64::max);
    assert!(max_err < 0.2, "max_err {}", max_err);

    assert_eq!(rslt.history.obj().count(), rslt.iter);
    for o in rslt.history.obj() {
        assert_eq!(o.cost, o.f + o.g);
    }
}

#[test]
fn test_tv_zero_lambda()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let (m, n) = (50, 30);
    let (mat_a, vec_b, _) = gen_instance(1, m, n, 0.01);

    let s = ASolver::new().par(|p| {
        p.max_iter = Some(10_000);
    });
    let mut prob = ProbTV::new(mat_a.as_op(), DiffOp::new(n), &vec_b, 0.);
    let rslt = s.solve(&mut prob).unwrap();

    let x_ls = lstsq(&mat_a, &vec_b);
    let diff: Vec<f64> = rslt.x.iter().zip(&x_ls).map(|(a, b)| a - b).collect();
    let rel = norm(&diff) / norm(&x_ls);

    assert!(rel < 1e-3, "rel {}", rel);
}

#[test]
fn test_tv_identity()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let (m, n) = (50, 30);
    let (mat_a, vec_b, _) = gen_instance(2, m, n, 0.01);

    let s = ASolver::new().par(|p| {
        p.max_iter = Some(10_000);
    });
    let mut prob = ProbTV::new(mat_a.as_op(), IdOp::new(n), &vec_b, 0.1);
    let rslt = s.solve(&mut prob).unwrap();

    assert!(rslt.status.is_converged());
    assert!(rslt.history.last().unwrap().opt < rslt.history.records()[0].opt);
    assert!(rslt.x.iter().all(|e| e.is_finite()));
}

#[test]
fn test_tv_excess_iter()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let (m, n) = (50, 30);
    let (mat_a, vec_b, _) = gen_instance(3, m, n, 0.01);

    let s = ASolver::new().par(|p| {
        p.max_iter = Some(5);
    });
    let mut prob = ProbTV::new(mat_a.as_op(), DiffOp::new(n), &vec_b, 0.1);
    let rslt = s.solve(&mut prob).unwrap();

    assert_eq!(rslt.status, Termination::ExcessIter);
    assert_eq!(rslt.iter, 5);
    assert_eq!(rslt.history.len(), 5);
    assert_eq!(rslt.history.obj().count(), 0);

    // fixed step sizes 0.95 / ||D||
    for r in rslt.history.records() {
        assert_float_eq!(r.gamma.0, 0.475, abs <= 1e-15);
        assert_float_eq!(r.gamma.1, 0.475, abs <= 1e-15);
    }
}

#[test]
fn test_tv_divergence()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let n = 3;
    let mat_a = AMatBuild::new((n, n)).by_fn(|r, c| if r == c {100.} else {0.});
    let vec_b = [1., 1., 1.];

    let s = ASolver::new();
    let mut prob = ProbTV::new(mat_a.as_op(), IdOp::new(n), &vec_b, 0.1);
    let rslt = s.solve(&mut prob);

    assert_eq!(rslt, Err(SolverError::Divergence));
}

#[test]
fn test_tv_invalid()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let (m, n) = (10, 6);
    let (mat_a, vec_b, _) = gen_instance(4, m, n, 0.01);

    let mut prob = ProbTV::new(mat_a.as_op(), DiffOp::new(n), &vec_b, -1.);
    assert_eq!(ASolver::new().solve(&mut prob), Err(SolverError::InvalidParam));

    let mut prob = ProbTV::new(mat_a.as_op(), DiffOp::new(n), &vec_b, f64::NAN);
    assert_eq!(ASolver::new().solve(&mut prob), Err(SolverError::InvalidParam));

    let mut prob = ProbTV::new(mat_a.as_op(), DiffOp::new(n + 1), &vec_b, 0.1);
    assert_eq!(ASolver::new().solve(&mut prob), Err(SolverError::InvalidOp));

    let mut prob = ProbTV::new(mat_a.as_op(), DiffOp::new(n), &vec_b[1..], 0.1);
    assert_eq!(ASolver::new().solve(&mut prob), Err(SolverError::InvalidOp));

    let mut prob = ProbTV::new(mat_a.as_op(), DiffOp::new(n), &vec_b, 0.1);
    let s = ASolver::new().par(|p| {p.max_iter = Some(0)});
    assert_eq!(s.solve(&mut prob), Err(SolverError::InvalidParam));

    let s = ASolver::new().par(|p| {p.opt_tol = f64::NAN});
    assert_eq!(s.solve(&mut prob), Err(SolverError::InvalidParam));

    let s = ASolver::new().par(|p| {p.prog_tol = -1e-6});
    assert_eq!(s.solve(&mut prob), Err(SolverError::InvalidParam));
}
