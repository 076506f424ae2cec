use float_eq::assert_float_eq;
use rand::prelude::*;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use rand_distr::StandardNormal;
use proxsplit::solver::Prox;
use proxsplit::*;

type La = FloatGeneric<f64>;

//

fn gen_vec(rng: &mut Xoshiro256StarStar, n: usize, scale: f64) -> Vec<f64>
{
    (0.. n).map(|_| scale * rng.sample::<f64, _>(StandardNormal)).collect()
}

#[test]
fn test_moreau1()
{
    let mut rng = Xoshiro256StarStar::seed_from_u64(0);

    for &lambda in &[0., 0.1, 1., 3.] {
        for &gamma in &[0.01, 0.5, 1., 7.] {
            let x = gen_vec(&mut rng, 16, 2.);

            // prox of the conjugate
            let mut y_conj = x.clone();
            ProxL1Conj::<La>::new(lambda).prox(gamma, &mut y_conj);

            // gamma * prox_{h/gamma}(x/gamma)
            let mut y = x.iter().map(|e| e / gamma).collect::<Vec<_>>();
            ProxL1::<La>::new(lambda).prox(1. / gamma, &mut y);

            let sum: Vec<f64> = y_conj.iter().zip(&y).map(|(a, b)| a + gamma * b).collect();
            assert_float_eq!(sum.as_slice(), x.as_slice(), abs_all <= 1e-12);

            // projection onto the lambda-ball
            assert!(y_conj.iter().all(|e| e.abs() <= lambda + 1e-12));
        }
    }
}

#[test]
fn test_soft_threshold_shape()
{
    let mut rng = Xoshiro256StarStar::seed_from_u64(1);

    let x = gen_vec(&mut rng, 64, 1.);
    let mut y = x.clone();
    ProxL1::<La>::new(0.5).prox(0.8, &mut y);

    for (xi, yi) in x.iter().zip(&y) {
        assert!(yi.abs() <= xi.abs());
        assert!(*yi == 0. || yi.signum() == xi.signum());
        if xi.abs() <= 0.4 {
            assert_eq!(*yi, 0.);
        }
        else {
            assert_float_eq!(xi.abs() - yi.abs(), 0.4, abs <= 1e-12);
        }
    }
}

#[test]
fn test_prox_zero_lambda()
{
    let mut rng = Xoshiro256StarStar::seed_from_u64(2);

    let x = gen_vec(&mut rng, 8, 1.);

    let mut y = x.clone();
    ProxL1::<La>::new(0.).prox(2., &mut y);
    assert_eq!(y, x);

    let mut y = x.clone();
    ProxL1Conj::<La>::new(0.).prox(2., &mut y);
    assert_float_eq!(y.as_slice(), [0.; 8].as_ref(), abs_all <= 1e-12);
}

#[test]
fn test_prox_lsq_optimality()
{
    let mut rng = Xoshiro256StarStar::seed_from_u64(3);

    let b = gen_vec(&mut rng, 10, 1.);
    let x = gen_vec(&mut rng, 10, 1.);
    let gamma = 0.7;

    // y minimizes 0.5||y - b||^2 + ||y - x||^2 / (2 gamma): (y - b) + (y - x) / gamma = 0
    let mut y = x.clone();
    ProxLsq::<La>::new(&b).prox(gamma, &mut y);

    for i in 0.. 10 {
        assert_float_eq!((y[i] - b[i]) + (y[i] - x[i]) / gamma, 0., abs <= 1e-12);
    }
}

#[test]
fn test_prox_lsq_op_identity()
{
    let mut rng = Xoshiro256StarStar::seed_from_u64(4);

    let n = 6;
    let b = gen_vec(&mut rng, n, 1.);
    let x = gen_vec(&mut rng, n, 1.);
    let gamma = 0.3;

    // with A = I the linearized step coincides with the exact proximal map
    let mat_i = MatBuild::<La>::new((n, n)).by_fn(|r, c| if r == c {1.} else {0.});

    let mut y_op = x.clone();
    ProxLsqOp::new(mat_i.as_op(), &b).prox(gamma, &mut y_op);

    let mut y = x.clone();
    ProxLsq::<La>::new(&b).prox(gamma, &mut y);

    assert_float_eq!(y_op.as_slice(), y.as_slice(), abs_all <= 1e-12);
}
