use std::time::{Duration, Instant};

use lincomb::ilp::{solve_ilp, BranchAndBound};
use lincomb::matrix::Matrix;
use lincomb::rings::{F2, Z};
use lincomb::vector::Vector;
use lincomb::xor::{solve_xor, solve_xor_by_elimination};
use num_bigint::BigInt;
use rand::distr::{Bernoulli, Distribution as _, Uniform};
use rand::{rngs::StdRng, SeedableRng};

fn main() {
    let args: Vec<_> = std::env::args().collect();

    let max_vectors = match args.get(1) {
        Some(arg) => match arg.parse::<usize>() {
            Ok(n) if (1..=lincomb::xor::MAX_VECTORS).contains(&n) => n,
            _ => {
                eprintln!("Invalid argument: {arg}");
                return;
            },
        },
        None => {
            eprintln!("Usage: {} <max vectors> <iter>", args[0]);
            return;
        },
    };

    let iter = match args.get(2) {
        Some(arg) => match arg.parse::<usize>() {
            Ok(iter) => iter,
            Err(_) => {
                eprintln!("Invalid argument: {arg}");
                return;
            },
        },
        None => 1000,
    };

    bench(max_vectors, iter);
}

fn bench(max_vectors: usize, iter: usize) {
    let rng = &mut StdRng::seed_from_u64(0);
    let dims = Uniform::new_inclusive(1usize, 10).unwrap();
    let counts = Uniform::new_inclusive(1usize, max_vectors).unwrap();
    let bit = Bernoulli::new(0.4).unwrap();
    let coeff = Uniform::new_inclusive(0u32, 5).unwrap();

    let mut exhaustive_duration = Duration::ZERO;
    let mut elimination_duration = Duration::ZERO;
    let mut bnb_duration = Duration::ZERO;
    #[cfg(feature = "z3")]
    let mut z3_duration = Duration::ZERO;

    for _ in 0..iter {
        let dim = dims.sample(rng);
        let n = counts.sample(rng);
        let a = Matrix::<F2>::from_iter(dim, n, std::iter::repeat_with(|| bit.sample(rng)));

        // Goals that are reachable by construction.
        let x: Vec<u32> = (0..n).map(|_| coeff.sample(rng)).collect();
        let a_int = a.transform::<Z, _>(|&e| BigInt::from(e as u8));
        let x_int: Vector<Z> = x.iter().map(|&e| BigInt::from(e)).collect();
        let b = a_int.mul_vec_post(&x_int, &Z);
        let g: Vector<F2> = b.iter().map(|e| e.bit(0)).collect();

        {
            let start = Instant::now();
            std::hint::black_box(solve_xor(
                std::hint::black_box(&a),
                std::hint::black_box(&g),
            ).ok());
            exhaustive_duration += start.elapsed();
        }

        {
            let start = Instant::now();
            std::hint::black_box(solve_xor_by_elimination(
                std::hint::black_box(&a),
                std::hint::black_box(&g),
            ).ok());
            elimination_duration += start.elapsed();
        }

        {
            let start = Instant::now();
            std::hint::black_box(solve_ilp(
                std::hint::black_box(&a_int),
                std::hint::black_box(&b),
                &BranchAndBound::default(),
            ).ok());
            bnb_duration += start.elapsed();
        }

        #[cfg(feature = "z3")]
        {
            let start = Instant::now();
            std::hint::black_box(solve_ilp(
                std::hint::black_box(&a_int),
                std::hint::black_box(&b),
                &lincomb::ilp::Z3Optimizer,
            ).ok());
            z3_duration += start.elapsed();
        }
    }

    let ms = |d: Duration| d.as_secs_f64() * 1000.0;
    println!("exhaustive_xor_duration: {:.2}ms", ms(exhaustive_duration));
    println!("elimination_xor_duration: {:.2}ms", ms(elimination_duration));
    println!("branch_and_bound_duration: {:.2}ms", ms(bnb_duration));
    #[cfg(feature = "z3")]
    println!("z3_duration: {:.2}ms", ms(z3_duration));
}
