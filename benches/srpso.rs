use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use ndarray::{Array1, Array2};
use srpso::prelude::*;

fn setup_regression() -> (Vec<VariableSpec>, DataBundle<Array2<f64>, Array1<f64>>) {
    // Labels follow y = 2 x0 - 3 x1 + 0.5 on a regular grid
    let design = |rows: usize| {
        Array2::from_shape_fn((rows, 2), |(i, j)| {
            let t = i as f64 / rows as f64;
            if j == 0 {
                t
            } else {
                (3.0 * t).sin()
            }
        })
    };
    let labels = |data: &Array2<f64>| {
        data.rows()
            .into_iter()
            .map(|row| 2.0 * row[0] - 3.0 * row[1] + 0.5)
            .collect::<Array1<f64>>()
    };

    let train_data = design(2000);
    let test_data = design(500);
    let train_labels = labels(&train_data);
    let test_labels = labels(&test_data);

    let variables = vec![
        VariableSpec::real(-5.0, 5.0),
        VariableSpec::real(-5.0, 5.0),
        VariableSpec::real(-1.0, 1.0),
    ];

    (
        variables,
        DataBundle::new(train_data, train_labels, test_data, test_labels),
    )
}

/// Negated mean squared error of a linear model on the training partition.
fn negated_mse(
    train_data: &Array2<f64>,
    train_labels: &Array1<f64>,
    _test_data: &Array2<f64>,
    _test_labels: &Array1<f64>,
    params: &[f64],
) -> Result<f64, ObjectiveError> {
    let predictions = train_data.dot(&Array1::from_vec(params[..2].to_vec())) + params[2];
    let residuals = predictions - train_labels;
    Ok(-residuals.mapv(|r| r * r).mean().unwrap_or(f64::NAN))
}

fn benchmark_srpso(c: &mut Criterion) {
    let params = PsoParamsBuilder::default()
        .swarm_size(40)
        .max_iters(50)
        .build()
        .expect("Failed to build parameters");
    let optimizer = SRPSO::new(params, Some(42));

    let sphere = Problem::new(
        &[VariableSpec::real(-5.0, 5.0), VariableSpec::integer(0.0, 10.0)],
        DataBundle::empty(),
        benchmarks::sphere(vec![1.0, 5.0]),
    )
    .expect("Failed to build problem");

    let (variables, data) = setup_regression();
    let regression = Problem::new(&variables, data, negated_mse).expect("Failed to build problem");

    c.bench_function("sphere_sequential", |b| {
        b.iter(|| {
            let _ = black_box(optimizer.optimize(black_box(&sphere), None, None));
        });
    });

    c.bench_function("regression_sequential", |b| {
        b.iter(|| {
            let _ = black_box(optimizer.optimize(black_box(&regression), None, None));
        });
    });

    c.bench_function("regression_parallel", |b| {
        b.iter(|| {
            let _ = black_box(optimizer.optimize_parallel(black_box(&regression), None, None));
        });
    });
}

criterion_group!(benches, benchmark_srpso);
criterion_main!(benches);
