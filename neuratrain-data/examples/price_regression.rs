//! # Price regression
//!
//! Builds a synthetic housing-price style dataset (13 features, prices scaled
//! into `(0, 1)`), splits it 85/15 and trains two networks:
//!
//! 1. quasi-Newton (BFGS) on `Sigmoid(13) > Sigmoid(50) > Sigmoid(10) > Output(1)`;
//! 2. gradient descent with `LeakStepAdaptation` on a smaller chain.
//!
//! Test predictions are computed batch by batch through a `DataLoader` and
//! scored with RMSLE in the scaled `(0, 1)` price units.
//!
//! Run with `RUST_LOG=info cargo run -p neuratrain-data --example price_regression`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use neuratrain_core::algorithms::{
    Algorithm, GradientDescent, LeakStepAdaptation, QuasiNewton, ShowEpoch,
};
use neuratrain_core::nn::errors::rmsle;
use neuratrain_core::{Connection, Layer, Network, NeuraTrainError, Tensor, TrainConfig};
use neuratrain_data::{train_test_split, DataLoader, SequentialSampler, TensorDataset};

const N_SAMPLES: usize = 506;
const N_FEATURES: usize = 13;

/// Features drawn in `[0, 1)` and a noisy nonlinear price in `(0, 1)`.
fn synthetic_prices(seed: u64) -> Result<(Tensor, Tensor), NeuraTrainError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let weights: Vec<f64> = (0..N_FEATURES).map(|_| rng.gen_range(-1.0..1.0)).collect();
    let mut features = Vec::with_capacity(N_SAMPLES * N_FEATURES);
    let mut prices = Vec::with_capacity(N_SAMPLES);
    for _ in 0..N_SAMPLES {
        let row: Vec<f64> = (0..N_FEATURES).map(|_| rng.gen_range(0.0..1.0)).collect();
        let linear: f64 = row.iter().zip(&weights).map(|(x, w)| x * w).sum();
        let curve = (2.0 * row[0]).sin() * row[5] + row[12] * row[12];
        let noise = rng.gen_range(-0.05..0.05);
        prices.push(1.0 / (1.0 + (-(linear + curve + noise)).exp()));
        features.extend(row);
    }
    Ok((
        Tensor::new(features, vec![N_SAMPLES, N_FEATURES])?,
        Tensor::new(prices, vec![N_SAMPLES, 1])?,
    ))
}

/// Predicts `input` in batches of 32 rows and scores it against `target`.
///
/// The score is in scaled `(0, 1)` price units, not original prices.
fn test_rmsle<A: Algorithm>(
    network: &Network<A>,
    input: &Tensor,
    target: &Tensor,
) -> Result<f64, NeuraTrainError> {
    let dataset = TensorDataset::new(vec![input.clone(), target.clone()])?;
    let loader = DataLoader::new(dataset, 32, SequentialSampler::new(), false)?;
    let mut predicted = Vec::new();
    let mut expected = Vec::new();
    for batch in loader.stacked() {
        let batch = batch?;
        predicted.extend(network.predict(&batch[0])?.to_vec());
        expected.extend(batch[1].to_vec());
    }
    let n = predicted.len();
    rmsle(&Tensor::new(predicted, vec![n, 1])?, &Tensor::new(expected, vec![n, 1])?)?.item()
}

fn main() -> Result<(), NeuraTrainError> {
    env_logger::init();

    let (input, target) = synthetic_prices(13)?;
    let split = train_test_split(&input, &target, 0.85, Some(7))?;
    println!(
        "train samples: {}, test samples: {}",
        split.input_train.shape()[0],
        split.input_test.shape()[0]
    );

    let connection = Connection::new(vec![
        Layer::sigmoid(N_FEATURES),
        Layer::sigmoid(50),
        Layer::sigmoid(10),
        Layer::output(1),
    ])?;
    let config = TrainConfig::new()
        .with_verbose(true)
        .with_show_epoch("100 times".parse::<ShowEpoch>()?)?
        .with_seed(Some(1));
    let mut qn = Network::new(connection, QuasiNewton::new(), config)?;
    qn.train(
        &split.input_train,
        &split.target_train,
        Some(&split.input_test),
        Some(&split.target_test),
        100,
    )?;
    println!(
        "{} RMSLE: {:.6}",
        qn.algorithm().name(),
        test_rmsle(&qn, &split.input_test, &split.target_test)?
    );

    let config = TrainConfig::new()
        .with_step(0.5)?
        .with_verbose(true)
        .with_show_epoch(ShowEpoch::Every(100))?
        .with_seed(Some(1));
    let mut gd = Network::new(
        Connection::from_sizes(&[N_FEATURES, 20, 1])?,
        GradientDescent::new(),
        config,
    )?
    .with_addon(LeakStepAdaptation::new())?;
    gd.train(&split.input_train, &split.target_train, None, None, 500)?;
    println!(
        "{} + LeakStepAdaptation RMSLE: {:.6} (final step {:.6})",
        gd.algorithm().name(),
        test_rmsle(&gd, &split.input_test, &split.target_test)?,
        gd.step()
    );
    Ok(())
}
