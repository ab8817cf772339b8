use std::collections::HashSet;

use super::*;
use crate::datasets::TensorDataset;
use crate::samplers::{RandomSampler, SequentialSampler};

fn dataset(n: usize) -> TensorDataset {
    let x: Vec<f64> = (0..n * 2).map(|v| v as f64).collect();
    let y: Vec<f64> = (0..n).map(|v| v as f64 * 10.0).collect();
    TensorDataset::new(vec![
        Tensor::new(x, vec![n, 2]).unwrap(),
        Tensor::new(y, vec![n, 1]).unwrap(),
    ])
    .unwrap()
}

#[test]
fn test_dataloader_sequential_batches() {
    let loader = DataLoader::new(dataset(5), 2, SequentialSampler::new(), false).unwrap();
    assert_eq!(loader.num_batches(), 3);
    let batches: Vec<Vec<Vec<Tensor>>> = loader.map(|b| b.unwrap()).collect();
    let sizes: Vec<usize> = batches.iter().map(|b| b.len()).collect();
    assert_eq!(sizes, vec![2, 2, 1]);
    assert_eq!(batches[2][0][0].to_vec(), vec![8.0, 9.0]);
}

#[test]
fn test_dataloader_drop_last() {
    let loader = DataLoader::new(dataset(5), 2, SequentialSampler::new(), true).unwrap();
    assert_eq!(loader.num_batches(), 2);
    assert_eq!(loader.count(), 2);
}

#[test]
fn test_dataloader_rejects_zero_batch_size() {
    assert!(DataLoader::new(dataset(3), 0, SequentialSampler::new(), false).is_err());
}

#[test]
fn test_dataloader_stacked() {
    let loader = DataLoader::new(dataset(3), 2, SequentialSampler::new(), false).unwrap();
    let batches: Vec<Vec<Tensor>> = loader.stacked().map(|b| b.unwrap()).collect();
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0][0].shape(), vec![2, 2]);
    assert_eq!(batches[0][0].to_vec(), vec![0.0, 1.0, 2.0, 3.0]);
    assert_eq!(batches[0][1].shape(), vec![2, 1]);
    assert_eq!(batches[1][1].to_vec(), vec![20.0]);
}

#[test]
fn test_dataloader_random_pass_covers_every_row_once() {
    let mut loader = DataLoader::new(dataset(7), 3, RandomSampler::seeded(5), false).unwrap();
    for _ in 0..2 {
        let mut seen = Vec::new();
        for batch in loader.by_ref() {
            for sample in batch.unwrap() {
                seen.push(sample[1].item().unwrap() as usize / 10);
            }
        }
        assert_eq!(seen.len(), 7);
        assert_eq!(
            seen.into_iter().collect::<HashSet<usize>>(),
            (0..7).collect::<HashSet<usize>>()
        );
        loader.reset();
    }
}

#[test]
fn test_stack_samples_shape_errors() {
    let a = vec![Tensor::new(vec![1.0, 2.0], vec![2]).unwrap()];
    let b = vec![Tensor::new(vec![1.0], vec![1]).unwrap()];
    assert!(matches!(
        stack_samples(vec![a.clone(), b]),
        Err(NeuraTrainError::ShapeMismatch { .. })
    ));
    assert!(stack_samples(vec![a, vec![]]).is_err());
    assert!(stack_samples(Vec::new()).unwrap().is_empty());
}
