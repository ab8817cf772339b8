// src/tensor/broadcast_utils.rs

use crate::error::NeuraTrainError;

/// Computes the broadcast shape of two shapes following NumPy rules:
/// shapes are right-aligned and each pair of dimensions must be equal or one of them 1.
pub fn broadcast_shapes(shape1: &[usize], shape2: &[usize]) -> Result<Vec<usize>, NeuraTrainError> {
    let rank = shape1.len().max(shape2.len());
    let mut out = Vec::with_capacity(rank);
    for i in 0..rank {
        let d1 = dim_aligned(shape1, rank, i);
        let d2 = dim_aligned(shape2, rank, i);
        let d = if d1 == d2 {
            d1
        } else if d1 == 1 {
            d2
        } else if d2 == 1 {
            d1
        } else {
            return Err(NeuraTrainError::BroadcastError {
                shape1: shape1.to_vec(),
                shape2: shape2.to_vec(),
            });
        };
        out.push(d);
    }
    Ok(out)
}

fn dim_aligned(shape: &[usize], rank: usize, i: usize) -> usize {
    let offset = rank - shape.len();
    if i < offset {
        1
    } else {
        shape[i - offset]
    }
}

/// For every flat index of `out_shape`, the flat index of the element of a
/// tensor of shape `in_shape` that broadcasting maps onto it.
///
/// `in_shape` must be broadcast-compatible with `out_shape`.
pub(crate) fn broadcast_index_map(out_shape: &[usize], in_shape: &[usize]) -> Vec<usize> {
    let numel: usize = out_shape.iter().product();
    if in_shape == out_shape {
        return (0..numel).collect();
    }
    let offset = out_shape.len() - in_shape.len();
    (0..numel)
        .map(|flat| {
            let mut rem = flat;
            let mut index = 0;
            let mut stride = 1;
            for d in (0..out_shape.len()).rev() {
                let coord = rem % out_shape[d];
                rem /= out_shape[d];
                if d >= offset {
                    let in_dim = in_shape[d - offset];
                    if in_dim != 1 {
                        index += coord * stride;
                    }
                    stride *= in_dim;
                }
            }
            index
        })
        .collect()
}

/// Sums a gradient of shape `out_shape` back onto the broadcast input shape `in_shape`.
pub(crate) fn reduce_to_shape(grad: &[f64], out_shape: &[usize], in_shape: &[usize]) -> Vec<f64> {
    if in_shape == out_shape {
        return grad.to_vec();
    }
    let in_numel: usize = in_shape.iter().product();
    let mut reduced = vec![0.0; in_numel];
    for (g, target) in grad.iter().zip(broadcast_index_map(out_shape, in_shape)) {
        reduced[target] += g;
    }
    reduced
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_shapes_bias_row() {
        assert_eq!(broadcast_shapes(&[4, 3], &[3]).unwrap(), vec![4, 3]);
        assert_eq!(broadcast_shapes(&[], &[2, 2]).unwrap(), vec![2, 2]);
        assert_eq!(broadcast_shapes(&[4, 1], &[1, 5]).unwrap(), vec![4, 5]);
    }

    #[test]
    fn test_broadcast_shapes_incompatible() {
        assert!(matches!(
            broadcast_shapes(&[4, 3], &[2]),
            Err(NeuraTrainError::BroadcastError { .. })
        ));
    }

    #[test]
    fn test_index_map_for_bias() {
        assert_eq!(broadcast_index_map(&[2, 3], &[3]), vec![0, 1, 2, 0, 1, 2]);
        assert_eq!(broadcast_index_map(&[2, 2], &[]), vec![0, 0, 0, 0]);
        assert_eq!(broadcast_index_map(&[2, 3], &[2, 1]), vec![0, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn test_reduce_to_shape_sums_broadcast_axes() {
        let grad = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert_eq!(reduce_to_shape(&grad, &[2, 3], &[3]), vec![5.0, 7.0, 9.0]);
        assert_eq!(reduce_to_shape(&grad, &[2, 3], &[]), vec![21.0]);
        assert_eq!(reduce_to_shape(&grad, &[2, 3], &[2, 3]), grad);
    }
}
