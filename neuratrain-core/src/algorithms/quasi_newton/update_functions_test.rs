use super::*;
use crate::utils::testing::check_vec_near;

const ALL: [UpdateFunction; 4] = [
    UpdateFunction::Bfgs,
    UpdateFunction::Dfp,
    UpdateFunction::Psb,
    UpdateFunction::Sr1,
];

fn identity(n: usize) -> Vec<f64> {
    let mut h = vec![0.0; n * n];
    for i in 0..n {
        h[i * n + i] = 1.0;
    }
    h
}

fn transpose(h: &[f64], n: usize) -> Vec<f64> {
    let mut t = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            t[j * n + i] = h[i * n + j];
        }
    }
    t
}

#[test]
fn test_secant_condition_holds() {
    let h = identity(3);
    let s = [0.5, -0.2, 0.1];
    let y = [1.0, 0.3, -0.4];
    for function in ALL {
        let updated = function.update(&h, &s, &y);
        check_vec_near(&mat_vec(&updated, &y), &s, 1e-10);
    }
}

#[test]
fn test_updates_keep_symmetry() {
    let h = vec![2.0, 0.5, 0.5, 1.0];
    let s = [0.3, 0.7];
    let y = [0.9, 1.1];
    for function in ALL {
        let updated = function.update(&h, &s, &y);
        check_vec_near(&updated, &transpose(&updated, 2), 1e-12);
    }
}

#[test]
fn test_bfgs_matches_textbook_form() {
    // For symmetric H the expanded form equals (I - ρ s yᵀ) H (I - ρ y sᵀ) + ρ s sᵀ.
    let h = vec![2.0, 0.5, 0.5, 1.0];
    let s = [0.3, 0.7];
    let y = [0.9, 1.1];
    let rho = 1.0 / dot(&y, &s);
    let mut left = identity(2);
    let mut right = identity(2);
    for i in 0..2 {
        for j in 0..2 {
            left[i * 2 + j] -= rho * s[i] * y[j];
            right[i * 2 + j] -= rho * y[i] * s[j];
        }
    }
    let mul = |a: &[f64], b: &[f64]| -> Vec<f64> {
        let mut out = vec![0.0; 4];
        for i in 0..2 {
            for j in 0..2 {
                out[i * 2 + j] = (0..2).map(|k| a[i * 2 + k] * b[k * 2 + j]).sum();
            }
        }
        out
    };
    let mut expected = mul(&mul(&left, &h), &right);
    for i in 0..2 {
        for j in 0..2 {
            expected[i * 2 + j] += rho * s[i] * s[j];
        }
    }
    check_vec_near(&UpdateFunction::Bfgs.update(&h, &s, &y), &expected, 1e-12);
}

#[test]
fn test_zero_denominators_leave_h_unchanged() {
    let h = identity(2);
    let zero = [0.0, 0.0];
    for function in ALL {
        assert_eq!(function.update(&h, &[1.0, 0.0], &zero), h, "{}", function);
    }
    // yᵀs = 0 for BFGS and DFP
    assert_eq!(UpdateFunction::Bfgs.update(&h, &[1.0, 0.0], &[0.0, 1.0]), h);
    assert_eq!(UpdateFunction::Dfp.update(&h, &[1.0, 0.0], &[0.0, 1.0]), h);
    // s = Hy makes u = 0 for SR1
    assert_eq!(UpdateFunction::Sr1.update(&h, &[0.4, 0.2], &[0.4, 0.2]), h);
}

#[test]
fn test_parse_update_function() -> Result<(), NeuraTrainError> {
    assert_eq!("BFGS".parse::<UpdateFunction>()?, UpdateFunction::Bfgs);
    assert_eq!("sr1".parse::<UpdateFunction>()?, UpdateFunction::Sr1);
    assert!("lbfgs".parse::<UpdateFunction>().is_err());
    assert_eq!(UpdateFunction::Psb.to_string(), "psb");
    Ok(())
}
