use std::fmt;
use std::str::FromStr;

use crate::error::NeuraTrainError;

/// Rule for refining the inverse Hessian estimate `H` from a parameter step
/// `s` and the matching gradient change `y`.
///
/// Matrices are dense row-major `n x n` buffers. When a rule's denominator is
/// zero (or, for SR1, too small) `H` is returned unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateFunction {
    #[default]
    Bfgs,
    Dfp,
    Psb,
    Sr1,
}

const SR1_EPSILON: f64 = 1e-8;

impl UpdateFunction {
    pub fn update(&self, h: &[f64], s: &[f64], y: &[f64]) -> Vec<f64> {
        match self {
            UpdateFunction::Bfgs => bfgs(h, s, y),
            UpdateFunction::Dfp => dfp(h, s, y),
            UpdateFunction::Psb => psb(h, s, y),
            UpdateFunction::Sr1 => sr1(h, s, y),
        }
    }
}

impl fmt::Display for UpdateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UpdateFunction::Bfgs => "bfgs",
            UpdateFunction::Dfp => "dfp",
            UpdateFunction::Psb => "psb",
            UpdateFunction::Sr1 => "sr1",
        };
        f.write_str(name)
    }
}

impl FromStr for UpdateFunction {
    type Err = NeuraTrainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bfgs" => Ok(UpdateFunction::Bfgs),
            "dfp" => Ok(UpdateFunction::Dfp),
            "psb" => Ok(UpdateFunction::Psb),
            "sr1" => Ok(UpdateFunction::Sr1),
            _ => Err(NeuraTrainError::InvalidProperty {
                name: "update_function".to_string(),
                value: s.to_string(),
                reason: "expected one of bfgs, dfp, psb, sr1".to_string(),
            }),
        }
    }
}

pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

pub(crate) fn norm(a: &[f64]) -> f64 {
    dot(a, a).sqrt()
}

/// `H v` for a row-major square `H`.
pub(crate) fn mat_vec(h: &[f64], v: &[f64]) -> Vec<f64> {
    let n = v.len();
    h.chunks(n).map(|row| dot(row, v)).collect()
}

/// `vᵀ H`.
fn vec_mat(v: &[f64], h: &[f64]) -> Vec<f64> {
    let n = v.len();
    let mut out = vec![0.0; n];
    for (i, row) in h.chunks(n).enumerate() {
        for (o, x) in out.iter_mut().zip(row) {
            *o += v[i] * x;
        }
    }
    out
}

/// `H + Σ coef · a bᵀ` over the given terms.
fn add_outer(h: &[f64], terms: &[(f64, &[f64], &[f64])]) -> Vec<f64> {
    let n = terms.first().map_or(0, |t| t.1.len());
    let mut out = h.to_vec();
    for &(coef, a, b) in terms {
        for i in 0..n {
            let scaled = coef * a[i];
            for j in 0..n {
                out[i * n + j] += scaled * b[j];
            }
        }
    }
    out
}

/// Broyden–Fletcher–Goldfarb–Shanno, expanded so `H` need not be symmetric:
/// `H - ρ s (yᵀH) - ρ (Hy) sᵀ + (ρ² yᵀHy + ρ) s sᵀ` with `ρ = 1 / yᵀs`.
fn bfgs(h: &[f64], s: &[f64], y: &[f64]) -> Vec<f64> {
    let ys = dot(y, s);
    if ys == 0.0 {
        return h.to_vec();
    }
    let rho = 1.0 / ys;
    let hy = mat_vec(h, y);
    let yh = vec_mat(y, h);
    let yhy = dot(y, &hy);
    add_outer(
        h,
        &[
            (-rho, s, yh.as_slice()),
            (-rho, hy.as_slice(), s),
            (rho * rho * yhy + rho, s, s),
        ],
    )
}

/// Davidon–Fletcher–Powell: `H - (Hy)(yᵀH) / yᵀHy + s sᵀ / yᵀs`.
fn dfp(h: &[f64], s: &[f64], y: &[f64]) -> Vec<f64> {
    let ys = dot(y, s);
    let hy = mat_vec(h, y);
    let yh = vec_mat(y, h);
    let yhy = dot(y, &hy);
    if ys == 0.0 || yhy == 0.0 {
        return h.to_vec();
    }
    add_outer(
        h,
        &[(-1.0 / yhy, hy.as_slice(), yh.as_slice()), (1.0 / ys, s, s)],
    )
}

/// Powell-symmetric-Broyden with `u = s - Hy`:
/// `H + (u yᵀ + y uᵀ) / yᵀy - (uᵀy) y yᵀ / (yᵀy)²`.
fn psb(h: &[f64], s: &[f64], y: &[f64]) -> Vec<f64> {
    let yy = dot(y, y);
    if yy == 0.0 {
        return h.to_vec();
    }
    let hy = mat_vec(h, y);
    let u: Vec<f64> = s.iter().zip(&hy).map(|(a, b)| a - b).collect();
    let uy = dot(&u, y);
    add_outer(
        h,
        &[
            (1.0 / yy, u.as_slice(), y),
            (1.0 / yy, y, u.as_slice()),
            (-uy / (yy * yy), y, y),
        ],
    )
}

/// Symmetric rank one with `u = s - Hy`: `H + u uᵀ / uᵀy`, skipped when
/// `|uᵀy| < ε ||u|| ||y||`.
fn sr1(h: &[f64], s: &[f64], y: &[f64]) -> Vec<f64> {
    let hy = mat_vec(h, y);
    let u: Vec<f64> = s.iter().zip(&hy).map(|(a, b)| a - b).collect();
    let denominator = dot(&u, y);
    if denominator.abs() < SR1_EPSILON * norm(&u) * norm(y) || denominator == 0.0 {
        return h.to_vec();
    }
    add_outer(h, &[(1.0 / denominator, u.as_slice(), u.as_slice())])
}

#[cfg(test)]
#[path = "update_functions_test.rs"]
mod tests;
