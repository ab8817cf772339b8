use crate::algorithms::algorithm_trait::{Algorithm, UpdateContext};
use crate::algorithms::quasi_newton::line_search::{golden_section_search, LineSearchConfig};
use crate::algorithms::quasi_newton::update_functions::{dot, mat_vec, UpdateFunction};
use crate::algorithms::update::UpdateList;
use crate::algorithms::variables::TrainingVariables;
use crate::error::NeuraTrainError;
use crate::nn::{Connection, Module};
use crate::properties::validate_bounded;
use crate::tensor::{self, Tensor};

const INV_HESSIAN: &str = "inv_hessian";
const PREV_PARAMS: &str = "prev_params";
const PREV_FULL_GRADIENT: &str = "prev_full_gradient";
const N_UPDATES: &str = "n_updates";

/// Quasi-Newton optimization over the flattened parameter vector.
///
/// Keeps a dense `n x n` inverse Hessian estimate `H`, starting at
/// `h0_scale * I`. Each update moves along `d = -H g` by the step found with a
/// golden-section line search, then refines `H` on the next update from the
/// observed parameter and gradient changes. If `d` is not a descent direction
/// `H` is reset first.
#[derive(Debug, Clone, PartialEq)]
pub struct QuasiNewton {
    update_function: UpdateFunction,
    h0_scale: f64,
    gradient_tol: f64,
    line_search: LineSearchConfig,
}

impl Default for QuasiNewton {
    fn default() -> Self {
        QuasiNewton {
            update_function: UpdateFunction::Bfgs,
            h0_scale: 1.0,
            gradient_tol: 1e-5,
            line_search: LineSearchConfig::default(),
        }
    }
}

impl QuasiNewton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_update_function(mut self, update_function: UpdateFunction) -> Self {
        self.update_function = update_function;
        self
    }

    /// Scale of the initial inverse Hessian, `> 0`.
    pub fn with_h0_scale(mut self, h0_scale: f64) -> Result<Self, NeuraTrainError> {
        let h0_scale = validate_bounded("h0_scale", h0_scale, Some(0.0), None)?;
        if h0_scale == 0.0 {
            return Err(NeuraTrainError::InvalidProperty {
                name: "h0_scale".to_string(),
                value: h0_scale.to_string(),
                reason: "must be > 0".to_string(),
            });
        }
        self.h0_scale = h0_scale;
        Ok(self)
    }

    /// Training stops once the gradient norm falls below this value.
    pub fn with_gradient_tol(mut self, gradient_tol: f64) -> Result<Self, NeuraTrainError> {
        self.gradient_tol = validate_bounded("gradient_tol", gradient_tol, Some(0.0), None)?;
        Ok(self)
    }

    pub fn with_line_search(mut self, line_search: LineSearchConfig) -> Self {
        self.line_search = line_search;
        self
    }

    pub fn update_function(&self) -> UpdateFunction {
        self.update_function
    }

    pub fn h0_scale(&self) -> f64 {
        self.h0_scale
    }

    pub fn gradient_tol(&self) -> f64 {
        self.gradient_tol
    }

    fn scaled_identity(&self, n: usize) -> Vec<f64> {
        let mut h = vec![0.0; n * n];
        for i in 0..n {
            h[i * n + i] = self.h0_scale;
        }
        h
    }
}

impl Algorithm for QuasiNewton {
    fn name(&self) -> &'static str {
        "QuasiNewton"
    }

    fn init_variables(
        &self,
        connection: &Connection,
        vars: &mut TrainingVariables,
    ) -> Result<(), NeuraTrainError> {
        let n = connection.count_parameters();
        vars.insert(INV_HESSIAN, Tensor::new(self.scaled_identity(n), vec![n, n])?);
        vars.insert(PREV_PARAMS, tensor::zeros(&[n])?);
        vars.insert(PREV_FULL_GRADIENT, tensor::zeros(&[n])?);
        vars.insert(N_UPDATES, Tensor::scalar(0.0));
        Ok(())
    }

    fn train_updates(
        &self,
        ctx: &UpdateContext<'_>,
        vars: &TrainingVariables,
    ) -> Result<UpdateList, NeuraTrainError> {
        let inv_hessian = vars.require(INV_HESSIAN)?;
        let prev_params = vars.require(PREV_PARAMS)?;
        let prev_gradient = vars.require(PREV_FULL_GRADIENT)?;
        let n_updates = vars.require(N_UPDATES)?;

        let params = ctx.flat_parameters();
        let gradient = ctx.full_gradient;
        let n = params.len();

        let mut h = inv_hessian.to_vec();
        if n_updates.item()? > 0.0 {
            let s: Vec<f64> = params
                .iter()
                .zip(prev_params.to_vec())
                .map(|(p, prev)| p - prev)
                .collect();
            let y: Vec<f64> = gradient
                .iter()
                .zip(prev_gradient.to_vec())
                .map(|(g, prev)| g - prev)
                .collect();
            h = self.update_function.update(&h, &s, &y);
        }

        let mut direction: Vec<f64> = mat_vec(&h, gradient).iter().map(|v| -v).collect();
        let has_gradient = gradient.iter().any(|g| *g != 0.0);
        let not_descent = has_gradient && dot(&direction, gradient) >= 0.0;
        if not_descent || direction.iter().any(|v| !v.is_finite()) {
            log::debug!("Quasi-Newton direction is not a descent direction, resetting the inverse Hessian");
            h = self.scaled_identity(n);
            direction = gradient.iter().map(|g| -self.h0_scale * g).collect();
        }

        let moved = |t: f64| -> Vec<f64> {
            params
                .iter()
                .zip(&direction)
                .map(|(p, d)| p + t * d)
                .collect()
        };
        let step = golden_section_search(|t| ctx.error_at(&moved(t)), &self.line_search)?;
        let new_params = moved(step);

        let mut updates = UpdateList::new();
        updates.push_flat(ctx.parameters, &new_params)?;
        updates.push(inv_hessian, h)?;
        updates.push(prev_params, params)?;
        updates.push(prev_gradient, gradient.to_vec())?;
        updates.push(n_updates, vec![n_updates.item()? + 1.0])?;
        Ok(updates)
    }

    fn has_converged(&self, ctx: &UpdateContext<'_>, _vars: &TrainingVariables) -> bool {
        ctx.gradient_norm() < self.gradient_tol
    }
}

#[cfg(test)]
#[path = "quasi_newton_test.rs"]
mod tests;
