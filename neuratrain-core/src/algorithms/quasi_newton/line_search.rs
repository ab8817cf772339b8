use crate::error::NeuraTrainError;

/// Bounds and stopping rules for [`golden_section_search`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSearchConfig {
    pub minstep: f64,
    pub maxstep: f64,
    pub tol: f64,
    pub maxiter: usize,
}

impl Default for LineSearchConfig {
    fn default() -> Self {
        LineSearchConfig {
            minstep: 1e-5,
            maxstep: 50.0,
            tol: 1e-5,
            maxiter: 1024,
        }
    }
}

/// Minimizes a unimodal `f` on `[minstep, maxstep]` by golden-section search.
///
/// Non-finite function values count as `+inf` and ties keep the shorter half,
/// so the search moves away from steps where the error blows up. Returns the
/// midpoint of the final interval.
pub fn golden_section_search<F>(f: F, config: &LineSearchConfig) -> Result<f64, NeuraTrainError>
where
    F: Fn(f64) -> Result<f64, NeuraTrainError>,
{
    let bounds_ok = config.minstep.is_finite()
        && config.maxstep.is_finite()
        && config.minstep <= config.maxstep;
    if !bounds_ok || config.tol <= 0.0 {
        return Err(NeuraTrainError::ConfigurationError(format!(
            "invalid line search bounds: minstep {}, maxstep {}, tol {}",
            config.minstep, config.maxstep, config.tol
        )));
    }
    let eval = |t: f64| -> Result<f64, NeuraTrainError> {
        let value = f(t)?;
        Ok(if value.is_finite() { value } else { f64::INFINITY })
    };
    let golden_ratio = (5f64.sqrt() - 1.0) / 2.0;

    let mut a = config.minstep;
    let mut b = config.maxstep;
    let mut c = b - golden_ratio * (b - a);
    let mut d = a + golden_ratio * (b - a);
    let mut fc = eval(c)?;
    let mut fd = eval(d)?;

    let mut iteration = 0;
    while (c - d).abs() > config.tol && iteration < config.maxiter {
        if fc <= fd {
            b = d;
            d = c;
            fd = fc;
            c = b - golden_ratio * (b - a);
            fc = eval(c)?;
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + golden_ratio * (b - a);
            fd = eval(d)?;
        }
        iteration += 1;
    }
    Ok((a + b) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_finds_quadratic_minimum() -> Result<(), NeuraTrainError> {
        let t = golden_section_search(|t| Ok((t - 3.2).powi(2)), &LineSearchConfig::default())?;
        assert_relative_eq!(t, 3.2, epsilon = 1e-4);
        Ok(())
    }

    #[test]
    fn test_minimum_outside_interval_clamps_to_bound() -> Result<(), NeuraTrainError> {
        let config = LineSearchConfig::default();
        let t = golden_section_search(|t| Ok(t), &config)?;
        assert_relative_eq!(t, config.minstep, epsilon = 1e-4);
        let t = golden_section_search(|t| Ok(-t), &config)?;
        assert_relative_eq!(t, config.maxstep, epsilon = 1e-4);
        Ok(())
    }

    #[test]
    fn test_non_finite_values_are_avoided() -> Result<(), NeuraTrainError> {
        let t = golden_section_search(
            |t| Ok(if t > 10.0 { f64::NAN } else { (t - 9.0).powi(2) }),
            &LineSearchConfig::default(),
        )?;
        assert_relative_eq!(t, 9.0, epsilon = 1e-4);
        Ok(())
    }

    #[test]
    fn test_errors_propagate_and_bounds_checked() {
        let failing = golden_section_search(
            |_| Err(NeuraTrainError::InternalError("boom".to_string())),
            &LineSearchConfig::default(),
        );
        assert!(failing.is_err());
        let inverted = LineSearchConfig {
            minstep: 2.0,
            maxstep: 1.0,
            ..LineSearchConfig::default()
        };
        assert!(golden_section_search(|t| Ok(t), &inverted).is_err());
    }
}
