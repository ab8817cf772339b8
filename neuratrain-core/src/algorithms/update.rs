use crate::error::NeuraTrainError;
use crate::tensor::Tensor;

/// Pairs of `(variable, new value)` assembled for one training update.
///
/// New values are plain `Vec<f64>` computed from the current state, so
/// applying the list is simultaneous by construction: no entry can observe
/// another entry's new value.
#[derive(Debug, Default)]
pub struct UpdateList {
    updates: Vec<(Tensor, Vec<f64>)>,
}

impl UpdateList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    /// Returns true if `variable` already has a pending update.
    pub fn contains(&self, variable: &Tensor) -> bool {
        self.updates.iter().any(|(v, _)| v.ptr_eq(variable))
    }

    /// Pending value for `variable`, if any.
    pub fn get(&self, variable: &Tensor) -> Option<&[f64]> {
        self.updates
            .iter()
            .find(|(v, _)| v.ptr_eq(variable))
            .map(|(_, value)| value.as_slice())
    }

    /// Adds an update.
    ///
    /// # Errors
    /// * `ShapeMismatch` if `value` does not have the variable's length.
    /// * `ConfigurationError` if the variable is already updated by this list.
    pub fn push(&mut self, variable: &Tensor, value: Vec<f64>) -> Result<(), NeuraTrainError> {
        let numel = variable.numel();
        if value.len() != numel {
            return Err(NeuraTrainError::ShapeMismatch {
                expected: variable.shape(),
                actual: vec![value.len()],
                operation: "UpdateList::push".to_string(),
            });
        }
        if self.contains(variable) {
            return Err(NeuraTrainError::ConfigurationError(
                "a variable can only be updated once per update list".to_string(),
            ));
        }
        self.updates.push((variable.clone(), value));
        Ok(())
    }

    /// Splits a flat vector over `targets` (in order) and pushes one update each.
    pub fn push_flat(&mut self, targets: &[Tensor], flat: &[f64]) -> Result<(), NeuraTrainError> {
        let total: usize = targets.iter().map(|t| t.numel()).sum();
        if flat.len() != total {
            return Err(NeuraTrainError::ShapeMismatch {
                expected: vec![total],
                actual: vec![flat.len()],
                operation: "UpdateList::push_flat".to_string(),
            });
        }
        let mut offset = 0;
        for target in targets {
            let n = target.numel();
            self.push(target, flat[offset..offset + n].to_vec())?;
            offset += n;
        }
        Ok(())
    }

    /// Appends every entry of `other`, failing on a variable updated twice.
    pub fn extend(&mut self, other: UpdateList) -> Result<(), NeuraTrainError> {
        for (variable, value) in other.updates {
            self.push(&variable, value)?;
        }
        Ok(())
    }

    /// Appends `other`, letting its entries replace pending ones for the same variable.
    pub fn merge_override(&mut self, other: UpdateList) {
        for (variable, value) in other.updates {
            match self.updates.iter_mut().find(|(v, _)| v.ptr_eq(&variable)) {
                Some(slot) => slot.1 = value,
                None => self.updates.push((variable, value)),
            }
        }
    }

    /// Writes every new value into its variable.
    pub fn apply(self) -> Result<(), NeuraTrainError> {
        for (variable, value) in self.updates {
            variable.set_data(value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_updates_are_simultaneous() -> Result<(), NeuraTrainError> {
        // Swap two variables: each new value is read from the old state.
        let a = Tensor::new(vec![1.0], vec![1])?;
        let b = Tensor::new(vec![2.0], vec![1])?;
        let mut updates = UpdateList::new();
        updates.push(&a, b.to_vec())?;
        updates.push(&b, a.to_vec())?;
        updates.apply()?;
        assert_eq!(a.to_vec(), vec![2.0]);
        assert_eq!(b.to_vec(), vec![1.0]);
        Ok(())
    }

    #[test]
    fn test_duplicate_and_length_checks() -> Result<(), NeuraTrainError> {
        let a = Tensor::new(vec![1.0, 2.0], vec![2])?;
        let mut updates = UpdateList::new();
        assert!(matches!(
            updates.push(&a, vec![1.0]),
            Err(NeuraTrainError::ShapeMismatch { .. })
        ));
        updates.push(&a, vec![0.0, 0.0])?;
        assert!(matches!(
            updates.push(&a.clone(), vec![3.0, 3.0]),
            Err(NeuraTrainError::ConfigurationError(_))
        ));
        assert_eq!(updates.len(), 1);
        Ok(())
    }

    #[test]
    fn test_push_flat_and_merge_override() -> Result<(), NeuraTrainError> {
        let w = Tensor::new(vec![0.0; 4], vec![2, 2])?;
        let b = Tensor::new(vec![0.0; 2], vec![2])?;
        let mut updates = UpdateList::new();
        updates.push_flat(&[w.clone(), b.clone()], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])?;
        assert_eq!(updates.get(&b), Some(&[5.0, 6.0][..]));

        let mut later = UpdateList::new();
        later.push(&b, vec![7.0, 8.0])?;
        updates.merge_override(later);
        assert_eq!(updates.len(), 2);
        updates.apply()?;
        assert_eq!(w.to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(b.to_vec(), vec![7.0, 8.0]);
        Ok(())
    }
}
