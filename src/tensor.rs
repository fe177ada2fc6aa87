//! Trainable tensor with a gradient slot

use crate::optim::Constraint;
use ndarray::Array1;
use std::cell::RefCell;
use std::rc::Rc;

/// Trainable parameter tensor
///
/// Holds the parameter values, the most recent gradient, and an optional
/// projection that optimizers apply after each update.
#[derive(Clone)]
pub struct Tensor {
    data: Array1<f32>,
    grad: Rc<RefCell<Option<Array1<f32>>>>,
    constraint: Option<Rc<dyn Constraint>>,
    requires_grad: bool,
}

impl Tensor {
    /// Create a new tensor with data
    pub fn new(data: Array1<f32>, requires_grad: bool) -> Self {
        Self {
            data,
            grad: Rc::new(RefCell::new(None)),
            constraint: None,
            requires_grad,
        }
    }

    /// Create a tensor from a vector
    pub fn from_vec(data: Vec<f32>, requires_grad: bool) -> Self {
        Self::new(Array1::from(data), requires_grad)
    }

    /// Create a tensor filled with zeros
    pub fn zeros(size: usize, requires_grad: bool) -> Self {
        Self::new(Array1::zeros(size), requires_grad)
    }

    /// Create a tensor filled with ones
    pub fn ones(size: usize, requires_grad: bool) -> Self {
        Self::new(Array1::ones(size), requires_grad)
    }

    /// Attach a constraint that is applied after every optimizer update
    pub fn with_constraint<C: Constraint + 'static>(mut self, constraint: C) -> Self {
        self.constraint = Some(Rc::new(constraint));
        self
    }

    /// Get reference to data
    pub fn data(&self) -> &Array1<f32> {
        &self.data
    }

    /// Get mutable reference to data
    pub fn data_mut(&mut self) -> &mut Array1<f32> {
        &mut self.data
    }

    /// Get gradient (if set)
    pub fn grad(&self) -> Option<Array1<f32>> {
        self.grad.borrow().clone()
    }

    /// Set gradient
    pub fn set_grad(&self, grad: Array1<f32>) {
        *self.grad.borrow_mut() = Some(grad);
    }

    /// Accumulate gradient (for when tensor is used multiple times)
    pub fn accumulate_grad(&self, grad: Array1<f32>) {
        let mut grad_ref = self.grad.borrow_mut();
        if let Some(existing) = grad_ref.as_mut() {
            *existing = &*existing + &grad;
        } else {
            *grad_ref = Some(grad);
        }
    }

    /// Zero out gradient
    pub fn zero_grad(&self) {
        *self.grad.borrow_mut() = None;
    }

    /// Check if requires gradient
    pub fn requires_grad(&self) -> bool {
        self.requires_grad
    }

    /// Project the data onto the attached constraint, if any
    pub fn apply_constraint(&mut self) {
        if let Some(constraint) = &self.constraint {
            constraint.apply(&mut self.data);
        }
    }

    /// Get the attached constraint
    pub fn constraint(&self) -> Option<&dyn Constraint> {
        self.constraint.as_deref()
    }

    /// Get size
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl std::fmt::Debug for Tensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tensor")
            .field("data", &self.data)
            .field("grad", &self.grad.borrow())
            .field("constraint", &self.constraint.as_ref().map(|c| c.name()))
            .field("requires_grad", &self.requires_grad)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optim::NonNeg;

    #[test]
    fn test_accumulate_grad_sums() {
        let t = Tensor::from_vec(vec![1.0, 2.0], true);
        t.accumulate_grad(ndarray::arr1(&[1.0, 1.0]));
        t.accumulate_grad(ndarray::arr1(&[0.5, -2.0]));

        let grad = t.grad().unwrap();
        assert_eq!(grad.to_vec(), vec![1.5, -1.0]);
    }

    #[test]
    fn test_clone_shares_gradient_slot() {
        let t = Tensor::zeros(2, true);
        let alias = t.clone();
        t.set_grad(ndarray::arr1(&[3.0, 4.0]));

        assert_eq!(alias.grad().unwrap().to_vec(), vec![3.0, 4.0]);
        alias.zero_grad();
        assert!(t.grad().is_none());
    }

    #[test]
    fn test_apply_constraint_without_constraint_is_noop() {
        let mut t = Tensor::from_vec(vec![-1.0, 2.0], true);
        t.apply_constraint();
        assert_eq!(t.data().to_vec(), vec![-1.0, 2.0]);
    }

    #[test]
    fn test_apply_constraint_projects() {
        let mut t = Tensor::from_vec(vec![-1.0, 2.0], true).with_constraint(NonNeg);
        t.apply_constraint();
        assert_eq!(t.data().to_vec(), vec![0.0, 2.0]);
        assert_eq!(t.constraint().map(|c| c.name()), Some("non_neg"));
    }
}
