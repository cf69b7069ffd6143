//! Callbacks made by a context at notable points of a solve.
//!
//! Each callback is optional, boxed, and may mutate captured state.
//! Callbacks are the core-facing edge of the output surface: model found,
//! cost vector report, optimum found, and incoherence.

use crate::{context::GenericContext, structures::valuation::VValuation};

/// A callback on a (complete) valuation.
pub type CallbackOnValuation = dyn FnMut(&VValuation);

/// A callback on a cost vector.
pub type CallbackOnCosts = dyn FnMut(&[u64]);

/// A callback on incoherence.
pub type CallbackOnIncoherence = dyn FnMut();

/// The callbacks of a context.
#[derive(Default)]
pub struct Callbacks {
    /// Called when a model is found, with the model's valuation.
    pub on_model: Option<Box<CallbackOnValuation>>,

    /// Called when the cost vector of a model is computed.
    pub on_cost: Option<Box<CallbackOnCosts>>,

    /// Called when an optimum cost vector is established.
    pub on_optimum: Option<Box<CallbackOnCosts>>,

    /// Called when incoherence is established.
    pub on_incoherence: Option<Box<CallbackOnIncoherence>>,
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Sets the callback made when a model is found.
    pub fn set_callback_model(&mut self, callback: Box<CallbackOnValuation>) {
        self.callbacks.on_model = Some(callback);
    }

    /// Sets the callback made when the cost vector of a model is computed.
    pub fn set_callback_cost(&mut self, callback: Box<CallbackOnCosts>) {
        self.callbacks.on_cost = Some(callback);
    }

    /// Sets the callback made when an optimum cost vector is established.
    pub fn set_callback_optimum(&mut self, callback: Box<CallbackOnCosts>) {
        self.callbacks.on_optimum = Some(callback);
    }

    /// Sets the callback made when incoherence is established.
    pub fn set_callback_incoherence(&mut self, callback: Box<CallbackOnIncoherence>) {
        self.callbacks.on_incoherence = Some(callback);
    }

    /// Makes the model callback, if set.
    pub fn make_callback_model(&mut self) {
        if let Some(callback) = &mut self.callbacks.on_model {
            callback(self.atom_db.valuation());
        }
    }

    /// Makes the cost callback, if set.
    pub fn make_callback_cost(&mut self, costs: &[u64]) {
        if let Some(callback) = &mut self.callbacks.on_cost {
            callback(costs);
        }
    }

    /// Makes the optimum callback, if set.
    pub fn make_callback_optimum(&mut self, costs: &[u64]) {
        if let Some(callback) = &mut self.callbacks.on_optimum {
            callback(costs);
        }
    }

    /// Makes the incoherence callback, if set.
    pub fn make_callback_incoherence(&mut self) {
        if let Some(callback) = &mut self.callbacks.on_incoherence {
            callback();
        }
    }
}
