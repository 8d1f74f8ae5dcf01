//! Per-node resolution results.
//!
//! The `BindingContext` is filled by overload resolution and read by
//! lowering. Lowering never runs before resolution, so the `_with_assert`
//! queries treat a missing or failed entry as an internal compiler error.

use rustc_hash::FxHashMap;
use tern_ir::ExprId;

use crate::{CallableDescriptor, ResolvedCall};

/// Outcome of resolving one call site.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CallResolution {
    Resolved(ResolvedCall),
    /// Resolution failed; no overload was selected.
    Failed { candidates: Vec<CallableDescriptor> },
}

/// Resolution results keyed by call-site expression.
#[derive(Clone, Debug, Default)]
pub struct BindingContext {
    calls: FxHashMap<ExprId, CallResolution>,
}

impl BindingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful resolution for `call.call_site()`.
    ///
    /// # Panics
    /// Panics if the call site was already recorded.
    pub fn record_call(&mut self, call: ResolvedCall) {
        let site = call.call_site();
        self.record(site, CallResolution::Resolved(call));
    }

    /// Record a failed resolution.
    ///
    /// # Panics
    /// Panics if the call site was already recorded.
    pub fn record_failure(&mut self, site: ExprId, candidates: Vec<CallableDescriptor>) {
        self.record(site, CallResolution::Failed { candidates });
    }

    fn record(&mut self, site: ExprId, resolution: CallResolution) {
        if self.calls.insert(site, resolution).is_some() {
            panic!("internal compiler error: call site {site:?} resolved twice");
        }
    }

    /// The raw resolution outcome, if any was recorded.
    pub fn resolution(&self, site: ExprId) -> Option<&CallResolution> {
        self.calls.get(&site)
    }

    /// The resolved call for `site`, or `None` if it was not resolved
    /// successfully (or is not call-shaped).
    pub fn resolved_call(&self, site: ExprId) -> Option<&ResolvedCall> {
        match self.calls.get(&site)? {
            CallResolution::Resolved(call) => Some(call),
            CallResolution::Failed { .. } => None,
        }
    }

    /// The resolved call for `site`.
    ///
    /// # Panics
    /// Panics if no successful resolution was recorded for `site`.
    pub fn resolved_call_with_assert(&self, site: ExprId) -> &ResolvedCall {
        match self.calls.get(&site) {
            Some(CallResolution::Resolved(call)) => call,
            Some(CallResolution::Failed { candidates }) => panic!(
                "internal compiler error: call {site:?} has no descriptor ({} candidates)",
                candidates.len()
            ),
            None => panic!("internal compiler error: call {site:?} was never resolved"),
        }
    }

    /// The resolved call for `site`, which must have resolved to a function.
    ///
    /// # Panics
    /// Panics if `site` is unresolved or resolved to a non-function callable.
    pub fn function_resolved_call_with_assert(&self, site: ExprId) -> &ResolvedCall {
        let call = self.resolved_call_with_assert(site);
        if call.resulting_descriptor().as_function().is_none() {
            panic!(
                "internal compiler error: call {site:?} resolved to `{}`, expected a function",
                call.resulting_descriptor()
            );
        }
        call
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}
