//! Sequential symbolic-parameter allocation.

use ansatz_ir::Parameter;
use rustc_hash::FxHashMap;

/// Issues `p_0, p_1, ...` in the order parametric instructions are applied.
///
/// One allocator lives for exactly one compile call, so numbering always
/// restarts at zero and never leaks between calls.
#[derive(Debug, Default)]
pub struct ParameterAllocator {
    counter: u64,
    registry: FxHashMap<String, Parameter>,
    order: Vec<Parameter>,
}

impl ParameterAllocator {
    /// Create an allocator starting at `p_0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next parameter.
    ///
    /// The counter advances on every call. A name that was already registered
    /// returns the existing parameter instead of registering it twice.
    pub fn next(&mut self) -> Parameter {
        let name = format!("p_{}", self.counter);
        self.counter += 1;
        if let Some(existing) = self.registry.get(&name) {
            return existing.clone();
        }
        let parameter = Parameter::new(name.clone());
        self.registry.insert(name, parameter.clone());
        self.order.push(parameter.clone());
        parameter
    }

    /// Number of allocation requests served so far.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Registered parameters, in allocation order.
    pub fn allocated(&self) -> &[Parameter] {
        &self.order
    }

    /// Consume the allocator, returning its parameters in allocation order.
    pub fn into_allocated(self) -> Vec<Parameter> {
        self.order
    }
}
