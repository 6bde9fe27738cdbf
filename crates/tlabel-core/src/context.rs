use std::{fmt, sync::OnceLock};

use tracing::{debug, trace, warn};

use crate::{
    component::Component,
    config::LabelConfig,
    error::CoreResult,
    gate::{ActivationGate, Policy},
    handle::TestLabel,
    store::LabelStore,
};

/// Process-wide context returned by [`LabelContext::global`].
static GLOBAL: OnceLock<LabelContext> = OnceLock::new();

/// Entry point for attaching test labels to widgets.
///
/// Holds the activation gate and the configuration used for new stores. Hosts
/// usually create one context and pass it around; [`LabelContext::global`] is
/// available for code that cannot thread a context through.
pub struct LabelContext {
    gate: ActivationGate,
    config: LabelConfig,
}

impl LabelContext {
    /// Create a context with the default configuration and policy.
    pub fn new() -> Self {
        Self {
            gate: ActivationGate::new(),
            config: LabelConfig::default(),
        }
    }

    /// Create a context from a validated configuration.
    pub fn from_config(config: LabelConfig) -> CoreResult<Self> {
        config.validate()?;
        let gate = ActivationGate::with_policy(config.initial_policy().unwrap_or_default());
        Ok(Self { gate, config })
    }

    /// Shared process-wide context with the default configuration.
    pub fn global() -> &'static LabelContext {
        GLOBAL.get_or_init(LabelContext::new)
    }

    /// Install a policy; `None` restores the default one.
    ///
    /// Handles created before the call keep their binding.
    pub fn set_policy(&self, policy: Option<Policy>) {
        debug!(custom = policy.is_some(), "activation policy replaced");
        self.gate.set_policy(policy);
    }

    /// Returns `true` if a custom policy is installed.
    pub fn has_custom_policy(&self) -> bool {
        self.gate.has_custom_policy()
    }

    /// Attach label tracking to a widget and return its handle.
    ///
    /// The gate is evaluated exactly once here. When it is inactive the handle is
    /// dry. Otherwise an already attached store is reused, so applying twice to
    /// the same widget yields two handles over the same labels.
    pub fn apply<C>(&self, component: &C) -> TestLabel
    where
        C: Component + ?Sized,
    {
        if !self.gate.is_active() {
            trace!(widget = component.id(), "label tracking inactive, dry handle");
            return TestLabel::dry();
        }

        if let Some(store) = component.label_store() {
            trace!(widget = component.id(), "reusing attached label store");
            return TestLabel::bound(store);
        }

        let store = match LabelStore::new(self.config.prefix.clone()) {
            Ok(store) => store.shared(),
            Err(e) => {
                warn!(widget = component.id(), error = %e, "label store not created, dry handle");
                return TestLabel::dry();
            }
        };
        let store = component.attach_label_store(store);
        debug!(widget = component.id(), prefix = %self.config.prefix, "label store attached");
        TestLabel::bound(store)
    }
}

impl Default for LabelContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LabelContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelContext")
            .field("prefix", &self.config.prefix)
            .field("custom_policy", &self.gate.has_custom_policy())
            .finish()
    }
}
