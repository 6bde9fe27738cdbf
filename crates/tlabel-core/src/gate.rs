//! Activation gate deciding whether label tracking is enabled.
//!
//! The gate is consulted once per attachment request. Handles never re-check it,
//! so swapping the policy has no effect on handles that already exist.
use std::{
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

/// Decides whether test labels are tracked at all.
pub trait Interceptor: Send + Sync {
    /// Returns `true` if label tracking is active.
    fn active(&self) -> bool;
}

impl<F> Interceptor for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn active(&self) -> bool {
        self()
    }
}

/// Policy installed in an [`ActivationGate`].
///
/// `Default` is always active. Any `Custom` policy counts as custom, even one
/// that always reports active.
#[derive(Clone, Default)]
pub enum Policy {
    #[default]
    Default,
    Custom(Arc<dyn Interceptor>),
}

impl Policy {
    /// Wrap an interceptor into a custom policy.
    pub fn custom(interceptor: impl Interceptor + 'static) -> Self {
        Self::Custom(Arc::new(interceptor))
    }

    /// Custom policy that never activates tracking.
    pub fn inactive() -> Self {
        Self::custom(|| false)
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        match self {
            Policy::Default => true,
            Policy::Custom(interceptor) => interceptor.active(),
        }
    }

    #[inline]
    pub fn is_custom(&self) -> bool {
        matches!(self, Policy::Custom(_))
    }
}

impl fmt::Debug for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Default => f.write_str("Policy::Default"),
            Policy::Custom(_) => f.write_str("Policy::Custom(<interceptor>)"),
        }
    }
}

/// Thread-safe holder of the current [`Policy`].
#[derive(Debug, Default)]
pub struct ActivationGate {
    policy: RwLock<Policy>,
}

impl ActivationGate {
    /// Create a gate with the default (always active) policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a gate with the given policy installed.
    pub fn with_policy(policy: Policy) -> Self {
        Self {
            policy: RwLock::new(policy),
        }
    }

    /// Evaluate the installed policy.
    ///
    /// The policy is cloned out of the lock before it runs, so an interceptor may
    /// itself call [`ActivationGate::set_policy`].
    pub fn is_active(&self) -> bool {
        self.current().is_active()
    }

    /// Install a policy; `None` restores the default one.
    pub fn set_policy(&self, policy: Option<Policy>) {
        let mut guard = self.policy.write().unwrap_or_else(PoisonError::into_inner);
        *guard = policy.unwrap_or_default();
    }

    /// Returns `true` if a custom policy is installed.
    pub fn has_custom_policy(&self) -> bool {
        self.current().is_custom()
    }

    fn current(&self) -> Policy {
        self.policy
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
