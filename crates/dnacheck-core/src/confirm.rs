//! Confirmation gating for collection steps.
//!
//! Every step that issues controller calls asks first. The question is
//! answered by a [`ConfirmationPolicy`] supplied at construction, so the
//! collection logic never reads from a terminal itself.

/// Decides whether a gated step may run.
pub trait ConfirmationPolicy: Send + Sync {
    /// Return `true` to run the step described by `prompt`.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Approves everything (`--yes`, `ask_for_permission = false`, tests).
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl ConfirmationPolicy for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Declines everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

impl ConfirmationPolicy for NeverConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}

impl<F> ConfirmationPolicy for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}
