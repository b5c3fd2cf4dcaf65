//! Cancellation token for the guessing loop.
//!
//! An [`Interrupt`] is shared between the round and whatever delivers interrupt
//! signals (the Ctrl-C handler, the TUI key loop). While an [`InterruptScope`] is
//! alive the signal is captured and surfaced to the round as a cancellation; with no
//! scope armed the handler falls back to ending the process.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Exit status used when Ctrl-C arrives outside a round.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

#[derive(Debug, Default)]
struct Flags {
    armed: AtomicBool,
    triggered: AtomicBool,
}

#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flags: Arc<Flags>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the token for the lifetime of the returned guard. Any stale trigger
    /// from before the scope is discarded.
    pub fn scope(&self) -> InterruptScope<'_> {
        self.flags.triggered.store(false, Ordering::SeqCst);
        self.flags.armed.store(true, Ordering::SeqCst);
        InterruptScope { interrupt: self }
    }

    pub fn is_armed(&self) -> bool {
        self.flags.armed.load(Ordering::SeqCst)
    }

    /// Record an interrupt. Returns `false` when no scope is armed to receive it.
    pub fn trigger(&self) -> bool {
        self.flags.triggered.store(true, Ordering::SeqCst);
        self.is_armed()
    }

    pub fn is_triggered(&self) -> bool {
        self.flags.triggered.load(Ordering::SeqCst)
    }

    /// Route SIGINT into this token. Outside an armed scope Ctrl-C exits the process.
    pub fn install_ctrlc_handler(&self) -> Result<(), ctrlc::Error> {
        let interrupt = self.clone();
        ctrlc::set_handler(move || {
            if !interrupt.trigger() {
                std::process::exit(INTERRUPTED_EXIT_CODE);
            }
            log::info!("Interrupt received, finishing round");
        })
    }
}

/// Guard returned by [`Interrupt::scope`]. Disarms the token on drop, whether the
/// loop finished normally or was cut short.
#[derive(Debug)]
pub struct InterruptScope<'a> {
    interrupt: &'a Interrupt,
}

impl Drop for InterruptScope<'_> {
    fn drop(&mut self) {
        self.interrupt.flags.armed.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_interrupt_is_idle() {
        let interrupt = Interrupt::new();
        assert!(!interrupt.is_armed());
        assert!(!interrupt.is_triggered());
    }

    #[test]
    fn test_trigger_without_scope_is_unhandled() {
        let interrupt = Interrupt::new();
        assert!(!interrupt.trigger());
    }

    #[test]
    fn test_scope_arms_and_disarms() {
        let interrupt = Interrupt::new();
        {
            let _scope = interrupt.scope();
            assert!(interrupt.is_armed());
            assert!(interrupt.trigger());
            assert!(interrupt.is_triggered());
        }
        assert!(!interrupt.is_armed());
    }

    #[test]
    fn test_scope_clears_stale_trigger() {
        let interrupt = Interrupt::new();
        interrupt.trigger();
        let _scope = interrupt.scope();
        assert!(!interrupt.is_triggered());
    }

    #[test]
    fn test_clones_share_state() {
        let interrupt = Interrupt::new();
        let handle = interrupt.clone();
        let _scope = interrupt.scope();
        handle.trigger();
        assert!(interrupt.is_triggered());
    }
}
