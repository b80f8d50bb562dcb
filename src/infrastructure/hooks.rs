use crate::domain::{SelectedDays, StartOfWeek};
use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate};

/// Context provided to commit hooks
#[derive(Debug, Clone)]
pub struct SelectionContext {
    pub reference_month: NaiveDate,
    pub start_of_week: StartOfWeek,
    pub start_index: usize,
    pub end_index: usize,
    pub committed_at: DateTime<Local>,
}

/// Trait for plugins that respond to committed selections
pub trait SelectionHook: Send + Sync {
    /// Called once for every range the user commits
    fn on_selection_committed(&self, context: &SelectionContext, days: &SelectedDays) -> Result<()>;

    /// Human-readable name for this hook
    fn name(&self) -> &str;

    /// Whether this hook should be enabled by default
    fn enabled_by_default(&self) -> bool {
        true
    }
}

/// Registry for managing commit hooks
pub struct HookRegistry {
    hooks: Vec<Box<dyn SelectionHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Register a new commit hook
    pub fn register<H>(&mut self, hook: H)
    where
        H: SelectionHook + 'static,
    {
        self.hooks.push(Box::new(hook));
    }

    /// Register a hook only if it is enabled by default
    pub fn register_default<H>(&mut self, hook: H) -> bool
    where
        H: SelectionHook + 'static,
    {
        if !hook.enabled_by_default() {
            log::debug!("Skipping hook '{}', disabled by default", hook.name());
            return false;
        }
        self.register(hook);
        true
    }

    /// Run every registered hook in registration order
    pub fn execute_commit_hooks(&self, context: &SelectionContext, days: &SelectedDays) {
        for hook in &self.hooks {
            if let Err(e) = hook.on_selection_committed(context, days) {
                // Remaining hooks still run
                log::warn!("Hook '{}' failed: {:#}", hook.name(), e);
            }
        }
    }

    /// List all registered hooks
    pub fn list_hooks(&self) -> Vec<&str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("hooks", &self.list_hooks())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::test_utils::test_harness::{RecordingHook, ymd};
    use anyhow::anyhow;

    struct FailingHook;

    impl SelectionHook for FailingHook {
        fn on_selection_committed(&self, _: &SelectionContext, _: &SelectedDays) -> Result<()> {
            Err(anyhow!("always fails"))
        }

        fn name(&self) -> &str {
            "Failing"
        }
    }

    #[test]
    fn test_failing_hook_does_not_stop_later_hooks() {
        let recorder = RecordingHook::new();
        let mut registry = HookRegistry::new();
        registry.register(FailingHook);
        registry.register(recorder.clone());

        let context = SelectionContext {
            reference_month: ymd(2026, 10, 1),
            start_of_week: StartOfWeek::Sun,
            start_index: 5,
            end_index: 5,
            committed_at: Local::now(),
        };
        let days = SelectedDays::single(ymd(2026, 10, 2));
        registry.execute_commit_hooks(&context, &days);

        assert_eq!(registry.list_hooks(), vec!["Failing", "Recording"]);
        assert_eq!(recorder.commits(), vec![days]);
    }

    struct OptInHook;

    impl SelectionHook for OptInHook {
        fn on_selection_committed(&self, _: &SelectionContext, _: &SelectedDays) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "Opt-in"
        }

        fn enabled_by_default(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_default_registration_skips_opt_in_hooks() {
        let mut registry = HookRegistry::new();
        assert!(!registry.register_default(OptInHook));
        assert!(registry.register_default(RecordingHook::new()));
        assert_eq!(registry.list_hooks(), vec!["Recording"]);

        registry.register(OptInHook);
        assert_eq!(registry.list_hooks(), vec!["Recording", "Opt-in"]);
    }
}
