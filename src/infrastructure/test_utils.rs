/// Test utilities for picker-level tests
///
/// Provides a hook that records every commit it sees, plus fixtures that
/// build a [`DatePicker`](crate::domain::DatePicker) wired to such a hook.
///
/// ## Usage Examples
///
/// ```ignore
/// use crate::infrastructure::test_utils::test_harness::TestPicker;
///
/// #[test]
/// fn my_test() {
///     let mut test_picker = TestPicker::october_2026();
///     test_picker.picker.interact(DayInteraction::click(5));
///     assert!(test_picker.recorder.commits().is_empty());
/// }
/// ```
#[cfg(test)]
pub mod test_harness {
    use crate::domain::{DatePicker, GridShape, SelectedDays, StartOfWeek};
    use crate::infrastructure::{HookRegistry, SelectionContext, SelectionHook};
    use anyhow::Result;
    use chrono::NaiveDate;
    use std::sync::{Arc, Mutex};

    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    /// Hook that keeps every committed range; clones share the same log
    #[derive(Clone, Default)]
    pub struct RecordingHook {
        commits: Arc<Mutex<Vec<SelectedDays>>>,
        contexts: Arc<Mutex<Vec<SelectionContext>>>,
    }

    impl RecordingHook {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn commits(&self) -> Vec<SelectedDays> {
            self.commits.lock().unwrap().clone()
        }

        pub fn contexts(&self) -> Vec<SelectionContext> {
            self.contexts.lock().unwrap().clone()
        }
    }

    impl SelectionHook for RecordingHook {
        fn on_selection_committed(
            &self,
            context: &SelectionContext,
            days: &SelectedDays,
        ) -> Result<()> {
            self.commits.lock().unwrap().push(*days);
            self.contexts.lock().unwrap().push(context.clone());
            Ok(())
        }

        fn name(&self) -> &str {
            "Recording"
        }
    }

    /// A picker plus the recorder attached to it
    pub struct TestPicker {
        pub picker: DatePicker,
        pub recorder: RecordingHook,
    }

    impl TestPicker {
        pub fn new(reference_month: NaiveDate, start_of_week: StartOfWeek, shape: GridShape) -> Self {
            let recorder = RecordingHook::new();
            let mut hooks = HookRegistry::new();
            hooks.register(recorder.clone());

            let picker = DatePicker::with_hooks(reference_month, start_of_week, shape, hooks);
            Self { picker, recorder }
        }

        /// Sunday rows, Sep 27 .. Oct 31; October 1st sits at index 4
        pub fn october_2026() -> Self {
            Self::new(ymd(2026, 10, 1), StartOfWeek::Sun, GridShape::Compact)
        }
    }

    /// Run a test with a fresh October 2026 picker
    pub fn with_test_picker<F, R>(test_fn: F) -> R
    where
        F: FnOnce(&mut TestPicker) -> R,
    {
        let mut test_picker = TestPicker::october_2026();
        test_fn(&mut test_picker)
    }
}

#[cfg(test)]
mod tests {
    use super::test_harness::*;
    use crate::domain::DayInteraction;

    #[test]
    fn test_harness_records_commits() {
        let mut test_picker = TestPicker::october_2026();
        test_picker.picker.interact(DayInteraction::click(5));
        assert!(test_picker.recorder.commits().is_empty());

        test_picker.picker.interact(DayInteraction::click(8));
        let commits = test_picker.recorder.commits();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].start_day(), ymd(2026, 10, 2));
        assert_eq!(commits[0].end_day(), ymd(2026, 10, 5));
    }

    #[test]
    fn test_harness_isolation() {
        let first = TestPicker::october_2026();
        let mut second = TestPicker::october_2026();

        second.picker.interact(DayInteraction::click(5));
        second.picker.interact(DayInteraction::click(5));

        assert!(first.recorder.commits().is_empty());
        assert_eq!(second.recorder.commits().len(), 1);
    }

    #[test]
    fn test_harness_with_function() {
        with_test_picker(|test_picker| {
            assert_eq!(test_picker.picker.grid().len(), 35);
        });
    }
}
