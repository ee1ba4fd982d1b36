//! Tasks are kept by [Tracker] in insertion order. That order is also the order in which tasks
//! are charted.

pub mod storage;
pub mod task;

use chrono::NaiveDateTime;
use tracing::{info, warn};

use task::Task;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Tracker {
    tasks: Vec<Task>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, name: &str) -> Option<&Task> {
        self.tasks.iter().find(|v| v.name() == name)
    }

    /// Returns false if a task with the same name is already tracked.
    pub fn add_task(&mut self, task: Task) -> bool {
        if self.get(task.name()).is_some() {
            warn!("Task {:?} already exists", task.name());
            return false;
        }
        info!("Adding task {:?}", task.name());
        self.tasks.push(task);
        true
    }

    pub fn create_and_add_task(&mut self, name: &str, currency_name: &str) -> bool {
        self.add_task(Task::new(name, currency_name))
    }

    pub fn remove_task(&mut self, name: &str) -> bool {
        match self.tasks.iter().position(|v| v.name() == name) {
            Some(index) => {
                info!("Removing task {name:?}");
                self.tasks.remove(index);
                true
            }
            None => {
                warn!("Can't remove missing task {name:?}");
                false
            }
        }
    }

    /// Returns false if the task is missing or its total would overflow.
    pub fn increase_task_currency(&mut self, name: &str, step: u64, now: NaiveDateTime) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|v| v.name() == name) else {
            warn!("Can't increment missing task {name:?}");
            return false;
        };
        if !task.increment(step, now) {
            warn!(
                "Can't add {step} to task {name:?}, total {} would overflow",
                task.currency()
            );
            return false;
        }
        info!("Task {name:?} is now at {}", task.currency());
        true
    }

    /// Builds a tracker from already deserialized tasks. Duplicates after the first occurrence of
    /// a name are dropped.
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut tracker = Self::new();
        for task in tasks {
            tracker.add_task(task);
        }
        tracker
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    use super::{task::Task, Tracker};

    const TEST_DATE_TIME: NaiveDateTime = NaiveDateTime::new(
        NaiveDate::from_ymd_opt(2024, 4, 5).unwrap(),
        NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
    );

    #[test]
    fn refuses_duplicate_names() {
        let mut tracker = Tracker::new();
        assert!(tracker.create_and_add_task("Reading", "pages"));
        assert!(!tracker.create_and_add_task("Reading", "books"));
        assert!(tracker.create_and_add_task("reading", "pages"));

        assert_eq!(tracker.tasks().len(), 2);
        assert_eq!(tracker.get("Reading").unwrap().currency_name(), "pages");
    }

    #[test]
    fn keeps_insertion_order() {
        let mut tracker = Tracker::new();
        for name in ["c", "a", "b"] {
            tracker.add_task(Task::with_default_currency(name));
        }
        tracker.remove_task("a");

        let names = tracker.tasks().iter().map(|v| v.name()).collect::<Vec<_>>();
        assert_eq!(names, vec!["c", "b"]);
    }

    #[test]
    fn missing_tasks_are_reported() {
        let mut tracker = Tracker::new();
        assert!(!tracker.remove_task("ghost"));
        assert!(!tracker.increase_task_currency("ghost", 1, TEST_DATE_TIME));
    }

    #[test]
    fn increments_named_task() {
        let mut tracker = Tracker::new();
        tracker.create_and_add_task("Running", "km");
        tracker.create_and_add_task("Reading", "pages");

        assert!(tracker.increase_task_currency("Reading", 4, TEST_DATE_TIME));

        assert_eq!(tracker.get("Reading").unwrap().currency(), 4);
        assert_eq!(tracker.get("Running").unwrap().currency(), 0);
    }

    #[test]
    fn overflowing_increment_is_refused() {
        let mut tracker = Tracker::new();
        tracker.create_and_add_task("Running", "km");

        assert!(tracker.increase_task_currency("Running", u64::MAX, TEST_DATE_TIME));
        assert!(!tracker.increase_task_currency("Running", 1, TEST_DATE_TIME));

        let task = tracker.get("Running").unwrap();
        assert_eq!(task.currency(), u64::MAX);
        assert_eq!(task.history().len(), 1);
    }

    #[test]
    fn from_tasks_drops_duplicates() {
        let tracker = Tracker::from_tasks([
            Task::new("a", "steps"),
            Task::new("a", "km"),
            Task::new("b", "steps"),
        ]);
        assert_eq!(tracker.tasks().len(), 2);
        assert_eq!(tracker.get("a").unwrap().currency_name(), "steps");
    }
}
