use chrono::{Local, NaiveDateTime};

#[cfg(test)]
use mockall::automock;

/// Represents an entity responsible for providing the current local time across application. This
/// allows commands to be driven with a fixed clock during testing.
#[cfg_attr(test, automock)]
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
