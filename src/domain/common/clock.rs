use chrono::{DateTime, Utc};

/// Source of the current instant for time-dependent domain decisions
///
/// Domain entities never read the wall clock themselves; callers resolve
/// `now` through a `Clock` and pass it in explicitly.
pub trait Clock: Send + Sync {
  /// Returns the current instant
  fn now(&self) -> DateTime<Utc>;
}
