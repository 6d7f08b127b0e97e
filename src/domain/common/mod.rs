pub mod clock;
pub mod value_object;

pub use clock::Clock;
pub use value_object::{EqualityComponent, ValueObject, value_equals, value_hash};
