//! Structural equality shared by every value object in the domain
//!
//! A value object lists its identity-defining fields, in a fixed order, as
//! [`EqualityComponent`]s. Equality and hashing are then derived from that list
//! by [`value_equals`] and [`value_hash`], and wired into `PartialEq`, `Eq` and
//! `Hash` with the [`value_object_equality!`](crate::value_object_equality) macro.

use chrono::{DateTime, Utc};
use std::any::TypeId;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

const HASH_SEED: u64 = 17;
const HASH_MULTIPLIER: u64 = 23;

/// One identity-defining field of a value object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EqualityComponent<'a> {
  /// An absent optional field; equal only to another `Null`
  Null,
  Text(&'a str),
  Integer(i64),
  Flag(bool),
  Instant(DateTime<Utc>),
  Uuid(Uuid),
  /// The components of an embedded value object
  Nested(Vec<EqualityComponent<'a>>),
}

impl<'a> EqualityComponent<'a> {
  /// Embeds another value object as a single component
  pub fn of<T: ValueObject>(value: &'a T) -> Self {
    Self::Nested(value.equality_components())
  }

  /// Embeds an optional value object, mapping `None` to `Null`
  pub fn of_optional<T: ValueObject>(value: Option<&'a T>) -> Self {
    value.map_or(Self::Null, Self::of)
  }

  /// Hash of this component alone; `Null` always hashes to zero
  pub fn component_hash(&self) -> u64 {
    match self {
      Self::Null => 0,
      Self::Nested(components) => combine_hashes(components),
      other => {
        // DefaultHasher::new() uses fixed keys: stable within one build, not across toolchains
        let mut hasher = DefaultHasher::new();
        other.hash(&mut hasher);
        hasher.finish()
      }
    }
  }
}

impl<'a> From<&'a str> for EqualityComponent<'a> {
  fn from(value: &'a str) -> Self {
    Self::Text(value)
  }
}

impl<'a> From<Option<&'a str>> for EqualityComponent<'a> {
  fn from(value: Option<&'a str>) -> Self {
    value.map_or(Self::Null, Self::Text)
  }
}

impl From<i64> for EqualityComponent<'_> {
  fn from(value: i64) -> Self {
    Self::Integer(value)
  }
}

impl From<bool> for EqualityComponent<'_> {
  fn from(value: bool) -> Self {
    Self::Flag(value)
  }
}

impl From<DateTime<Utc>> for EqualityComponent<'_> {
  fn from(value: DateTime<Utc>) -> Self {
    Self::Instant(value)
  }
}

impl From<Option<DateTime<Utc>>> for EqualityComponent<'_> {
  fn from(value: Option<DateTime<Utc>>) -> Self {
    value.map_or(Self::Null, Self::Instant)
  }
}

impl From<Uuid> for EqualityComponent<'_> {
  fn from(value: Uuid) -> Self {
    Self::Uuid(value)
  }
}

/// Implemented by every value object variant
pub trait ValueObject {
  /// Identity-defining fields in their declared order
  fn equality_components(&self) -> Vec<EqualityComponent<'_>>;
}

/// Structural equality between two value objects
///
/// Instances are equal only when they are the same concrete type and their
/// component lists are element-wise equal in order.
pub fn value_equals<A, B>(left: &A, right: &B) -> bool
where
  A: ValueObject + 'static,
  B: ValueObject + 'static,
{
  if TypeId::of::<A>() != TypeId::of::<B>() {
    return false;
  }

  if std::ptr::eq(left as *const A as *const (), right as *const B as *const ()) {
    return true;
  }

  left.equality_components() == right.equality_components()
}

/// Order-sensitive hash of a value object's components
///
/// Starts from 17 and folds each component as `hash * 23 + component_hash`
/// with wrapping arithmetic.
pub fn value_hash<T: ValueObject + ?Sized>(value: &T) -> u64 {
  combine_hashes(&value.equality_components())
}

fn combine_hashes(components: &[EqualityComponent<'_>]) -> u64 {
  components.iter().fold(HASH_SEED, |hash, component| {
    hash
      .wrapping_mul(HASH_MULTIPLIER)
      .wrapping_add(component.component_hash())
  })
}

/// Implements `PartialEq`, `Eq` and `Hash` for value object types through the
/// shared equality kernel
#[macro_export]
macro_rules! value_object_equality {
  ($($ty:ty),+ $(,)?) => {
    $(
      impl ::std::cmp::PartialEq for $ty {
        fn eq(&self, other: &Self) -> bool {
          $crate::domain::common::value_equals(self, other)
        }
      }

      impl ::std::cmp::Eq for $ty {}

      impl ::std::hash::Hash for $ty {
        fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
          state.write_u64($crate::domain::common::value_hash(self));
        }
      }
    )+
  };
}
