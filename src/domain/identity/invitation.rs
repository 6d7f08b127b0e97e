use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::{IdentityError, ValidationError};
use super::value_objects::{InvitationDescriptor, TenantId, required_text};
use crate::domain::common::{EqualityComponent, ValueObject};

/// Validity window of a registration invitation
///
/// `OpenEnded` has no bounds. `Provisional` is the state right after a start
/// date was assigned: `until` holds a placeholder one day after the start so
/// the window is never half-set. `Windowed` carries a confirmed end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Validity {
  OpenEnded,
  Provisional {
    starting_on: DateTime<Utc>,
    until: DateTime<Utc>,
  },
  Windowed {
    starting_on: DateTime<Utc>,
    until: DateTime<Utc>,
  },
}

impl Validity {
  pub fn starting_on(&self) -> Option<DateTime<Utc>> {
    match self {
      Self::OpenEnded => None,
      Self::Provisional { starting_on, .. } | Self::Windowed { starting_on, .. } => {
        Some(*starting_on)
      }
    }
  }

  pub fn until(&self) -> Option<DateTime<Utc>> {
    match self {
      Self::OpenEnded => None,
      Self::Provisional { until, .. } | Self::Windowed { until, .. } => Some(*until),
    }
  }

  /// Both bounds are inclusive
  pub fn contains(&self, now: DateTime<Utc>) -> bool {
    match self {
      Self::OpenEnded => true,
      Self::Provisional { starting_on, until } | Self::Windowed { starting_on, until } => {
        *starting_on <= now && now <= *until
      }
    }
  }
}

/// Registration invitation owned by a tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invitation {
  tenant_id: TenantId,
  invitation_id: String,
  description: Option<String>,
  validity: Validity,
}

impl Invitation {
  /// Length of the placeholder window applied by [`Invitation::will_start_on`]
  pub fn provisional_window() -> Duration {
    Duration::days(1)
  }

  /// Creates an open-ended invitation
  pub fn new(
    tenant_id: TenantId,
    invitation_id: &str,
    description: Option<String>,
  ) -> Result<Self, ValidationError> {
    Self::with_window(tenant_id, invitation_id, description, None, None)
  }

  /// Creates an invitation, windowed only when both bounds are given
  pub fn with_window(
    tenant_id: TenantId,
    invitation_id: &str,
    description: Option<String>,
    starting_on: Option<DateTime<Utc>>,
    until: Option<DateTime<Utc>>,
  ) -> Result<Self, ValidationError> {
    let invitation_id = required_text(invitation_id, "invitation_id")?;

    let validity = match (starting_on, until) {
      (Some(starting_on), Some(until)) => {
        if starting_on > until {
          return Err(ValidationError::InvalidWindow);
        }
        Validity::Windowed { starting_on, until }
      }
      _ => Validity::OpenEnded,
    };

    Ok(Self {
      tenant_id,
      invitation_id,
      description,
      validity,
    })
  }

  pub fn tenant_id(&self) -> &TenantId {
    &self.tenant_id
  }

  pub fn invitation_id(&self) -> &str {
    &self.invitation_id
  }

  pub fn description(&self) -> Option<&str> {
    self.description.as_deref()
  }

  pub fn validity(&self) -> Validity {
    self.validity
  }

  pub fn starting_on(&self) -> Option<DateTime<Utc>> {
    self.validity.starting_on()
  }

  pub fn until(&self) -> Option<DateTime<Utc>> {
    self.validity.until()
  }

  /// Checks availability at `now`; open-ended invitations are always available
  pub fn is_available(&self, now: DateTime<Utc>) -> bool {
    self.validity.contains(now)
  }

  /// Matches the invitation id, or the description when the id does not match
  pub fn is_identified_by(&self, identifier: &str) -> bool {
    self.invitation_id == identifier || self.description.as_deref() == Some(identifier)
  }

  /// Removes any validity window
  pub fn open_ended(&mut self) -> &mut Self {
    self.validity = Validity::OpenEnded;
    self
  }

  /// Clears the window ahead of defining a new one with
  /// [`Invitation::will_start_on`] and [`Invitation::lasting_until`]
  pub fn redefine_as(&mut self) -> &mut Self {
    self.open_ended()
  }

  /// Assigns the start of the window
  ///
  /// # Errors
  /// Returns `IdentityError::InvalidState` if an end date is already set
  pub fn will_start_on(&mut self, date: DateTime<Utc>) -> Result<&mut Self, IdentityError> {
    if self.validity.until().is_some() {
      return Err(IdentityError::invalid_state(
        "cannot set starting-on date after until date",
      ));
    }

    self.validity = Validity::Provisional {
      starting_on: date,
      until: date + Self::provisional_window(),
    };

    Ok(self)
  }

  /// Assigns the end of the window
  ///
  /// # Errors
  /// Returns `IdentityError::InvalidState` if no start date is set, or
  /// `ValidationError::InvalidWindow` if `date` precedes the start date
  pub fn lasting_until(&mut self, date: DateTime<Utc>) -> Result<&mut Self, IdentityError> {
    let starting_on = self.validity.starting_on().ok_or_else(|| {
      IdentityError::invalid_state("cannot set until date before setting starting-on date")
    })?;

    if date < starting_on {
      return Err(ValidationError::InvalidWindow.into());
    }

    self.validity = Validity::Windowed {
      starting_on,
      until: date,
    };

    Ok(self)
  }

  pub fn to_descriptor(&self) -> InvitationDescriptor {
    InvitationDescriptor {
      tenant_id: self.tenant_id.clone(),
      invitation_id: self.invitation_id.clone(),
      description: self.description.clone(),
      starting_on: self.starting_on(),
      until: self.until(),
    }
  }
}

impl ValueObject for Invitation {
  fn equality_components(&self) -> Vec<EqualityComponent<'_>> {
    vec![
      EqualityComponent::of(&self.tenant_id),
      self.invitation_id.as_str().into(),
    ]
  }
}

crate::value_object_equality!(Invitation);

impl fmt::Display for Invitation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fn or_unset<T: fmt::Display>(value: Option<T>) -> String {
      value.map_or_else(|| "unset".to_string(), |v| v.to_string())
    }

    write!(
      f,
      "Invitation [tenant_id={}, description={}, invitation_id={}, starting_on={}, until={}]",
      self.tenant_id,
      or_unset(self.description.as_deref()),
      self.invitation_id,
      or_unset(self.starting_on()),
      or_unset(self.until()),
    )
  }
}
