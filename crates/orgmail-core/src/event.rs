//! Change events and their routing keys.
//!
//! A routing key has the shape `<service_type>.<object_type>.<request_type>`,
//! e.g. `employee.address.create`. It tells agents which kind of record
//! changed, under which root entity, and how.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::Error;

// ─── Routing key parts ───────────────────────────────────────────────────────

macro_rules! routing_part {
  (
    $(#[$meta:meta])*
    $name:ident { $($variant:ident => $text:literal),* $(,)? }
  ) => {
    $(#[$meta])*
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum $name {
      $($variant),*
    }

    impl $name {
      pub fn as_str(&self) -> &'static str {
        match self {
          $(Self::$variant => $text),*
        }
      }

      fn parse(raw: &str) -> Option<Self> {
        match raw {
          $($text => Some(Self::$variant),)*
          _ => None,
        }
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
      }
    }
  };
}

routing_part! {
  /// The root entity kind the change happened under.
  ServiceType {
    Employee => "employee",
    OrgUnit => "org_unit",
  }
}

routing_part! {
  /// The kind of record that changed.
  ObjectType {
    Address => "address",
    Association => "association",
    Class => "class",
    Employee => "employee",
    Engagement => "engagement",
    Facet => "facet",
    It => "it",
    Kle => "kle",
    Leave => "leave",
    Manager => "manager",
    Owner => "owner",
    OrgUnit => "org_unit",
    RelatedUnit => "related_unit",
    Role => "role",
  }
}

routing_part! {
  /// What happened to the record.
  RequestType {
    Create => "create",
    Edit => "edit",
    Terminate => "terminate",
    Refresh => "refresh",
  }
}

// ─── Routing key ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoutingKey {
  pub service_type: ServiceType,
  pub object_type:  ObjectType,
  pub request_type: RequestType,
}

impl RoutingKey {
  pub const fn new(
    service_type: ServiceType,
    object_type: ObjectType,
    request_type: RequestType,
  ) -> Self {
    Self { service_type, object_type, request_type }
  }
}

impl FromStr for RoutingKey {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let invalid = || Error::InvalidRoutingKey(s.to_string());
    let mut parts = s.split('.');
    let (Some(service), Some(object), Some(request), None) =
      (parts.next(), parts.next(), parts.next(), parts.next())
    else {
      return Err(invalid());
    };

    Ok(Self {
      service_type: ServiceType::parse(service).ok_or_else(invalid)?,
      object_type:  ObjectType::parse(object).ok_or_else(invalid)?,
      request_type: RequestType::parse(request).ok_or_else(invalid)?,
    })
  }
}

impl fmt::Display for RoutingKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{}.{}.{}",
      self.service_type, self.object_type, self.request_type
    )
  }
}

// ─── Event ───────────────────────────────────────────────────────────────────

/// A notification that a directory record changed.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
  pub routing_key: RoutingKey,
  /// The root entity (employee or org unit) the change belongs to.
  pub uuid:        Uuid,
  /// The record that changed.
  pub object_uuid: Uuid,
  pub time:        DateTime<Utc>,
}
