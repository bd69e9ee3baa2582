//! Directory entities: typed snapshots of the records the agents read.
//!
//! Field names follow the directory's GraphQL schema so the backend can
//! decode responses straight into these types. Every entity is a read-only,
//! request-scoped snapshot; nothing here is cached or mutated.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validity::{Validity, Versioned};

/// The address-type scope marking an email address.
pub const SCOPE_EMAIL: &str = "EMAIL";

// ─── Addresses ───────────────────────────────────────────────────────────────

/// Classifies an address; `scope` is e.g. `EMAIL`, `DAR` or `PHONE`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressType {
  pub scope: Option<String>,
}

impl AddressType {
  pub fn is_email(&self) -> bool { self.scope.as_deref() == Some(SCOPE_EMAIL) }
}

/// A standalone address record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
  pub uuid:          Uuid,
  pub value:         String,
  pub address_type:  AddressType,
  /// `None` when the address belongs to an org unit rather than a person.
  pub employee_uuid: Option<Uuid>,
  #[serde(default)]
  pub validity:      Validity,
}

// ─── Employees ───────────────────────────────────────────────────────────────

/// An address as listed on its owning employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeAddress {
  pub value:        String,
  pub address_type: AddressType,
}

/// An employee's affiliation with an org unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Engagement {
  pub org_unit_uuid: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
  pub uuid:        Uuid,
  pub name:        String,
  #[serde(default)]
  pub addresses:   Vec<EmployeeAddress>,
  #[serde(default)]
  pub engagements: Vec<Engagement>,
  #[serde(default)]
  pub validity:    Validity,
}

impl Employee {
  /// Addresses whose type scope is `EMAIL`.
  pub fn email_addresses(&self) -> impl Iterator<Item = &EmployeeAddress> {
    self.addresses.iter().filter(|a| a.address_type.is_email())
  }
}

// ─── Org units ───────────────────────────────────────────────────────────────

/// A manager position listed on an org unit. A vacant position has no
/// employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerRef {
  pub employee_uuid: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgUnit {
  pub uuid:        Uuid,
  pub name:        String,
  pub user_key:    String,
  /// Points at the root organisation for top-level units.
  pub parent_uuid: Option<Uuid>,
  #[serde(default)]
  pub managers:    Vec<ManagerRef>,
  #[serde(default)]
  pub validity:    Validity,
}

// ─── Manager associations ────────────────────────────────────────────────────

/// Links an employee to the org unit they manage. A `to` bound on the
/// validity marks the removal of the manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerAssociation {
  pub uuid:          Uuid,
  pub employee_uuid: Option<Uuid>,
  pub org_unit_uuid: Uuid,
  pub validity:      Validity,
}

// ─── Versioned impls ─────────────────────────────────────────────────────────

macro_rules! impl_versioned {
  ($($ty:ty),* $(,)?) => {
    $(
      impl Versioned for $ty {
        fn validity(&self) -> &Validity { &self.validity }
      }
    )*
  };
}

impl_versioned!(Address, Employee, OrgUnit, ManagerAssociation);

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decodes_employee_and_counts_emails() {
    let employee: Employee = serde_json::from_value(serde_json::json!({
      "uuid": "5d4f3a1c-9a3e-4a1e-8f53-2f2d0b1c7a10",
      "name": "Test McTesterson",
      "addresses": [
        { "value": "test@example.com", "address_type": { "scope": "EMAIL" } },
        { "value": "Testvej 1", "address_type": { "scope": "DAR" } },
        { "value": "12345678", "address_type": { "scope": null } }
      ],
      "validity": { "from": "2020-01-01T00:00:00+01:00", "to": null }
    }))
    .unwrap();

    assert_eq!(employee.email_addresses().count(), 1);
    assert!(employee.engagements.is_empty());
  }

  #[test]
  fn org_unit_address_has_no_owner() {
    let address: Address = serde_json::from_value(serde_json::json!({
      "uuid": "0b8c3c56-54a4-4c53-a0b1-2a3b4c5d6e7f",
      "value": "unit@example.com",
      "address_type": { "scope": "EMAIL" },
      "employee_uuid": null
    }))
    .unwrap();

    assert!(address.address_type.is_email());
    assert!(address.employee_uuid.is_none());
    assert_eq!(address.validity, Validity::default());
  }
}
