//! Response envelopes and current-version resolution.
//!
//! The directory answers each entity query with
//! `{ <collection>: { objects: [ { validities: [ ... ] } ] } }`. Entities are
//! decoded straight into the `orgmail-core` types; only the envelopes live
//! here.

use orgmail_core::{
  entity::{Address, Employee, ManagerAssociation, OrgUnit},
  validity::{Versioned, select_current},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::Result;

// ─── Envelopes ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct Page<T> {
  pub objects: Vec<Versions<T>>,
}

#[derive(Debug, Deserialize)]
pub struct Versions<T> {
  pub validities: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct EmployeesData {
  pub employees: Page<Employee>,
}

#[derive(Debug, Deserialize)]
pub struct AddressesData {
  pub addresses: Page<Address>,
}

#[derive(Debug, Deserialize)]
pub struct OrgUnitsData {
  pub org_units: Page<OrgUnit>,
}

#[derive(Debug, Deserialize)]
pub struct ManagersData {
  pub managers: Page<ManagerAssociation>,
}

#[derive(Debug, Deserialize)]
pub struct RootOrgData {
  pub org: RootOrg,
}

#[derive(Debug, Deserialize)]
pub struct RootOrg {
  pub uuid: Uuid,
}

// ─── Resolution ──────────────────────────────────────────────────────────────

impl<T: Versioned> Page<T> {
  /// The current version of the first matching object.
  ///
  /// An empty page or an object without validities is an
  /// [`orgmail_core::Error::EmptyInput`].
  pub fn current(self) -> Result<T> {
    let validities = self
      .objects
      .into_iter()
      .next()
      .map(|object| object.validities)
      .unwrap_or_default();
    Ok(select_current(validities)?)
  }

  /// Like [`Page::current`], but an empty page is `None`.
  pub fn current_or_none(self) -> Result<Option<T>> {
    if self.objects.is_empty() {
      return Ok(None);
    }
    self.current().map(Some)
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::Error;

  #[test]
  fn picks_the_current_manager_version() {
    let data: ManagersData = serde_json::from_value(json!({
      "managers": { "objects": [ { "validities": [
        {
          "uuid": "0f6a1f35-3d2c-4d1e-9c87-1b2a3c4d5e6f",
          "employee_uuid": "7a1b2c3d-4e5f-4a6b-8c7d-9e0f1a2b3c4d",
          "org_unit_uuid": "2b3c4d5e-6f70-4812-9a3b-4c5d6e7f8091",
          "validity": { "from": "2001-01-01T00:00:00+01:00", "to": "2002-01-01T00:00:00+01:00" }
        },
        {
          "uuid": "0f6a1f35-3d2c-4d1e-9c87-1b2a3c4d5e6f",
          "employee_uuid": null,
          "org_unit_uuid": "2b3c4d5e-6f70-4812-9a3b-4c5d6e7f8091",
          "validity": { "from": "2002-01-01T00:00:00+01:00", "to": null }
        }
      ] } ] }
    }))
    .unwrap();

    let manager = data.managers.current().unwrap();
    assert!(manager.employee_uuid.is_none());
    assert!(manager.validity.to.is_none());
  }

  #[test]
  fn empty_address_page_is_none() {
    let data: AddressesData =
      serde_json::from_value(json!({ "addresses": { "objects": [] } }))
        .unwrap();
    assert!(data.addresses.current_or_none().unwrap().is_none());
  }

  #[test]
  fn empty_employee_page_is_an_error() {
    let data: EmployeesData =
      serde_json::from_value(json!({ "employees": { "objects": [] } }))
        .unwrap();
    assert!(matches!(
      data.employees.current(),
      Err(Error::Core(orgmail_core::Error::EmptyInput))
    ));
  }

  #[test]
  fn object_without_validities_is_an_error() {
    let data: OrgUnitsData = serde_json::from_value(
      json!({ "org_units": { "objects": [ { "validities": [] } ] } }),
    )
    .unwrap();
    assert!(matches!(
      data.org_units.current(),
      Err(Error::Core(orgmail_core::Error::EmptyInput))
    ));
  }
}
