//! In-memory collaborators for agent tests.

use std::{
  collections::HashMap,
  convert::Infallible,
  sync::Mutex,
};

use orgmail_core::{
  directory::Directory,
  entity::{
    Address, AddressType, Employee, EmployeeAddress, Engagement,
    ManagerAssociation, ManagerRef, OrgUnit,
  },
  mail::{Email, Mailer},
  validity::Validity,
};
use uuid::Uuid;

// ─── Directory ───────────────────────────────────────────────────────────────

/// A directory lookup, as recorded by [`FakeDirectory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
  Employee(Uuid),
  Address(Uuid),
  OrgUnit(Uuid),
  Manager(Uuid),
  RootOrg,
}

/// A directory that serves entities from maps and records every lookup.
///
/// Unknown employees, org units and managers behave like an empty response
/// and fail with [`orgmail_core::Error::EmptyInput`].
pub struct FakeDirectory {
  pub root:  Uuid,
  employees: HashMap<Uuid, Employee>,
  addresses: HashMap<Uuid, Address>,
  units:     HashMap<Uuid, OrgUnit>,
  managers:  HashMap<Uuid, ManagerAssociation>,
  calls:     Mutex<Vec<Call>>,
}

impl Default for FakeDirectory {
  fn default() -> Self {
    Self {
      root:      Uuid::new_v4(),
      employees: HashMap::new(),
      addresses: HashMap::new(),
      units:     HashMap::new(),
      managers:  HashMap::new(),
      calls:     Mutex::new(Vec::new()),
    }
  }
}

impl FakeDirectory {
  pub fn add_employee(&mut self, employee: Employee) {
    self.employees.insert(employee.uuid, employee);
  }

  pub fn add_address(&mut self, address: Address) {
    self.addresses.insert(address.uuid, address);
  }

  pub fn add_org_unit(&mut self, unit: OrgUnit) {
    self.units.insert(unit.uuid, unit);
  }

  pub fn add_manager(&mut self, manager: ManagerAssociation) {
    self.managers.insert(manager.uuid, manager);
  }

  pub fn calls(&self) -> Vec<Call> { self.calls.lock().unwrap().clone() }

  fn record(&self, call: Call) { self.calls.lock().unwrap().push(call); }
}

fn found<T: Clone>(
  map: &HashMap<Uuid, T>,
  uuid: Uuid,
) -> Result<T, orgmail_core::Error> {
  map.get(&uuid).cloned().ok_or(orgmail_core::Error::EmptyInput)
}

impl Directory for FakeDirectory {
  type Error = orgmail_core::Error;

  async fn employee(&self, uuid: Uuid) -> Result<Employee, Self::Error> {
    self.record(Call::Employee(uuid));
    found(&self.employees, uuid)
  }

  async fn address(&self, uuid: Uuid) -> Result<Option<Address>, Self::Error> {
    self.record(Call::Address(uuid));
    Ok(self.addresses.get(&uuid).cloned())
  }

  async fn org_unit(&self, uuid: Uuid) -> Result<OrgUnit, Self::Error> {
    self.record(Call::OrgUnit(uuid));
    found(&self.units, uuid)
  }

  async fn manager(
    &self,
    uuid: Uuid,
  ) -> Result<ManagerAssociation, Self::Error> {
    self.record(Call::Manager(uuid));
    found(&self.managers, uuid)
  }

  async fn root_org(&self) -> Result<Uuid, Self::Error> {
    self.record(Call::RootOrg);
    Ok(self.root)
  }
}

// ─── Mailer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingMailer {
  sent: Mutex<Vec<Email>>,
}

impl RecordingMailer {
  pub fn sent(&self) -> Vec<Email> { self.sent.lock().unwrap().clone() }
}

impl Mailer for RecordingMailer {
  type Error = Infallible;

  async fn send(&self, email: Email) -> Result<(), Self::Error> {
    self.sent.lock().unwrap().push(email);
    Ok(())
  }
}

// ─── Builders ────────────────────────────────────────────────────────────────

pub fn address_type(scope: &str) -> AddressType {
  AddressType { scope: Some(scope.to_string()) }
}

pub fn employee(
  uuid: Uuid,
  name: &str,
  emails: &[&str],
  org_units: &[Uuid],
) -> Employee {
  Employee {
    uuid,
    name: name.to_string(),
    addresses: emails
      .iter()
      .map(|value| EmployeeAddress {
        value:        value.to_string(),
        address_type: address_type("EMAIL"),
      })
      .collect(),
    engagements: org_units
      .iter()
      .map(|&org_unit_uuid| Engagement { org_unit_uuid })
      .collect(),
    validity: Validity::default(),
  }
}

pub fn address(
  uuid: Uuid,
  value: &str,
  scope: &str,
  owner: Option<Uuid>,
) -> Address {
  Address {
    uuid,
    value: value.to_string(),
    address_type: address_type(scope),
    employee_uuid: owner,
    validity: Validity::default(),
  }
}

pub fn org_unit(
  uuid: Uuid,
  name: &str,
  user_key: &str,
  parent: Option<Uuid>,
  managers: &[Option<Uuid>],
) -> OrgUnit {
  OrgUnit {
    uuid,
    name: name.to_string(),
    user_key: user_key.to_string(),
    parent_uuid: parent,
    managers: managers
      .iter()
      .map(|&employee_uuid| ManagerRef { employee_uuid })
      .collect(),
    validity: Validity::default(),
  }
}
