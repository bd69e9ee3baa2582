//! Tell managers when one of their employees gets a first email address.

use orgmail_core::{
  directory::Directory,
  entity::{Employee, OrgUnit},
  event::{ChangeEvent, ObjectType, RequestType, RoutingKey, ServiceType},
  mail::{Email, Mailer},
};

use crate::{Error, Outcome, Result};

/// The only routing key this agent acts on.
pub const ADDRESS_CREATED: RoutingKey = RoutingKey::new(
  ServiceType::Employee,
  ObjectType::Address,
  RequestType::Create,
);

pub const SUBJECT: &str = "New email address registered";

/// A structural check only: non-blank, with something on both sides of an
/// `@`. Intentionally no stricter than that.
pub fn is_plausible_email(value: &str) -> bool {
  match value.trim().split_once('@') {
    Some((local, domain)) => !local.is_empty() && !domain.is_empty(),
    None => false,
  }
}

fn compose(
  recipients: &[String],
  employee: &Employee,
  email_address: &str,
  unit: &OrgUnit,
  manager: &Employee,
) -> Email {
  Email::new(
    recipients.to_vec(),
    SUBJECT,
    format!(
      "Dear {manager},\n\n\
       {employee} in {unit} has been registered with the email address \
       {email_address}.\n",
      manager = manager.name,
      employee = employee.name,
      unit = unit.name,
    ),
  )
}

/// Handle `employee.address.create`.
///
/// Sends one email per (org unit, manager) pair across the employee's
/// engagements, but only when the new address is the employee's one and only
/// email address. Vacant manager positions are skipped; a manager reached
/// through two engagements is notified twice.
pub async fn inform_manager_on_employee_address_creation<D, M>(
  directory: &D,
  mailer: &M,
  recipients: &[String],
  event: &ChangeEvent,
) -> Result<Outcome>
where
  D: Directory,
  M: Mailer,
{
  if event.routing_key != ADDRESS_CREATED {
    return Ok(Outcome::rejected(
      event,
      format!("Only listening to '{ADDRESS_CREATED}'"),
    ));
  }
  if event.object_uuid == event.uuid {
    return Ok(Outcome::rejected(
      event,
      "object uuid is the employee uuid; this is the creation of the employee",
    ));
  }

  let Some(address) = directory
    .address(event.object_uuid)
    .await
    .map_err(Error::directory)?
  else {
    return Ok(Outcome::rejected(event, "address not found"));
  };
  if !address.address_type.is_email() {
    let scope = address.address_type.scope.as_deref().unwrap_or("none");
    return Ok(Outcome::rejected(
      event,
      format!("address scope is {scope}, not EMAIL"),
    ));
  }
  if address.employee_uuid.is_none() {
    return Ok(Outcome::rejected(
      event,
      "address belongs to an org unit, not an employee",
    ));
  }

  let employee = directory
    .employee(event.uuid)
    .await
    .map_err(Error::directory)?;

  if !is_plausible_email(&address.value) {
    return Ok(Outcome::rejected(
      event,
      format!("{:?} is not a valid email address", address.value),
    ));
  }

  let email_count = employee.email_addresses().count();
  if email_count != 1 {
    return Ok(Outcome::rejected(
      event,
      format!(
        "employee has {email_count} email addresses; only a first email \
         address is reported"
      ),
    ));
  }

  if employee.engagements.is_empty() {
    tracing::debug!(uuid = %event.uuid, "employee has no engagements");
    return Ok(Outcome::Ignored);
  }

  let mut sent = 0;
  for engagement in &employee.engagements {
    let unit = directory
      .org_unit(engagement.org_unit_uuid)
      .await
      .map_err(Error::directory)?;

    for manager_uuid in unit.managers.iter().filter_map(|m| m.employee_uuid) {
      let manager = directory
        .employee(manager_uuid)
        .await
        .map_err(Error::directory)?;

      mailer
        .send(compose(recipients, &employee, &address.value, &unit, &manager))
        .await
        .map_err(Error::mail)?;
      sent += 1;

      tracing::info!(
        employee = %employee.uuid,
        manager = %manager_uuid,
        org_unit = %unit.uuid,
        "new email address reported"
      );
    }
  }

  if sent == 0 {
    tracing::info!(uuid = %event.uuid, "no managers found for employee");
    return Ok(Outcome::Ignored);
  }
  Ok(Outcome::Dispatched { count: sent })
}
