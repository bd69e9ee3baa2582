//! Alert when a manager is removed from an org unit.

use chrono::{DateTime, Utc};
use orgmail_core::{
  directory::Directory,
  event::{ChangeEvent, ObjectType},
  mail::{Email, Mailer},
};

use crate::{Error, Outcome, Result, path::resolve_path};

pub const SUBJECT: &str = "Manager removed";

/// Handle a change to a manager association, as of now.
pub async fn alert_on_manager_removal<D, M>(
  directory: &D,
  mailer: &M,
  recipients: &[String],
  event: &ChangeEvent,
) -> Result<Outcome>
where
  D: Directory,
  M: Mailer,
{
  alert_on_manager_removal_at(directory, mailer, recipients, event, Utc::now())
    .await
}

/// Handle a change to a manager association, as of `now`.
///
/// A removal is effective once the association's `to` bound is at or before
/// `now`; exactly one alert is sent for it. Open-ended and future-dated
/// associations are logged and left alone.
pub async fn alert_on_manager_removal_at<D, M>(
  directory: &D,
  mailer: &M,
  recipients: &[String],
  event: &ChangeEvent,
  now: DateTime<Utc>,
) -> Result<Outcome>
where
  D: Directory,
  M: Mailer,
{
  if event.routing_key.object_type != ObjectType::Manager {
    return Ok(Outcome::rejected(event, "Only listening to manager events"));
  }

  let manager = directory
    .manager(event.object_uuid)
    .await
    .map_err(Error::directory)?;

  let Some(to) = manager.validity.to else {
    return Ok(Outcome::rejected(
      event,
      "manager has no end date and is still employed as manager",
    ));
  };
  if to > now {
    return Ok(Outcome::rejected(
      event,
      format!("manager removal takes effect at {to}; not yet effective"),
    ));
  }

  let unit = directory
    .org_unit(manager.org_unit_uuid)
    .await
    .map_err(Error::directory)?;

  let body = match manager.employee_uuid {
    None => format!(
      "An unknown employee has been removed as manager of {key}.\n",
      key = unit.user_key,
    ),
    Some(employee_uuid) => {
      let employee = directory
        .employee(employee_uuid)
        .await
        .map_err(Error::directory)?;
      let location = resolve_path(directory, &unit)
        .await
        .map_err(Error::directory)?;

      format!(
        "{name} has been removed as manager of {key}.\n\
         Org unit location: {location}\n",
        name = employee.name,
        key = unit.user_key,
      )
    }
  };

  mailer
    .send(Email::new(recipients.to_vec(), SUBJECT, body))
    .await
    .map_err(Error::mail)?;

  tracing::info!(
    manager = %manager.uuid,
    org_unit = %manager.org_unit_uuid,
    "manager removal reported"
  );
  Ok(Outcome::Dispatched { count: 1 })
}

#[cfg(test)]
mod tests {
  use chrono::{Duration, TimeZone};
  use orgmail_core::{entity::ManagerAssociation, validity::Validity};
  use tracing_test::traced_test;
  use uuid::Uuid;

  use super::*;
  use crate::testing::{
    Call, FakeDirectory, RecordingMailer, employee, org_unit,
  };

  fn recipients() -> Vec<String> { vec!["hr@example.org".to_string()] }

  fn terminated(association: Uuid, unit: Uuid) -> ChangeEvent {
    ChangeEvent {
      routing_key: "org_unit.manager.terminate".parse().unwrap(),
      uuid:        unit,
      object_uuid: association,
      time:        Utc::now(),
    }
  }

  /// The Rolling / Stones hierarchy with a manager association on Stones.
  struct Fixture {
    dir:      FakeDirectory,
    mailer:   RecordingMailer,
    event:    ChangeEvent,
    rolling:  Uuid,
    stones:   Uuid,
    employee: Uuid,
  }

  fn fixture(
    employee_uuid: Option<Uuid>,
    to: Option<DateTime<Utc>>,
  ) -> Fixture {
    let mut dir = FakeDirectory::default();
    let (rolling, stones) = (Uuid::new_v4(), Uuid::new_v4());
    let association = Uuid::new_v4();
    let mick = employee_uuid.unwrap_or_else(Uuid::new_v4);

    let root = dir.root;
    let parent = Some(rolling);
    dir.add_org_unit(org_unit(rolling, "Rolling", "rolling", Some(root), &[]));
    dir.add_org_unit(org_unit(stones, "Stones", "123stones", parent, &[]));
    dir.add_employee(employee(mick, "Mick Jagger", &[], &[]));
    dir.add_manager(ManagerAssociation {
      uuid:          association,
      employee_uuid,
      org_unit_uuid: stones,
      validity:      Validity::new(Some(Utc::now() - Duration::days(365)), to),
    });

    Fixture {
      dir,
      mailer: RecordingMailer::default(),
      event: terminated(association, stones),
      rolling,
      stones,
      employee: mick,
    }
  }

  async fn run(f: &Fixture) -> Result<Outcome> {
    alert_on_manager_removal(&f.dir, &f.mailer, &recipients(), &f.event).await
  }

  #[tokio::test]
  #[traced_test]
  async fn open_ended_manager_is_still_employed() {
    let f = fixture(Some(Uuid::new_v4()), None);

    let outcome = run(&f).await.unwrap();
    assert!(matches!(outcome, Outcome::Rejected { .. }));
    assert!(logs_contain("still employed as manager"));
    assert!(f.mailer.sent().is_empty());
    assert_eq!(f.dir.calls(), vec![Call::Manager(f.event.object_uuid)]);
  }

  #[tokio::test]
  #[traced_test]
  async fn future_removal_is_not_yet_effective() {
    let f = fixture(Some(Uuid::new_v4()), Some(Utc::now() + Duration::days(7)));

    let outcome = run(&f).await.unwrap();
    assert!(matches!(outcome, Outcome::Rejected { .. }));
    assert!(logs_contain("not yet effective"));
    assert!(f.mailer.sent().is_empty());
  }

  #[tokio::test]
  async fn past_removal_sends_one_alert_with_location() {
    let f = fixture(Some(Uuid::new_v4()), Some(Utc::now() - Duration::days(1)));

    let outcome = run(&f).await.unwrap();
    assert_eq!(outcome, Outcome::Dispatched { count: 1 });

    let sent = f.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, recipients());
    assert_eq!(sent[0].subject, SUBJECT);
    let body = &sent[0].body;
    assert!(body.contains("Mick Jagger"), "{body}");
    assert!(body.contains("123stones"), "{body}");
    assert!(body.contains("Rolling / Stones"), "{body}");

    assert_eq!(
      f.dir.calls(),
      vec![
        Call::Manager(f.event.object_uuid),
        Call::OrgUnit(f.stones),
        Call::Employee(f.employee),
        Call::RootOrg,
        Call::OrgUnit(f.rolling),
      ]
    );
  }

  #[tokio::test]
  async fn unknown_employee_is_reported_by_unit_key() {
    let f = fixture(None, Some(Utc::now() - Duration::days(1)));

    let outcome = run(&f).await.unwrap();
    assert_eq!(outcome, Outcome::Dispatched { count: 1 });

    let sent = f.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].body.contains("unknown employee"), "{}", sent[0].body);
    assert!(sent[0].body.contains("123stones"), "{}", sent[0].body);
    assert_eq!(
      f.dir.calls(),
      vec![Call::Manager(f.event.object_uuid), Call::OrgUnit(f.stones)]
    );
  }

  #[tokio::test]
  async fn removal_ending_exactly_now_is_effective() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let f = fixture(Some(Uuid::new_v4()), Some(now));

    let outcome = alert_on_manager_removal_at(
      &f.dir,
      &f.mailer,
      &recipients(),
      &f.event,
      now,
    )
    .await
    .unwrap();
    assert_eq!(outcome, Outcome::Dispatched { count: 1 });
    assert_eq!(f.mailer.sent().len(), 1);
  }

  #[tokio::test]
  async fn removal_a_second_after_now_is_not_yet_effective() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let f = fixture(Some(Uuid::new_v4()), Some(now + Duration::seconds(1)));

    let outcome = alert_on_manager_removal_at(
      &f.dir,
      &f.mailer,
      &recipients(),
      &f.event,
      now,
    )
    .await
    .unwrap();
    assert!(matches!(outcome, Outcome::Rejected { .. }));
    assert!(f.mailer.sent().is_empty());
  }

  #[tokio::test]
  async fn missing_association_propagates() {
    let f = fixture(None, None);
    let mut event = f.event.clone();
    event.object_uuid = Uuid::new_v4();

    let result =
      alert_on_manager_removal(&f.dir, &f.mailer, &recipients(), &event).await;
    assert!(matches!(result, Err(Error::Directory(_))));
  }
}
