//! The `Directory` trait: read access to the organisation directory.
//!
//! The trait is implemented by directory backends (e.g. `orgmail-graphql`).
//! The agents depend on this abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::entity::{Address, Employee, ManagerAssociation, OrgUnit};

/// Abstraction over the directory service.
///
/// Every method is a single round trip that returns the entity's current
/// version, chosen with [`crate::validity::select_current`]. Transport and
/// protocol failures surface as `Self::Error` unchanged; implementations do
/// not retry.
///
/// All methods return `Send` futures so agents can run on a multi-threaded
/// tokio runtime behind `axum`.
pub trait Directory: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch an employee with their addresses and engagements.
  fn employee(
    &self,
    uuid: Uuid,
  ) -> impl Future<Output = Result<Employee, Self::Error>> + Send + '_;

  /// Fetch an address. Returns `None` if the directory has no such address.
  fn address(
    &self,
    uuid: Uuid,
  ) -> impl Future<Output = Result<Option<Address>, Self::Error>> + Send + '_;

  /// Fetch an org unit with its parent reference and managers.
  fn org_unit(
    &self,
    uuid: Uuid,
  ) -> impl Future<Output = Result<OrgUnit, Self::Error>> + Send + '_;

  /// Fetch a manager association.
  fn manager(
    &self,
    uuid: Uuid,
  ) -> impl Future<Output = Result<ManagerAssociation, Self::Error>>
  + Send
  + '_;

  /// Fetch the identifier of the root organisation.
  fn root_org(
    &self,
  ) -> impl Future<Output = Result<Uuid, Self::Error>> + Send + '_;
}
