//! [`GraphqlDirectory`], the GraphQL implementation of [`Directory`].

use orgmail_core::{
  directory::Directory,
  entity::{Address, Employee, ManagerAssociation, OrgUnit},
};
use serde_json::json;
use uuid::Uuid;

use crate::{
  Error, Result,
  client::{DirectoryConfig, GraphqlClient},
  decode::{
    AddressesData, EmployeesData, ManagersData, OrgUnitsData, RootOrgData,
  },
  queries,
};

/// A directory backed by a GraphQL endpoint.
///
/// Cloning is cheap; see [`GraphqlClient`].
#[derive(Clone)]
pub struct GraphqlDirectory {
  client: GraphqlClient,
}

impl GraphqlDirectory {
  pub fn new(client: GraphqlClient) -> Self { Self { client } }

  pub fn from_config(config: &DirectoryConfig) -> Result<Self> {
    Ok(Self::new(GraphqlClient::new(config)?))
  }
}

impl Directory for GraphqlDirectory {
  type Error = Error;

  async fn employee(&self, uuid: Uuid) -> Result<Employee> {
    tracing::debug!(%uuid, "loading employee");
    let data: EmployeesData = self
      .client
      .execute(queries::EMPLOYEE, json!({ "uuid": uuid }))
      .await?;
    data.employees.current()
  }

  async fn address(&self, uuid: Uuid) -> Result<Option<Address>> {
    tracing::debug!(%uuid, "loading address");
    let data: AddressesData = self
      .client
      .execute(queries::ADDRESS, json!({ "uuid": uuid }))
      .await?;
    data.addresses.current_or_none()
  }

  async fn org_unit(&self, uuid: Uuid) -> Result<OrgUnit> {
    tracing::debug!(%uuid, "loading org unit");
    let data: OrgUnitsData = self
      .client
      .execute(queries::ORG_UNIT, json!({ "uuid": uuid }))
      .await?;
    data.org_units.current()
  }

  async fn manager(&self, uuid: Uuid) -> Result<ManagerAssociation> {
    tracing::debug!(%uuid, "loading manager");
    let data: ManagersData = self
      .client
      .execute(queries::MANAGER, json!({ "uuid": uuid }))
      .await?;
    data.managers.current()
  }

  async fn root_org(&self) -> Result<Uuid> {
    tracing::debug!("loading root organisation");
    let data: RootOrgData =
      self.client.execute(queries::ROOT_ORG, json!({})).await?;
    Ok(data.org.uuid)
  }
}
