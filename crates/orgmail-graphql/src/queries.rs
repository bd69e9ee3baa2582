//! GraphQL documents sent to the directory.
//!
//! Every entity query filters on a single `$uuid` and asks for all
//! validities so the current one can be chosen client-side.

pub const EMPLOYEE: &str = "
query GetEmployee($uuid: UUID!) {
  employees(filter: { uuids: [$uuid] }) {
    objects {
      validities {
        uuid
        name
        addresses {
          value
          address_type { scope }
        }
        engagements { org_unit_uuid }
        validity { from to }
      }
    }
  }
}";

pub const ADDRESS: &str = "
query GetAddress($uuid: UUID!) {
  addresses(filter: { uuids: [$uuid] }) {
    objects {
      validities {
        uuid
        value
        address_type { scope }
        employee_uuid
        validity { from to }
      }
    }
  }
}";

pub const ORG_UNIT: &str = "
query GetOrgUnit($uuid: UUID!) {
  org_units(filter: { uuids: [$uuid] }) {
    objects {
      validities {
        uuid
        name
        user_key
        parent_uuid
        managers { employee_uuid }
        validity { from to }
      }
    }
  }
}";

pub const MANAGER: &str = "
query GetManager($uuid: UUID!) {
  managers(filter: { uuids: [$uuid] }) {
    objects {
      validities {
        uuid
        employee_uuid
        org_unit_uuid
        validity { from to }
      }
    }
  }
}";

pub const ROOT_ORG: &str = "
query GetRootOrg {
  org { uuid }
}";
