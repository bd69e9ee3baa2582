//! Human-readable org-unit locations.

use orgmail_core::{directory::Directory, entity::OrgUnit};

/// Build the `/`-separated path from the top of the tree down to `unit`,
/// e.g. `"Rolling / Stones"`. The root organisation itself is not included.
///
/// Parents are fetched one at a time, since each fetch names the next. There
/// is no cycle detection: a hierarchy whose parent chain loops without
/// passing through the root never terminates.
pub async fn resolve_path<D: Directory>(
  directory: &D,
  unit: &OrgUnit,
) -> Result<String, D::Error> {
  let root = directory.root_org().await?;
  let mut path = unit.name.clone();
  let mut parent = unit.parent_uuid;

  while let Some(parent_uuid) = parent.filter(|uuid| *uuid != root) {
    let parent_unit = directory.org_unit(parent_uuid).await?;
    path = format!("{} / {path}", parent_unit.name);
    parent = parent_unit.parent_uuid;
  }

  Ok(path)
}
