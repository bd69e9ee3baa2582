//! Validity windows and current-version selection.
//!
//! Every versioned directory record carries a `(from, to)` window. A missing
//! `from` means the record has been valid since the beginning of time; a
//! missing `to` means it stays valid indefinitely. All bounds are held in UTC.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, Result};

// ─── Window ──────────────────────────────────────────────────────────────────

/// The time span during which a record version is authoritative.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
pub struct Validity {
  #[serde(default, deserialize_with = "deserialize_bound")]
  pub from: Option<DateTime<Utc>>,
  #[serde(default, deserialize_with = "deserialize_bound")]
  pub to:   Option<DateTime<Utc>>,
}

impl Validity {
  pub fn new(
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
  ) -> Self {
    Self { from, to }
  }

  /// Whether the window has started and not yet ended at `now`.
  ///
  /// A window with neither bound never counts as current here. It can only
  /// be chosen as the fallback candidate in [`select_current_at`].
  fn is_current_at(&self, now: DateTime<Utc>) -> bool {
    match (self.from, self.to) {
      (Some(from), Some(to)) => from < now && now < to,
      (Some(from), None) => now > from,
      (None, Some(to)) => now < to,
      (None, None) => false,
    }
  }
}

/// Parse a directory timestamp and normalise it to UTC.
///
/// Accepts RFC 3339 (`2023-02-27T00:00:00+01:00`) as well as the
/// seconds-less form (`2020-01-01T00:00+02:00`).
pub fn parse_timestamp(
  raw: &str,
) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
  DateTime::parse_from_rfc3339(raw)
    .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M%:z"))
    .map(|dt| dt.with_timezone(&Utc))
}

fn deserialize_bound<'de, D>(
  deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
  D: Deserializer<'de>,
{
  Option::<String>::deserialize(deserializer)?
    .map(|raw| parse_timestamp(&raw).map_err(serde::de::Error::custom))
    .transpose()
}

// ─── Selection ───────────────────────────────────────────────────────────────

/// A record version bounded by a [`Validity`] window.
pub trait Versioned {
  fn validity(&self) -> &Validity;
}

/// Select the current version of an entity, as of now.
pub fn select_current<T: Versioned>(records: Vec<T>) -> Result<T> {
  select_current_at(records, Utc::now())
}

/// Select the version of an entity that is current at `now`.
///
/// A single record is returned as-is, expired or not. Otherwise the first
/// record whose window contains `now` wins. Failing that, the record with the
/// latest `to` bound is returned, where a missing `to` outranks any finite
/// one.
pub fn select_current_at<T: Versioned>(
  records: Vec<T>,
  now: DateTime<Utc>,
) -> Result<T> {
  if records.len() <= 1 {
    return records.into_iter().next().ok_or(Error::EmptyInput);
  }

  let mut candidate: Option<T> = None;
  for record in records {
    let validity = *record.validity();
    if validity.is_current_at(now) {
      return Ok(record);
    }

    let replace = match (&candidate, validity.to) {
      (None, _) | (Some(_), None) => true,
      (Some(current), Some(to)) => {
        current.validity().to.is_some_and(|latest| to > latest)
      }
    };
    if replace {
      candidate = Some(record);
    }
  }

  candidate.ok_or(Error::EmptyInput)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
