//! Handler for `POST /events`.
//!
//! Body:
//! `{"routing_key": "employee.address.create", "uuid": .., "object_uuid": ..,
//! "time": ..}`. Answers with one outcome per agent that handled the event.

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use orgmail_agents::{AgentOutcome, Agents};
use orgmail_core::{
  directory::Directory,
  event::{ChangeEvent, RoutingKey},
  mail::Mailer,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

/// The wire form of a [`ChangeEvent`]. The routing key stays a string here
/// so an unrecognized one can be logged and turned down.
#[derive(Debug, Deserialize)]
pub struct EventBody {
  pub routing_key: String,
  pub uuid:        Uuid,
  pub object_uuid: Uuid,
  pub time:        DateTime<Utc>,
}

/// `POST /events`
///
/// An unrecognized routing key is not an error: it is logged and answered
/// with an empty outcome list.
pub async fn receive<D, M>(
  State(agents): State<Arc<Agents<D, M>>>,
  Json(body): Json<EventBody>,
) -> Result<Json<Vec<AgentOutcome>>, ApiError>
where
  D: Directory,
  M: Mailer,
{
  let routing_key = match body.routing_key.parse::<RoutingKey>() {
    Ok(key) => key,
    Err(_) => {
      tracing::info!(
        routing_key = %body.routing_key,
        uuid = %body.uuid,
        object_uuid = %body.object_uuid,
        "unrecognized routing key {}",
        body.routing_key
      );
      return Ok(Json(Vec::new()));
    }
  };
  let event = ChangeEvent {
    routing_key,
    uuid: body.uuid,
    object_uuid: body.object_uuid,
    time: body.time,
  };

  tracing::debug!(
    routing_key = %event.routing_key,
    uuid = %event.uuid,
    object_uuid = %event.object_uuid,
    "event received"
  );
  Ok(Json(agents.dispatch(&event).await?))
}
