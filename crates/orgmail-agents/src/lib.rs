//! Notification agents for orgmail.
//!
//! Each agent reacts to one kind of [`ChangeEvent`], gathers what it needs
//! from the [`Directory`], applies its business rules and, when they pass,
//! hands an [`Email`](orgmail_core::mail::Email) to the [`Mailer`].
//!
//! The [`Agents`] table is built once at startup from the configured list of
//! active agents and shared by reference with the event intake.

pub mod address;
pub mod error;
pub mod manager;
pub mod path;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use orgmail_core::{
  directory::Directory,
  event::{ChangeEvent, ObjectType, RoutingKey},
  mail::Mailer,
};
use serde::{Deserialize, Serialize};

pub use error::{Error, Result};

// ─── Outcomes ────────────────────────────────────────────────────────────────

/// How an agent finished handling an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
  /// A business rule turned the event down; the reason has been logged.
  Rejected { reason: String },
  /// Nothing to notify about.
  Ignored,
  /// This many emails were handed to the mailer.
  Dispatched { count: usize },
}

impl Outcome {
  /// Log `reason` at info level and return a rejection.
  pub(crate) fn rejected(
    event: &ChangeEvent,
    reason: impl Into<String>,
  ) -> Self {
    let reason = reason.into();
    tracing::info!(
      routing_key = %event.routing_key,
      uuid = %event.uuid,
      object_uuid = %event.object_uuid,
      "{reason}"
    );
    Self::Rejected { reason }
  }
}

// ─── Registry ────────────────────────────────────────────────────────────────

/// The agents that can be switched on in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
  InformManagerOnEmployeeAddressCreation,
  AlertOnManagerRemoval,
}

impl AgentKind {
  pub const ALL: [AgentKind; 2] = [
    AgentKind::InformManagerOnEmployeeAddressCreation,
    AgentKind::AlertOnManagerRemoval,
  ];

  /// Whether events with `key` are routed to this agent.
  ///
  /// Routing is by object type only; each agent checks the rest itself.
  pub fn subscribes(&self, key: &RoutingKey) -> bool {
    match self {
      Self::InformManagerOnEmployeeAddressCreation => {
        key.object_type == ObjectType::Address
      }
      Self::AlertOnManagerRemoval => key.object_type == ObjectType::Manager,
    }
  }
}

/// One agent's result for an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentOutcome {
  pub agent:   AgentKind,
  #[serde(flatten)]
  pub outcome: Outcome,
}

/// The handler table: the active agents plus the collaborators they share.
pub struct Agents<D, M> {
  directory:  Arc<D>,
  mailer:     Arc<M>,
  recipients: Vec<String>,
  active:     Vec<AgentKind>,
}

impl<D, M> Agents<D, M>
where
  D: Directory,
  M: Mailer,
{
  pub fn new(
    directory: Arc<D>,
    mailer: Arc<M>,
    recipients: Vec<String>,
    active: Vec<AgentKind>,
  ) -> Self {
    Self { directory, mailer, recipients, active }
  }

  pub fn active(&self) -> &[AgentKind] { &self.active }

  /// Run every active agent subscribed to the event's routing key, in
  /// configuration order.
  ///
  /// The first collaborator error aborts the event; agents after it do not
  /// run.
  pub async fn dispatch(
    &self,
    event: &ChangeEvent,
  ) -> Result<Vec<AgentOutcome>> {
    let mut outcomes = Vec::new();

    for &agent in &self.active {
      if !agent.subscribes(&event.routing_key) {
        continue;
      }
      let outcome = match agent {
        AgentKind::InformManagerOnEmployeeAddressCreation => {
          address::inform_manager_on_employee_address_creation(
            self.directory.as_ref(),
            self.mailer.as_ref(),
            &self.recipients,
            event,
          )
          .await?
        }
        AgentKind::AlertOnManagerRemoval => {
          manager::alert_on_manager_removal(
            self.directory.as_ref(),
            self.mailer.as_ref(),
            &self.recipients,
            event,
          )
          .await?
        }
      };
      outcomes.push(AgentOutcome { agent, outcome });
    }

    if outcomes.is_empty() {
      tracing::info!(
        routing_key = %event.routing_key,
        "no active agent listens to this routing key"
      );
    }
    Ok(outcomes)
  }
}
