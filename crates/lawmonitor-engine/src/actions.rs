//! Action item workflow.

use chrono::Utc;
use lawmonitor_core::{ActionItem, ActionStatus, NewAction};
use lawmonitor_store::ActionFilter;
use tracing::info;

use crate::{Monitor, WorkflowError, non_blank};

impl Monitor {
    /// Create a PENDING action. The title must be non-blank and a given
    /// `law_change_id` must refer to an existing change.
    pub async fn create_action(&self, input: NewAction) -> Result<ActionItem, WorkflowError> {
        let title = input.title.trim().to_string();
        if title.is_empty() {
            return Err(WorkflowError::validation("action title is required"));
        }
        if let Some(change_id) = input.law_change_id {
            if self.store.get_change(change_id).await?.is_none() {
                return Err(WorkflowError::not_found("change", change_id));
            }
        }

        let item = self
            .store
            .insert_action(NewAction {
                title,
                description: non_blank(input.description),
                assigned_to: non_blank(input.assigned_to),
                ..input
            })
            .await?;
        info!(action_id = item.id, priority = %item.priority, "action created");
        Ok(item)
    }

    /// Move an action one step along PENDING → IN_PROGRESS → COMPLETED.
    pub async fn advance_status(
        &self,
        action_id: i64,
        target: ActionStatus,
    ) -> Result<ActionItem, WorkflowError> {
        let mut item = self.action(action_id).await?;
        item.advance(target, Utc::now())?;
        self.store.update_action(&item).await?;
        info!(action_id, status = %item.status, "action status changed");
        Ok(item)
    }

    /// Replace the action's notes. Blank text clears them.
    pub async fn set_note(&self, action_id: i64, text: &str) -> Result<ActionItem, WorkflowError> {
        let mut item = self.action(action_id).await?;
        item.notes = (!text.trim().is_empty()).then(|| text.to_string());
        self.store.update_action(&item).await?;
        Ok(item)
    }

    pub async fn list_actions(
        &self,
        filter: &ActionFilter,
    ) -> Result<Vec<ActionItem>, WorkflowError> {
        Ok(self.store.list_actions(filter).await?)
    }

    async fn action(&self, action_id: i64) -> Result<ActionItem, WorkflowError> {
        self.store
            .get_action(action_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("action", action_id))
    }
}
