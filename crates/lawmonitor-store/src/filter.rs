//! Query filters shared by every backend.

use lawmonitor_core::{ActionItem, ActionStatus, Change, Law, Priority};

/// Filter over tracked laws. `text` is a case-insensitive substring match on
/// name or content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LawFilter {
    pub active: Option<bool>,
    pub text: Option<String>,
    pub limit: Option<usize>,
}

impl LawFilter {
    pub fn active() -> Self {
        Self {
            active: Some(true),
            ..Self::default()
        }
    }

    pub fn matches(&self, law: &Law) -> bool {
        if self.active.is_some_and(|a| a != law.is_active) {
            return false;
        }
        match &self.text {
            Some(text) => {
                let needle = text.to_lowercase();
                law.law_name.to_lowercase().contains(&needle)
                    || law.content.to_lowercase().contains(&needle)
            }
            None => true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeFilter {
    pub reviewed: Option<bool>,
    pub law_id: Option<String>,
    pub limit: Option<usize>,
}

impl ChangeFilter {
    pub fn unreviewed() -> Self {
        Self {
            reviewed: Some(false),
            ..Self::default()
        }
    }

    pub fn recent(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn matches(&self, change: &Change) -> bool {
        self.reviewed.is_none_or(|r| r == change.is_reviewed)
            && self.law_id.as_ref().is_none_or(|id| *id == change.law_id)
    }
}

/// Filter over action items. An empty `statuses` set matches nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionFilter {
    pub statuses: Option<Vec<ActionStatus>>,
    pub priority: Option<Priority>,
    pub limit: Option<usize>,
}

impl ActionFilter {
    /// Actions still PENDING or IN_PROGRESS.
    pub fn open() -> Self {
        Self {
            statuses: Some(ActionStatus::OPEN.to_vec()),
            ..Self::default()
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, action: &ActionItem) -> bool {
        self.statuses
            .as_ref()
            .is_none_or(|set| set.contains(&action.status))
            && self.priority.is_none_or(|p| p == action.priority)
    }
}
