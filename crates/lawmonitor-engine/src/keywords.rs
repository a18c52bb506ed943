use lawmonitor_core::{Keyword, NewKeyword};
use tracing::info;

use crate::{Monitor, WorkflowError, non_blank};

impl Monitor {
    pub async fn add_keyword(&self, input: NewKeyword) -> Result<Keyword, WorkflowError> {
        let keyword = input.keyword.trim().to_string();
        if keyword.is_empty() {
            return Err(WorkflowError::validation("keyword is required"));
        }
        let kw = self
            .store
            .insert_keyword(NewKeyword {
                keyword,
                category: non_blank(input.category),
                description: non_blank(input.description),
            })
            .await?;
        info!(keyword_id = kw.id, keyword = %kw.keyword, "keyword added");
        Ok(kw)
    }

    pub async fn delete_keyword(&self, keyword_id: i64) -> Result<(), WorkflowError> {
        if !self.store.delete_keyword(keyword_id).await? {
            return Err(WorkflowError::not_found("keyword", keyword_id));
        }
        info!(keyword_id, "keyword deleted");
        Ok(())
    }

    /// Newest first.
    pub async fn list_keywords(&self) -> Result<Vec<Keyword>, WorkflowError> {
        Ok(self.store.list_keywords().await?)
    }
}
