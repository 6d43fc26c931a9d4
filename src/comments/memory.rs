use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::repository::{CommentPageQuery, CommentRepository};
use crate::error::AppError;
use crate::models::{CommentKey, CommentRecord, SortDirection, SortField};

/// Process-local comment store.
///
/// Records are kept in insertion order, which is also the tie-breaker when
/// sorting. Used when no database is configured, and throughout the tests.
#[derive(Debug, Default)]
pub struct InMemoryCommentRepository {
    records: Mutex<Vec<CommentRecord>>,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> Result<MutexGuard<'_, Vec<CommentRecord>>, AppError> {
        self.records
            .lock()
            .map_err(|_| AppError::InternalServerError("comment store lock poisoned".into()))
    }
}

fn sort_key(record: &CommentRecord, field: SortField) -> DateTime<Utc> {
    match field {
        SortField::CreatedAt => record.created_at,
        SortField::UpdatedAt => record.updated_at.unwrap_or(record.created_at),
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn create(&self, record: CommentRecord) -> Result<CommentRecord, AppError> {
        self.records()?.push(record.clone());
        Ok(record)
    }

    async fn find_one(&self, key: &CommentKey) -> Result<Option<CommentRecord>, AppError> {
        Ok(self.records()?.iter().find(|r| r.matches(key)).cloned())
    }

    async fn find_page(&self, query: &CommentPageQuery) -> Result<Vec<CommentRecord>, AppError> {
        let records = self.records()?;
        let mut matching: Vec<&CommentRecord> = records
            .iter()
            .filter(|r| r.active && r.task_id == query.task_id && r.account_id == query.account_id)
            .collect();

        // Stable sorts keep insertion order among equal keys.
        let field = query.sort.sort_by;
        match query.sort.sort_direction {
            SortDirection::Asc => matching.sort_by_key(|r| sort_key(r, field)),
            SortDirection::Desc => {
                matching.reverse();
                matching.sort_by(|a, b| sort_key(b, field).cmp(&sort_key(a, field)));
            }
        }

        let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
        Ok(matching
            .into_iter()
            .skip(offset)
            .take(query.limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self, task_id: Uuid, account_id: Uuid) -> Result<u64, AppError> {
        let count = self
            .records()?
            .iter()
            .filter(|r| r.active && r.task_id == task_id && r.account_id == account_id)
            .count();
        Ok(count as u64)
    }

    async fn update_content(
        &self,
        key: &CommentKey,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<CommentRecord>, AppError> {
        let mut records = self.records()?;
        Ok(records.iter_mut().find(|r| r.matches(key)).map(|record| {
            record.content = content.to_string();
            record.updated_at = Some(updated_at);
            record.clone()
        }))
    }

    async fn delete(&self, key: &CommentKey) -> Result<bool, AppError> {
        let mut records = self.records()?;
        let before = records.len();
        records.retain(|r| !r.matches(key));
        Ok(records.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SortParams;
    use pretty_assertions::assert_eq;

    fn page_query(task_id: Uuid, account_id: Uuid, sort: SortParams) -> CommentPageQuery {
        CommentPageQuery {
            task_id,
            account_id,
            sort,
            offset: 0,
            limit: 10,
        }
    }

    #[actix_rt::test]
    async fn test_pages_are_scoped_to_task_and_account() {
        let repository = InMemoryCommentRepository::new();
        let task_id = Uuid::new_v4();
        let account_id = Uuid::new_v4();

        repository
            .create(CommentRecord::new(task_id, account_id, "mine".into()))
            .await
            .unwrap();
        repository
            .create(CommentRecord::new(task_id, Uuid::new_v4(), "someone else".into()))
            .await
            .unwrap();
        repository
            .create(CommentRecord::new(Uuid::new_v4(), account_id, "other task".into()))
            .await
            .unwrap();

        let page = repository
            .find_page(&page_query(task_id, account_id, SortParams::default()))
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].content, "mine");
        assert_eq!(repository.count(task_id, account_id).await.unwrap(), 1);
    }

    #[actix_rt::test]
    async fn test_descending_order_reverses_insertion_order_on_ties() {
        let repository = InMemoryCommentRepository::new();
        let task_id = Uuid::new_v4();
        let account_id = Uuid::new_v4();
        let created_at = Utc::now();

        for content in ["a", "b", "c"] {
            let record = CommentRecord {
                created_at,
                ..CommentRecord::new(task_id, account_id, content.into())
            };
            repository.create(record).await.unwrap();
        }

        let ascending = repository
            .find_page(&page_query(task_id, account_id, SortParams::default()))
            .await
            .unwrap();
        let descending = repository
            .find_page(&page_query(
                task_id,
                account_id,
                SortParams {
                    sort_by: SortField::CreatedAt,
                    sort_direction: SortDirection::Desc,
                },
            ))
            .await
            .unwrap();

        let contents = |records: &[CommentRecord]| {
            records.iter().map(|r| r.content.clone()).collect::<Vec<_>>()
        };
        assert_eq!(contents(&ascending), vec!["a", "b", "c"]);
        assert_eq!(contents(&descending), vec!["c", "b", "a"]);
    }

    #[actix_rt::test]
    async fn test_inactive_records_are_invisible() {
        let repository = InMemoryCommentRepository::new();
        let record = CommentRecord {
            active: false,
            ..CommentRecord::new(Uuid::new_v4(), Uuid::new_v4(), "hidden".into())
        };
        let key = CommentKey {
            task_id: record.task_id,
            comment_id: record.id,
            account_id: record.account_id,
        };
        repository.create(record.clone()).await.unwrap();

        assert!(repository.find_one(&key).await.unwrap().is_none());
        assert_eq!(
            repository
                .count(record.task_id, record.account_id)
                .await
                .unwrap(),
            0
        );
        assert!(!repository.delete(&key).await.unwrap());
    }
}
