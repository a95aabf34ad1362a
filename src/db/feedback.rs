use std::collections::HashSet;

use sqlx::{Row, SqlitePool};

use crate::{
    error::AppResult,
    models::{Category, UserFeedbackRecord},
};

/// Append-only store for user feedback
///
/// Backs the historical-preference and content-similarity personalization
/// passes. Queries reconstruct derived data from scratch on every call; there
/// is no cached per-user state.
#[derive(Clone)]
pub struct FeedbackStore {
    pool: SqlitePool,
}

impl FeedbackStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Appends a single feedback record
    pub async fn record(&self, record: &UserFeedbackRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO feedback (user_id, place_id, liked, category, timestamp)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.user_id)
        .bind(&record.place_id)
        .bind(record.liked)
        .bind(record.category.label())
        .bind(record.timestamp.to_rfc3339())
        .execute(&self.pool)
        .await?;

        tracing::debug!(
            user_id = %record.user_id,
            place_id = %record.place_id,
            liked = record.liked,
            category = %record.category,
            "Feedback recorded"
        );

        Ok(())
    }

    /// Categories of the places a user marked as liked
    pub async fn liked_categories(&self, user_id: &str) -> AppResult<HashSet<Category>> {
        let rows = sqlx::query(
            r#"
            SELECT DISTINCT category
            FROM feedback
            WHERE user_id = ? AND liked = 1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let mut categories = HashSet::new();
        for row in rows {
            let label: String = row.get("category");
            // Rows written before a category was retired are skipped, not errors
            if let Some(category) = Category::from_label(&label) {
                categories.insert(category);
            } else {
                tracing::warn!(label = %label, "Unknown category label in feedback log");
            }
        }

        Ok(categories)
    }

    /// Identifiers of the places a user marked as liked, oldest first
    pub async fn liked_place_ids(&self, user_id: &str) -> AppResult<Vec<String>> {
        let rows = sqlx::query(
            r#"
            SELECT place_id
            FROM feedback
            WHERE user_id = ? AND liked = 1
            GROUP BY place_id
            ORDER BY MIN(id)
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(|row| row.get("place_id")).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::init_schema;
    use sqlx::sqlite::SqlitePoolOptions;

    // In-memory SQLite is per-connection, so tests pin the pool to one
    async fn create_test_store() -> FeedbackStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        init_schema(&pool).await.unwrap();
        FeedbackStore::new(pool)
    }

    fn record(user: &str, place: &str, liked: bool, category: Category) -> UserFeedbackRecord {
        UserFeedbackRecord::new(user.to_string(), place.to_string(), liked, category)
    }

    #[tokio::test]
    async fn test_liked_categories_empty_for_unknown_user() {
        let store = create_test_store().await;
        let categories = store.liked_categories("nobody").await.unwrap();
        assert!(categories.is_empty());
    }

    #[tokio::test]
    async fn test_record_and_query_liked_categories() {
        let store = create_test_store().await;

        store
            .record(&record("u1", "p1", true, Category::FoodQuality))
            .await
            .unwrap();
        store
            .record(&record("u1", "p2", true, Category::FoodQuality))
            .await
            .unwrap();
        store
            .record(&record("u1", "p3", false, Category::Ambiance))
            .await
            .unwrap();
        store
            .record(&record("u2", "p4", true, Category::ServiceQuality))
            .await
            .unwrap();

        let categories = store.liked_categories("u1").await.unwrap();
        // Disliked and other-user rows are excluded
        assert_eq!(categories, HashSet::from([Category::FoodQuality]));
    }

    #[tokio::test]
    async fn test_liked_place_ids_deduplicated_in_order() {
        let store = create_test_store().await;

        store
            .record(&record("u1", "p1", true, Category::Ambiance))
            .await
            .unwrap();
        store
            .record(&record("u1", "p2", true, Category::FoodQuality))
            .await
            .unwrap();
        store
            .record(&record("u1", "p1", true, Category::ValueForMoney))
            .await
            .unwrap();
        store
            .record(&record("u1", "p3", false, Category::Ambiance))
            .await
            .unwrap();

        let place_ids = store.liked_place_ids("u1").await.unwrap();
        assert_eq!(place_ids, vec!["p1".to_string(), "p2".to_string()]);
    }
}
