//! Item entity and its repository.
//!
//! The repository is the only component permitted to speak to the store: it
//! owns all statement construction and row-to-domain mapping. Every
//! operation is a single statement on an injected pool; no connection is
//! held across calls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::error::Result;
use crate::validation::{ItemPatch, NewItem};

/// An inventory item as stored. Maps to the `items` table.
///
/// `id` and `created_at` are store-assigned on insert and immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Item {
    pub id: i32,
    pub name: String,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

const RETURNING_COLUMNS: &str = "id, name, quantity, created_at";

/// The closed set of client-updatable columns.
///
/// Dynamic update statements take their column text exclusively from this
/// enum, so raw request keys can never reach statement text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemColumn {
    Name,
    Quantity,
}

impl ItemColumn {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemColumn::Name => "name",
            ItemColumn::Quantity => "quantity",
        }
    }
}

/// Builds the dynamic UPDATE for a partial change.
///
/// The SET list contains exactly the columns present in `patch`, in
/// declaration order, each bound as a parameter; the id is bound last.
/// Callers must not pass an empty patch.
fn patch_update_query(id: i32, patch: &ItemPatch) -> QueryBuilder<'static, Postgres> {
    let mut builder: QueryBuilder<'static, Postgres> = QueryBuilder::new("UPDATE items SET ");
    let mut set_list = builder.separated(", ");

    if let Some(name) = &patch.name {
        set_list.push(ItemColumn::Name.as_str());
        set_list.push_unseparated(" = ");
        set_list.push_bind_unseparated(name.clone());
    }
    if let Some(quantity) = patch.quantity {
        set_list.push(ItemColumn::Quantity.as_str());
        set_list.push_unseparated(" = ");
        set_list.push_bind_unseparated(quantity);
    }

    builder.push(" WHERE id = ");
    builder.push_bind(id);
    builder.push(" RETURNING ");
    builder.push(RETURNING_COLUMNS);
    builder
}

/// Parameterized access to the `items` table over an injected pool.
///
/// Store failures surface as [`StoreError`](crate::error::StoreError)
/// results; an absent row is a normal outcome (`None` or a zero
/// affected-row count), never an error.
#[derive(Clone)]
pub struct ItemRepository {
    pool: PgPool,
}

impl ItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a validated item and return the stored record, including the
    /// store-assigned `id` and `created_at`.
    pub async fn create(&self, new_item: NewItem) -> Result<Item> {
        let item = sqlx::query_as::<_, Item>(
            "INSERT INTO items (name, quantity) \
             VALUES ($1, $2) \
             RETURNING id, name, quantity, created_at",
        )
        .bind(new_item.name)
        .bind(new_item.quantity)
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    /// All items, ordered by ascending id.
    pub async fn list_all(&self) -> Result<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT id, name, quantity, created_at \
             FROM items \
             ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Look up one item by id. Absence is `None`, not an error.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            "SELECT id, name, quantity, created_at \
             FROM items \
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Full update: overwrite both mutable columns unconditionally.
    /// Returns `None` when no row matches; never creates a row.
    pub async fn update(&self, id: i32, fields: NewItem) -> Result<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            "UPDATE items \
             SET name = $1, quantity = $2 \
             WHERE id = $3 \
             RETURNING id, name, quantity, created_at",
        )
        .bind(fields.name)
        .bind(fields.quantity)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Partial update: set exactly the columns present in `patch`, leaving
    /// every other column unchanged. An empty patch performs no write and
    /// degrades to a read of the current record.
    pub async fn patch(&self, id: i32, patch: ItemPatch) -> Result<Option<Item>> {
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut query = patch_update_query(id, &patch);
        let item = query
            .build_query_as::<Item>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(item)
    }

    /// Hard delete. Returns the affected-row count (0 or 1) so callers can
    /// distinguish "deleted" from "nothing to delete"; deleting a missing
    /// id is a no-op, not an error.
    pub async fn delete(&self, id: i32) -> Result<u64> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{ItemPatch, NewItem};

    #[test]
    fn test_patch_statement_single_field() {
        let patch = ItemPatch {
            name: None,
            quantity: Some(7),
        };
        let query = patch_update_query(3, &patch);

        assert_eq!(
            query.sql(),
            "UPDATE items SET quantity = $1 WHERE id = $2 \
             RETURNING id, name, quantity, created_at"
        );
    }

    #[test]
    fn test_patch_statement_both_fields_in_declaration_order() {
        let patch = ItemPatch {
            name: Some("Porca".to_string()),
            quantity: Some(2),
        };
        let query = patch_update_query(9, &patch);

        assert_eq!(
            query.sql(),
            "UPDATE items SET name = $1, quantity = $2 WHERE id = $3 \
             RETURNING id, name, quantity, created_at"
        );
    }

    #[test]
    fn test_patch_statement_name_only() {
        let patch = ItemPatch {
            name: Some("Arruela".to_string()),
            quantity: None,
        };
        let query = patch_update_query(1, &patch);

        assert_eq!(
            query.sql(),
            "UPDATE items SET name = $1 WHERE id = $2 \
             RETURNING id, name, quantity, created_at"
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_then_find_round_trip(pool: PgPool) {
        let repo = ItemRepository::new(pool);

        let created = repo
            .create(NewItem {
                name: "Parafuso".to_string(),
                quantity: 10,
            })
            .await
            .expect("create should succeed");
        assert_eq!(created.name, "Parafuso");
        assert_eq!(created.quantity, 10);

        let found = repo
            .find_by_id(created.id)
            .await
            .expect("find should succeed")
            .expect("created item should be found");
        assert_eq!(found, created);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_find_missing_id_is_none(pool: PgPool) {
        let repo = ItemRepository::new(pool);

        let missing = repo.find_by_id(9999).await.expect("query should succeed");
        assert!(missing.is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_list_all_ordered_by_id(pool: PgPool) {
        let repo = ItemRepository::new(pool);

        for name in ["c", "a", "b"] {
            repo.create(NewItem {
                name: name.to_string(),
                quantity: 1,
            })
            .await
            .expect("create should succeed");
        }

        let items = repo.list_all().await.expect("list should succeed");
        assert_eq!(items.len(), 3);
        let ids: Vec<i32> = items.iter().map(|item| item.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_full_update_overwrites_both_columns(pool: PgPool) {
        let repo = ItemRepository::new(pool);

        let created = repo
            .create(NewItem {
                name: "antes".to_string(),
                quantity: 1,
            })
            .await
            .expect("create should succeed");

        let updated = repo
            .update(
                created.id,
                NewItem {
                    name: "depois".to_string(),
                    quantity: 5,
                },
            )
            .await
            .expect("update should succeed")
            .expect("row should exist");
        assert_eq!(updated.name, "depois");
        assert_eq!(updated.quantity, 5);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_full_update_missing_id_is_none(pool: PgPool) {
        let repo = ItemRepository::new(pool);

        let updated = repo
            .update(
                424242,
                NewItem {
                    name: "fantasma".to_string(),
                    quantity: 0,
                },
            )
            .await
            .expect("update should succeed");
        assert!(updated.is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_patch_changes_only_present_fields(pool: PgPool) {
        let repo = ItemRepository::new(pool);

        let created = repo
            .create(NewItem {
                name: "Parafuso".to_string(),
                quantity: 10,
            })
            .await
            .expect("create should succeed");

        let patched = repo
            .patch(
                created.id,
                ItemPatch {
                    name: None,
                    quantity: Some(7),
                },
            )
            .await
            .expect("patch should succeed")
            .expect("row should exist");
        assert_eq!(patched.quantity, 7);
        assert_eq!(patched.name, "Parafuso");

        let reread = repo
            .find_by_id(created.id)
            .await
            .expect("find should succeed")
            .expect("row should exist");
        assert_eq!(reread.name, "Parafuso");
        assert_eq!(reread.quantity, 7);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_empty_patch_degrades_to_read(pool: PgPool) {
        let repo = ItemRepository::new(pool);

        let created = repo
            .create(NewItem {
                name: "Parafuso".to_string(),
                quantity: 10,
            })
            .await
            .expect("create should succeed");

        let current = repo
            .patch(created.id, ItemPatch::default())
            .await
            .expect("empty patch should succeed")
            .expect("row should exist");
        assert_eq!(current, created);

        let absent = repo
            .patch(9999, ItemPatch::default())
            .await
            .expect("empty patch should succeed");
        assert!(absent.is_none());
    }

    // Concurrent patches with disjoint field sets both succeed; the final
    // row is last-write-wins per column at the store, which is the expected
    // contract (no application-level merge or versioning).
    #[sqlx::test(migrations = "./migrations")]
    async fn test_concurrent_disjoint_patches_both_succeed(pool: PgPool) {
        let repo = ItemRepository::new(pool);

        let created = repo
            .create(NewItem {
                name: "antes".to_string(),
                quantity: 1,
            })
            .await
            .expect("create should succeed");

        let name_patch = repo.patch(
            created.id,
            ItemPatch {
                name: Some("depois".to_string()),
                quantity: None,
            },
        );
        let quantity_patch = repo.patch(
            created.id,
            ItemPatch {
                name: None,
                quantity: Some(8),
            },
        );
        let (first, second) = tokio::join!(name_patch, quantity_patch);
        assert!(first.expect("patch should succeed").is_some());
        assert!(second.expect("patch should succeed").is_some());

        let final_state = repo
            .find_by_id(created.id)
            .await
            .expect("find should succeed")
            .expect("row should exist");
        // Each patch touched only its own column, so both changes land.
        assert_eq!(final_state.name, "depois");
        assert_eq!(final_state.quantity, 8);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_reports_affected_rows(pool: PgPool) {
        let repo = ItemRepository::new(pool);

        let created = repo
            .create(NewItem {
                name: "descartável".to_string(),
                quantity: 0,
            })
            .await
            .expect("create should succeed");

        let affected = repo.delete(created.id).await.expect("delete should succeed");
        assert_eq!(affected, 1);

        let affected_again = repo.delete(created.id).await.expect("delete should succeed");
        assert_eq!(affected_again, 0);

        let gone = repo
            .find_by_id(created.id)
            .await
            .expect("find should succeed");
        assert!(gone.is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_store_constraint_backs_validation(pool: PgPool) {
        let repo = ItemRepository::new(pool);

        // Validation normally rejects this upstream; if bypassed, the CHECK
        // constraint surfaces as a StoreError rather than corrupting state.
        let result = repo
            .create(NewItem {
                name: "inválido".to_string(),
                quantity: -1,
            })
            .await;
        assert!(result.is_err());
    }
}
