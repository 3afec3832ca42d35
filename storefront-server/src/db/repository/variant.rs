//! Variant Repository
//!
//! Inventory ledger: the three per-variant counters are adjusted with a
//! floor-at-zero clamp computed inside a single UPDATE statement, so
//! concurrent adjustments serialize in the storage engine instead of
//! racing through a read-modify-write.

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::db::models::{CounterField, Variant, VariantCreate, VariantWithProduct};
use crate::utils::time::{now_millis, snowflake_id};

const VARIANT_SELECT: &str = "SELECT id, product_id, size, color, sku, price, cost, quantity_on_hand, quantity_reserved, quantity_sold, last_restocked_at, created_at, updated_at FROM variant";

pub async fn create(pool: &SqlitePool, data: VariantCreate) -> RepoResult<Variant> {
    let now = now_millis();
    let id = snowflake_id();

    // Initial stock counts as a restock
    let last_restocked_at = (data.quantity_on_hand > 0).then_some(now);

    sqlx::query(
        "INSERT INTO variant (id, product_id, size, color, sku, price, cost, quantity_on_hand, quantity_reserved, quantity_sold, last_restocked_at, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 0, 0, ?9, ?10, ?10)",
    )
    .bind(id)
    .bind(data.product_id)
    .bind(&data.size)
    .bind(&data.color)
    .bind(&data.sku)
    .bind(data.price)
    .bind(data.cost)
    .bind(data.quantity_on_hand.max(0))
    .bind(last_restocked_at)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create variant".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Variant>> {
    let row = sqlx::query_as::<_, Variant>(&format!("{VARIANT_SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// All variants with their product name/slug (admin inventory table)
pub async fn find_all_with_products(pool: &SqlitePool) -> RepoResult<Vec<VariantWithProduct>> {
    let rows = sqlx::query_as::<_, VariantWithProduct>(
        "SELECT v.id, v.product_id, p.name as product_name, p.slug as product_slug, v.size, v.color, v.sku, v.price, v.cost, v.quantity_on_hand, v.quantity_reserved, v.quantity_sold, v.last_restocked_at, v.created_at, v.updated_at FROM variant v JOIN product p ON v.product_id = p.id ORDER BY p.name, v.size",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Apply a signed delta to one ledger counter, clamped at zero.
///
/// The clamp means a large negative delta saturates instead of erroring;
/// overselling silently drives on-hand to zero. Increasing on-hand stamps
/// `last_restocked_at`. Returns the updated counter value.
pub async fn adjust(
    pool: &SqlitePool,
    id: i64,
    field: CounterField,
    delta: i64,
) -> RepoResult<i64> {
    let column = field.column();

    // Pre-read for existence and for the clamp audit below. The UPDATE
    // itself recomputes atomically, so this value is advisory only.
    let current: Option<i64> =
        sqlx::query_scalar(&format!("SELECT {column} FROM variant WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;

    let Some(current) = current else {
        return Err(RepoError::NotFound(format!("Variant {id} not found")));
    };

    let now = now_millis();
    let stamps_restock = field == CounterField::QuantityOnHand && delta > 0;

    let updated: i64 = if stamps_restock {
        sqlx::query_scalar(&format!(
            "UPDATE variant SET {column} = MAX(0, {column} + ?1), last_restocked_at = ?2, updated_at = ?2 WHERE id = ?3 RETURNING {column}"
        ))
        .bind(delta)
        .bind(now)
        .bind(id)
        .fetch_one(pool)
        .await?
    } else {
        sqlx::query_scalar(&format!(
            "UPDATE variant SET {column} = MAX(0, {column} + ?1), updated_at = ?2 WHERE id = ?3 RETURNING {column}"
        ))
        .bind(delta)
        .bind(now)
        .bind(id)
        .fetch_one(pool)
        .await?
    };

    if current + delta < 0 {
        tracing::warn!(
            variant_id = id,
            field = column,
            delta,
            current,
            "Adjustment clamped at zero; requested delta not fully applied"
        );
    }

    Ok(updated)
}

/// Unconditional hard delete. Historical sale line items keep their
/// variant_id; the reference count is logged so dangling history is
/// visible to operators.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let sale_refs: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM sale_line_item WHERE variant_id = ?")
            .bind(id)
            .fetch_one(pool)
            .await?;

    let rows = sqlx::query("DELETE FROM variant WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Variant {id} not found")));
    }

    if sale_refs > 0 {
        tracing::warn!(
            variant_id = id,
            sale_line_items = sale_refs,
            "Deleted variant still referenced by historical sale line items"
        );
    }

    Ok(())
}
