//! Sale Repository
//!
//! Recording a sale is the one operation that requires true atomicity:
//! the sale row, its line items, and every inventory decrement commit
//! together or not at all.

use std::collections::HashMap;

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::db::models::{Sale, SaleCreate, SaleLineItem, SaleWithLineItems};
use crate::utils::time::{now_millis, snowflake_id};

/// Record a sale: insert the sale and line items, then for every line
/// increment `quantity_sold` and decrement `quantity_on_hand` (clamped at
/// zero; insufficient stock is not treated as a hard error). Any failure
/// rolls the whole transaction back.
pub async fn record(pool: &SqlitePool, data: SaleCreate) -> RepoResult<i64> {
    if data.line_items.is_empty() {
        return Err(RepoError::Validation(
            "At least one item is required".into(),
        ));
    }
    if data.line_items.iter().any(|item| item.quantity < 1) {
        return Err(RepoError::Validation(
            "Line item quantity must be at least 1".into(),
        ));
    }

    // Best-effort total over priced lines; stored as NULL when zero
    let total: i64 = data
        .line_items
        .iter()
        .filter_map(|item| item.unit_price.map(|price| price * item.quantity))
        .sum();
    let total = (total != 0).then_some(total);

    let now = now_millis();
    let id = snowflake_id();

    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO sale (id, channel, customer_name, email, notes, total, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(id)
    .bind(data.channel)
    .bind(&data.customer_name)
    .bind(&data.email)
    .bind(&data.notes)
    .bind(total)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    for item in &data.line_items {
        sqlx::query(
            "INSERT INTO sale_line_item (id, sale_id, variant_id, quantity, unit_price) VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(snowflake_id())
        .bind(id)
        .bind(item.variant_id)
        .bind(item.quantity)
        .bind(item.unit_price)
        .execute(&mut *tx)
        .await?;

        let rows = sqlx::query(
            "UPDATE variant SET quantity_sold = quantity_sold + ?1, quantity_on_hand = MAX(0, quantity_on_hand - ?1), updated_at = ?2 WHERE id = ?3",
        )
        .bind(item.quantity)
        .bind(now)
        .bind(item.variant_id)
        .execute(&mut *tx)
        .await?;

        if rows.rows_affected() == 0 {
            // Dropping the transaction rolls back the sale and any
            // inventory updates already applied for earlier lines.
            return Err(RepoError::NotFound(format!(
                "Variant {} not found",
                item.variant_id
            )));
        }
    }

    tx.commit().await?;
    Ok(id)
}

/// All sales, newest first, with line items attached
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<SaleWithLineItems>> {
    let sales = sqlx::query_as::<_, Sale>(
        "SELECT id, channel, customer_name, email, notes, total, created_at FROM sale ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    let items = sqlx::query_as::<_, SaleLineItem>(
        "SELECT id, sale_id, variant_id, quantity, unit_price FROM sale_line_item ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    let mut by_sale: HashMap<i64, Vec<SaleLineItem>> = HashMap::new();
    for item in items {
        by_sale.entry(item.sale_id).or_default().push(item);
    }

    Ok(sales
        .into_iter()
        .map(|sale| {
            let line_items = by_sale.remove(&sale.id).unwrap_or_default();
            SaleWithLineItems { sale, line_items }
        })
        .collect())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<SaleWithLineItems>> {
    let sale = sqlx::query_as::<_, Sale>(
        "SELECT id, channel, customer_name, email, notes, total, created_at FROM sale WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(sale) = sale else {
        return Ok(None);
    };

    let line_items = sqlx::query_as::<_, SaleLineItem>(
        "SELECT id, sale_id, variant_id, quantity, unit_price FROM sale_line_item WHERE sale_id = ? ORDER BY id",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(Some(SaleWithLineItems { sale, line_items }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::{
        ProductCreate, SaleChannel, SaleLineItemCreate, Variant, VariantCreate,
    };

    async fn seed_variant(pool: &SqlitePool, size: &str, on_hand: i64) -> Variant {
        let product = crate::db::repository::product::create(
            pool,
            ProductCreate {
                name: format!("Shirt {size}"),
                slug: format!("shirt-{size}-{}", snowflake_id()),
                kind: "button-down".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();

        crate::db::repository::variant::create(
            pool,
            VariantCreate {
                product_id: product.id,
                size: size.to_string(),
                color: None,
                sku: None,
                price: Some(4500),
                cost: None,
                quantity_on_hand: on_hand,
            },
        )
        .await
        .unwrap()
    }

    fn line(variant_id: i64, quantity: i64, unit_price: Option<i64>) -> SaleLineItemCreate {
        SaleLineItemCreate {
            variant_id,
            quantity,
            unit_price,
        }
    }

    fn sale_of(line_items: Vec<SaleLineItemCreate>) -> SaleCreate {
        SaleCreate {
            channel: SaleChannel::Popup,
            customer_name: None,
            email: None,
            notes: None,
            line_items,
        }
    }

    #[tokio::test]
    async fn test_record_sale_totals_and_decrements() {
        let db = DbService::open_in_memory().await.unwrap();
        let a = seed_variant(&db.pool, "M", 5).await;
        let b = seed_variant(&db.pool, "L", 5).await;

        let id = record(
            &db.pool,
            sale_of(vec![line(a.id, 2, Some(1000)), line(b.id, 1, Some(500))]),
        )
        .await
        .unwrap();

        let stored = find_by_id(&db.pool, id).await.unwrap().unwrap();
        assert_eq!(stored.sale.total, Some(2500));
        assert_eq!(stored.line_items.len(), 2);

        let a_after = crate::db::repository::variant::find_by_id(&db.pool, a.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(a_after.quantity_sold, 2);
        assert_eq!(a_after.quantity_on_hand, 3);

        let b_after = crate::db::repository::variant::find_by_id(&db.pool, b.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(b_after.quantity_sold, 1);
        assert_eq!(b_after.quantity_on_hand, 4);
    }

    #[tokio::test]
    async fn test_unpriced_lines_yield_null_total() {
        let db = DbService::open_in_memory().await.unwrap();
        let a = seed_variant(&db.pool, "M", 5).await;

        let id = record(&db.pool, sale_of(vec![line(a.id, 2, None)]))
            .await
            .unwrap();

        let stored = find_by_id(&db.pool, id).await.unwrap().unwrap();
        assert_eq!(stored.sale.total, None);
    }

    #[tokio::test]
    async fn test_oversell_clamps_on_hand_to_zero() {
        let db = DbService::open_in_memory().await.unwrap();
        let a = seed_variant(&db.pool, "M", 1).await;

        record(&db.pool, sale_of(vec![line(a.id, 3, Some(1000))]))
            .await
            .unwrap();

        let after = crate::db::repository::variant::find_by_id(&db.pool, a.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after.quantity_on_hand, 0);
        assert_eq!(after.quantity_sold, 3);
    }

    #[tokio::test]
    async fn test_failure_rolls_back_sale_and_inventory() {
        let db = DbService::open_in_memory().await.unwrap();
        let a = seed_variant(&db.pool, "M", 5).await;

        // Second line references a variant that does not exist; the first
        // line's inventory effect must not survive.
        let err = record(
            &db.pool,
            sale_of(vec![line(a.id, 2, Some(1000)), line(987654, 1, Some(500))]),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));

        let sales = find_all(&db.pool).await.unwrap();
        assert!(sales.is_empty());

        let a_after = crate::db::repository::variant::find_by_id(&db.pool, a.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(a_after.quantity_on_hand, 5);
        assert_eq!(a_after.quantity_sold, 0);
    }

    #[tokio::test]
    async fn test_empty_line_items_rejected() {
        let db = DbService::open_in_memory().await.unwrap();
        let err = record(&db.pool, sale_of(vec![])).await.unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }
}
