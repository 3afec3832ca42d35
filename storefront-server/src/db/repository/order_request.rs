//! Order Request Repository

use std::collections::HashMap;

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::db::models::{
    OrderRequest, OrderRequestCreate, OrderRequestItem, OrderRequestWithItems, RequestStatus,
};
use crate::utils::time::{now_millis, snowflake_id};

/// Create an order request with its line items in one transaction.
///
/// Line items are written as catalog snapshots; later product edits do not
/// change stored rows.
pub async fn create(pool: &SqlitePool, data: OrderRequestCreate) -> RepoResult<i64> {
    let now = now_millis();
    let id = snowflake_id();

    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO order_request (id, customer_name, email, phone, fulfillment_method, shipping_address, notes, status, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )
    .bind(id)
    .bind(&data.customer_name)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(data.fulfillment_method)
    .bind(&data.shipping_address)
    .bind(&data.notes)
    .bind(RequestStatus::New)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    for item in &data.items {
        sqlx::query(
            "INSERT INTO order_request_item (id, order_request_id, product_slug, product_name, variant_size, quantity, price) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(snowflake_id())
        .bind(id)
        .bind(&item.product_slug)
        .bind(&item.product_name)
        .bind(&item.variant_size)
        .bind(item.quantity)
        .bind(item.price)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(id)
}

/// All order requests, newest first, with line items attached
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<OrderRequestWithItems>> {
    let requests = sqlx::query_as::<_, OrderRequest>(
        "SELECT id, customer_name, email, phone, fulfillment_method, shipping_address, notes, status, created_at FROM order_request ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    let items = sqlx::query_as::<_, OrderRequestItem>(
        "SELECT id, order_request_id, product_slug, product_name, variant_size, quantity, price FROM order_request_item ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    let mut by_request: HashMap<i64, Vec<OrderRequestItem>> = HashMap::new();
    for item in items {
        by_request.entry(item.order_request_id).or_default().push(item);
    }

    Ok(requests
        .into_iter()
        .map(|request| {
            let items = by_request.remove(&request.id).unwrap_or_default();
            OrderRequestWithItems { request, items }
        })
        .collect())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<OrderRequestWithItems>> {
    let request = sqlx::query_as::<_, OrderRequest>(
        "SELECT id, customer_name, email, phone, fulfillment_method, shipping_address, notes, status, created_at FROM order_request WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(request) = request else {
        return Ok(None);
    };

    let items = sqlx::query_as::<_, OrderRequestItem>(
        "SELECT id, order_request_id, product_slug, product_name, variant_size, quantity, price FROM order_request_item WHERE order_request_id = ? ORDER BY id",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(Some(OrderRequestWithItems { request, items }))
}

/// Update the request status. Transitions are not constrained server-side.
pub async fn update_status(pool: &SqlitePool, id: i64, status: RequestStatus) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE order_request SET status = ?1 WHERE id = ?2")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order request {id} not found")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::{FulfillmentMethod, OrderRequestItemCreate};

    fn request_with_items(items: Vec<OrderRequestItemCreate>) -> OrderRequestCreate {
        OrderRequestCreate {
            customer_name: "Jess Delacroix".to_string(),
            email: "jess@example.com".to_string(),
            phone: None,
            fulfillment_method: FulfillmentMethod::Pickup,
            shipping_address: None,
            notes: None,
            items,
        }
    }

    fn item(slug: &str, size: &str, quantity: i64, price: Option<i64>) -> OrderRequestItemCreate {
        OrderRequestItemCreate {
            product_slug: slug.to_string(),
            product_name: format!("The {slug}"),
            variant_size: size.to_string(),
            quantity,
            price,
        }
    }

    #[tokio::test]
    async fn test_create_and_round_trip_items() {
        let db = DbService::open_in_memory().await.unwrap();

        let id = create(
            &db.pool,
            request_with_items(vec![
                item("bangkok-gold", "M", 2, Some(4500)),
                item("marigny-stripe", "L", 1, Some(5200)),
                item("bywater-check", "S", 3, None),
            ]),
        )
        .await
        .unwrap();

        let stored = find_by_id(&db.pool, id).await.unwrap().unwrap();
        assert_eq!(stored.request.status, RequestStatus::New);
        assert_eq!(stored.items.len(), 3);
        assert_eq!(stored.items[0].quantity, 2);
        assert_eq!(stored.items[0].price, Some(4500));
        assert_eq!(stored.items[1].variant_size, "L");
        assert_eq!(stored.items[2].price, None);
    }

    #[tokio::test]
    async fn test_items_are_snapshots_independent_of_catalog() {
        let db = DbService::open_in_memory().await.unwrap();

        let id = create(
            &db.pool,
            request_with_items(vec![item("bangkok-gold", "M", 1, Some(4500))]),
        )
        .await
        .unwrap();

        // A later catalog insert/edit with the same slug must not affect the
        // stored snapshot.
        crate::db::repository::product::create(
            &db.pool,
            crate::db::models::ProductCreate {
                name: "Renamed Shirt".to_string(),
                slug: "bangkok-gold".to_string(),
                kind: "button-down".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();

        let stored = find_by_id(&db.pool, id).await.unwrap().unwrap();
        assert_eq!(stored.items[0].product_name, "The bangkok-gold");
    }

    #[tokio::test]
    async fn test_update_status_unknown_id() {
        let db = DbService::open_in_memory().await.unwrap();
        let err = update_status(&db.pool, 999, RequestStatus::Confirmed)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_status() {
        let db = DbService::open_in_memory().await.unwrap();
        let id = create(
            &db.pool,
            request_with_items(vec![item("bangkok-gold", "M", 1, None)]),
        )
        .await
        .unwrap();

        update_status(&db.pool, id, RequestStatus::Confirmed)
            .await
            .unwrap();
        let stored = find_by_id(&db.pool, id).await.unwrap().unwrap();
        assert_eq!(stored.request.status, RequestStatus::Confirmed);
    }
}
