//! Product Repository

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::db::models::{Product, ProductCreate};
use crate::utils::time::{now_millis, snowflake_id};

const PRODUCT_SELECT: &str =
    "SELECT id, name, slug, kind, description, created_at, updated_at FROM product";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Product>> {
    let rows = sqlx::query_as::<_, Product>(&format!("{PRODUCT_SELECT} ORDER BY name"))
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let row = sqlx::query_as::<_, Product>(&format!("{PRODUCT_SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: ProductCreate) -> RepoResult<Product> {
    let now = now_millis();
    let id = snowflake_id();

    let result = sqlx::query(
        "INSERT INTO product (id, name, slug, kind, description, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.slug)
    .bind(&data.kind)
    .bind(&data.description)
    .bind(now)
    .execute(pool)
    .await;

    match result {
        Ok(_) => find_by_id(pool, id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create product".into())),
        Err(err) => match RepoError::from(err) {
            RepoError::Duplicate(_) => Err(RepoError::Duplicate(format!(
                "Product slug '{}' already exists",
                data.slug
            ))),
            other => Err(other),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    fn shirt(slug: &str) -> ProductCreate {
        ProductCreate {
            name: "Bangkok Gold".to_string(),
            slug: slug.to_string(),
            kind: "button-down".to_string(),
            description: Some("Found in Bangkok, sold in New Orleans".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let db = DbService::open_in_memory().await.unwrap();
        let created = create(&db.pool, shirt("bangkok-gold")).await.unwrap();
        assert_eq!(created.slug, "bangkok-gold");
        assert_eq!(created.kind, "button-down");

        let all = find_all(&db.pool).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_slug_conflicts() {
        let db = DbService::open_in_memory().await.unwrap();
        create(&db.pool, shirt("bangkok-gold")).await.unwrap();
        let err = create(&db.pool, shirt("bangkok-gold")).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }
}
