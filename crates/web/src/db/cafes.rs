//! Cafe repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use coffee_wifi_core::{CafeId, UserId};

use super::RepositoryError;
use crate::models::cafe::{Cafe, NewCafe};

/// Raw `cafe` row as stored in SQLite.
#[derive(sqlx::FromRow)]
struct CafeRow {
    id: i64,
    name: String,
    map_url: String,
    img_url: Option<String>,
    location: String,
    seats: String,
    has_toilet: bool,
    has_wifi: bool,
    has_sockets: bool,
    can_take_calls: bool,
    coffee_price: Option<String>,
    user_id: Option<i64>,
    created_at: DateTime<Utc>,
}

impl From<CafeRow> for Cafe {
    fn from(row: CafeRow) -> Self {
        Self {
            id: CafeId::new(row.id),
            name: row.name,
            map_url: row.map_url,
            img_url: row.img_url,
            location: row.location,
            seats: row.seats,
            has_toilet: row.has_toilet,
            has_wifi: row.has_wifi,
            has_sockets: row.has_sockets,
            can_take_calls: row.can_take_calls,
            coffee_price: row.coffee_price,
            user_id: row.user_id.map(UserId::new),
            created_at: row.created_at,
        }
    }
}

const CAFE_COLUMNS: &str = "id, name, map_url, img_url, location, seats, \
     has_toilet, has_wifi, has_sockets, can_take_calls, coffee_price, user_id, created_at";

/// Repository for cafe database operations.
pub struct CafeRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CafeRepository<'a> {
    /// Create a new cafe repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch all cafes in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Cafe>, RepositoryError> {
        let rows = sqlx::query_as::<_, CafeRow>(&format!(
            "SELECT {CAFE_COLUMNS} FROM cafe ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Cafe::from).collect())
    }

    /// Fetch cafes whose name matches exactly.
    ///
    /// The name column is unique so this returns at most one row, but the
    /// listing view renders whatever comes back.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_name(&self, name: &str) -> Result<Vec<Cafe>, RepositoryError> {
        let rows = sqlx::query_as::<_, CafeRow>(&format!(
            "SELECT {CAFE_COLUMNS} FROM cafe WHERE name = ?1 ORDER BY id"
        ))
        .bind(name)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Cafe::from).collect())
    }

    /// Get a cafe by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: CafeId) -> Result<Option<Cafe>, RepositoryError> {
        let row = sqlx::query_as::<_, CafeRow>(&format!(
            "SELECT {CAFE_COLUMNS} FROM cafe WHERE id = ?1"
        ))
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Cafe::from))
    }

    /// Insert a new cafe.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a cafe with the same name is
    /// already listed.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new_cafe: &NewCafe) -> Result<Cafe, RepositoryError> {
        let row = sqlx::query_as::<_, CafeRow>(&format!(
            "INSERT INTO cafe \
                 (name, map_url, img_url, location, seats, \
                  has_toilet, has_wifi, has_sockets, can_take_calls, \
                  coffee_price, user_id) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11) \
             RETURNING {CAFE_COLUMNS}"
        ))
        .bind(&new_cafe.name)
        .bind(&new_cafe.map_url)
        .bind(new_cafe.img_url.as_deref())
        .bind(&new_cafe.location)
        .bind(&new_cafe.seats)
        .bind(new_cafe.has_toilet)
        .bind(new_cafe.has_wifi)
        .bind(new_cafe.has_sockets)
        .bind(new_cafe.can_take_calls)
        .bind(new_cafe.coffee_price.as_deref())
        .bind(new_cafe.user_id.map(|id| id.as_i64()))
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("cafe name already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(Cafe::from(row))
    }

    /// Delete a cafe by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no cafe has that ID; deleting
    /// a missing record is an explicit error, never a silent success.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: CafeId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM cafe WHERE id = ?1")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;
    use crate::db::testutils;

    /// A minimal valid cafe for tests; contributor left unset.
    pub(crate) fn sample_cafe(name: &str) -> NewCafe {
        NewCafe {
            name: name.to_owned(),
            map_url: "https://maps.example.com/blue-bottle".to_owned(),
            img_url: None,
            location: "Shoreditch".to_owned(),
            seats: "20-30".to_owned(),
            has_toilet: false,
            has_wifi: true,
            has_sockets: false,
            can_take_calls: false,
            coffee_price: Some("£2.80".to_owned()),
            user_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let pool = testutils::pool().await;
        let cafes = CafeRepository::new(&pool);

        cafes.create(&sample_cafe("Blue Bottle")).await.unwrap();
        cafes.create(&sample_cafe("Grind")).await.unwrap();

        let all = cafes.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Blue Bottle");
        assert_eq!(all[1].name, "Grind");
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected_before_commit() {
        let pool = testutils::pool().await;
        let cafes = CafeRepository::new(&pool);

        cafes.create(&sample_cafe("Blue Bottle")).await.unwrap();
        let second = cafes.create(&sample_cafe("Blue Bottle")).await;
        assert!(matches!(second, Err(RepositoryError::Conflict(_))));

        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cafe")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_boolean_flags_never_null() {
        let pool = testutils::pool().await;
        let cafes = CafeRepository::new(&pool);

        let mut unchecked = sample_cafe("Quiet Corner");
        unchecked.has_wifi = false;
        cafes.create(&unchecked).await.unwrap();

        let nulls = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM cafe \
             WHERE has_toilet IS NULL OR has_wifi IS NULL \
                OR has_sockets IS NULL OR can_take_calls IS NULL",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(nulls, 0);

        let stored = cafes.list_all().await.unwrap();
        assert!(!stored[0].has_wifi);
        assert!(!stored[0].has_toilet);
    }

    #[tokio::test]
    async fn test_find_by_name_exact_match_only() {
        let pool = testutils::pool().await;
        let cafes = CafeRepository::new(&pool);

        cafes.create(&sample_cafe("Blue Bottle")).await.unwrap();

        let hit = cafes.find_by_name("Blue Bottle").await.unwrap();
        assert_eq!(hit.len(), 1);

        // Prefixes and different casing are not matches
        assert!(cafes.find_by_name("Blue").await.unwrap().is_empty());
        assert!(cafes.find_by_name("blue bottle").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let pool = testutils::pool().await;
        let cafes = CafeRepository::new(&pool);

        let result = cafes.delete(CafeId::new(42)).await;
        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_existing() {
        let pool = testutils::pool().await;
        let cafes = CafeRepository::new(&pool);

        let created = cafes.create(&sample_cafe("Blue Bottle")).await.unwrap();
        cafes.delete(created.id).await.unwrap();
        assert!(cafes.get_by_id(created.id).await.unwrap().is_none());
    }
}
