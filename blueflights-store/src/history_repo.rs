use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use blueflights_core::repository::SearchHistoryRepository;
use blueflights_core::search::{SearchCriteria, SearchRecord, TravelClass};

pub struct PostgresSearchHistoryRepository {
    pub pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct SearchRow {
    id: Uuid,
    origin_location_code: String,
    destination_location_code: String,
    departure_date: NaiveDate,
    return_date: Option<NaiveDate>,
    adults: i32,
    children: i32,
    infants: i32,
    travel_class: Option<String>,
    currency_code: String,
    max_results: i32,
    created_at: DateTime<Utc>,
}

fn record_from_row(row: SearchRow) -> SearchRecord {
    SearchRecord {
        id: row.id,
        criteria: SearchCriteria {
            origin_location_code: row.origin_location_code,
            destination_location_code: row.destination_location_code,
            departure_date: row.departure_date,
            return_date: row.return_date,
            adults: row.adults.max(0) as u32,
            children: row.children.max(0) as u32,
            infants: row.infants.max(0) as u32,
            // An unknown stored class degrades to "unspecified".
            travel_class: row.travel_class.as_deref().and_then(TravelClass::parse),
            currency_code: row.currency_code,
            max: row.max_results.max(0) as u32,
        },
        timestamp: row.created_at,
    }
}

#[async_trait]
impl SearchHistoryRepository for PostgresSearchHistoryRepository {
    async fn append(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO search_history
                (id, origin_location_code, destination_location_code, departure_date,
                 return_date, adults, children, infants, travel_class, currency_code, max_results)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&criteria.origin_location_code)
        .bind(&criteria.destination_location_code)
        .bind(criteria.departure_date)
        .bind(criteria.return_date)
        .bind(criteria.adults as i32)
        .bind(criteria.children as i32)
        .bind(criteria.infants as i32)
        .bind(criteria.travel_class.map(|tc| tc.as_str()))
        .bind(&criteria.currency_code)
        .bind(criteria.max as i32)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_recent(
        &self,
        limit: i64,
    ) -> Result<Vec<SearchRecord>, Box<dyn std::error::Error + Send + Sync>> {
        let rows: Vec<SearchRow> = sqlx::query_as(
            r#"
            SELECT id, origin_location_code, destination_location_code, departure_date,
                   return_date, adults, children, infants, travel_class, currency_code,
                   max_results, created_at
            FROM search_history
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(record_from_row).collect())
    }
}
