use crate::model::{AnalysisRecord, Coordinate, StorageError};
use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens the database and brings the schema up to date.
    pub fn new(db_path: &str) -> Result<Self, StorageError> {
        let conn = Connection::open(db_path)?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS analyses (
                analysis_id TEXT PRIMARY KEY,
                lat REAL NOT NULL,
                lng REAL NOT NULL,
                business_type TEXT NOT NULL,
                recommendation TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS api_cache (
                cache_key TEXT PRIMARY KEY,
                payload TEXT NOT NULL,
                fetched_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS analytics_events (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                event_type TEXT NOT NULL,
                payload TEXT NOT NULL,
                recorded_at TEXT NOT NULL
            );
            ",
        )?;

        // Additive migration: demographics targeting arrived after the
        // first schema shipped.
        Self::migrate_add_column_if_missing(
            &conn,
            "analyses",
            "target_demographics",
            "TEXT NOT NULL DEFAULT '[]'",
        )?;

        Ok(Self { conn })
    }

    /// Adds a column to a table when an older database lacks it.
    fn migrate_add_column_if_missing(
        conn: &Connection,
        table: &str,
        column: &str,
        column_def: &str,
    ) -> Result<(), StorageError> {
        let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
        let existing_columns: Vec<String> = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<_, _>>()?;

        if !existing_columns.iter().any(|c| c == column) {
            let alter_sql = format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, column_def);
            conn.execute(&alter_sql, [])?;
        }

        Ok(())
    }

    /// Saves (inserts or replaces) a finished analysis.
    pub fn save_analysis(&self, record: &AnalysisRecord) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO analyses (
                analysis_id, lat, lng, business_type,
                target_demographics, recommendation, created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                &record.analysis_id,
                record.coordinate.lat,
                record.coordinate.lng,
                record.business_type.as_str(),
                serde_json::to_string(&record.target_demographics)?,
                serde_json::to_string(&record.recommendation)?,
                record.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn get_analysis(&self, analysis_id: &str) -> Result<Option<AnalysisRecord>, StorageError> {
        let row = self
            .conn
            .query_row(
                "SELECT analysis_id, lat, lng, business_type,
                        target_demographics, recommendation, created_at
                 FROM analyses WHERE analysis_id = ?1",
                params![analysis_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, f64>(1)?,
                        row.get::<_, f64>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, String>(5)?,
                        row.get::<_, String>(6)?,
                    ))
                },
            )
            .optional()?;

        let Some((id, lat, lng, business_type, demographics, recommendation, created_at)) = row
        else {
            return Ok(None);
        };

        Ok(Some(AnalysisRecord {
            analysis_id: id,
            coordinate: Coordinate::new(lat, lng),
            business_type: serde_json::from_value(serde_json::Value::String(business_type))?,
            target_demographics: serde_json::from_str(&demographics)?,
            recommendation: serde_json::from_str(&recommendation)?,
            created_at: parse_timestamp(&created_at),
        }))
    }

    /// Stores a raw upstream payload under its request signature.
    pub fn cache_put(&self, cache_key: &str, payload: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO api_cache (cache_key, payload, fetched_at)
             VALUES (?1, ?2, ?3)",
            params![cache_key, payload, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Returns a cached payload younger than `ttl`; stale rows are dropped.
    pub fn cache_get(
        &self,
        cache_key: &str,
        ttl: Duration,
    ) -> Result<Option<String>, StorageError> {
        let row = self
            .conn
            .query_row(
                "SELECT payload, fetched_at FROM api_cache WHERE cache_key = ?1",
                params![cache_key],
                |row: &Row<'_>| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;

        let Some((payload, fetched_at)) = row else {
            return Ok(None);
        };

        if Utc::now() - parse_timestamp(&fetched_at) < ttl {
            Ok(Some(payload))
        } else {
            self.conn
                .execute("DELETE FROM api_cache WHERE cache_key = ?1", params![cache_key])?;
            Ok(None)
        }
    }

    /// Appends an analytics event for later aggregation.
    pub fn record_event(
        &self,
        event_type: &str,
        payload: &serde_json::Value,
    ) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO analytics_events (event_type, payload, recorded_at)
             VALUES (?1, ?2, ?3)",
            params![event_type, payload.to_string(), Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| DateTime::<Utc>::MIN_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        BusinessRecommendation, BusinessType, LocationInsight,
    };

    fn storage() -> SqliteStorage {
        SqliteStorage::new(":memory:").unwrap()
    }

    fn record(id: &str) -> AnalysisRecord {
        let insight = LocationInsight {
            coordinate: Coordinate::new(52.52, 13.405),
            foot_traffic_score: 42.0,
            competition_density: 80.0,
            demographic_match: 70.0,
            optimal_hours: vec!["11:00-14:00".to_string()],
            category_gaps: vec!["Bakery".to_string()],
            nearby_attractions: vec![],
            risk_factors: vec![],
        };
        AnalysisRecord {
            analysis_id: id.to_string(),
            coordinate: insight.coordinate,
            business_type: BusinessType::FoodTruck,
            target_demographics: vec!["tourists".to_string()],
            recommendation: BusinessRecommendation {
                insight,
                confidence_score: 55.1,
                reasoning: "Standard market conditions observed".to_string(),
                revenue_potential: "Medium ($500-1000/week)".to_string(),
                setup_requirements: vec![],
                recommended_duration: "1-2 weeks with careful monitoring".to_string(),
                generated_at: Utc::now(),
            },
            created_at: Utc::now(),
        }
    }

    #[test]
    fn analysis_roundtrip() {
        let storage = storage();
        storage.save_analysis(&record("analysis_1")).unwrap();

        let loaded = storage.get_analysis("analysis_1").unwrap().unwrap();
        assert_eq!(loaded.business_type, BusinessType::FoodTruck);
        assert_eq!(loaded.target_demographics, vec!["tourists".to_string()]);
        assert_eq!(loaded.recommendation.confidence_score, 55.1);
        assert_eq!(loaded.recommendation.insight.category_gaps, vec!["Bakery".to_string()]);

        assert!(storage.get_analysis("analysis_2").unwrap().is_none());
    }

    #[test]
    fn save_is_an_upsert() {
        let storage = storage();
        storage.save_analysis(&record("analysis_1")).unwrap();
        let mut updated = record("analysis_1");
        updated.recommendation.confidence_score = 90.0;
        storage.save_analysis(&updated).unwrap();

        let loaded = storage.get_analysis("analysis_1").unwrap().unwrap();
        assert_eq!(loaded.recommendation.confidence_score, 90.0);
    }

    #[test]
    fn cache_honors_its_ttl() {
        let storage = storage();
        storage.cache_put("search_x", "{\"results\":[]}").unwrap();

        let fresh = storage.cache_get("search_x", Duration::seconds(3600)).unwrap();
        assert_eq!(fresh.as_deref(), Some("{\"results\":[]}"));

        // A zero TTL makes everything stale; the row is also evicted.
        let stale = storage.cache_get("search_x", Duration::seconds(0)).unwrap();
        assert!(stale.is_none());
        let gone = storage.cache_get("search_x", Duration::seconds(3600)).unwrap();
        assert!(gone.is_none());
    }

    #[test]
    fn events_append() {
        let storage = storage();
        storage
            .record_event("location_analysis", &serde_json::json!({"success": true}))
            .unwrap();
        storage
            .record_event("location_analysis", &serde_json::json!({"success": false}))
            .unwrap();
        let count: i64 = storage
            .conn
            .query_row("SELECT COUNT(*) FROM analytics_events", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2);
    }
}
