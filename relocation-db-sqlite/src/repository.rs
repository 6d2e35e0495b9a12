use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use relocation_core::{NewScenario, RepositoryError, Scenario, ScenarioInputs, ScenarioRepository};
use sqlx::{Row, sqlite::SqlitePool};
use tracing::debug;

pub struct SqliteScenarioRepository {
    pool: SqlitePool,
}

impl SqliteScenarioRepository {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn database_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(e.to_string())
}

/// Maps unique-constraint violations on `scenario.name` to `Conflict`.
fn write_error(
    e: sqlx::Error,
    name: &str,
) -> RepositoryError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::Conflict(format!("scenario '{}' already exists", name))
        }
        _ => database_error(e),
    }
}

fn inputs_to_json(inputs: &ScenarioInputs) -> Result<String, RepositoryError> {
    serde_json::to_string(inputs).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

fn row_to_scenario(row: &sqlx::sqlite::SqliteRow) -> Result<Scenario, RepositoryError> {
    let inputs_json: String = row.try_get("inputs_json").map_err(database_error)?;
    let inputs = serde_json::from_str(&inputs_json)
        .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

    Ok(Scenario {
        id: row.try_get("id").map_err(database_error)?,
        name: row.try_get("name").map_err(database_error)?,
        inputs,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| RepositoryError::Database(format!("Failed to get created_at: {}", e)))?,
        updated_at: row
            .try_get::<DateTime<Utc>, _>("updated_at")
            .map_err(|e| RepositoryError::Database(format!("Failed to get updated_at: {}", e)))?,
    })
}

#[async_trait]
impl ScenarioRepository for SqliteScenarioRepository {
    async fn create_scenario(
        &self,
        scenario: NewScenario,
    ) -> Result<Scenario, RepositoryError> {
        let now = Utc::now();
        let inputs_json = inputs_to_json(&scenario.inputs)?;

        let result = sqlx::query(
            "INSERT INTO scenario (name, inputs_json, created_at, updated_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&scenario.name)
        .bind(inputs_json)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, &scenario.name))?;

        let id = result.last_insert_rowid();
        debug!(id, name = %scenario.name, "created scenario");
        self.get_scenario(id).await
    }

    async fn get_scenario(
        &self,
        id: i64,
    ) -> Result<Scenario, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, name, inputs_json, created_at, updated_at
             FROM scenario WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .ok_or(RepositoryError::NotFound)?;

        row_to_scenario(&row)
    }

    async fn get_scenario_by_name(
        &self,
        name: &str,
    ) -> Result<Scenario, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, name, inputs_json, created_at, updated_at
             FROM scenario WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .ok_or(RepositoryError::NotFound)?;

        row_to_scenario(&row)
    }

    async fn update_scenario(
        &self,
        scenario: &Scenario,
    ) -> Result<(), RepositoryError> {
        let inputs_json = inputs_to_json(&scenario.inputs)?;

        let result = sqlx::query(
            "UPDATE scenario SET name = ?, inputs_json = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&scenario.name)
        .bind(inputs_json)
        .bind(Utc::now())
        .bind(scenario.id)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, &scenario.name))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn delete_scenario(
        &self,
        id: i64,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM scenario WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn list_scenarios(&self) -> Result<Vec<Scenario>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, name, inputs_json, created_at, updated_at
             FROM scenario ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter().map(row_to_scenario).collect()
    }
}
