use crate::domain::board_filter::{BoardFilter, PageRequest};
use crate::domain::error::{AppError, Result};
use crate::domain::flat_row::{
    total_pages_for, ExecutionLogEntry, ExecutionStatus, FlatRow, FlatRowPage,
};
use crate::domain::test_asset_input::{TestCaseInput, TestPointInput};
use crate::infrastructure::asset_source::TestAssetSource;
use crate::infrastructure::config::BoardConfig;
use async_trait::async_trait;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

const TEST_ASSET_SCHEMA: &str = include_str!("../../../resources/test_assets/schema.sql");

const FLAT_ROW_COLUMNS: &str = "c.id AS case_id, p.id AS test_point_id, p.idx AS test_point_index,
     p.name AS test_point_name, p.purpose AS test_purpose, p.steps AS test_point_steps,
     p.expected_result AS test_point_expected_result, p.risk_level AS test_point_risk_level,
     c.name, c.description, c.system, c.module, c.priority, c.status, c.execution_status,
     c.last_run, c.logs_json, c.created_at, c.creator, p.tag,
     s.name AS scenario_name, s.description AS scenario_description, c.source";

const FLAT_ROW_JOIN: &str = "FROM test_points p
     JOIN test_point_cases pc ON pc.point_id = p.id
     JOIN test_cases c ON c.id = pc.case_id";

const POINT_ORDER: &str = "COALESCE(p.tag, ''), p.idx, p.id";

pub struct SqliteTestAssetRepository {
    pool: SqlitePool,
}

impl SqliteTestAssetRepository {
    /// Opens `database_path` when configured, otherwise an in-memory database.
    pub async fn from_config(config: &BoardConfig) -> Result<Self> {
        match config.database_path.as_deref() {
            Some(path) => Self::connect(path).await,
            None => {
                warn!("No database_path configured, test assets are kept in memory");
                Self::connect_in_memory().await
            }
        }
    }

    pub async fn connect(db_path: &Path) -> Result<Self> {
        let db_url = db_path_to_url(db_path)?;
        let options = SqliteConnectOptions::from_str(&db_url)
            .map_err(|e| AppError::DatabaseError(format!("Failed to parse test asset DB URL: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to connect test asset DB: {e}")))?;

        let repository = Self { pool };
        repository.apply_schema().await?;
        info!(db_path = %db_path.display(), "Test asset database ready");
        Ok(repository)
    }

    /// Single-connection in-memory database; the connection is never recycled so the data
    /// lives as long as the repository.
    pub async fn connect_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| AppError::DatabaseError(format!("Failed to parse test asset DB URL: {e}")))?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to open in-memory DB: {e}")))?;

        let repository = Self { pool };
        repository.apply_schema().await?;
        Ok(repository)
    }

    async fn apply_schema(&self) -> Result<()> {
        for statement in TEST_ASSET_SCHEMA.split(';') {
            let stmt = statement.trim();
            if stmt.is_empty() {
                continue;
            }
            sqlx::query(stmt).execute(&self.pool).await.map_err(|e| {
                AppError::DatabaseError(format!("Failed to apply test asset schema statement: {e}"))
            })?;
        }
        Ok(())
    }

    pub async fn upsert_scenario(
        &self,
        tag: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO scenarios (tag, name, description) VALUES (?, ?, ?)
             ON CONFLICT(tag) DO UPDATE SET name = excluded.name, description = excluded.description",
        )
        .bind(tag)
        .bind(name)
        .bind(description)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to upsert scenario: {e}")))?;

        Ok(())
    }

    pub async fn insert_test_point(&self, point: &TestPointInput) -> Result<()> {
        sqlx::query(
            "INSERT INTO test_points (id, project_id, version, idx, name, purpose, steps, expected_result, risk_level, tag, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(point.id)
        .bind(point.project_id)
        .bind(&point.version)
        .bind(point.index)
        .bind(&point.name)
        .bind(&point.purpose)
        .bind(&point.steps)
        .bind(&point.expected_result)
        .bind(point.risk_level.as_str())
        .bind(&point.tag)
        .bind(chrono::Utc::now().timestamp_millis())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to insert test point: {e}")))?;

        Ok(())
    }

    pub async fn insert_test_case(&self, case: &TestCaseInput) -> Result<()> {
        sqlx::query(
            "INSERT INTO test_cases (id, name, description, system, module, priority, status, execution_status, last_run, logs_json, created_at, creator, source)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, NULL, '[]', ?, ?, ?)",
        )
        .bind(case.id)
        .bind(&case.name)
        .bind(&case.description)
        .bind(&case.system)
        .bind(&case.module)
        .bind(case.priority.as_str())
        .bind(case.status.as_str())
        .bind(case.execution_status.as_str())
        .bind(chrono::Utc::now().timestamp_millis())
        .bind(&case.creator)
        .bind(case.source.map(|source| source.as_str()))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to insert test case: {e}")))?;

        Ok(())
    }

    pub async fn link_case(&self, point_id: i64, case_id: i64, position: i64) -> Result<()> {
        sqlx::query(
            "INSERT OR IGNORE INTO test_point_cases (point_id, case_id, position) VALUES (?, ?, ?)",
        )
        .bind(point_id)
        .bind(case_id)
        .bind(position)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to link test case: {e}")))?;

        Ok(())
    }

    pub async fn count_test_points(&self, filter: &BoardFilter) -> Result<i64> {
        let clause = FilterClause::build(filter);
        let sql = format!(
            "SELECT COUNT(DISTINCT p.id) {} WHERE {}",
            FLAT_ROW_JOIN, clause.sql
        );
        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for value in &clause.binds {
            query = match value {
                BindValue::Int(v) => query.bind(*v),
                BindValue::Text(v) => query.bind(v.clone()),
            };
        }
        query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to count test points: {e}")))
    }

    async fn list_page_point_ids(&self, clause: &FilterClause, page: PageRequest) -> Result<Vec<i64>> {
        let sql = format!(
            "SELECT p.id {} WHERE {} GROUP BY p.id ORDER BY {} LIMIT ? OFFSET ?",
            FLAT_ROW_JOIN, clause.sql, POINT_ORDER
        );
        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for value in &clause.binds {
            query = match value {
                BindValue::Int(v) => query.bind(*v),
                BindValue::Text(v) => query.bind(v.clone()),
            };
        }
        query
            .bind(page.page_size as i64)
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to list test point page: {e}")))
    }

    async fn list_rows_for_points(
        &self,
        clause: &FilterClause,
        point_ids: &[i64],
    ) -> Result<Vec<FlatRow>> {
        if point_ids.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; point_ids.len()].join(", ");
        let sql = format!(
            "SELECT {} {} LEFT JOIN scenarios s ON s.tag = p.tag
             WHERE {} AND p.id IN ({}) ORDER BY {}, pc.position, c.id",
            FLAT_ROW_COLUMNS, FLAT_ROW_JOIN, clause.sql, placeholders, POINT_ORDER
        );
        let mut query = sqlx::query_as::<_, FlatRowEntity>(&sql);
        for value in &clause.binds {
            query = match value {
                BindValue::Int(v) => query.bind(*v),
                BindValue::Text(v) => query.bind(v.clone()),
            };
        }
        for id in point_ids {
            query = query.bind(*id);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to list flat rows: {e}")))?;

        Ok(rows.into_iter().map(|row| row.into()).collect())
    }
}

#[async_trait]
impl TestAssetSource for SqliteTestAssetRepository {
    async fn fetch_flat_rows(
        &self,
        filter: &BoardFilter,
        page: PageRequest,
    ) -> Result<FlatRowPage> {
        let clause = FilterClause::build(filter);
        let total_count = self.count_test_points(filter).await?;
        let point_ids = self.list_page_point_ids(&clause, page).await?;
        let rows = self.list_rows_for_points(&clause, &point_ids).await?;

        Ok(FlatRowPage {
            rows,
            total_count,
            total_pages: total_pages_for(total_count, page.page_size),
        })
    }

    async fn delete_test_points(&self, ids: &[i64]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let placeholders = vec!["?"; ids.len()].join(", ");
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to begin delete: {e}")))?;

        let unlink = format!("DELETE FROM test_point_cases WHERE point_id IN ({})", placeholders);
        let mut statement = sqlx::query(&unlink);
        for id in ids {
            statement = statement.bind(*id);
        }
        statement
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to unlink test cases: {e}")))?;

        let delete = format!("DELETE FROM test_points WHERE id IN ({})", placeholders);
        let mut statement = sqlx::query(&delete);
        for id in ids {
            statement = statement.bind(*id);
        }
        let result = statement
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to delete test points: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to commit delete: {e}")))?;

        Ok(result.rows_affected())
    }

    async fn update_case_execution_status(
        &self,
        case_id: i64,
        status: ExecutionStatus,
    ) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to begin status update: {e}")))?;

        let logs_json = sqlx::query_scalar::<_, String>("SELECT logs_json FROM test_cases WHERE id = ?")
            .bind(case_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to fetch test case: {e}")))?
            .ok_or_else(|| AppError::NotFound(format!("Test case not found: {}", case_id)))?;

        let executed_at = chrono::Utc::now().timestamp_millis();
        let mut logs = parse_logs(case_id, &logs_json);
        logs.push(ExecutionLogEntry {
            executed_at,
            status,
            note: None,
            executor: None,
        });
        let logs_json = serde_json::to_string(&logs)
            .map_err(|e| AppError::Internal(format!("Failed to encode execution logs: {e}")))?;

        sqlx::query(
            "UPDATE test_cases SET execution_status = ?, last_run = ?, logs_json = ? WHERE id = ?",
        )
        .bind(status.as_str())
        .bind(executed_at)
        .bind(&logs_json)
        .bind(case_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to update execution status: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to commit status update: {e}")))?;

        Ok(())
    }
}

enum BindValue {
    Int(i64),
    Text(String),
}

struct FilterClause {
    sql: String,
    binds: Vec<BindValue>,
}

impl FilterClause {
    fn build(filter: &BoardFilter) -> Self {
        let filter = filter.clone().normalized();
        let mut conditions: Vec<&str> = vec!["1 = 1"];
        let mut binds = Vec::new();

        if let Some(project_id) = filter.project_id {
            conditions.push("p.project_id = ?");
            binds.push(BindValue::Int(project_id));
        }
        if let Some(version) = filter.version {
            conditions.push("p.version = ?");
            binds.push(BindValue::Text(version));
        }
        if let Some(module) = filter.module {
            conditions.push("c.module = ?");
            binds.push(BindValue::Text(module));
        }
        if let Some(scenario) = filter.scenario {
            conditions.push("p.tag = ?");
            binds.push(BindValue::Text(scenario));
        }
        if let Some(risk_level) = filter.risk_level {
            conditions.push("p.risk_level = ?");
            binds.push(BindValue::Text(risk_level.as_str().to_string()));
        }
        if let Some(priority) = filter.priority {
            conditions.push("c.priority = ?");
            binds.push(BindValue::Text(priority.as_str().to_string()));
        }
        if let Some(execution_status) = filter.execution_status {
            conditions.push("c.execution_status = ?");
            binds.push(BindValue::Text(execution_status.as_str().to_string()));
        }
        if let Some(keyword) = filter.keyword {
            let pattern = format!("%{}%", escape_like(&keyword));
            conditions.push("(p.name LIKE ? ESCAPE '\\' OR c.name LIKE ? ESCAPE '\\')");
            binds.push(BindValue::Text(pattern.clone()));
            binds.push(BindValue::Text(pattern));
        }

        Self {
            sql: conditions.join(" AND "),
            binds,
        }
    }
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn parse_column<T>(case_id: i64, column: &str, raw: &str) -> T
where
    T: FromStr<Err = String> + Default + Display,
{
    raw.parse().unwrap_or_else(|err| {
        let fallback = T::default();
        warn!(
            case_id,
            column,
            error = %err,
            fallback = %fallback,
            "Unknown stored value, using default"
        );
        fallback
    })
}

fn parse_logs(case_id: i64, logs_json: &str) -> Vec<ExecutionLogEntry> {
    serde_json::from_str(logs_json).unwrap_or_else(|err| {
        warn!(case_id, error = %err, "Discarding unreadable execution logs");
        Vec::new()
    })
}

fn db_path_to_url(db_path: &Path) -> Result<String> {
    let db_path_str = db_path.to_str().ok_or_else(|| {
        AppError::DatabaseError("Test asset database path is not valid UTF-8".to_string())
    })?;
    Ok(format!("sqlite://{}", db_path_str.replace("\\", "/")))
}

#[derive(sqlx::FromRow)]
struct FlatRowEntity {
    case_id: i64,
    test_point_id: i64,
    test_point_index: i64,
    test_point_name: String,
    test_purpose: Option<String>,
    test_point_steps: String,
    test_point_expected_result: String,
    test_point_risk_level: String,
    name: String,
    description: Option<String>,
    system: String,
    module: String,
    priority: String,
    status: String,
    execution_status: String,
    last_run: Option<i64>,
    logs_json: String,
    created_at: i64,
    creator: Option<String>,
    tag: Option<String>,
    scenario_name: Option<String>,
    scenario_description: Option<String>,
    source: Option<String>,
}

impl From<FlatRowEntity> for FlatRow {
    fn from(entity: FlatRowEntity) -> Self {
        let execution_logs = parse_logs(entity.case_id, &entity.logs_json);
        Self {
            case_id: Some(entity.case_id),
            test_point_id: Some(entity.test_point_id),
            test_point_index: entity.test_point_index,
            test_point_name: entity.test_point_name,
            test_purpose: entity.test_purpose,
            test_point_steps: entity.test_point_steps,
            test_point_expected_result: entity.test_point_expected_result,
            test_point_risk_level: parse_column(
                entity.case_id,
                "risk_level",
                &entity.test_point_risk_level,
            ),
            name: entity.name,
            description: entity.description,
            system: entity.system,
            module: entity.module,
            priority: parse_column(entity.case_id, "priority", &entity.priority),
            status: parse_column(entity.case_id, "status", &entity.status),
            execution_status: parse_column(
                entity.case_id,
                "execution_status",
                &entity.execution_status,
            ),
            last_run: entity.last_run,
            execution_logs,
            created_at: entity.created_at,
            creator: entity.creator,
            tag: entity.tag,
            scenario_name: entity.scenario_name,
            scenario_description: entity.scenario_description,
            source: entity.source.and_then(|source| source.parse().ok()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::flat_row::{CaseSource, Priority, RiskLevel};

    async fn seeded() -> SqliteTestAssetRepository {
        let repo = SqliteTestAssetRepository::connect_in_memory().await.unwrap();
        repo.upsert_scenario("auth", "Authentication", Some("Login and sessions"))
            .await
            .unwrap();

        let points = [
            (1, "auth", 1, RiskLevel::High),
            (2, "auth", 2, RiskLevel::Medium),
            (3, "billing", 1, RiskLevel::Low),
        ];
        for (id, tag, index, risk_level) in points {
            repo.insert_test_point(&TestPointInput {
                id,
                project_id: Some(1),
                index,
                name: format!("Point {}", id),
                risk_level,
                tag: Some(tag.to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        }

        let cases = [
            (10, "Login succeeds", Priority::High, Some(CaseSource::Ai)),
            (11, "Login locked out", Priority::Medium, None),
            (12, "Refund issued", Priority::Critical, Some(CaseSource::Manual)),
        ];
        for (id, name, priority, source) in cases {
            repo.insert_test_case(&TestCaseInput {
                id,
                name: name.to_string(),
                module: "web".to_string(),
                priority,
                source,
                ..Default::default()
            })
            .await
            .unwrap();
        }

        repo.link_case(1, 10, 0).await.unwrap();
        repo.link_case(1, 11, 1).await.unwrap();
        repo.link_case(2, 10, 0).await.unwrap();
        repo.link_case(3, 12, 0).await.unwrap();
        repo
    }

    #[tokio::test]
    async fn test_fetch_returns_one_row_per_link() {
        let repo = seeded().await;
        let page = repo
            .fetch_flat_rows(&BoardFilter::default(), PageRequest::new(1, 10))
            .await
            .unwrap();
        assert_eq!(page.total_count, 3);
        assert_eq!(page.total_pages, 1);
        let pairs: Vec<(Option<i64>, Option<i64>)> = page
            .rows
            .iter()
            .map(|row| (row.test_point_id, row.case_id))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (Some(1), Some(10)),
                (Some(1), Some(11)),
                (Some(2), Some(10)),
                (Some(3), Some(12)),
            ]
        );
        assert_eq!(page.rows[0].scenario_name.as_deref(), Some("Authentication"));
        assert_eq!(page.rows[0].test_point_risk_level, RiskLevel::High);
        assert_eq!(page.rows[0].source, Some(CaseSource::Ai));
        assert_eq!(page.rows[3].scenario_name, None);
    }

    #[tokio::test]
    async fn test_fetch_paginates_by_test_point() {
        let repo = seeded().await;
        let page = repo
            .fetch_flat_rows(&BoardFilter::default(), PageRequest::new(2, 2))
            .await
            .unwrap();
        assert_eq!(page.total_count, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.rows[0].test_point_id, Some(3));
    }

    #[tokio::test]
    async fn test_fetch_applies_filters() {
        let repo = seeded().await;
        let filter = BoardFilter {
            priority: Some(Priority::High),
            ..Default::default()
        };
        let page = repo
            .fetch_flat_rows(&filter, PageRequest::new(1, 10))
            .await
            .unwrap();
        assert_eq!(page.total_count, 2);
        assert!(page.rows.iter().all(|row| row.case_id == Some(10)));

        let filter = BoardFilter {
            keyword: Some("refund".to_string()),
            ..Default::default()
        };
        let page = repo
            .fetch_flat_rows(&filter, PageRequest::new(1, 10))
            .await
            .unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.rows[0].test_point_id, Some(3));
    }

    #[tokio::test]
    async fn test_update_status_appends_log() {
        let repo = seeded().await;
        repo.update_case_execution_status(10, ExecutionStatus::Failed)
            .await
            .unwrap();
        let page = repo
            .fetch_flat_rows(&BoardFilter::default(), PageRequest::new(1, 10))
            .await
            .unwrap();
        let updated: Vec<&FlatRow> = page
            .rows
            .iter()
            .filter(|row| row.case_id == Some(10))
            .collect();
        assert_eq!(updated.len(), 2);
        for row in updated {
            assert_eq!(row.execution_status, ExecutionStatus::Failed);
            assert!(row.last_run.is_some());
            assert_eq!(row.execution_logs.len(), 1);
            assert_eq!(row.execution_logs[0].status, ExecutionStatus::Failed);
        }
    }

    #[tokio::test]
    async fn test_update_unknown_case_is_not_found() {
        let repo = seeded().await;
        let result = repo
            .update_case_execution_status(999, ExecutionStatus::Passed)
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_keyword_wildcards_are_literal() {
        let repo = seeded().await;
        repo.insert_test_point(&TestPointInput {
            id: 4,
            index: 3,
            name: "Coupon 100% off".to_string(),
            tag: Some("billing".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
        repo.link_case(4, 12, 0).await.unwrap();

        for keyword in ["%", "_"] {
            let filter = BoardFilter {
                keyword: Some(keyword.to_string()),
                ..Default::default()
            };
            let page = repo
                .fetch_flat_rows(&filter, PageRequest::new(1, 10))
                .await
                .unwrap();
            let ids: Vec<Option<i64>> = page.rows.iter().map(|row| row.test_point_id).collect();
            assert_eq!(page.total_count, if keyword == "%" { 1 } else { 0 });
            assert!(ids.iter().all(|id| *id == Some(4)));
        }

        let filter = BoardFilter {
            keyword: Some("100%".to_string()),
            ..Default::default()
        };
        let page = repo
            .fetch_flat_rows(&filter, PageRequest::new(1, 10))
            .await
            .unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.rows[0].test_point_id, Some(4));
    }

    #[tokio::test]
    async fn test_unknown_stored_status_falls_back_to_pending() {
        let repo = seeded().await;
        sqlx::query(
            "UPDATE test_cases SET execution_status = 'skipped', priority = 'urgent' WHERE id = 11",
        )
        .execute(&repo.pool)
        .await
        .unwrap();
        let page = repo
            .fetch_flat_rows(&BoardFilter::default(), PageRequest::new(1, 10))
            .await
            .unwrap();
        let row = page
            .rows
            .iter()
            .find(|row| row.case_id == Some(11))
            .unwrap();
        assert_eq!(row.execution_status, ExecutionStatus::Pending);
        assert_eq!(row.priority, Priority::Medium);
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\x"), "50\\%\\_off\\\\x");
        assert_eq!(escape_like("login"), "login");
    }

    #[tokio::test]
    async fn test_from_config_uses_database_file() {
        let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let dir = std::env::temp_dir()
            .join(format!("testdesk-db-{}-{}", std::process::id(), nanos));
        std::fs::create_dir_all(&dir).unwrap();
        let config = BoardConfig {
            database_path: Some(dir.join("assets.db")),
            ..Default::default()
        };

        {
            let repo = SqliteTestAssetRepository::from_config(&config).await.unwrap();
            repo.insert_test_point(&TestPointInput {
                id: 1,
                name: "Persisted point".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
            repo.insert_test_case(&TestCaseInput {
                id: 10,
                name: "Persisted case".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
            repo.link_case(1, 10, 0).await.unwrap();
            repo.pool.close().await;
        }

        let reopened = SqliteTestAssetRepository::from_config(&config).await.unwrap();
        let page = reopened
            .fetch_flat_rows(&BoardFilter::default(), PageRequest::new(1, 10))
            .await
            .unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.rows[0].test_point_name, "Persisted point");
        reopened.pool.close().await;
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_from_config_without_path_is_in_memory() {
        let repo = SqliteTestAssetRepository::from_config(&BoardConfig::default())
            .await
            .unwrap();
        assert_eq!(repo.count_test_points(&BoardFilter::default()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_points_removes_links() {
        let repo = seeded().await;
        assert_eq!(repo.delete_test_points(&[]).await.unwrap(), 0);
        assert_eq!(repo.delete_test_points(&[1, 3, 77]).await.unwrap(), 2);
        let page = repo
            .fetch_flat_rows(&BoardFilter::default(), PageRequest::new(1, 10))
            .await
            .unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.rows[0].test_point_id, Some(2));
    }
}
