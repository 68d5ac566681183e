//! SQLite repository adapter.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

use biztime_types::{
    BizTimeRepository, Company, CompanyChanges, CompanyIndustry, Industry, IndustrySummary,
    Invoice, InvoiceChanges, InvoiceDetail, InvoiceId, InvoiceSummary, NewCompany, NewInvoice,
    RepoError,
};

use crate::types::{
    DbCompany, DbIndustry, DbIndustryMember, DbInvoice, DbInvoiceSummary, DbInvoiceWithCompany,
    group_industries, map_db_error,
};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

const MIGRATIONS: &[(&str, &str)] = &[
    ("0001", include_str!("../migrations/0001_create_tables.sql")),
    ("0002", include_str!("../migrations/0002_create_industries.sql")),
];

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        // Every connection to `:memory:` is a separate database, so keep exactly one alive.
        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options.connect_with(options).await?;

        let repo = Self { pool };
        repo.create_schema().await?;
        Ok(repo)
    }

    /// Creates the database schema (idempotent).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        for (name, sql) in MIGRATIONS {
            for statement in sql.split(';').map(str::trim).filter(|s| !s.is_empty()) {
                sqlx::query(statement)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| RepoError::Database(format!("Migration {} failed: {}", name, e)))?;
            }
            tracing::debug!(migration = name, "applied");
        }
        Ok(())
    }
}

const INVOICE_COLUMNS: &str = "id, comp_code, amt, paid, add_date, paid_date";

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl BizTimeRepository for SqliteRepo {
    async fn list_companies(&self) -> Result<Vec<Company>, RepoError> {
        let rows: Vec<DbCompany> =
            sqlx::query_as(r#"SELECT code, name, description FROM companies ORDER BY code"#)
                .fetch_all(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Company::from).collect())
    }

    async fn get_company(&self, code: &str) -> Result<Option<Company>, RepoError> {
        let row: Option<DbCompany> =
            sqlx::query_as(r#"SELECT code, name, description FROM companies WHERE code = ?"#)
                .bind(code)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(row.map(Company::from))
    }

    async fn list_invoice_ids_for_company(&self, code: &str) -> Result<Vec<InvoiceId>, RepoError> {
        let ids: Vec<i64> =
            sqlx::query_scalar(r#"SELECT id FROM invoices WHERE comp_code = ? ORDER BY id"#)
                .bind(code)
                .fetch_all(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(ids.into_iter().map(InvoiceId::from_i64).collect())
    }

    async fn list_industries_for_company(&self, code: &str) -> Result<Vec<Industry>, RepoError> {
        let rows: Vec<DbIndustry> = sqlx::query_as(
            r#"SELECT i.code, i.industry
               FROM industries i
               JOIN companies_industries ci ON ci.ind_code = i.code
               WHERE ci.comp_code = ?
               ORDER BY i.code"#,
        )
        .bind(code)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Industry::from).collect())
    }

    async fn create_company(&self, company: NewCompany) -> Result<Company, RepoError> {
        let row: DbCompany = sqlx::query_as(
            r#"INSERT INTO companies (code, name, description) VALUES (?, ?, ?)
               RETURNING code, name, description"#,
        )
        .bind(&company.code)
        .bind(&company.name)
        .bind(&company.description)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.into())
    }

    async fn update_company(
        &self,
        code: &str,
        changes: CompanyChanges,
    ) -> Result<Option<Company>, RepoError> {
        let row: Option<DbCompany> = sqlx::query_as(
            r#"UPDATE companies SET name = ?, description = ? WHERE code = ?
               RETURNING code, name, description"#,
        )
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(Company::from))
    }

    async fn delete_company(&self, code: &str) -> Result<bool, RepoError> {
        let result = sqlx::query(r#"DELETE FROM companies WHERE code = ?"#)
            .bind(code)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, RepoError> {
        let rows: Vec<DbInvoiceSummary> =
            sqlx::query_as(r#"SELECT id, comp_code FROM invoices ORDER BY id"#)
                .fetch_all(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(rows.into_iter().map(InvoiceSummary::from).collect())
    }

    async fn get_invoice(&self, id: InvoiceId) -> Result<Option<InvoiceDetail>, RepoError> {
        let row: Option<DbInvoiceWithCompany> = sqlx::query_as(
            r#"SELECT i.id, i.comp_code, i.amt, i.paid, i.add_date, i.paid_date,
                      c.code, c.name, c.description
               FROM invoices i
               JOIN companies c ON i.comp_code = c.code
               WHERE i.id = ?"#,
        )
        .bind(id.into_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(InvoiceDetail::from))
    }

    async fn create_invoice(&self, invoice: NewInvoice) -> Result<Invoice, RepoError> {
        let row: DbInvoice = sqlx::query_as(&format!(
            "INSERT INTO invoices (comp_code, amt, paid, add_date) VALUES (?, ?, 0, ?) RETURNING {INVOICE_COLUMNS}"
        ))
        .bind(&invoice.comp_code)
        .bind(invoice.amt)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.into())
    }

    async fn update_invoice(
        &self,
        id: InvoiceId,
        changes: InvoiceChanges,
    ) -> Result<Option<Invoice>, RepoError> {
        // A deferred read-then-write transaction cannot upgrade its lock while another
        // writer holds it, so the paid date is derived inside the UPDATE itself.
        let row: Option<DbInvoice> = sqlx::query_as(&format!(
            r#"
            UPDATE invoices
            SET amt = ?,
                paid = ?,
                paid_date = CASE WHEN ? THEN COALESCE(paid_date, ?) ELSE NULL END
            WHERE id = ?
            RETURNING {INVOICE_COLUMNS}
            "#
        ))
        .bind(changes.amt)
        .bind(changes.paid)
        .bind(changes.paid)
        .bind(Utc::now())
        .bind(id.into_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(Invoice::from))
    }

    async fn delete_invoice(&self, id: InvoiceId) -> Result<bool, RepoError> {
        let result = sqlx::query(r#"DELETE FROM invoices WHERE id = ?"#)
            .bind(id.into_i64())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_industries(&self) -> Result<Vec<IndustrySummary>, RepoError> {
        let rows: Vec<DbIndustryMember> = sqlx::query_as(
            r#"SELECT i.code, i.industry, ci.comp_code
               FROM industries i
               LEFT JOIN companies_industries ci ON ci.ind_code = i.code
               ORDER BY i.code, ci.comp_code"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(group_industries(rows))
    }

    async fn get_industry(&self, code: &str) -> Result<Option<Industry>, RepoError> {
        let row: Option<DbIndustry> =
            sqlx::query_as(r#"SELECT code, industry FROM industries WHERE code = ?"#)
                .bind(code)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(row.map(Industry::from))
    }

    async fn create_industry(&self, industry: Industry) -> Result<Industry, RepoError> {
        let row: DbIndustry = sqlx::query_as(
            r#"INSERT INTO industries (code, industry) VALUES (?, ?) RETURNING code, industry"#,
        )
        .bind(&industry.code)
        .bind(&industry.industry)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.into())
    }

    async fn associate_company(
        &self,
        ind_code: &str,
        comp_code: &str,
    ) -> Result<CompanyIndustry, RepoError> {
        sqlx::query(r#"INSERT INTO companies_industries (comp_code, ind_code) VALUES (?, ?)"#)
            .bind(comp_code)
            .bind(ind_code)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(CompanyIndustry {
            comp_code: comp_code.to_string(),
            ind_code: ind_code.to_string(),
        })
    }
}
