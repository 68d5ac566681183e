//! PostgreSQL repository adapter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

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
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository with row-level locking for invoice updates.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    tracing::debug!(migration = name, "applied");
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_tables_pg.sql"),
        "0001",
    )
    .await?;

    execute_migration(
        pool,
        include_str!("../migrations/0002_create_industries_pg.sql"),
        "0002",
    )
    .await?;

    Ok(())
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }
}

const INVOICE_COLUMNS: &str = "id, comp_code, amt, paid, add_date, paid_date";

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl BizTimeRepository for PostgresRepo {
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
            sqlx::query_as(r#"SELECT code, name, description FROM companies WHERE code = $1"#)
                .bind(code)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(row.map(Company::from))
    }

    async fn list_invoice_ids_for_company(&self, code: &str) -> Result<Vec<InvoiceId>, RepoError> {
        let ids: Vec<i64> =
            sqlx::query_scalar(r#"SELECT id FROM invoices WHERE comp_code = $1 ORDER BY id"#)
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
               WHERE ci.comp_code = $1
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
            r#"INSERT INTO companies (code, name, description) VALUES ($1, $2, $3)
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
            r#"UPDATE companies SET name = $1, description = $2 WHERE code = $3
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
        let result = sqlx::query(r#"DELETE FROM companies WHERE code = $1"#)
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
               WHERE i.id = $1"#,
        )
        .bind(id.into_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(InvoiceDetail::from))
    }

    async fn create_invoice(&self, invoice: NewInvoice) -> Result<Invoice, RepoError> {
        let row: DbInvoice = sqlx::query_as(&format!(
            "INSERT INTO invoices (comp_code, amt, add_date) VALUES ($1, $2, $3) RETURNING {INVOICE_COLUMNS}"
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
        let mut db_tx = self.pool.begin().await.map_err(map_db_error)?;

        // Lock the invoice with FOR UPDATE so the paid date decision holds until commit
        let current: Option<Option<DateTime<Utc>>> =
            sqlx::query_scalar(r#"SELECT paid_date FROM invoices WHERE id = $1 FOR UPDATE"#)
                .bind(id.into_i64())
                .fetch_optional(&mut *db_tx)
                .await
                .map_err(map_db_error)?;

        let Some(current_paid_date) = current else {
            return Ok(None);
        };

        let paid_date = changes.next_paid_date(current_paid_date, Utc::now());

        let row: Option<DbInvoice> = sqlx::query_as(&format!(
            "UPDATE invoices SET amt = $1, paid = $2, paid_date = $3 WHERE id = $4 RETURNING {INVOICE_COLUMNS}"
        ))
        .bind(changes.amt)
        .bind(changes.paid)
        .bind(paid_date)
        .bind(id.into_i64())
        .fetch_optional(&mut *db_tx)
        .await
        .map_err(map_db_error)?;

        db_tx.commit().await.map_err(map_db_error)?;

        Ok(row.map(Invoice::from))
    }

    async fn delete_invoice(&self, id: InvoiceId) -> Result<bool, RepoError> {
        let result = sqlx::query(r#"DELETE FROM invoices WHERE id = $1"#)
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
            sqlx::query_as(r#"SELECT code, industry FROM industries WHERE code = $1"#)
                .bind(code)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(row.map(Industry::from))
    }

    async fn create_industry(&self, industry: Industry) -> Result<Industry, RepoError> {
        let row: DbIndustry = sqlx::query_as(
            r#"INSERT INTO industries (code, industry) VALUES ($1, $2) RETURNING code, industry"#,
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
        sqlx::query(r#"INSERT INTO companies_industries (comp_code, ind_code) VALUES ($1, $2)"#)
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
