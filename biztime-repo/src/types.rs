//! Database row types shared by the SQLite and PostgreSQL adapters.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use biztime_types::{
    Company, Industry, IndustrySummary, Invoice, InvoiceDetail, InvoiceId, InvoiceSummary,
    RepoError,
};

// ─────────────────────────────────────────────────────────────────────────────
// Database row structs (derive FromRow for automatic mapping)
// ─────────────────────────────────────────────────────────────────────────────

/// Company row from database.
#[derive(FromRow)]
pub struct DbCompany {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

impl From<DbCompany> for Company {
    fn from(row: DbCompany) -> Self {
        Company {
            code: row.code,
            name: row.name,
            description: row.description,
        }
    }
}

/// Invoice row from database.
#[derive(FromRow)]
pub struct DbInvoice {
    pub id: i64,
    pub comp_code: String,
    pub amt: f64,
    pub paid: bool,
    pub add_date: DateTime<Utc>,
    pub paid_date: Option<DateTime<Utc>>,
}

impl From<DbInvoice> for Invoice {
    fn from(row: DbInvoice) -> Self {
        Invoice {
            id: InvoiceId::from_i64(row.id),
            comp_code: row.comp_code,
            amt: row.amt,
            paid: row.paid,
            add_date: row.add_date,
            paid_date: row.paid_date,
        }
    }
}

/// `{id, comp_code}` projection of an invoice.
#[derive(FromRow)]
pub struct DbInvoiceSummary {
    pub id: i64,
    pub comp_code: String,
}

impl From<DbInvoiceSummary> for InvoiceSummary {
    fn from(row: DbInvoiceSummary) -> Self {
        InvoiceSummary {
            id: InvoiceId::from_i64(row.id),
            comp_code: row.comp_code,
        }
    }
}

/// Invoice joined with its company.
#[derive(FromRow)]
pub struct DbInvoiceWithCompany {
    pub id: i64,
    pub comp_code: String,
    pub amt: f64,
    pub paid: bool,
    pub add_date: DateTime<Utc>,
    pub paid_date: Option<DateTime<Utc>>,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

impl From<DbInvoiceWithCompany> for InvoiceDetail {
    fn from(row: DbInvoiceWithCompany) -> Self {
        InvoiceDetail {
            id: InvoiceId::from_i64(row.id),
            comp_code: row.comp_code,
            amt: row.amt,
            paid: row.paid,
            add_date: row.add_date,
            paid_date: row.paid_date,
            company: Company {
                code: row.code,
                name: row.name,
                description: row.description,
            },
        }
    }
}

/// Industry row from database.
#[derive(FromRow)]
pub struct DbIndustry {
    pub code: String,
    pub industry: String,
}

impl From<DbIndustry> for Industry {
    fn from(row: DbIndustry) -> Self {
        Industry {
            code: row.code,
            industry: row.industry,
        }
    }
}

/// One row of `industries LEFT JOIN companies_industries`.
#[derive(FromRow)]
pub struct DbIndustryMember {
    pub code: String,
    pub industry: String,
    pub comp_code: Option<String>,
}

/// Folds join rows (ordered by industry code) into one summary per industry.
pub fn group_industries(rows: Vec<DbIndustryMember>) -> Vec<IndustrySummary> {
    let mut summaries: Vec<IndustrySummary> = Vec::new();

    for row in rows {
        let same_industry = summaries
            .last()
            .is_some_and(|last: &IndustrySummary| last.code == row.code);

        if !same_industry {
            summaries.push(IndustrySummary {
                code: row.code,
                industry: row.industry,
                companies: Vec::new(),
            });
        }

        if let (Some(comp_code), Some(summary)) = (row.comp_code, summaries.last_mut()) {
            summary.companies.push(comp_code);
        }
    }

    summaries
}

// ─────────────────────────────────────────────────────────────────────────────
// Error mapping
// ─────────────────────────────────────────────────────────────────────────────

/// Maps a driver error onto the repository taxonomy.
///
/// Constraint violations are surfaced as their own kinds so the service
/// layer can report them with domain messages.
pub fn map_db_error(err: sqlx::Error) -> RepoError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return RepoError::Conflict(db_err.message().to_string());
        }
        if db_err.is_foreign_key_violation() {
            return RepoError::InvalidReference(db_err.message().to_string());
        }
    }
    RepoError::Database(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(code: &str, comp_code: Option<&str>) -> DbIndustryMember {
        DbIndustryMember {
            code: code.into(),
            industry: code.to_uppercase(),
            comp_code: comp_code.map(String::from),
        }
    }

    #[test]
    fn test_group_industries() {
        let grouped = group_industries(vec![
            member("acct", None),
            member("tech", Some("apple")),
            member("tech", Some("ibm")),
        ]);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].code, "acct");
        assert!(grouped[0].companies.is_empty());
        assert_eq!(grouped[1].companies, vec!["apple", "ibm"]);
    }

    #[test]
    fn test_group_industries_empty() {
        assert!(group_industries(Vec::new()).is_empty());
    }

    #[test]
    fn test_non_database_errors_are_generic() {
        let err = map_db_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, RepoError::Database(_)));
    }
}
