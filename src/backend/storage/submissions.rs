//! PostgreSQL Submission Store
//!
//! Submissions live in the `submissions` table. `unique_id` carries a UNIQUE
//! constraint, so a duplicate allocation would fail the insert rather than
//! silently shadow an existing record.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::backend::storage::{NewSubmission, StoreError, StoredSubmission, SubmissionStore};
use crate::shared::{AbstractType, SubmissionFields, SubmissionPatch};

const SUBMISSION_COLUMNS: &str = "id, unique_id, submitter_name, submitter_email, abstract_title, \
    abstract_type, theme, company, discipline, author_names, abstract_content, created_at, updated_at";

/// Submission store backed by the `submissions` table
#[derive(Debug, Clone)]
pub struct PgSubmissionStore {
    pool: PgPool,
}

impl PgSubmissionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a `submissions` row onto a `StoredSubmission`
fn submission_from_row(row: &PgRow) -> Result<StoredSubmission, sqlx::Error> {
    let abstract_type: String = row.try_get("abstract_type")?;
    let abstract_type = abstract_type
        .parse::<AbstractType>()
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

    Ok(StoredSubmission {
        id: row.try_get("id")?,
        unique_id: row.try_get("unique_id")?,
        fields: SubmissionFields {
            submitter_name: row.try_get("submitter_name")?,
            submitter_email: row.try_get("submitter_email")?,
            abstract_title: row.try_get("abstract_title")?,
            abstract_type,
            theme: row.try_get("theme")?,
            company: row.try_get("company")?,
            discipline: row.try_get("discipline")?,
            author_names: row.try_get("author_names")?,
            abstract_content: row.try_get("abstract_content")?,
        },
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl SubmissionStore for PgSubmissionStore {
    async fn create(&self, record: NewSubmission) -> Result<StoredSubmission, StoreError> {
        let fields = &record.fields;
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO submissions (unique_id, submitter_name, submitter_email, abstract_title,
                abstract_type, theme, company, discipline, author_names, abstract_content,
                created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
            RETURNING {}
            "#,
            SUBMISSION_COLUMNS
        ))
        .bind(record.unique_id)
        .bind(&fields.submitter_name)
        .bind(&fields.submitter_email)
        .bind(&fields.abstract_title)
        .bind(fields.abstract_type.as_str())
        .bind(&fields.theme)
        .bind(&fields.company)
        .bind(&fields.discipline)
        .bind(&fields.author_names)
        .bind(&fields.abstract_content)
        .bind(record.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(submission_from_row(&row)?)
    }

    async fn find_by_unique_id(
        &self,
        unique_id: i64,
    ) -> Result<Option<StoredSubmission>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM submissions WHERE unique_id = $1",
            SUBMISSION_COLUMNS
        ))
        .bind(unique_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(submission_from_row).transpose()?)
    }

    async fn update_by_unique_id(
        &self,
        unique_id: i64,
        patch: &SubmissionPatch,
    ) -> Result<Option<StoredSubmission>, StoreError> {
        // unique_id and created_at are never in the SET list
        let row = sqlx::query(&format!(
            r#"
            UPDATE submissions SET
                submitter_name = COALESCE($2, submitter_name),
                submitter_email = COALESCE($3, submitter_email),
                abstract_title = COALESCE($4, abstract_title),
                abstract_type = COALESCE($5, abstract_type),
                theme = COALESCE($6, theme),
                company = COALESCE($7, company),
                discipline = COALESCE($8, discipline),
                author_names = COALESCE($9, author_names),
                abstract_content = COALESCE($10, abstract_content),
                updated_at = $11
            WHERE unique_id = $1
            RETURNING {}
            "#,
            SUBMISSION_COLUMNS
        ))
        .bind(unique_id)
        .bind(patch.submitter_name.as_deref())
        .bind(patch.submitter_email.as_deref())
        .bind(patch.abstract_title.as_deref())
        .bind(patch.abstract_type.map(|kind| kind.as_str()))
        .bind(patch.theme.as_deref())
        .bind(patch.company.as_deref())
        .bind(patch.discipline.as_deref())
        .bind(patch.author_names.as_deref())
        .bind(patch.abstract_content.as_deref())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(submission_from_row).transpose()?)
    }
}
