use chrono::{DateTime, NaiveDate, Utc};
use color_eyre::eyre::{eyre, Result};
use secrecy::Secret;
use sqlx::{postgres::PgRow, PgPool, Row};

use crate::domain::{
    AdminId, Email, Member, MemberId, MemberPasswordHash, MemberStatus,
    MemberStore, MemberStoreError, Task, TokenHash,
};

pub struct PostgresMemberStore {
    pool: PgPool,
}

impl PostgresMemberStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one(
        &self,
        query: &str,
        bind: &str,
    ) -> Result<Member, MemberStoreError> {
        let row = sqlx::query(query)
            .bind(bind)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => MemberStoreError::MemberNotFound,
                err => MemberStoreError::UnexpectedError(eyre!(err)),
            })?;

        member_from_row(&row)
            .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))
    }
}

#[async_trait::async_trait]
impl MemberStore for PostgresMemberStore {
    #[tracing::instrument(name = "Adding member to PostgreSQL", skip_all)]
    async fn add_member(
        &mut self,
        member: Member,
    ) -> Result<(), MemberStoreError> {
        let tasks = serde_json::to_value(&member.tasks)
            .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;

        sqlx::query(
            r#"
            INSERT INTO members
                (id, admin_id, first_name, last_name, email, position,
                 join_date, status, password_hash, invite_token_hash,
                 reset_token_hash, reset_token_expires_at, tasks)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(member.id.as_ref())
        .bind(member.admin_id.as_ref())
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(expose_email(&member.email))
        .bind(&member.position)
        .bind(member.join_date)
        .bind(member.status.as_str())
        .bind(expose_hash(member.password_hash.as_ref()))
        .bind(member.invite_token_hash.as_ref().map(|h| h.as_ref()))
        .bind(member.reset_token_hash.as_ref().map(|h| h.as_ref()))
        .bind(member.reset_token_expires_at)
        .bind(tasks)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                MemberStoreError::EmailAlreadyExists
            }
            err => MemberStoreError::UnexpectedError(eyre!(err)),
        })?;
        Ok(())
    }

    #[tracing::instrument(name = "Retrieving member from PostgreSQL", skip_all)]
    async fn get_member(
        &self,
        id: &MemberId,
    ) -> Result<Member, MemberStoreError> {
        let row = sqlx::query("SELECT * FROM members WHERE id = $1")
            .bind(id.as_ref())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => MemberStoreError::MemberNotFound,
                err => MemberStoreError::UnexpectedError(eyre!(err)),
            })?;

        member_from_row(&row)
            .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))
    }

    #[tracing::instrument(
        name = "Retrieving member by email from PostgreSQL",
        skip_all
    )]
    async fn get_member_by_email(
        &self,
        email: &Email,
    ) -> Result<Member, MemberStoreError> {
        self.fetch_one(
            "SELECT * FROM members WHERE email = $1",
            expose_email(email),
        )
        .await
    }

    #[tracing::instrument(
        name = "Retrieving member by invite token from PostgreSQL",
        skip_all
    )]
    async fn get_member_by_invite_token(
        &self,
        hash: &TokenHash,
    ) -> Result<Member, MemberStoreError> {
        self.fetch_one(
            "SELECT * FROM members WHERE invite_token_hash = $1",
            hash.as_ref(),
        )
        .await
    }

    #[tracing::instrument(
        name = "Retrieving member by reset token from PostgreSQL",
        skip_all
    )]
    async fn get_member_by_reset_token(
        &self,
        hash: &TokenHash,
    ) -> Result<Member, MemberStoreError> {
        self.fetch_one(
            "SELECT * FROM members WHERE reset_token_hash = $1",
            hash.as_ref(),
        )
        .await
    }

    #[tracing::instrument(name = "Listing members from PostgreSQL", skip_all)]
    async fn list_members(
        &self,
        admin_id: &AdminId,
    ) -> Result<Vec<Member>, MemberStoreError> {
        let rows = sqlx::query(
            "SELECT * FROM members WHERE admin_id = $1 ORDER BY join_date",
        )
        .bind(admin_id.as_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;

        rows.iter()
            .map(|row| {
                member_from_row(row)
                    .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))
            })
            .collect()
    }

    #[tracing::instrument(name = "Updating member in PostgreSQL", skip_all)]
    async fn update_member(
        &mut self,
        member: &Member,
    ) -> Result<(), MemberStoreError> {
        let tasks = serde_json::to_value(&member.tasks)
            .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;

        let result = sqlx::query(
            r#"
            UPDATE members SET
                first_name = $2, last_name = $3, email = $4, position = $5,
                join_date = $6, status = $7, password_hash = $8,
                invite_token_hash = $9, reset_token_hash = $10,
                reset_token_expires_at = $11, tasks = $12
            WHERE id = $1
            "#,
        )
        .bind(member.id.as_ref())
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(expose_email(&member.email))
        .bind(&member.position)
        .bind(member.join_date)
        .bind(member.status.as_str())
        .bind(expose_hash(member.password_hash.as_ref()))
        .bind(member.invite_token_hash.as_ref().map(|h| h.as_ref()))
        .bind(member.reset_token_hash.as_ref().map(|h| h.as_ref()))
        .bind(member.reset_token_expires_at)
        .bind(tasks)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                MemberStoreError::EmailAlreadyExists
            }
            err => MemberStoreError::UnexpectedError(eyre!(err)),
        })?;

        if result.rows_affected() == 0 {
            return Err(MemberStoreError::MemberNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Deleting member from PostgreSQL", skip_all)]
    async fn delete_member(
        &mut self,
        id: &MemberId,
    ) -> Result<(), MemberStoreError> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id.as_ref())
            .execute(&self.pool)
            .await
            .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            return Err(MemberStoreError::MemberNotFound);
        }

        Ok(())
    }
}

fn expose_email(email: &Email) -> &str {
    use secrecy::ExposeSecret;
    email.as_ref().expose_secret()
}

fn expose_hash(hash: Option<&MemberPasswordHash>) -> Option<&str> {
    use secrecy::ExposeSecret;
    hash.map(|h| h.as_ref().expose_secret().as_str())
}

fn member_from_row(row: &PgRow) -> Result<Member> {
    let tasks: Vec<Task> = serde_json::from_value(row.try_get("tasks")?)?;

    let password_hash = row
        .try_get::<Option<String>, _>("password_hash")?
        .map(|h| MemberPasswordHash::parse(Secret::new(h)))
        .transpose()?;

    let invite_token_hash = row
        .try_get::<Option<String>, _>("invite_token_hash")?
        .map(TokenHash::parse)
        .transpose()
        .map_err(|e| eyre!(e))?;

    let reset_token_hash = row
        .try_get::<Option<String>, _>("reset_token_hash")?
        .map(TokenHash::parse)
        .transpose()
        .map_err(|e| eyre!(e))?;

    Ok(Member {
        id: MemberId::new(row.try_get("id")?),
        admin_id: AdminId::new(row.try_get("admin_id")?),
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: Email::parse(Secret::new(row.try_get("email")?))
            .map_err(|e| eyre!(e))?,
        position: row.try_get("position")?,
        join_date: row.try_get::<NaiveDate, _>("join_date")?,
        status: MemberStatus::parse(&row.try_get::<String, _>("status")?)
            .map_err(|e| eyre!(e))?,
        password_hash,
        invite_token_hash,
        reset_token_hash,
        reset_token_expires_at: row
            .try_get::<Option<DateTime<Utc>>, _>("reset_token_expires_at")?,
        tasks,
    })
}
