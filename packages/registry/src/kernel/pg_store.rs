//! Postgres-backed implementation of the store traits.
//!
//! Runtime queries with `RETURNING *` throughout; the atomic claim
//! primitives are conditional UPDATEs guarded on the column still being
//! NULL, so concurrent claims cannot both succeed.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::common::{StartupId, UserId};
use crate::domains::founder::models::User;
use crate::domains::startup::models::{Partnership, RegistrationDetails, RegistrationType, Startup};

use super::traits::{BasePartnershipStore, BaseStartupStore, BaseUserStore};

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run the embedded schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl BaseUserStore for PgStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn insert(&self, user: User) -> Result<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (
                id,
                email,
                fullname,
                title,
                startup_id,
                pending_startup_id,
                invitation_token,
                startup_link_verifier_id,
                created_at
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.fullname)
        .bind(&user.title)
        .bind(user.startup_id)
        .bind(user.pending_startup_id)
        .bind(&user.invitation_token)
        .bind(&user.startup_link_verifier_id)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn claim_pending_startup(
        &self,
        id: UserId,
        startup_id: StartupId,
    ) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users
             SET pending_startup_id = $2
             WHERE id = $1
               AND pending_startup_id IS NULL
               AND startup_id IS NULL
             RETURNING *",
        )
        .bind(id)
        .bind(startup_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn claim_startup(
        &self,
        id: UserId,
        startup_id: StartupId,
        title: Option<&str>,
    ) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users
             SET startup_id = $2,
                 pending_startup_id = NULL,
                 startup_link_verifier_id = NULL,
                 title = COALESCE($3, title)
             WHERE id = $1
               AND startup_id IS NULL
               AND (pending_startup_id IS NULL OR pending_startup_id = $2)
             RETURNING *",
        )
        .bind(id)
        .bind(startup_id)
        .bind(title)
        .fetch_optional(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn clear_pending_startup(&self, id: UserId) -> Result<()> {
        sqlx::query("UPDATE users SET pending_startup_id = NULL WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_members(&self, startup_id: StartupId) -> Result<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE startup_id = $1 ORDER BY created_at",
        )
        .bind(startup_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn list_pending(&self, startup_id: StartupId) -> Result<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE pending_startup_id = $1 ORDER BY created_at",
        )
        .bind(startup_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Into::into)
    }
}

#[async_trait]
impl BaseStartupStore for PgStore {
    async fn find_by_id(&self, id: StartupId) -> Result<Option<Startup>> {
        sqlx::query_as::<_, Startup>("SELECT * FROM startups WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn insert(&self, startup: Startup) -> Result<Startup> {
        sqlx::query_as::<_, Startup>(
            "INSERT INTO startups (id, name, created_at)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(startup.id)
        .bind(&startup.name)
        .bind(startup.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn set_approval_pending(&self, id: StartupId) -> Result<Option<Startup>> {
        sqlx::query_as::<_, Startup>(
            "UPDATE startups
             SET approval_status = 'pending'
             WHERE id = $1
               AND approval_status IS NULL
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn apply_registration(
        &self,
        id: StartupId,
        registration_type: RegistrationType,
        details: &RegistrationDetails,
    ) -> Result<Option<Startup>> {
        sqlx::query_as::<_, Startup>(
            "UPDATE startups
             SET registration_type = $2,
                 address = $3,
                 state = $4,
                 district = $5,
                 pitch = $6,
                 total_shares = $7
             WHERE id = $1
               AND registration_type IS NULL
             RETURNING *",
        )
        .bind(id)
        .bind(registration_type)
        .bind(&details.address)
        .bind(&details.state)
        .bind(&details.district)
        .bind(&details.pitch)
        .bind(details.total_shares)
        .fetch_optional(&self.pool)
        .await
        .map_err(Into::into)
    }
}

#[async_trait]
impl BasePartnershipStore for PgStore {
    async fn insert(&self, partnership: Partnership) -> Result<Partnership> {
        sqlx::query_as::<_, Partnership>(
            "INSERT INTO partnerships (
                id,
                user_id,
                startup_id,
                shares,
                cash_contribution,
                salary,
                managing_director,
                operate_bank_account,
                created_at
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *",
        )
        .bind(partnership.id)
        .bind(partnership.user_id)
        .bind(partnership.startup_id)
        .bind(partnership.shares)
        .bind(partnership.cash_contribution)
        .bind(partnership.salary)
        .bind(partnership.managing_director)
        .bind(partnership.operate_bank_account)
        .bind(partnership.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn list_for_startup(&self, startup_id: StartupId) -> Result<Vec<Partnership>> {
        sqlx::query_as::<_, Partnership>(
            "SELECT * FROM partnerships WHERE startup_id = $1 ORDER BY id",
        )
        .bind(startup_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn count_for_user(&self, user_id: UserId) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM partnerships WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(Into::into)
    }
}
