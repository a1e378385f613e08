use axum::async_trait;
use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use crate::preferences::Preference;
use crate::schedules::Schedule;
use crate::users::User;

/// Everything the delivery loop reads or writes in the database, behind
/// one seam so the loop can be exercised without Postgres.
#[async_trait]
pub trait DeliveryStore: Send + Sync {
    async fn load_users(&self) -> anyhow::Result<Vec<User>>;

    async fn schedules_for(&self, user_id: Uuid) -> anyhow::Result<Vec<Schedule>>;

    async fn preference_for(&self, user_id: Uuid) -> anyhow::Result<Option<Preference>>;

    /// Claims the (user, entry, local date) idempotency key. Returns
    /// false when the key is already taken, i.e. a delivery for this
    /// entry has already run today.
    async fn claim_delivery(
        &self,
        user_id: Uuid,
        schedule_id: Uuid,
        delivered_on: Date,
    ) -> anyhow::Result<bool>;

    /// Releases a claim after a failed pipeline run so a later
    /// invocation within the same matching minute may retry.
    async fn release_delivery(
        &self,
        user_id: Uuid,
        schedule_id: Uuid,
        delivered_on: Date,
    ) -> anyhow::Result<()>;
}

#[async_trait]
impl DeliveryStore for PgPool {
    async fn load_users(&self) -> anyhow::Result<Vec<User>> {
        User::find_all(self).await
    }

    async fn schedules_for(&self, user_id: Uuid) -> anyhow::Result<Vec<Schedule>> {
        Schedule::list_by_user(self, user_id).await
    }

    async fn preference_for(&self, user_id: Uuid) -> anyhow::Result<Option<Preference>> {
        Preference::find_by_user(self, user_id).await
    }

    async fn claim_delivery(
        &self,
        user_id: Uuid,
        schedule_id: Uuid,
        delivered_on: Date,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO deliveries (user_id, schedule_id, delivered_on)
            VALUES ($1, $2, $3)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(schedule_id)
        .bind(delivered_on)
        .execute(self)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn release_delivery(
        &self,
        user_id: Uuid,
        schedule_id: Uuid,
        delivered_on: Date,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM deliveries
            WHERE user_id = $1 AND schedule_id = $2 AND delivered_on = $3
            "#,
        )
        .bind(user_id)
        .bind(schedule_id)
        .bind(delivered_on)
        .execute(self)
        .await?;
        Ok(())
    }
}
