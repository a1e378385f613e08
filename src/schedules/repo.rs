use sqlx::{FromRow, PgPool};
use time::Time;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Schedule {
    pub id: Uuid,
    pub user_id: Uuid,
    pub day_of_week: String,
    pub time_of_day: Time,
}

impl Schedule {
    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Schedule>> {
        let rows = sqlx::query_as::<_, Schedule>(
            r#"
            SELECT id, user_id, day_of_week, time_of_day
            FROM schedules
            WHERE user_id = $1
            ORDER BY day_of_week, time_of_day
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Replaces the user's whole schedule in one transaction. The write
    /// path owns the one-entry-per-day invariant; entries are validated
    /// by the handler before this is called.
    pub async fn replace_for_user(
        db: &PgPool,
        user_id: Uuid,
        entries: &[(String, Time)],
    ) -> anyhow::Result<Vec<Schedule>> {
        let mut tx = db.begin().await?;

        sqlx::query("DELETE FROM schedules WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let mut created = Vec::with_capacity(entries.len());
        for (day, at) in entries {
            let row = sqlx::query_as::<_, Schedule>(
                r#"
                INSERT INTO schedules (user_id, day_of_week, time_of_day)
                VALUES ($1, $2, $3)
                RETURNING id, user_id, day_of_week, time_of_day
                "#,
            )
            .bind(user_id)
            .bind(day)
            .bind(at)
            .fetch_one(&mut *tx)
            .await?;
            created.push(row);
        }

        tx.commit().await?;
        Ok(created)
    }
}
