use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Preference {
    pub id: Uuid,
    pub user_id: Uuid,
    pub persona: String,
    pub tone: String,
    pub voice: String,
}

impl Preference {
    pub async fn find_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<Preference>> {
        let pref = sqlx::query_as::<_, Preference>(
            r#"
            SELECT id, user_id, persona, tone, voice
            FROM preferences
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(pref)
    }

    pub async fn upsert(
        db: &PgPool,
        user_id: Uuid,
        persona: &str,
        tone: &str,
        voice: &str,
    ) -> anyhow::Result<Preference> {
        let pref = sqlx::query_as::<_, Preference>(
            r#"
            INSERT INTO preferences (user_id, persona, tone, voice)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id)
            DO UPDATE SET persona = $2, tone = $3, voice = $4
            RETURNING id, user_id, persona, tone, voice
            "#,
        )
        .bind(user_id)
        .bind(persona)
        .bind(tone)
        .bind(voice)
        .fetch_one(db)
        .await?;
        Ok(pref)
    }
}
