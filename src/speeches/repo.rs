use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// One finished pipeline run. Insert-only: rows are never updated or
/// deleted once written.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GeneratedSpeech {
    pub id: Uuid,
    /// NULL for anonymously generated content.
    pub user_id: Option<Uuid>,
    pub speech_text: String,
    pub speech_url: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl GeneratedSpeech {
    pub async fn insert(
        db: &PgPool,
        user_id: Option<Uuid>,
        speech_text: &str,
        speech_url: &str,
    ) -> anyhow::Result<GeneratedSpeech> {
        let row = sqlx::query_as::<_, GeneratedSpeech>(
            r#"
            INSERT INTO generated_speeches (user_id, speech_text, speech_url)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, speech_text, speech_url, created_at
            "#,
        )
        .bind(user_id)
        .bind(speech_text)
        .bind(speech_url)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn list_for_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<GeneratedSpeech>> {
        let rows = sqlx::query_as::<_, GeneratedSpeech>(
            r#"
            SELECT id, user_id, speech_text, speech_url, created_at
            FROM generated_speeches
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn get_for_user(
        db: &PgPool,
        user_id: Uuid,
        id: Uuid,
    ) -> anyhow::Result<Option<GeneratedSpeech>> {
        let row = sqlx::query_as::<_, GeneratedSpeech>(
            r#"
            SELECT id, user_id, speech_text, speech_url, created_at
            FROM generated_speeches
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn list_public(db: &PgPool) -> anyhow::Result<Vec<GeneratedSpeech>> {
        let rows = sqlx::query_as::<_, GeneratedSpeech>(
            r#"
            SELECT id, user_id, speech_text, speech_url, created_at
            FROM generated_speeches
            WHERE user_id IS NULL
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn get_public(db: &PgPool, id: Uuid) -> anyhow::Result<Option<GeneratedSpeech>> {
        let row = sqlx::query_as::<_, GeneratedSpeech>(
            r#"
            SELECT id, user_id, speech_text, speech_url, created_at
            FROM generated_speeches
            WHERE id = $1 AND user_id IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }
}
