use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub endpoint: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
    /// Base under which uploaded objects are publicly reachable.
    pub public_base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    pub subscription_key: String,
    pub region: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailerConfig {
    pub endpoint: String,
    pub api_key: String,
    pub sender_address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    pub enabled: bool,
    /// Cadence of the delivery loop. Matching is exact-minute, so anything
    /// other than 60 risks missed or duplicate matches within a minute.
    pub tick_seconds: u64,
    /// Bound on each external service call made by the pipeline.
    pub call_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub storage: StorageConfig,
    pub openai: OpenAiConfig,
    pub speech: SpeechConfig,
    pub mailer: MailerConfig,
    pub scheduler: SchedulerConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "orator".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "orator-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
            refresh_ttl_minutes: std::env::var("JWT_REFRESH_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24 * 14),
        };
        let storage = StorageConfig {
            endpoint: std::env::var("STORAGE_ENDPOINT")?,
            bucket: std::env::var("STORAGE_BUCKET")?,
            access_key: std::env::var("STORAGE_ACCESS_KEY")?,
            secret_key: std::env::var("STORAGE_SECRET_KEY")?,
            region: std::env::var("STORAGE_REGION").unwrap_or_else(|_| "us-east-1".into()),
            public_base_url: std::env::var("STORAGE_PUBLIC_BASE_URL")?,
        };
        let openai = OpenAiConfig {
            api_key: std::env::var("OPENAI_API_KEY")?,
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into()),
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".into()),
        };
        let speech = SpeechConfig {
            subscription_key: std::env::var("SPEECH_SUBSCRIPTION_KEY")?,
            region: std::env::var("SPEECH_REGION")?,
        };
        let mailer = MailerConfig {
            endpoint: std::env::var("MAILER_ENDPOINT")?,
            api_key: std::env::var("MAILER_API_KEY")?,
            sender_address: std::env::var("SENDER_EMAIL_ADDRESS")?,
        };
        let scheduler = SchedulerConfig {
            enabled: std::env::var("SCHEDULER_ENABLED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
            tick_seconds: std::env::var("SCHEDULER_TICK_SECONDS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60),
            call_timeout_seconds: std::env::var("SCHEDULER_CALL_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(120),
        };
        Ok(Self {
            database_url,
            jwt,
            storage,
            openai,
            speech,
            mailer,
            scheduler,
        })
    }
}
