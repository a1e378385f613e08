use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// PATCH /preferences payload: profile fields live on the user row, the
/// persona/tone/voice triple on the preference row.
#[derive(Debug, Deserialize)]
pub struct PreferencesUpdate {
    pub first_name: String,
    pub user_profile: Option<String>,
    pub timezone: String,
    pub persona: String,
    pub tone: String,
    pub voice: String,
}

#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    pub user_id: Uuid,
    pub first_name: String,
    pub user_profile: Option<String>,
    pub timezone: String,
    pub persona: String,
    pub tone: String,
    pub voice: String,
}

#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub voices: Vec<&'static str>,
}
