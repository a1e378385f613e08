use serde::Deserialize;

/// On-demand generation request. The caller supplies the speaker profile
/// directly instead of relying on stored preferences.
#[derive(Debug, Deserialize)]
pub struct SpeechRequest {
    pub first_name: String,
    pub user_profile: Option<String>,
    pub persona: String,
    pub tone: String,
    pub voice: String,
}
