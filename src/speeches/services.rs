use std::time::Duration;

use bytes::Bytes;
use time::OffsetDateTime;
use tracing::{error, info};
use uuid::Uuid;

use crate::clients::generation::{ChatMessage, TextGenerator};
use crate::clients::mailer::{Attachment, Mailer};
use crate::clients::synthesis::{SpeechSynthesizer, SynthesisStatus};
use crate::state::AppState;
use crate::storage::StorageClient;
use crate::users::User;

use super::repo::GeneratedSpeech;

const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";
const EMAIL_SUBJECT: &str = "Your Motivational Speech";
const EMAIL_BODY: &str = "Please find your motivational speech attached.";

/// Everything the pipeline needs to know about who it is speaking to.
/// Decoupled from the `User` row so anonymous generations can reuse it.
#[derive(Debug, Clone)]
pub struct SpeakerProfile<'a> {
    pub first_name: &'a str,
    pub user_profile: Option<&'a str>,
    pub persona: &'a str,
    pub tone: &'a str,
    pub voice: &'a str,
}

/// A pipeline failure, tagged with the stage that aborted the run. No
/// record is persisted unless every stage before persistence succeeded.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("text generation failed: {0}")]
    Generation(String),
    #[error("speech synthesis failed: {0}")]
    Synthesis(String),
    #[error("artifact upload failed: {0}")]
    Upload(String),
    #[error("persisting generated speech failed: {0}")]
    Persistence(String),
}

impl PipelineError {
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Generation(_) => "generation",
            PipelineError::Synthesis(_) => "synthesis",
            PipelineError::Upload(_) => "upload",
            PipelineError::Persistence(_) => "persistence",
        }
    }
}

/// Deterministic prompt assembly; no external calls, cannot fail.
pub fn build_prompt(profile: &SpeakerProfile<'_>) -> Vec<ChatMessage> {
    let mut system = format!("You are speaking to {}", profile.first_name);
    if let Some(about) = profile.user_profile {
        system.push_str(&format!(", whose motivational profile is:\n{about}\n"));
    }
    system.push_str(&format!(
        "\nYou are a motivational coach with the following profile:\n{}:{}\n\n\
         You reply only in plain text.\nDon't use markdown.",
        profile.persona, profile.tone
    ));

    let request = format!(
        "\nPlease write a motivational speech for {name} in the {persona} style \
         and focus on using the correct triggers from {name}'s profile to target \
         the speech for just him/her.",
        name = profile.first_name,
        persona = profile.persona,
    );

    vec![ChatMessage::system(system), ChatMessage::user(request)]
}

/// Unix-second timestamp plus a random component keeps names
/// collision-free even for runs within the same second.
fn artifact_name(owner: Option<Uuid>, at: OffsetDateTime) -> String {
    let owner = owner
        .map(|id| id.to_string())
        .unwrap_or_else(|| "public".into());
    format!(
        "speech_{}_{}_{}.mp3",
        owner,
        at.unix_timestamp(),
        Uuid::new_v4()
    )
}

/// Output of the non-durable pipeline stages.
#[derive(Debug)]
pub struct Artifact {
    pub speech_text: String,
    pub speech_url: String,
    pub filename: String,
    pub audio: Bytes,
}

/// Stages 1-4: prompt, generation, synthesis, upload. Strictly
/// sequential; the first failing stage aborts the run and nothing after
/// it executes. Each external call is bounded by `call_timeout`.
pub async fn produce_artifact(
    generator: &dyn TextGenerator,
    synthesizer: &dyn SpeechSynthesizer,
    storage: &dyn StorageClient,
    profile: &SpeakerProfile<'_>,
    owner: Option<Uuid>,
    call_timeout: Duration,
) -> Result<Artifact, PipelineError> {
    let prompt = build_prompt(profile);

    let speech_text = tokio::time::timeout(call_timeout, generator.generate(&prompt))
        .await
        .map_err(|_| PipelineError::Generation("timed out".into()))?
        .map_err(|e| PipelineError::Generation(e.to_string()))?;

    let synthesis = tokio::time::timeout(
        call_timeout,
        synthesizer.synthesize(&speech_text, profile.voice),
    )
    .await
    .map_err(|_| PipelineError::Synthesis("timed out".into()))?
    .map_err(|e| PipelineError::Synthesis(e.to_string()))?;

    // Only an explicit completion signal counts as synthesized audio.
    match synthesis.status {
        SynthesisStatus::Completed => {}
        SynthesisStatus::Failed(reason) => return Err(PipelineError::Synthesis(reason)),
    }

    let filename = artifact_name(owner, OffsetDateTime::now_utc());
    let speech_url = tokio::time::timeout(
        call_timeout,
        storage.upload(&filename, synthesis.audio.clone(), AUDIO_CONTENT_TYPE),
    )
    .await
    .map_err(|_| PipelineError::Upload("timed out".into()))?
    .map_err(|e| PipelineError::Upload(e.to_string()))?;

    if speech_url.trim().is_empty() {
        return Err(PipelineError::Upload("storage returned no URL".into()));
    }

    Ok(Artifact {
        speech_text,
        speech_url,
        filename,
        audio: synthesis.audio,
    })
}

/// Stages 1-5: produce the artifact, then write the one durable record.
pub async fn generate_and_store(
    state: &AppState,
    owner: Option<Uuid>,
    profile: &SpeakerProfile<'_>,
) -> Result<(GeneratedSpeech, Artifact), PipelineError> {
    let call_timeout = Duration::from_secs(state.config.scheduler.call_timeout_seconds);
    let artifact = produce_artifact(
        state.generator.as_ref(),
        state.synthesizer.as_ref(),
        state.storage.as_ref(),
        profile,
        owner,
        call_timeout,
    )
    .await?;

    let record = GeneratedSpeech::insert(&state.db, owner, &artifact.speech_text, &artifact.speech_url)
        .await
        .map_err(|e| PipelineError::Persistence(e.to_string()))?;

    Ok((record, artifact))
}

/// Stage 6. Bounded like every other external call; a failed or
/// timed-out send is logged and swallowed: the record already persisted
/// stays, and nothing retries here.
pub async fn send_notification(
    mailer: &dyn Mailer,
    to: &str,
    artifact: &Artifact,
    call_timeout: Duration,
) {
    let attachment = Attachment {
        name: artifact.filename.clone(),
        content_type: AUDIO_CONTENT_TYPE.into(),
        data: artifact.audio.clone(),
    };
    match tokio::time::timeout(
        call_timeout,
        mailer.send(to, EMAIL_SUBJECT, EMAIL_BODY, &[attachment]),
    )
    .await
    {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!(error = %e, to = %to, "speech email failed; record kept"),
        Err(_) => error!(to = %to, "speech email timed out; record kept"),
    }
}

/// Full scheduled run for one user: stages 1-6. The synthesized audio
/// never touches disk, so there is no local copy to clean up afterwards.
pub async fn generate_and_deliver(
    state: &AppState,
    user: &User,
    persona: &str,
    tone: &str,
    voice: &str,
) -> Result<GeneratedSpeech, PipelineError> {
    let profile = SpeakerProfile {
        first_name: &user.first_name,
        user_profile: user.user_profile.as_deref(),
        persona,
        tone,
        voice,
    };

    let (record, artifact) = generate_and_store(state, Some(user.id), &profile).await?;
    let call_timeout = Duration::from_secs(state.config.scheduler.call_timeout_seconds);
    send_notification(state.mailer.as_ref(), &user.email, &artifact, call_timeout).await;

    info!(user_id = %user.id, speech_id = %record.id, url = %record.speech_url,
        "motivational speech generated and sent");
    Ok(record)
}

#[cfg(test)]
mod prompt_tests {
    use super::*;
    use crate::clients::generation::Role;

    fn profile() -> SpeakerProfile<'static> {
        SpeakerProfile {
            first_name: "Ada",
            user_profile: Some("thrives on small wins"),
            persona: "drill sergeant",
            tone: "stern",
            voice: "Ava",
        }
    }

    #[test]
    fn prompt_is_system_then_user() {
        let prompt = build_prompt(&profile());
        assert_eq!(prompt.len(), 2);
        assert_eq!(prompt[0].role, Role::System);
        assert_eq!(prompt[1].role, Role::User);
    }

    #[test]
    fn system_message_carries_name_profile_and_persona() {
        let prompt = build_prompt(&profile());
        let system = &prompt[0].content;
        assert!(system.contains("You are speaking to Ada"));
        assert!(system.contains("thrives on small wins"));
        assert!(system.contains("drill sergeant:stern"));
    }

    #[test]
    fn missing_profile_is_omitted() {
        let mut p = profile();
        p.user_profile = None;
        let system = &build_prompt(&p)[0].content;
        assert!(!system.contains("motivational profile"));
        assert!(system.contains("You are speaking to Ada"));
    }

    #[test]
    fn prompt_is_deterministic() {
        let a = build_prompt(&profile());
        let b = build_prompt(&profile());
        assert_eq!(a[0].content, b[0].content);
        assert_eq!(a[1].content, b[1].content);
    }

    #[test]
    fn artifact_names_do_not_collide() {
        let owner = Some(Uuid::new_v4());
        let at = OffsetDateTime::now_utc();
        let a = artifact_name(owner, at);
        let b = artifact_name(owner, at);
        assert_ne!(a, b);
        assert!(a.starts_with(&format!("speech_{}_", owner.unwrap())));
        assert!(a.ends_with(".mp3"));
    }

    #[test]
    fn anonymous_artifacts_are_marked_public() {
        let name = artifact_name(None, OffsetDateTime::now_utc());
        assert!(name.starts_with("speech_public_"));
    }
}
