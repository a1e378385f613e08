use axum::async_trait;
use bytes::Bytes;

use crate::config::SpeechConfig;

const OUTPUT_FORMAT: &str = "audio-16khz-32kbitrate-mono-mp3";

/// Explicit completion signal from the synthesis service. Anything other
/// than `Completed` must be treated as a failed synthesis by callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisStatus {
    Completed,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct Synthesis {
    pub status: SynthesisStatus,
    pub audio: Bytes,
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// `voice` is a short catalogue name ("Ava", "Brian", ...); the
    /// implementation maps it to its provider-specific identifier.
    async fn synthesize(&self, text: &str, voice: &str) -> anyhow::Result<Synthesis>;
}

/// Azure Cognitive Services TTS over its REST endpoint.
pub struct AzureSynthesizer {
    http: reqwest::Client,
    subscription_key: String,
    region: String,
}

impl AzureSynthesizer {
    pub fn new(cfg: &SpeechConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            subscription_key: cfg.subscription_key.clone(),
            region: cfg.region.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "https://{}.tts.speech.microsoft.com/cognitiveservices/v1",
            self.region
        )
    }
}

pub fn azure_voice_name(voice: &str) -> String {
    format!("en-US-{voice}Neural")
}

fn ssml(text: &str, voice: &str) -> String {
    let escaped = text
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    format!(
        "<speak version='1.0' xml:lang='en-US'><voice name='{}'>{}</voice></speak>",
        azure_voice_name(voice),
        escaped
    )
}

#[async_trait]
impl SpeechSynthesizer for AzureSynthesizer {
    async fn synthesize(&self, text: &str, voice: &str) -> anyhow::Result<Synthesis> {
        let response = self
            .http
            .post(self.endpoint())
            .header("Ocp-Apim-Subscription-Key", &self.subscription_key)
            .header("X-Microsoft-OutputFormat", OUTPUT_FORMAT)
            .header("Content-Type", "application/ssml+xml")
            .body(ssml(text, voice))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Ok(Synthesis {
                status: SynthesisStatus::Failed(format!("{status}: {detail}")),
                audio: Bytes::new(),
            });
        }

        let audio = response.bytes().await?;
        if audio.is_empty() {
            // 200 with no payload: the service did not actually synthesize.
            return Ok(Synthesis {
                status: SynthesisStatus::Failed("empty audio payload".into()),
                audio,
            });
        }

        Ok(Synthesis {
            status: SynthesisStatus::Completed,
            audio,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voice_name_is_neural_qualified() {
        assert_eq!(azure_voice_name("Ava"), "en-US-AvaNeural");
    }

    #[test]
    fn ssml_escapes_markup() {
        let body = ssml("a < b & c", "Brian");
        assert!(body.contains("a &lt; b &amp; c"));
        assert!(body.contains("en-US-BrianNeural"));
    }
}
