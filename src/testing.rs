//! Counting fakes for the four external services, shared by unit tests.

pub mod fakes {
    use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use axum::async_trait;
    use bytes::Bytes;

    use crate::clients::generation::{ChatMessage, TextGenerator};
    use crate::clients::mailer::{Attachment, Mailer};
    use crate::clients::synthesis::{SpeechSynthesizer, Synthesis, SynthesisStatus};
    use crate::storage::StorageClient;

    #[derive(Default)]
    pub struct FakeGenerator {
        pub fail: AtomicBool,
        /// Fails only the requests whose prompt mentions this string.
        pub fail_for: Mutex<Option<String>>,
        pub delay_ms: AtomicU64,
        pub calls: AtomicUsize,
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn generate(&self, messages: &[ChatMessage]) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let delay = self.delay_ms.load(Ordering::SeqCst);
            if delay > 0 {
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }
            if self.fail.load(Ordering::SeqCst) {
                anyhow::bail!("generation service unavailable");
            }
            let targeted = self.fail_for.lock().unwrap().clone();
            if let Some(name) = targeted {
                if messages.iter().any(|m| m.content.contains(&name)) {
                    anyhow::bail!("generation service unavailable");
                }
            }
            Ok(format!("generated from {} messages", messages.len()))
        }
    }

    #[derive(Default)]
    pub struct FakeSynthesizer {
        pub fail: AtomicBool,
        pub incomplete: AtomicBool,
        pub calls: AtomicUsize,
    }

    #[async_trait]
    impl SpeechSynthesizer for FakeSynthesizer {
        async fn synthesize(&self, _text: &str, _voice: &str) -> anyhow::Result<Synthesis> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                anyhow::bail!("synthesis service unavailable");
            }
            if self.incomplete.load(Ordering::SeqCst) {
                return Ok(Synthesis {
                    status: SynthesisStatus::Failed("canceled".into()),
                    audio: Bytes::new(),
                });
            }
            Ok(Synthesis {
                status: SynthesisStatus::Completed,
                audio: Bytes::from_static(b"mp3-bytes"),
            })
        }
    }

    #[derive(Default)]
    pub struct FakeStorage {
        pub fail: AtomicBool,
        pub blank_url: AtomicBool,
        pub uploads: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl StorageClient for FakeStorage {
        async fn upload(
            &self,
            key: &str,
            _body: Bytes,
            _content_type: &str,
        ) -> anyhow::Result<String> {
            self.uploads.lock().unwrap().push(key.to_string());
            if self.fail.load(Ordering::SeqCst) {
                anyhow::bail!("storage unavailable");
            }
            if self.blank_url.load(Ordering::SeqCst) {
                return Ok(String::new());
            }
            Ok(format!("https://cdn.test.local/{key}"))
        }
    }

    #[derive(Default)]
    pub struct FakeMailer {
        pub fail: AtomicBool,
        pub delay_ms: AtomicU64,
        pub sent: Mutex<Vec<(String, String, usize)>>,
    }

    #[async_trait]
    impl Mailer for FakeMailer {
        async fn send(
            &self,
            to: &str,
            subject: &str,
            _body: &str,
            attachments: &[Attachment],
        ) -> anyhow::Result<()> {
            let delay = self.delay_ms.load(Ordering::SeqCst);
            if delay > 0 {
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }
            if self.fail.load(Ordering::SeqCst) {
                anyhow::bail!("mail service unavailable");
            }
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), subject.to_string(), attachments.len()));
            Ok(())
        }
    }
}
