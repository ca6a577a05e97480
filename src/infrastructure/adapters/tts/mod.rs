//! Speech Synthesizer Adapters

mod fake_speech_client;
mod http_speech_client;

pub use fake_speech_client::FakeSpeechClient;
pub use http_speech_client::{HttpSpeechClient, HttpSpeechClientConfig};
