//! Wire types returned by the audio backend.

use serde::{Deserialize, Serialize};

/// Response of the token endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// A folder of audio files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioFile {
    pub id: String,
    pub title: String,
    /// Server-relative playback path, e.g. `/audios/<id>`
    pub url: String,
}

impl AudioFile {
    /// Title with the audio extension removed, which is the name the
    /// transcript is stored under.
    pub fn transcript_title(&self) -> &str {
        match self.title.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => &self.title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_response() {
        let json = r#"{"access_token": "eyJ0eXAi.abc.def", "token_type": "bearer"}"#;
        let resp: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.access_token, "eyJ0eXAi.abc.def");
        assert_eq!(resp.token_type.as_deref(), Some("bearer"));
    }

    #[test]
    fn test_parse_audio_list() {
        let json = r#"[{"id": "talks/intro.mp3", "title": "intro.mp3", "url": "/audios/talks/intro.mp3"}]"#;
        let files: Vec<AudioFile> = serde_json::from_str(json).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].url, "/audios/talks/intro.mp3");
    }

    #[test]
    fn test_transcript_title() {
        let file = |title: &str| AudioFile {
            id: title.to_string(),
            title: title.to_string(),
            url: String::new(),
        };
        assert_eq!(file("intro.mp3").transcript_title(), "intro");
        assert_eq!(file("talk.2024.mp3").transcript_title(), "talk.2024");
        assert_eq!(file("README").transcript_title(), "README");
        assert_eq!(file(".hidden").transcript_title(), ".hidden");
    }
}
