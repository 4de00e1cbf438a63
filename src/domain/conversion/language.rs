use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Document languages the conversion pipeline produces audio for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "english")]
    English,
    #[serde(rename = "hindi")]
    Hindi,
    #[serde(rename = "chinese")]
    Chinese,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Hindi, Language::Chinese];

    /// Token the pipeline embeds in converted audio file names
    pub fn token(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Hindi => "hindi",
            Language::Chinese => "chinese",
        }
    }

    /// Polly voice the pipeline synthesizes this language with
    pub fn voice(&self) -> &'static str {
        match self {
            Language::English => "Joanna",
            Language::Hindi => "Kajal",
            Language::Chinese => "Zhiyu",
        }
    }

    /// Synthesis language code used by the pipeline
    pub fn synthesis_code(&self) -> &'static str {
        match self {
            Language::English => "en-US",
            Language::Hindi => "hi-IN",
            Language::Chinese => "cmn-CN",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "hindi" | "hi" => Ok(Language::Hindi),
            "chinese" | "zh" | "cmn" => Ok(Language::Chinese),
            other => Err(format!(
                "unknown language '{}', expected english, hindi or chinese",
                other
            )),
        }
    }
}
