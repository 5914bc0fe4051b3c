//! Retrieval-augmentation modes

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which document collection, if any, the server consults while generating
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LangChainMode {
    /// Every collection
    #[serde(rename = "All")]
    All,
    /// Chat with the LLM through LangChain, no documents
    #[serde(rename = "ChatLLM")]
    ChatLlm,
    /// No retrieval
    #[default]
    #[serde(rename = "Disabled")]
    Disabled,
    /// The h2oGPT GitHub repository
    #[serde(rename = "github h2oGPT")]
    GithubH2oGpt,
    /// Driverless AI documentation
    #[serde(rename = "DriverlessAI docs")]
    H2oDaiDocs,
    /// Plain LLM call through LangChain
    #[serde(rename = "LLM")]
    Llm,
    /// Documents uploaded in this session
    #[serde(rename = "MyData")]
    MyData,
    /// Shared user documents
    #[serde(rename = "UserData")]
    UserData,
    /// Wikipedia subset
    #[serde(rename = "wiki")]
    Wiki,
    /// Full Wikipedia
    #[serde(rename = "wiki_full")]
    WikiFull,
}

impl LangChainMode {
    /// Every mode, in tag order
    pub const ALL: [Self; 10] = [
        Self::All,
        Self::ChatLlm,
        Self::Disabled,
        Self::GithubH2oGpt,
        Self::H2oDaiDocs,
        Self::Llm,
        Self::MyData,
        Self::UserData,
        Self::Wiki,
        Self::WikiFull,
    ];

    /// The tag sent over the wire
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::ChatLlm => "ChatLLM",
            Self::Disabled => "Disabled",
            Self::GithubH2oGpt => "github h2oGPT",
            Self::H2oDaiDocs => "DriverlessAI docs",
            Self::Llm => "LLM",
            Self::MyData => "MyData",
            Self::UserData => "UserData",
            Self::Wiki => "wiki",
            Self::WikiFull => "wiki_full",
        }
    }
}

impl fmt::Display for LangChainMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LangChainMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| Error::validation(format!("unknown langchain mode: {s:?}")))
    }
}
