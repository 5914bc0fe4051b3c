//! Prompt formatting styles understood by the server

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the server formats the prompt before handing it to the model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromptType {
    /// Driverless AI FAQ style
    #[serde(rename = "dai_faq")]
    DaiFaq,
    /// `<human>:` / `<bot>:` turns
    #[serde(rename = "human_bot")]
    HumanBot,
    /// Original human/bot template
    #[serde(rename = "human_bot_orig")]
    HumanBotOriginal,
    /// Alpaca-style instruction
    #[serde(rename = "instruct")]
    Instruct,
    /// Instruction without the preamble
    #[serde(rename = "instruct_simple")]
    InstructSimple,
    /// Vicuna instruction template
    #[serde(rename = "instruct_vicuna")]
    InstructVicuna,
    /// Instruction with an explicit end marker
    #[serde(rename = "instruct_with_end")]
    InstructWithEnd,
    /// OpenAssistant template
    #[serde(rename = "open_assistant")]
    OpenAssistant,
    /// No formatting at all
    #[default]
    #[serde(rename = "plain")]
    Plain,
    /// Prompt/answer markers
    #[serde(rename = "prompt_answer")]
    PromptAnswer,
    /// Quality template
    #[serde(rename = "quality")]
    Quality,
    /// Minimal instruction template
    #[serde(rename = "simple_instruct")]
    SimpleInstruct,
    /// Summarization template
    #[serde(rename = "summarize")]
    Summarize,
    /// WizardLM template
    #[serde(rename = "wizard_lm")]
    WizardLm,
    /// Wizard Mega template
    #[serde(rename = "wizard_mega")]
    WizardMega,
}

impl PromptType {
    /// Every prompt type, in tag order
    pub const ALL: [Self; 15] = [
        Self::DaiFaq,
        Self::HumanBot,
        Self::HumanBotOriginal,
        Self::Instruct,
        Self::InstructSimple,
        Self::InstructVicuna,
        Self::InstructWithEnd,
        Self::OpenAssistant,
        Self::Plain,
        Self::PromptAnswer,
        Self::Quality,
        Self::SimpleInstruct,
        Self::Summarize,
        Self::WizardLm,
        Self::WizardMega,
    ];

    /// The tag sent over the wire
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DaiFaq => "dai_faq",
            Self::HumanBot => "human_bot",
            Self::HumanBotOriginal => "human_bot_orig",
            Self::Instruct => "instruct",
            Self::InstructSimple => "instruct_simple",
            Self::InstructVicuna => "instruct_vicuna",
            Self::InstructWithEnd => "instruct_with_end",
            Self::OpenAssistant => "open_assistant",
            Self::Plain => "plain",
            Self::PromptAnswer => "prompt_answer",
            Self::Quality => "quality",
            Self::SimpleInstruct => "simple_instruct",
            Self::Summarize => "summarize",
            Self::WizardLm => "wizard_lm",
            Self::WizardMega => "wizard_mega",
        }
    }
}

impl fmt::Display for PromptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromptType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|prompt_type| prompt_type.as_str() == s)
            .ok_or_else(|| Error::validation(format!("unknown prompt type: {s:?}")))
    }
}
