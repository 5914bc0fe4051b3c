//! Parameters for the non-chat text completion endpoint

use crate::types::langchain_mode::LangChainMode;
use crate::types::prompt_type::PromptType;
use serde_json::{json, Value};

/// Name of the remote endpoint serving non-chat text submissions
pub const SUBMIT_NOCHAT_API_NAME: &str = "/submit_nochat";

/// Number of positional values `/submit_nochat` expects
pub const SUBMIT_NOCHAT_ARITY: usize = 25;

/// Number of document chunks retrieved per query
pub const LANGCHAIN_TOP_K_DOCS: u32 = 4;

/// Whether documents are chunked before retrieval
pub const LANGCHAIN_ENABLE_CHUNK: bool = true;

/// Chunk size used when chunking documents
pub const LANGCHAIN_CHUNK_SIZE: u32 = 512;

/// Document selection sent with every request
pub const LANGCHAIN_DOCUMENT_CHOICE: &str = "All";

/// Parameters of a single text completion
///
/// Only the fields a caller may change are exposed. The chat-only inputs,
/// streaming flag, custom prompt template and document retrieval settings are
/// fixed and filled in by [`TextCompletionParams::to_args`].
#[derive(Debug, Clone, PartialEq)]
pub struct TextCompletionParams {
    /// Text prompt to generate a completion for
    pub prompt: String,
    /// How the server formats the prompt
    pub prompt_type: PromptType,
    /// Input context for instruction-style prompts
    pub input_context_for_instruction: String,
    /// Enables sampling; `temperature`, `top_p` and `top_k` only apply when set
    pub enable_sampler: bool,
    /// Sampling temperature, roughly 0 to 3
    pub temperature: f64,
    /// Cumulative probability of tokens to sample from
    pub top_p: f64,
    /// Number of tokens to sample from
    pub top_k: u32,
    /// Number of beams for beam search
    pub beams: f64,
    /// Stop beam search early
    pub early_stopping: bool,
    /// Minimum output length
    pub min_output_length: u32,
    /// Maximum output length
    pub max_output_length: u32,
    /// Time budget in seconds for the server-side search
    pub max_time: u32,
    /// Penalty applied to repeated tokens
    pub repetition_penalty: f64,
    /// Number of sequences to return
    pub number_returns: u32,
    /// Text prepended verbatim, without prompt processing
    pub system_pre_context: String,
    /// Document collection used for retrieval
    pub langchain_mode: LangChainMode,
}

impl TextCompletionParams {
    /// Create parameters for `prompt` with every other field at its default
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            prompt_type: PromptType::Plain,
            input_context_for_instruction: String::new(),
            enable_sampler: false,
            temperature: 1.0,
            top_p: 1.0,
            top_k: 40,
            beams: 1.0,
            early_stopping: false,
            min_output_length: 0,
            max_output_length: 128,
            max_time: 180,
            repetition_penalty: 1.07,
            number_returns: 1,
            system_pre_context: String::new(),
            langchain_mode: LangChainMode::Disabled,
        }
    }

    /// Create a new builder
    pub fn builder(prompt: impl Into<String>) -> TextCompletionParamsBuilder {
        TextCompletionParamsBuilder {
            params: Self::new(prompt),
        }
    }

    /// Positional arguments for [`SUBMIT_NOCHAT_API_NAME`], in endpoint order
    pub fn to_args(&self) -> Vec<Value> {
        // chat_mode is off, so instruction and input stay empty and the
        // prompt travels in its own slot
        let instruction = "";
        let input = "";
        let stream_output = false;
        let prompt_dict = "";
        let chat_mode = false;

        vec![
            json!(instruction),
            json!(input),
            json!(self.system_pre_context),
            json!(stream_output),
            json!(self.prompt_type.as_str()),
            json!(prompt_dict),
            json!(self.temperature),
            json!(self.top_p),
            json!(self.top_k),
            json!(self.beams),
            json!(self.max_output_length),
            json!(self.min_output_length),
            json!(self.early_stopping),
            json!(self.max_time),
            json!(self.repetition_penalty),
            json!(self.number_returns),
            json!(self.enable_sampler),
            json!(chat_mode),
            json!(self.prompt),
            json!(self.input_context_for_instruction),
            json!(self.langchain_mode.as_str()),
            json!(LANGCHAIN_TOP_K_DOCS),
            json!(LANGCHAIN_ENABLE_CHUNK),
            json!(LANGCHAIN_CHUNK_SIZE),
            json!([LANGCHAIN_DOCUMENT_CHOICE]),
        ]
    }
}

/// Builder for [`TextCompletionParams`]
#[derive(Debug, Clone)]
pub struct TextCompletionParamsBuilder {
    params: TextCompletionParams,
}

impl TextCompletionParamsBuilder {
    /// Set the prompt type
    pub fn prompt_type(mut self, prompt_type: PromptType) -> Self {
        self.params.prompt_type = prompt_type;
        self
    }

    /// Set the input context for instruction prompts
    pub fn input_context_for_instruction(mut self, context: impl Into<String>) -> Self {
        self.params.input_context_for_instruction = context.into();
        self
    }

    /// Enable or disable the sampler
    pub fn enable_sampler(mut self, enable: bool) -> Self {
        self.params.enable_sampler = enable;
        self
    }

    /// Set temperature
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.params.temperature = temperature;
        self
    }

    /// Set top-p
    pub fn top_p(mut self, top_p: f64) -> Self {
        self.params.top_p = top_p;
        self
    }

    /// Set top-k
    pub fn top_k(mut self, top_k: u32) -> Self {
        self.params.top_k = top_k;
        self
    }

    /// Set the number of beams
    pub fn beams(mut self, beams: f64) -> Self {
        self.params.beams = beams;
        self
    }

    /// Stop beam search early
    pub fn early_stopping(mut self, early_stopping: bool) -> Self {
        self.params.early_stopping = early_stopping;
        self
    }

    /// Set the minimum output length
    pub fn min_output_length(mut self, length: u32) -> Self {
        self.params.min_output_length = length;
        self
    }

    /// Set the maximum output length
    pub fn max_output_length(mut self, length: u32) -> Self {
        self.params.max_output_length = length;
        self
    }

    /// Set the server-side time budget in seconds
    pub fn max_time(mut self, seconds: u32) -> Self {
        self.params.max_time = seconds;
        self
    }

    /// Set the repetition penalty
    pub fn repetition_penalty(mut self, penalty: f64) -> Self {
        self.params.repetition_penalty = penalty;
        self
    }

    /// Set the number of returned sequences
    pub fn number_returns(mut self, count: u32) -> Self {
        self.params.number_returns = count;
        self
    }

    /// Set the system pre-context
    pub fn system_pre_context(mut self, context: impl Into<String>) -> Self {
        self.params.system_pre_context = context.into();
        self
    }

    /// Set the LangChain mode
    pub fn langchain_mode(mut self, mode: LangChainMode) -> Self {
        self.params.langchain_mode = mode;
        self
    }

    /// Build the parameters
    pub fn build(self) -> TextCompletionParams {
        self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_instruct_example_args() {
        let params = TextCompletionParams::builder("Hello")
            .prompt_type(PromptType::Instruct)
            .temperature(0.5)
            .build();

        assert_eq!(
            Value::Array(params.to_args()),
            json!([
                "", "", "", false, "instruct", "", 0.5, 1.0, 40, 1.0, 128, 0, false, 180, 1.07, 1,
                false, false, "Hello", "", "Disabled", 4, true, 512, ["All"]
            ])
        );
    }

    #[test]
    fn test_arity() {
        let args = TextCompletionParams::new("x").to_args();
        assert_eq!(args.len(), SUBMIT_NOCHAT_ARITY);
    }

    #[test]
    fn test_hidden_fields_ignore_caller_input() {
        let params = TextCompletionParams::builder("Summarize this")
            .prompt_type(PromptType::Summarize)
            .input_context_for_instruction("context")
            .enable_sampler(true)
            .temperature(2.5)
            .top_p(0.3)
            .top_k(7)
            .beams(4.0)
            .early_stopping(true)
            .min_output_length(10)
            .max_output_length(20)
            .max_time(5)
            .repetition_penalty(2.0)
            .number_returns(3)
            .system_pre_context("system")
            .langchain_mode(LangChainMode::UserData)
            .build();
        let args = params.to_args();

        assert_eq!(args[0], json!(""));
        assert_eq!(args[1], json!(""));
        assert_eq!(args[3], json!(false));
        assert_eq!(args[5], json!(""));
        assert_eq!(args[17], json!(false));
        assert_eq!(args[21], json!(4));
        assert_eq!(args[22], json!(true));
        assert_eq!(args[23], json!(512));
        assert_eq!(args[24], json!(["All"]));
    }

    #[test]
    fn test_caller_fields_land_in_their_slots() {
        let params = TextCompletionParams::builder("prompt text")
            .prompt_type(PromptType::HumanBot)
            .input_context_for_instruction("ctx")
            .enable_sampler(true)
            .top_k(0)
            .min_output_length(3)
            .max_output_length(64)
            .system_pre_context("pre")
            .langchain_mode(LangChainMode::GithubH2oGpt)
            .build();
        let args = params.to_args();

        assert_eq!(args[2], json!("pre"));
        assert_eq!(args[4], json!("human_bot"));
        assert_eq!(args[8], json!(0));
        assert_eq!(args[10], json!(64));
        assert_eq!(args[11], json!(3));
        assert_eq!(args[16], json!(true));
        assert_eq!(args[18], json!("prompt text"));
        assert_eq!(args[19], json!("ctx"));
        assert_eq!(args[20], json!("github h2oGPT"));
    }

    #[test]
    fn test_builder_defaults_match_new() {
        assert_eq!(
            TextCompletionParams::builder("a").build(),
            TextCompletionParams::new("a")
        );
    }

    #[test]
    fn test_bounds_are_not_enforced_locally() {
        // min > max is the server's problem
        let params = TextCompletionParams::builder("a")
            .min_output_length(500)
            .max_output_length(10)
            .build();
        let args = params.to_args();
        assert_eq!(args[10], json!(10));
        assert_eq!(args[11], json!(500));
    }
}
