//! Constants for the Gradio transport

/// Default server address, a locally started h2oGPT UI
pub const DEFAULT_SERVER_URL: &str = "http://localhost:7860";

/// Default Hugging Face Hub, used to resolve Space ids
pub const HUGGING_FACE_HUB_URL: &str = "https://huggingface.co";

/// Path of the application description served by every Gradio app
pub const CONFIG_PATH: &str = "config";

/// Prefix of the named prediction routes
pub const RUN_PREFIX: &str = "run";

/// Websocket route used to join the queue of queued functions
pub const QUEUE_JOIN_PATH: &str = "queue/join";

/// Environment variable holding the server address
pub const SERVER_URL_ENV: &str = "H2OGPT_SERVER_URL";

/// Environment variable holding the Hugging Face token
pub const HF_TOKEN_ENV: &str = "HF_TOKEN";

/// Legacy environment variable for the Hugging Face token
pub const HF_TOKEN_LEGACY_ENV: &str = "HUGGING_FACE_HUB_TOKEN";

/// Environment variable overriding the Hub address
pub const HUB_URL_ENV: &str = "H2OGPT_HUB_URL";
