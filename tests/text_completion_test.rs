//! Integration tests for text completion against a mock h2oGPT server

use h2ogpt::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Start a server exposing `/submit_nochat` at function index 1
async fn h2ogpt_server(reply: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "version": "3.35.2",
            "dependencies": [{"api_name": "submit"}, {"api_name": "submit_nochat"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/run/submit_nochat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [reply]})))
        .mount(&server)
        .await;
    server
}

async fn submitted_args(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|request| request.url.path() == "/run/submit_nochat")
        .map(|request| request.body_json::<Value>().unwrap()["data"].clone())
        .collect()
}

fn expected_instruct_args() -> Value {
    json!([
        "", "", "", false, "instruct", "", 0.5, 1.0, 40, 1.0, 128, 0, false, 180, 1.07, 1, false,
        false, "Hello", "", "Disabled", 4, true, 512, ["All"]
    ])
}

fn instruct_params() -> TextCompletionParams {
    TextCompletionParams::builder("Hello")
        .prompt_type(PromptType::Instruct)
        .temperature(0.5)
        .build()
}

#[test_log::test(tokio::test)]
async fn test_create_async_end_to_end() {
    let server = h2ogpt_server("Hi! How can I help?").await;

    let client = Client::connect(server.uri(), None).await.unwrap();
    let text = client
        .text_completion()
        .create_async(&instruct_params())
        .await
        .unwrap();

    assert_eq!(text, "Hi! How can I help?");
    assert_eq!(submitted_args(&server).await, vec![expected_instruct_args()]);
}

#[test]
fn test_create_blocking_end_to_end() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(h2ogpt_server("blocking hello"));

    let client = Client::new(server.uri(), Some("hf_token")).unwrap();
    let text = client.text_completion().create(&instruct_params()).unwrap();
    assert_eq!(text, "blocking hello");

    let args = runtime.block_on(submitted_args(&server));
    assert_eq!(args, vec![expected_instruct_args()]);
}

#[test]
fn test_blocking_and_async_send_identical_requests() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(h2ogpt_server("same"));
    let params = TextCompletionParams::builder("Compare")
        .prompt_type(PromptType::OpenAssistant)
        .enable_sampler(true)
        .langchain_mode(LangChainMode::MyData)
        .build();

    let async_client = runtime.block_on(Client::connect(server.uri(), None)).unwrap();
    let async_text = runtime
        .block_on(async_client.text_completion().create_async(&params))
        .unwrap();

    let blocking_client = Client::new(server.uri(), None).unwrap();
    let blocking_text = blocking_client.text_completion().create(&params).unwrap();

    assert_eq!(async_text, blocking_text);
    let args = runtime.block_on(submitted_args(&server));
    assert_eq!(args.len(), 2);
    assert_eq!(args[0], args[1]);
}

#[tokio::test]
async fn test_construction_fails_for_unreachable_server() {
    let result = Client::connect("http://127.0.0.1:1", None).await;
    assert!(matches!(result, Err(Error::Connection { .. })));
}

#[tokio::test]
async fn test_construction_fails_for_malformed_address() {
    let result = Client::connect("::not-an-address::", None).await;
    assert!(matches!(result, Err(Error::Configuration(_))));
}

#[tokio::test]
async fn test_two_clients_are_equivalent() {
    let server = h2ogpt_server("42").await;

    let first = Client::connect(server.uri(), None).await.unwrap();
    let second = Client::connect(server.uri(), None).await.unwrap();
    let params = TextCompletionParams::new("What is the answer?");

    let a = first.text_completion().create_async(&params).await.unwrap();
    let b = second.text_completion().create_async(&params).await.unwrap();
    assert_eq!(a, b);

    let args = submitted_args(&server).await;
    assert_eq!(args[0], args[1]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_calls_share_one_client() {
    let server = h2ogpt_server("parallel").await;
    let client = Client::connect(server.uri(), None).await.unwrap();

    let prompts = ["one", "two", "three", "four"];
    let calls = prompts.iter().map(|prompt| {
        let client = client.clone();
        let params = TextCompletionParams::new(*prompt);
        async move { client.text_completion().create_async(&params).await }
    });
    let results = futures::future::join_all(calls).await;

    assert!(results
        .iter()
        .all(|r| matches!(r.as_deref(), Ok("parallel"))));
    let mut sent: Vec<String> = submitted_args(&server)
        .await
        .iter()
        .map(|args| args[18].as_str().unwrap().to_string())
        .collect();
    sent.sort();
    assert_eq!(sent, vec!["four", "one", "three", "two"]);
}

#[tokio::test]
async fn test_abandoned_call_leaves_client_usable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dependencies": [{"api_name": "submit_nochat"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/run/submit_nochat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": ["slow"]}))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let client = Client::connect(server.uri(), None).await.unwrap();
    let params = TextCompletionParams::new("wait");

    let abandoned = tokio::time::timeout(
        Duration::from_millis(20),
        client.text_completion().create_async(&params),
    )
    .await;
    assert!(abandoned.is_err());

    let text = client.text_completion().create_async(&params).await.unwrap();
    assert_eq!(text, "slow");
}

#[tokio::test]
async fn test_remote_error_fails_the_whole_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dependencies": [{"api_name": "submit_nochat"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/run/submit_nochat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "prompt too long",
            "data": ["partial"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::connect(server.uri(), None).await.unwrap();
    let err = client
        .text_completion()
        .create_async(&TextCompletionParams::new("x"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("prompt too long"));
}
