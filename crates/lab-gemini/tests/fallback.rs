//! Model fallback behavior against a scripted transport.

use std::collections::VecDeque;
use std::sync::Mutex;

use lab_gemini::{GeneratedCode, GenerationError, GenerationGateway, Transport};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

/// Replays one scripted outcome per call and records which models were hit.
#[derive(Default)]
struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Result<Value, GenerationError>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    fn new(outcomes: Vec<Result<Value, GenerationError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, model: &str, api_key: &str, body: &Value) -> Result<Value, GenerationError> {
        assert_eq!(api_key, "test-key");
        assert!(body["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("Task: "));
        self.calls.lock().unwrap().push(model.to_string());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected extra request")
    }
}

fn models() -> Vec<String> {
    vec!["first".into(), "second".into(), "third".into()]
}

fn success(text: &str) -> Result<Value, GenerationError> {
    Ok(json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] }))
}

fn not_found(model: &str) -> Result<Value, GenerationError> {
    Err(GenerationError::ModelNotFound {
        model: model.into(),
    })
}

fn rate_limited(model: &str) -> Result<Value, GenerationError> {
    Err(GenerationError::RateLimited {
        model: model.into(),
        retry_after_secs: None,
    })
}

fn server_error() -> Result<Value, GenerationError> {
    Err(GenerationError::Api {
        status: 500,
        message: "internal".into(),
    })
}

#[tokio::test]
async fn third_model_answers_after_two_retryable_failures() {
    let transport = ScriptedTransport::new(vec![
        rate_limited("first"),
        not_found("second"),
        success("```json\n{\"html\":\"<p>third</p>\",\"js\":\"go()\"}\n```"),
    ]);
    let gateway = GenerationGateway::new(transport, models());

    let code = gateway.generate("Build it", "test-key").await.unwrap();

    assert_eq!(
        code,
        GeneratedCode {
            html: Some("<p>third</p>".into()),
            css: None,
            js: Some("go()".into()),
        }
    );
    assert_eq!(gateway.transport().calls(), models());
    assert!(!gateway.is_busy());
}

#[tokio::test]
async fn first_fatal_error_stops_the_walk() {
    let transport = ScriptedTransport::new(vec![server_error(), server_error(), server_error()]);
    let gateway = GenerationGateway::new(transport, models());

    let err = gateway.generate("Build it", "test-key").await.unwrap_err();

    assert!(matches!(err, GenerationError::Api { status: 500, .. }));
    assert_eq!(gateway.transport().calls(), vec!["first".to_string()]);
    assert!(!gateway.is_busy());
}

#[tokio::test]
async fn fatal_error_after_retryable_one_is_surfaced() {
    let transport = ScriptedTransport::new(vec![
        not_found("first"),
        Err(GenerationError::Authorization {
            status: 400,
            message: "API key not valid".into(),
        }),
    ]);
    let gateway = GenerationGateway::new(transport, models());

    let err = gateway.generate("Build it", "test-key").await.unwrap_err();
    assert!(err.is_authorization());
    assert_eq!(gateway.transport().calls().len(), 2);
}

#[tokio::test]
async fn exhausting_models_is_unavailable() {
    let transport = ScriptedTransport::new(vec![
        not_found("first"),
        rate_limited("second"),
        not_found("third"),
    ]);
    let gateway = GenerationGateway::new(transport, models());

    let err = gateway.generate("Build it", "test-key").await.unwrap_err();
    match err {
        GenerationError::Unavailable { attempts, last } => {
            assert_eq!(attempts, 3);
            assert!(last.contains("third"));
        }
        other => panic!("expected Unavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn unusable_success_is_not_retried() {
    let transport = ScriptedTransport::new(vec![success("not json at all")]);
    let gateway = GenerationGateway::new(transport, models());

    let err = gateway.generate("Build it", "test-key").await.unwrap_err();
    assert!(matches!(err, GenerationError::MalformedOutput(_)));
}

#[tokio::test]
async fn models_are_tried_in_order() {
    let transport = ScriptedTransport::new(vec![
        not_found("first"),
        not_found("second"),
        success("{}"),
    ]);
    let gateway = GenerationGateway::new(transport, models());
    let code = gateway.generate("Build it", "test-key").await.unwrap();
    assert!(code.is_empty());
    assert_eq!(gateway.transport().calls(), models());
}

#[tokio::test]
async fn empty_model_list_is_unavailable() {
    let gateway = GenerationGateway::new(ScriptedTransport::default(), Vec::new());
    let err = gateway.generate("Build it", "test-key").await.unwrap_err();
    assert!(matches!(err, GenerationError::Unavailable { attempts: 0, .. }));
}
