use std::{sync::Arc, time::Duration};

use futures_util::future::join_all;
use promptpipe::{
    AnyBackend, BoxFuture, ModelClient, Provider,
    config::ModelConfig,
    error::{PipeError, Result},
    generic::{ChatResponse, GenericMessage, GenericRole},
    model::OpenAiModel,
    pipeline::{Pipeline, StageExt},
    prompt::{ChatPromptTemplate, PromptTemplate, Variables},
    provider::ChatCompletionProvider,
};
use serde_json::json;

const ACHIEVEMENTS: &str = "Tell me a few achievements of {name}";

/// Answers with the last message it was sent, after a short delay that
/// depends on the prompt so concurrent calls finish out of order.
struct Echo {
    config: ModelConfig,
}

impl Echo {
    fn new() -> Self {
        Self {
            config: ModelConfig::new(OpenAiModel::Gpt35Turbo, "sk-stub").with_temperature(0.5),
        }
    }
}

impl ChatCompletionProvider for Echo {
    fn provider_name(&self) -> &'static str {
        "echo"
    }

    fn config(&self) -> &ModelConfig {
        &self.config
    }

    fn chat_complete<'p>(
        &'p self,
        messages: Vec<GenericMessage>,
    ) -> BoxFuture<'p, Result<ChatResponse>> {
        Box::pin(async move {
            let text = messages.last().map(|m| m.content.clone()).unwrap_or_default();
            tokio::time::sleep(Duration::from_millis((text.len() % 7) as u64)).await;
            Ok(ChatResponse::from_text(text))
        })
    }
}

/// Always rejects the credential.
struct Unauthorized {
    config: ModelConfig,
}

impl ChatCompletionProvider for Unauthorized {
    fn provider_name(&self) -> &'static str {
        "unauthorized"
    }

    fn config(&self) -> &ModelConfig {
        &self.config
    }

    fn chat_complete<'p>(
        &'p self,
        _messages: Vec<GenericMessage>,
    ) -> BoxFuture<'p, Result<ChatResponse>> {
        Box::pin(async move {
            Err(PipeError::Authentication {
                provider: "unauthorized",
                message: "invalid api key".into(),
            })
        })
    }
}

fn echo_pipeline() -> Pipeline<PromptTemplate, ModelClient<Echo>> {
    PromptTemplate::from_template(ACHIEVEMENTS)
        .unwrap()
        .pipe(ModelClient::new(Echo::new()))
}

#[tokio::test]
async fn echo_pipeline_returns_rendered_prompt() {
    let response = echo_pipeline()
        .invoke(Variables::new().with("name", "Barack Obama"))
        .await
        .unwrap();

    assert_eq!(response.text, "Tell me a few achievements of Barack Obama");
}

#[tokio::test]
async fn authentication_error_propagates_unchanged() {
    let pipeline = PromptTemplate::from_template(ACHIEVEMENTS)
        .unwrap()
        .pipe(ModelClient::new(Unauthorized {
            config: ModelConfig::new(OpenAiModel::Gpt35Turbo, "sk-bad"),
        }));

    let err = pipeline
        .invoke(Variables::new().with("name", "Barack Obama"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PipeError::Authentication { provider: "unauthorized", ref message } if message == "invalid api key"
    ));
}

#[tokio::test]
async fn missing_variable_fails_before_the_model_is_called() {
    let pipeline = PromptTemplate::from_template(ACHIEVEMENTS)
        .unwrap()
        .pipe(ModelClient::new(Unauthorized {
            config: ModelConfig::new(OpenAiModel::Gpt35Turbo, "sk-bad"),
        }));

    let err = pipeline.invoke(Variables::new()).await.unwrap_err();
    assert!(matches!(err, PipeError::MissingVariable { ref name } if name == "name"));
}

#[tokio::test]
async fn concurrent_invocations_do_not_cross_talk() {
    let pipeline = echo_pipeline();
    let names: Vec<String> = (0..32).map(|i| format!("Person {i}{}", "x".repeat(i % 5))).collect();

    let responses = join_all(
        names
            .iter()
            .map(|name| pipeline.invoke(Variables::new().with("name", name.as_str()))),
    )
    .await;

    for (name, response) in names.iter().zip(responses) {
        assert_eq!(
            response.unwrap().text,
            format!("Tell me a few achievements of {name}")
        );
    }
}

#[tokio::test]
async fn shared_pipeline_works_across_spawned_tasks() {
    let pipeline = Arc::new(echo_pipeline());

    let handles: Vec<_> = ["Ada Lovelace", "Alan Turing", "Grace Hopper", "Barack Obama"]
        .into_iter()
        .map(|name| {
            let pipeline = Arc::clone(&pipeline);
            tokio::spawn(async move {
                let response = pipeline
                    .invoke(Variables::new().with("name", name))
                    .await
                    .unwrap();
                (name, response.text)
            })
        })
        .collect();

    for handle in handles {
        let (name, text) = handle.await.unwrap();
        assert_eq!(text, format!("Tell me a few achievements of {name}"));
    }
}

#[tokio::test]
async fn chat_template_feeds_every_message_to_the_model() {
    let pipeline = ChatPromptTemplate::from_messages([
        (GenericRole::System, "You answer in {language}."),
        (GenericRole::User, ACHIEVEMENTS),
    ])
    .unwrap()
    .pipe(ModelClient::new(Echo::new()));

    let response = pipeline
        .invoke(Variables::from([("language", "French"), ("name", "Marie Curie")]))
        .await
        .unwrap();

    assert_eq!(response.text, "Tell me a few achievements of Marie Curie");
}

#[tokio::test]
async fn end_to_end_against_mock_openai() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_body(mockito::Matcher::PartialJson(json!({
            "model": "gpt-3.5-turbo",
            "messages": [{"role": "user", "content": "Tell me a few achievements of Barack Obama"}]
        })))
        .with_status(200)
        .with_body(
            json!({
                "id": "chatcmpl-1",
                "object": "chat.completion",
                "created": 1,
                "model": "gpt-3.5-turbo-0125",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": "First Black president of the US."},
                    "finish_reason": "stop"
                }]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let backend = AnyBackend::connect(
        Provider::OpenAi,
        ModelConfig::new(OpenAiModel::Gpt35Turbo, "sk-test").with_temperature(0.5),
        Some(server.url()),
    )
    .unwrap();

    let response = PromptTemplate::from_template(ACHIEVEMENTS)
        .unwrap()
        .pipe(ModelClient::new(backend))
        .invoke(Variables::new().with("name", "Barack Obama"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.text, "First Black president of the US.");
}
