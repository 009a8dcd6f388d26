use crate::ChatMessage;
use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Minimal client for OpenAI-compatible chat-completion endpoints.
///
/// Only `choices[0].message.content` is consumed from the response; no other
/// fields matter to this application.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    api_key: String,
    model: String,
    endpoint: String,
    client: Client,
}

impl OpenAiClient {
    pub fn new(api_key: String, model: String, endpoint: Option<String>) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(anyhow!("API key cannot be empty"));
        }

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self {
            api_key,
            model,
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one conversation and return the generated text.
    pub async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages,
        };

        debug!(model = %self.model, "sending chat completion request");
        let response = self
            .client
            .post(format!("{}/chat/completions", self.endpoint))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .context("chat completion request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(%status, "chat completion request rejected");
            return Err(anyhow!("chat completion endpoint returned {status}: {body}"));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .context("chat completion response is not valid JSON")?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("chat completion response contained no choices"))?;

        Ok(choice.message.content)
    }
}

// Wire types; nothing outside this client needs them.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[test]
    fn empty_api_key_is_rejected() {
        let result = OpenAiClient::new(String::new(), "gpt-4o-mini".to_string(), None);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn chat_returns_the_first_choice_content() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": "Week 1: read chapter 1"
                    },
                    "finish_reason": "stop"
                }]
            }"#,
            )
            .create_async()
            .await;

        let client = OpenAiClient::new(
            "test-key".to_string(),
            "gpt-4o-mini".to_string(),
            Some(server.url()),
        )
        .unwrap();

        let content = client
            .chat(vec![ChatMessage::user("Create a checklist")])
            .await
            .unwrap();

        assert_eq!(content, "Week 1: read chapter 1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn server_error_surfaces_status_and_body() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .with_body("upstream exploded")
            .create_async()
            .await;

        let client = OpenAiClient::new(
            "test-key".to_string(),
            "gpt-4o-mini".to_string(),
            Some(server.url()),
        )
        .unwrap();

        let err = client
            .chat(vec![ChatMessage::user("hello")])
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("500"));
        assert!(message.contains("upstream exploded"));
    }

    #[tokio::test]
    async fn empty_choices_is_an_error() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": []}"#)
            .create_async()
            .await;

        let client = OpenAiClient::new(
            "test-key".to_string(),
            "gpt-4o-mini".to_string(),
            Some(server.url()),
        )
        .unwrap();

        let err = client
            .chat(vec![ChatMessage::user("hello")])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no choices"));
    }
}
