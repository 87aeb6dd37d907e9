use super::{ChatModel, ChatRequest, ChatResponse, ResolvedModel};
use crate::error::ProviderError;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Client for the Anthropic messages API
pub struct AnthropicModel {
    model: ResolvedModel,
    client: reqwest::Client,
}

impl AnthropicModel {
    pub fn new(model: ResolvedModel, client: reqwest::Client) -> Self {
        Self { model, client }
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.model.base_url)
    }
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[async_trait]
impl ChatModel for AnthropicModel {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    async fn complete(&self, request: &ChatRequest<'_>) -> Result<ChatResponse, ProviderError> {
        let mut body = json!({
            "model": self.model.model,
            "system": request.system,
            "messages": [{"role": "user", "content": request.user}],
            "max_tokens": self.model.max_tokens,
        });
        if let Some(temperature) = self.model.temperature {
            body["temperature"] = json!(temperature);
        }

        let start = std::time::Instant::now();

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", &self.model.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                provider: "anthropic",
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let message: MessagesResponse = response.json().await?;
        let text = message
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .ok_or(ProviderError::EmptyResponse {
                provider: "anthropic",
            })?;

        Ok(ChatResponse {
            text,
            duration: start.elapsed(),
        })
    }
}
