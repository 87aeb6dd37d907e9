use super::{ChatModel, ChatRequest, ChatResponse, ResolvedModel};
use crate::error::ProviderError;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

/// Chat completions client for OpenAI and OpenAI-compatible endpoints
pub struct OpenAiCompatModel {
    name: &'static str,
    model: ResolvedModel,
    client: reqwest::Client,
}

impl OpenAiCompatModel {
    pub fn new(name: &'static str, model: ResolvedModel, client: reqwest::Client) -> Self {
        Self {
            name,
            model,
            client,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.model.base_url)
    }
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl ChatModel for OpenAiCompatModel {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn complete(&self, request: &ChatRequest<'_>) -> Result<ChatResponse, ProviderError> {
        let mut body = json!({
            "model": self.model.model,
            "messages": [
                {"role": "system", "content": request.system},
                {"role": "user", "content": request.user},
            ],
            "max_tokens": self.model.max_tokens,
        });
        if let Some(temperature) = self.model.temperature {
            body["temperature"] = json!(temperature);
        }

        let start = std::time::Instant::now();

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.model.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                provider: self.name,
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let completion: CompletionResponse = response.json().await?;
        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ProviderError::EmptyResponse {
                provider: self.name,
            })?;

        Ok(ChatResponse {
            text,
            duration: start.elapsed(),
        })
    }
}
