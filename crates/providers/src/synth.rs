use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use yatri_core::RetrievalSource;

use crate::config::ProviderConfig;
use crate::http::fetch_json;

const MAX_CONTEXT_LINES: usize = 6;

/// LLM synthesis over a proxy endpoint or the direct generative API.
#[derive(Clone)]
pub struct SynthesisClient {
    client: Client,
    proxy_url: Option<String>,
    api_base: String,
    api_key: Option<String>,
    model: String,
}

impl SynthesisClient {
    pub fn new(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            proxy_url: config.synth_proxy_url.clone(),
            api_base: config.synth_api_base.clone(),
            api_key: config.synth_api_key.clone(),
            model: config.synth_model.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.proxy_url.is_some() || self.api_key.is_some()
    }

    /// Proxy first, then the direct generative API; `None` when neither is
    /// configured or both fail. The reply may open with a fenced budget
    /// block, which the caller extracts separately.
    pub async fn synthesize(&self, prompt: &str, sources: &[RetrievalSource]) -> Option<String> {
        if let Some(url) = self.proxy_url.as_deref() {
            if let Some(text) = self.proxy_reply(url, prompt, sources).await {
                return Some(text);
            }
            debug!("synthesis proxy produced no reply; trying the direct API");
        }
        self.direct_reply(prompt, sources).await
    }

    async fn proxy_reply(
        &self,
        url: &str,
        prompt: &str,
        sources: &[RetrievalSource],
    ) -> Option<String> {
        let payload = serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "context": context_lines(sources),
        });
        let body = fetch_json(self.client.post(url).json(&payload)).await?;
        let text = body
            .get("text")
            .or_else(|| body.get("output"))
            .and_then(Value::as_str)?
            .trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }

    async fn direct_reply(&self, prompt: &str, sources: &[RetrievalSource]) -> Option<String> {
        let api_key = self.api_key.as_deref()?;
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.api_base, self.model, api_key
        );
        let payload = serde_json::json!({
            "contents": [{ "parts": [{ "text": build_prompt(prompt, sources) }] }]
        });
        let body = fetch_json(self.client.post(&url).json(&payload)).await?;
        extract_reply_text(&body)
    }
}

fn context_lines(sources: &[RetrievalSource]) -> Vec<String> {
    sources
        .iter()
        .take(MAX_CONTEXT_LINES)
        .map(|source| {
            format!(
                "LOCAL {}: {} — {}",
                source.kind.as_label(),
                source.title,
                source.snippet
            )
        })
        .collect()
}

fn build_prompt(prompt: &str, sources: &[RetrievalSource]) -> String {
    let context = context_lines(sources);
    let local_knowledge = if context.is_empty() {
        "No local matches found.".to_string()
    } else {
        context.join("\n")
    };
    [
        "You are an expert Indian travel planner specializing in Kolkata and West Bengal."
            .to_string(),
        format!("User request: {prompt}"),
        String::new(),
        "LOCAL KNOWLEDGE (from curated database):".to_string(),
        local_knowledge,
        String::new(),
        "INSTRUCTIONS:".to_string(),
        "1. FIRST output a ```json fenced block with a budget estimate object: { low, high, currency:\"INR\", basis, categories:[{label, amount}] }".to_string(),
        "2. THEN produce a single concise combined answer: Overview, Key Attractions, Suggested Itinerary, Budget Breakdown, Local Tips".to_string(),
        "3. Keep the response concise but informative (4-6 bullet points max)".to_string(),
        "4. Mention which sources informed each recommendation".to_string(),
        "5. Include practical advice for the specified travel party and budget level".to_string(),
    ]
    .join("\n")
}

fn extract_reply_text(payload: &Value) -> Option<String> {
    let text = payload
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()?
        .trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
