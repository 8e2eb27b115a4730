//! Client for the external text-generation service backing the chat guide.
//!
//! The service is an opaque collaborator: one POST with the assembled prompt,
//! one plain-text answer back. Failures are mapped onto friendly inline
//! messages by the caller via [`friendly_error`]; nothing here can crash the
//! application.

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Role instructions prepended to every generation request.
pub const SYSTEM_PROMPT: &str = "\
You are the resident guide of a digital handscroll gallery presenting a \
historical scroll painting of the Bin Feng poems. Your duties:

1. Explain the historical and cultural background of the scroll.
2. Interpret the verses the painted scenes illustrate.
3. Introduce the farming life and seasonal customs shown on the scroll.
4. Answer questions about early Chinese agrarian culture.

Answer requirements:
- Keep an elegant, concise tone; warm but professional.
- If a question falls outside the scroll's subject, gently steer the \
visitor back to it.
- Prefer substantive answers over one-liners; quoting the original verses \
is welcome.";

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    text: String,
}

/// Handle on the generation endpoint. Constructed once at startup; absent
/// credentials degrade the chat to an inline notice instead of failing hard.
#[derive(Debug, Clone)]
pub struct GenerationClient {
    base_url: String,
    model: String,
    api_key: Option<String>,
    http: reqwest::blocking::Client,
}

impl GenerationClient {
    pub fn new(base_url: &str, model: &str, api_key: Option<String>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .build()
            .context("Building HTTP client for the generation service")?;
        Ok(GenerationClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            http,
        })
    }

    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty() && self.api_key.is_some()
    }

    /// Assemble the full prompt from the system instructions, the retrieved
    /// context block (if any) and the visitor's question.
    pub fn assemble_prompt(question: &str, context_block: &str) -> String {
        let mut prompt = format!("{SYSTEM_PROMPT}\n\n");
        if !context_block.is_empty() {
            prompt.push_str(&format!(
                "Consult the following reference notes when answering:\n\n{context_block}\n\n---\n\n"
            ));
        }
        prompt.push_str(&format!("Visitor question: {question}"));
        prompt
    }

    /// One synchronous generation round trip. No explicit timeout is set; a
    /// hung request stalls only the chat's own loading indicator.
    pub fn generate(&self, question: &str, context_block: &str, temperature: f32) -> Result<String> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("generation API key is not configured"))?;
        if self.base_url.is_empty() {
            bail!("generation API base URL is not configured");
        }

        let prompt = Self::assemble_prompt(question, context_block);
        let request = GenerationRequest {
            model: &self.model,
            prompt: &prompt,
            temperature,
            top_p: 0.95,
        };
        debug!(
            model = %self.model,
            prompt_chars = prompt.chars().count(),
            has_context = !context_block.is_empty(),
            "Dispatching generation request"
        );

        let response = self
            .http
            .post(format!("{}/generate", self.base_url))
            .bearer_auth(key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(serde_json::to_string(&request).context("Encoding generation request")?)
            .send()
            .context("Sending generation request")?;

        let status = response.status();
        if !status.is_success() {
            bail!("generation service answered {status}");
        }
        let body = response.text().context("Reading generation response")?;
        let parsed: GenerationResponse =
            serde_json::from_str(&body).context("Parsing generation response")?;
        if parsed.text.trim().is_empty() {
            bail!("generation service returned an empty answer");
        }
        Ok(parsed.text)
    }
}

/// Map a failure onto the inline message shown in the chat panel. Never
/// surfaces raw errors to the visitor; the full chain still goes to the log.
pub fn friendly_error(err: &anyhow::Error) -> String {
    let chain = format!("{err:#}").to_lowercase();
    if chain.contains("api key") || chain.contains("401") || chain.contains("403") {
        "The guide is not configured yet. Set the generation API key and restart.".to_string()
    } else if chain.contains("quota") || chain.contains("429") {
        "The guide has answered too many questions for now; please try again later.".to_string()
    } else if chain.contains("connect")
        || chain.contains("network")
        || chain.contains("dns")
        || chain.contains("timed out")
    {
        "Could not reach the guide service. Check the network and try again.".to_string()
    } else {
        "The guide could not answer that just now; please try again.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_includes_context_block_when_present() {
        let prompt = GenerationClient::assemble_prompt("何谓七月流火?", "【七月】\n七月流火，九月授衣。");
        assert!(prompt.starts_with(SYSTEM_PROMPT));
        assert!(prompt.contains("【七月】"));
        assert!(prompt.ends_with("Visitor question: 何谓七月流火?"));
    }

    #[test]
    fn prompt_omits_reference_section_without_context() {
        let prompt = GenerationClient::assemble_prompt("你好", "");
        assert!(!prompt.contains("reference notes"));
        assert!(prompt.ends_with("Visitor question: 你好"));
    }

    #[test]
    fn blank_api_key_counts_as_unconfigured() {
        let client = GenerationClient::new("https://example.com", "m", Some("  ".to_string())).unwrap();
        assert!(!client.is_configured());
        let client = GenerationClient::new("https://example.com", "m", Some("k".to_string())).unwrap();
        assert!(client.is_configured());
    }

    #[test]
    fn friendly_errors_cover_the_taxonomy() {
        let missing = anyhow!("generation API key is not configured");
        assert!(friendly_error(&missing).contains("not configured"));

        let quota = anyhow!("generation service answered 429 Too Many Requests");
        assert!(friendly_error(&quota).contains("try again later"));

        let network = anyhow!("error trying to connect: dns error");
        assert!(friendly_error(&network).contains("network"));

        let other = anyhow!("something odd");
        assert!(friendly_error(&other).contains("try again"));
    }
}
