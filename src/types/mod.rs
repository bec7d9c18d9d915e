//! Type definitions for the LuvToSearch API.
//!
//! Models the recognized subset of the `v1/search` response payload:
//! organic results, inline videos, and the optional AI overview.

use serde::{Deserialize, Serialize};

/// A search response payload.
///
/// Immutable once fetched; the cache and any number of callers share the same
/// payload behind an `Arc`, so none of these types expose mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    /// Ordered organic (web page) results.
    #[serde(default)]
    pub organic_results: Vec<OrganicResult>,
    /// Ordered inline video results.
    #[serde(default)]
    pub inline_videos: Vec<InlineVideo>,
    /// Optional AI-generated overview of the results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_overview: Option<AiOverview>,
}

impl SearchResponse {
    /// Returns the AI summary text, if the response carries one.
    ///
    /// Reads `ai_overview.text_blocks[0].answer`, the path the result view
    /// renders.
    pub fn summary(&self) -> Option<&str> {
        self.ai_overview
            .as_ref()?
            .text_blocks
            .first()?
            .answer
            .as_deref()
    }

    /// Returns the number of organic results.
    pub fn result_count(&self) -> usize {
        self.organic_results.len()
    }
}

/// A single organic search result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrganicResult {
    /// Result title.
    pub title: String,
    /// Result snippet text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    /// Target URL.
    pub link: String,
    /// Source site name, when the API provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// An inline video result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InlineVideo {
    /// Video title.
    pub title: String,
    /// Target URL.
    pub link: String,
    /// Thumbnail image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Hosting platform (e.g. "YouTube").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Video length as reported by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
}

/// AI-generated overview attached to a search response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AiOverview {
    /// Ordered text blocks; only the first block's answer is rendered.
    #[serde(default)]
    pub text_blocks: Vec<TextBlock>,
}

/// A single block of AI overview text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextBlock {
    /// The answer text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}
