/// MCP server for content pre-review.
///
/// Exposes three tools:
/// - `review_content`: Scan copy for sensitive terms, score it, highlight and rewrite it
/// - `list_categories`: List term categories with counts and replacement candidates
/// - `suggest_replacement`: Draw one replacement phrase for a category
use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tracing::info;

use review_core::mcp_api::{
    CategoryInfo, CategoryListResponse, MatchEntry, ReviewContentParams, ReviewContentResponse,
    SuggestReplacementParams, SuggestReplacementResponse,
};
use review_core::review::{Review, Reviewer};

#[derive(Clone)]
pub struct ContentReviewServer {
    reviewer: Arc<Reviewer>,
    tool_router: ToolRouter<ContentReviewServer>,
}

impl ContentReviewServer {
    pub fn new(reviewer: Arc<Reviewer>) -> Self {
        Self {
            reviewer,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl ContentReviewServer {
    #[tool(description = "Review short-video copy before publishing. Detects sensitive terms by category, returns a safety score (100 = clean), a risk level, per-term replacement suggestions, the text with matches highlighted, and a rewritten version.")]
    async fn review_content(
        &self,
        Parameters(params): Parameters<ReviewContentParams>,
    ) -> Result<Json<ReviewContentResponse>, String> {
        let review = self
            .reviewer
            .review(&params.text)
            .map_err(|e| e.to_string())?;

        info!(
            matches = review.result.matches.len(),
            score = review.result.risk_score,
            level = review.result.risk_level.label(),
            "content reviewed"
        );

        Ok(Json(to_api_review(
            review,
            self.reviewer.load_error().map(str::to_string),
        )))
    }

    #[tool(description = "List the sensitive term categories currently loaded, with term counts and the replacement phrases used for each.")]
    async fn list_categories(&self) -> Result<Json<CategoryListResponse>, String> {
        let index = self.reviewer.index();
        let policy = self.reviewer.policy();

        let categories = index
            .categories()
            .iter()
            .map(|c| CategoryInfo {
                name: c.name.clone(),
                term_count: c.terms.len(),
                candidates: policy.candidates(&c.name).to_vec(),
            })
            .collect();

        Ok(Json(CategoryListResponse {
            categories,
            total_terms: index.term_count(),
            fallback_replacement: policy.fallback().to_string(),
            term_table_error: self.reviewer.load_error().map(str::to_string),
        }))
    }

    #[tool(description = "Suggest a neutral replacement phrase for a sensitive term category (e.g. '政治相关', '夸大宣传'). Unknown categories get a generic fallback.")]
    async fn suggest_replacement(
        &self,
        Parameters(params): Parameters<SuggestReplacementParams>,
    ) -> Result<Json<SuggestReplacementResponse>, String> {
        let category = params.category.trim().to_string();
        if category.is_empty() {
            return Err("category must not be empty".to_string());
        }

        let replacement = self.reviewer.suggest(&category).to_string();
        let known_category = self.reviewer.policy().is_known(&category);

        Ok(Json(SuggestReplacementResponse {
            category,
            replacement,
            known_category,
        }))
    }
}

fn to_api_review(review: Review, term_table_error: Option<String>) -> ReviewContentResponse {
    let Review {
        result,
        highlighted,
        rewritten,
        report,
    } = review;

    let matches = result
        .matches
        .iter()
        .map(|m| MatchEntry {
            category: m.category.clone(),
            term: m.term.clone(),
            replacement: result
                .suggestions
                .get(&m.term)
                .unwrap_or_default()
                .to_string(),
        })
        .collect();

    ReviewContentResponse {
        risk_score: result.risk_score,
        risk_level: result.risk_level,
        risk_label: result.risk_level.label().to_string(),
        matches,
        highlighted,
        rewritten,
        report,
        term_table_error,
    }
}

#[tool_handler]
impl ServerHandler for ContentReviewServer {
    fn get_info(&self) -> ServerInfo {
        let mut instructions = format!(
            "Content pre-review MCP server. Use review_content to check copy against {} \
             sensitive terms in {} categories before publishing; list_categories shows the \
             loaded categories and suggest_replacement draws a neutral phrase for one.",
            self.reviewer.index().term_count(),
            self.reviewer.index().len(),
        );
        if let Some(load_error) = self.reviewer.load_error() {
            instructions.push_str(&format!(
                " WARNING: the term table did not load ({load_error}); every review will report no matches."
            ));
        }

        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "content-review".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(instructions),
        }
    }
}
