//! Servings MCP Server Implementation
//!
//! Exposes the scaling engine and the subscription endpoint as MCP tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::AppConfig;
use crate::db::Database;
use crate::mailing_list::MailingListClient;
use crate::models::{BaseIngredient, MacroProfile};
use crate::scaling::Catalog;
use crate::tools::scaling::{self, ScaleErrorResponse, ScaleRequest};
use crate::tools::status::StatusTracker;
use crate::tools::subscribers::{self, SubscribeContext, SubscribeErrorResponse, SubscribeRequest};

/// Servings MCP Service
#[derive(Clone)]
pub struct ServingsService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    catalog: Arc<Catalog>,
    database: Database,
    mailing_list: Option<MailingListClient>,
    config: AppConfig,
    tool_router: ToolRouter<ServingsService>,
}

impl ServingsService {
    pub fn new(config: AppConfig, catalog: Arc<Catalog>, database: Database) -> Self {
        let mailing_list = config.mailing_list.clone().map(MailingListClient::new);
        let tracker = StatusTracker::new(
            config.database_path.clone(),
            config.mode,
            mailing_list.is_some(),
            catalog.len(),
            catalog.recipes().len(),
        );

        Self {
            status_tracker: Arc::new(Mutex::new(tracker)),
            catalog,
            database,
            mailing_list,
            config,
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Scaling Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MacroParams {
    pub calories: f64,
    /// Grams of protein
    pub protein: f64,
    /// Grams of carbohydrate
    pub carbs: f64,
    /// Grams of fat
    pub fat: f64,
}

/// Single ingredient line of a custom recipe
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct IngredientLineParams {
    /// Catalog ingredient id (see list_ingredients)
    pub id: String,
    /// Base quantity in the ingredient's unit (defaults to the catalog value)
    pub quantity: Option<f64>,
    /// Base weight in grams (defaults to the catalog value)
    pub weight_grams: Option<f64>,
    /// Macros of the base quantity (defaults to the catalog value)
    pub macros: Option<MacroParams>,
}

impl From<IngredientLineParams> for BaseIngredient {
    fn from(p: IngredientLineParams) -> Self {
        BaseIngredient {
            id: p.id,
            quantity: p.quantity,
            weight_grams: p.weight_grams,
            macros: p
                .macros
                .map(|m| MacroProfile::new(m.calories, m.protein, m.carbs, m.fat)),
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ScaleRecipeParams {
    /// Named catalog recipe to scale (see list_recipes)
    pub recipe_id: Option<String>,
    /// Custom ingredient lines; used instead of recipe_id when present
    pub ingredients: Option<Vec<IngredientLineParams>>,
    /// Servings the base amounts are written for (default: the recipe's own, or 1 for custom lines)
    pub base_servings: Option<f64>,
    /// Servings to scale to
    pub target_servings: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FormatQuantityParams {
    /// Quantity to format
    pub quantity: f64,
    /// Unit (whole, volume, weight, count); with category, rounds before formatting
    pub unit: Option<String>,
    /// Category (protein, vegetable, fat, acid, ...)
    pub category: Option<String>,
}

// ============================================================================
// Subscription Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SubscribeParams {
    /// Email address to subscribe
    pub email: String,
    /// Page or form the sign-up came from (default "website")
    pub source: Option<String>,
    /// Client timestamp, RFC 3339 (default: now)
    pub timestamp: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListSubscribersParams {
    /// Maximum results (default 50, max 500)
    #[serde(default = "default_list_limit")]
    pub limit: i64,
    /// Offset for pagination (default 0)
    #[serde(default)]
    pub offset: i64,
}

fn default_list_limit() -> i64 { 50 }

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl ServingsService {
    // --- Status ---

    #[tool(description = "Get the current status of the Servings service including build info, catalog size, subscriber log and process information")]
    async fn servings_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        to_json(&tracker.get_status())
    }

    #[tool(description = "Get instructions for scaling recipes and presenting the results. Call this before the first scale_recipe call.")]
    fn scaling_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::SCALING_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(SCALING_INSTRUCTIONS)]))
    }

    // --- Catalog ---

    #[tool(description = "List every catalog ingredient with its base quantity, weight, unit, category and macros")]
    fn list_ingredients(&self) -> Result<CallToolResult, McpError> {
        to_json(&scaling::list_ingredients(&self.catalog))
    }

    #[tool(description = "List the landing-page ingredient table with the rounding rule each row demonstrates")]
    fn list_display_ingredients(&self) -> Result<CallToolResult, McpError> {
        to_json(&scaling::list_display_ingredients(&self.catalog))
    }

    #[tool(description = "List the named base recipes with their serving counts and instructions")]
    fn list_recipes(&self) -> Result<CallToolResult, McpError> {
        to_json(&scaling::list_recipes(&self.catalog))
    }

    // --- Scaling ---

    #[tool(description = "Scale a recipe to a target number of servings. Returns rounded display quantities, formatted fractions, scaled weights and macro totals computed from unrounded amounts.")]
    fn scale_recipe(&self, Parameters(p): Parameters<ScaleRecipeParams>) -> Result<CallToolResult, McpError> {
        let request = ScaleRequest {
            recipe_id: p.recipe_id,
            base_servings: p.base_servings,
            ingredients: p.ingredients.map(|lines| lines.into_iter().map(BaseIngredient::from).collect()),
            target_servings: p.target_servings,
        };
        match scaling::scale_recipe(&self.catalog, &request) {
            Ok(result) => to_json(&result),
            Err(e) => {
                tracing::debug!("scale_recipe rejected: {}", e);
                to_json(&ScaleErrorResponse::from(&e))
            }
        }
    }

    #[tool(description = "Format a quantity as a whole number plus fraction glyph (e.g. 2.5 -> \"2 ½\"). Pass unit and category to apply smart rounding first.")]
    fn format_quantity(&self, Parameters(p): Parameters<FormatQuantityParams>) -> Result<CallToolResult, McpError> {
        match scaling::format_quantity(p.quantity, p.unit.as_deref(), p.category.as_deref()) {
            Ok(result) => to_json(&result),
            Err(e) => to_json(&ScaleErrorResponse::from(&e)),
        }
    }

    // --- Subscriptions ---

    #[tool(description = "Subscribe an email address to the newsletter. Forwards to the mailing-list provider when configured and keeps a local copy outside production.")]
    async fn subscribe(&self, Parameters(p): Parameters<SubscribeParams>) -> Result<CallToolResult, McpError> {
        let ctx = SubscribeContext {
            database: &self.database,
            mailing_list: self.mailing_list.as_ref(),
            mode: self.config.mode,
        };
        let request = SubscribeRequest {
            email: p.email,
            source: p.source.unwrap_or_else(|| "website".to_string()),
            timestamp: p.timestamp,
        };
        match subscribers::subscribe(&ctx, request).await {
            Ok(response) => to_json(&response),
            Err(e) => {
                if e.status_code() >= 500 {
                    tracing::error!("Subscription error: {}", e);
                }
                to_json(&SubscribeErrorResponse::from(&e))
            }
        }
    }

    #[tool(description = "List subscribers in the local log (development mode only records sign-ups)")]
    fn list_subscribers(&self, Parameters(p): Parameters<ListSubscribersParams>) -> Result<CallToolResult, McpError> {
        let result = subscribers::list_subscribers(&self.database, p.limit, p.offset)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for ServingsService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "servings".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Servings".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Servings - recipe scaling and newsletter sign-ups. \
                 IMPORTANT: Call scaling_instructions before scaling. \
                 Catalog: list_ingredients, list_display_ingredients, list_recipes. \
                 Scaling: scale_recipe (by recipe_id or custom ingredients), format_quantity. \
                 Newsletter: subscribe, list_subscribers. \
                 Status: servings_status."
                    .into(),
            ),
        }
    }
}
