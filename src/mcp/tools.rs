//! Tool registry for MCP tools.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::service::PaperService;

pub use super::handlers::{
    DownloadPaperHandler, GetPaperHandler, HealthCheckHandler, SearchPapersHandler,
};

/// An MCP tool that can be called by the client
#[derive(Clone)]
pub struct Tool {
    /// Tool name (e.g., "search_papers")
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// JSON Schema for input parameters
    pub input_schema: serde_json::Value,

    /// Handler function to execute the tool
    pub handler: Arc<dyn ToolHandler>,
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .finish()
    }
}

/// Handler for executing a tool
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync + std::fmt::Debug {
    /// Execute the tool with the given arguments
    async fn execute(&self, args: Value) -> Result<Value, String>;
}

/// Registry for all MCP tools
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, Tool>,
}

impl ToolRegistry {
    /// Create a registry holding every tool backed by `service`
    pub fn from_service(service: Arc<PaperService>) -> Self {
        let mut registry = Self {
            tools: HashMap::new(),
        };

        registry.register(Tool {
            name: "search_papers".to_string(),
            description: "Search arXiv for comma-separated keywords and rank the results by relevance".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "keywords": {
                        "type": "string",
                        "description": "Comma-separated keywords (e.g., 'transformer, attention')"
                    }
                },
                "required": ["keywords"]
            }),
            handler: Arc::new(SearchPapersHandler {
                service: service.clone(),
            }),
        });

        registry.register(Tool {
            name: "get_paper".to_string(),
            description: "Get a paper by its position in the search results, with an extractive summary of its abstract".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "paper_id": {
                        "type": "integer",
                        "description": "1-based position of the paper in provider order",
                        "minimum": 1
                    },
                    "keywords": {
                        "type": "string",
                        "description": "Comma-separated keywords used for the search. Defaults to the configured query."
                    }
                },
                "required": ["paper_id"]
            }),
            handler: Arc::new(GetPaperHandler {
                service: service.clone(),
            }),
        });

        registry.register(Tool {
            name: "download_paper".to_string(),
            description: "Download a paper's PDF into the papers directory".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "paper_id": {
                        "type": "integer",
                        "description": "1-based position of the paper in provider order",
                        "minimum": 1
                    },
                    "keywords": {
                        "type": "string",
                        "description": "Comma-separated keywords used for the search"
                    }
                },
                "required": ["paper_id", "keywords"]
            }),
            handler: Arc::new(DownloadPaperHandler {
                service: service.clone(),
            }),
        });

        registry.register(Tool {
            name: "health_check".to_string(),
            description: "Report service status and whether the papers directory exists".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
            handler: Arc::new(HealthCheckHandler { service }),
        });

        registry
    }

    /// Register a tool
    pub fn register(&mut self, tool: Tool) {
        self.tools.insert(tool.name.clone(), tool);
    }

    /// Get all tools
    pub fn all(&self) -> Vec<&Tool> {
        self.tools.values().collect()
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// Execute a tool by name
    pub async fn execute(&self, name: &str, args: Value) -> Result<Value, String> {
        let tool = self
            .get(name)
            .ok_or_else(|| format!("Tool '{}' not found", name))?;

        tool.handler.execute(args).await
    }
}
