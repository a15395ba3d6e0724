//! Tool handlers backed by [`PaperService`].

use std::sync::Arc;

use serde_json::Value;

use super::tools::ToolHandler;
use crate::service::PaperService;

/// Read `paper_id` as a positive integer, accepting numeric strings
fn paper_id_arg(args: &Value) -> Result<usize, String> {
    let value = args.get("paper_id").ok_or("Missing 'paper_id' parameter")?;

    let id = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    id.map(|id| id as usize)
        .ok_or_else(|| format!("Invalid 'paper_id': {}", value))
}

fn keywords_arg(args: &Value) -> Option<&str> {
    args.get("keywords").and_then(|v| v.as_str())
}

/// Handler for keyword search with ranking
#[derive(Debug)]
pub struct SearchPapersHandler {
    pub service: Arc<PaperService>,
}

#[async_trait::async_trait]
impl ToolHandler for SearchPapersHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let keywords = keywords_arg(&args).ok_or("Missing 'keywords' parameter")?;

        let response = self
            .service
            .search(keywords)
            .await
            .map_err(|e| e.to_string())?;

        serde_json::to_value(response).map_err(|e| e.to_string())
    }
}

/// Handler for looking up and summarizing one paper
#[derive(Debug)]
pub struct GetPaperHandler {
    pub service: Arc<PaperService>,
}

#[async_trait::async_trait]
impl ToolHandler for GetPaperHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let id = paper_id_arg(&args)?;

        let detail = self
            .service
            .paper_detail(id, keywords_arg(&args))
            .await
            .map_err(|e| e.to_string())?;

        serde_json::to_value(detail).map_err(|e| e.to_string())
    }
}

/// Handler for downloading a paper's PDF
#[derive(Debug)]
pub struct DownloadPaperHandler {
    pub service: Arc<PaperService>,
}

#[async_trait::async_trait]
impl ToolHandler for DownloadPaperHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let id = paper_id_arg(&args)?;
        let keywords = keywords_arg(&args).ok_or("Missing 'keywords' parameter")?;

        let result = self
            .service
            .download(id, keywords)
            .await
            .map_err(|e| e.to_string())?;

        serde_json::to_value(result).map_err(|e| e.to_string())
    }
}

/// Handler for the liveness check
#[derive(Debug)]
pub struct HealthCheckHandler {
    pub service: Arc<PaperService>,
}

#[async_trait::async_trait]
impl ToolHandler for HealthCheckHandler {
    async fn execute(&self, _args: Value) -> Result<Value, String> {
        serde_json::to_value(self.service.health()).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paper_id_arg() {
        assert_eq!(paper_id_arg(&json!({"paper_id": 3})), Ok(3));
        assert_eq!(paper_id_arg(&json!({"paper_id": " 12 "})), Ok(12));
        assert!(paper_id_arg(&json!({"paper_id": -1})).is_err());
        assert!(paper_id_arg(&json!({"paper_id": "two"})).is_err());
        assert_eq!(
            paper_id_arg(&json!({})),
            Err("Missing 'paper_id' parameter".to_string())
        );
    }
}
