//! Segment tools.
//!
//! Segment endpoints live under `apps/{app_id}/segments` but are signed
//! with the current app's key, so every request here overrides the
//! endpoint classification.

use std::sync::Arc;

use async_trait::async_trait;
use onesignal_client::{ApiRequest, OneSignalClient};
use onesignal_protocols::{ApiError, RiskLevel, Tool, ToolContext, ToolDefinition, ToolError, ToolResult};
use serde::Deserialize;
use serde_json::{Value, json};

use super::{current_app, parse_params, path_segment};
use crate::format::{items, section, text, text_or};

#[derive(Debug, Deserialize)]
struct CreateSegmentParams {
    name: String,
    filters: String,
}

#[derive(Debug, Deserialize)]
struct SegmentIdParams {
    segment_id: String,
}

pub struct ViewSegmentsTool {
    definition: ToolDefinition,
    client: Arc<OneSignalClient>,
}

impl ViewSegmentsTool {
    pub fn new(client: Arc<OneSignalClient>) -> Self {
        let definition = ToolDefinition::new(
            "view_segments",
            "View Segments",
            "List all segments available in your OneSignal app.",
        );
        Self { definition, client }
    }
}

fn render_segment(segment: &Value) -> String {
    [
        format!("ID: {}", text(segment, "id")),
        format!("Name: {}", text(segment, "name")),
        format!("Created: {}", text(segment, "created_at")),
        format!("Updated: {}", text(segment, "updated_at")),
        format!("Active: {}", text_or(segment, "is_active", "false")),
        format!("Read Only: {}", text_or(segment, "read_only", "false")),
    ]
    .join("\n")
}

#[async_trait]
impl Tool for ViewSegmentsTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, _params: Value, _ctx: ToolContext) -> Result<ToolResult, ToolError> {
        const CONTEXT: &str = "Error retrieving segments";
        let app = current_app(&self.client, CONTEXT)?;
        let request = ApiRequest::get(format!("apps/{}/segments", app.app_id))
            .use_org_credential(false);
        let result = self
            .client
            .call(request)
            .await
            .map_err(|e| ToolError::api(CONTEXT, e))?;

        let segments = items(&result, "segments");
        if segments.is_empty() {
            return Ok(ToolResult::success("No segments found."));
        }
        let output = section("Segments", segments.iter().map(render_segment));
        Ok(ToolResult::success_json(output, result))
    }
}

pub struct CreateSegmentTool {
    definition: ToolDefinition,
    client: Arc<OneSignalClient>,
}

impl CreateSegmentTool {
    pub fn new(client: Arc<OneSignalClient>) -> Self {
        let definition = ToolDefinition::new(
            "create_segment",
            "Create Segment",
            "Create a new segment in your OneSignal app.",
        )
        .with_parameters_schema(json!({
            "type": "object",
            "properties": {
                "name": { "type": "string", "description": "Name of the segment" },
                "filters": {
                    "type": "string",
                    "description": "JSON string representing the filters for this segment \
                        (e.g., '[{\"field\":\"tag\",\"key\":\"level\",\"relation\":\"=\",\"value\":\"10\"}]')"
                }
            },
            "required": ["name", "filters"]
        }))
        .with_risk_level(RiskLevel::Medium);
        Self { definition, client }
    }
}

#[async_trait]
impl Tool for CreateSegmentTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, params: Value, _ctx: ToolContext) -> Result<ToolResult, ToolError> {
        const CONTEXT: &str = "Error creating segment";
        let params: CreateSegmentParams = parse_params(params)?;
        let filters: Value = serde_json::from_str(&params.filters).map_err(|_| {
            ToolError::api(
                CONTEXT,
                ApiError::InvalidInput(
                    "The filters parameter must be a valid JSON string.".to_string(),
                ),
            )
        })?;

        let app = current_app(&self.client, CONTEXT)?;
        let request = ApiRequest::post(format!("apps/{}/segments", app.app_id))
            .with_body(json!({ "name": &params.name, "filters": filters }))
            .use_org_credential(false);
        let result = self
            .client
            .call(request)
            .await
            .map_err(|e| ToolError::api(CONTEXT, e))?;

        Ok(ToolResult::success_json(
            format!(
                "Segment '{}' created successfully with ID: {}",
                params.name,
                text(&result, "id")
            ),
            result,
        ))
    }
}

pub struct DeleteSegmentTool {
    definition: ToolDefinition,
    client: Arc<OneSignalClient>,
}

impl DeleteSegmentTool {
    pub fn new(client: Arc<OneSignalClient>) -> Self {
        let definition = ToolDefinition::new(
            "delete_segment",
            "Delete Segment",
            "Delete a segment from your OneSignal app.",
        )
        .with_parameters_schema(json!({
            "type": "object",
            "properties": {
                "segment_id": { "type": "string", "description": "ID of the segment to delete" }
            },
            "required": ["segment_id"]
        }))
        .with_risk_level(RiskLevel::High);
        Self { definition, client }
    }
}

#[async_trait]
impl Tool for DeleteSegmentTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, params: Value, _ctx: ToolContext) -> Result<ToolResult, ToolError> {
        const CONTEXT: &str = "Error deleting segment";
        let params: SegmentIdParams = parse_params(params)?;
        let segment_id = path_segment("segment_id", &params.segment_id)?;
        let app = current_app(&self.client, CONTEXT)?;
        let request = ApiRequest::delete(format!("apps/{}/segments/{}", app.app_id, segment_id))
            .use_org_credential(false);
        self.client
            .call(request)
            .await
            .map_err(|e| ToolError::api(CONTEXT, e))?;

        Ok(ToolResult::success(format!(
            "Segment '{}' deleted successfully",
            params.segment_id
        )))
    }
}

#[cfg(test)]
#[path = "segments_tests.rs"]
mod tests;
