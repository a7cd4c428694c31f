//! Template tools.

use std::sync::Arc;

use async_trait::async_trait;
use onesignal_client::{ApiRequest, OneSignalClient};
use onesignal_protocols::{RiskLevel, Tool, ToolContext, ToolDefinition, ToolError, ToolResult};
use serde::Deserialize;
use serde_json::{Value, json};

use super::{parse_params, path_segment};
use crate::format::{items, localized, section, text};

#[derive(Debug, Deserialize)]
struct TemplateIdParams {
    template_id: String,
}

#[derive(Debug, Deserialize)]
struct CreateTemplateParams {
    name: String,
    title: String,
    message: String,
}

pub struct ViewTemplatesTool {
    definition: ToolDefinition,
    client: Arc<OneSignalClient>,
}

impl ViewTemplatesTool {
    pub fn new(client: Arc<OneSignalClient>) -> Self {
        let definition = ToolDefinition::new(
            "view_templates",
            "View Templates",
            "List all templates available in your OneSignal app.",
        );
        Self { definition, client }
    }
}

#[async_trait]
impl Tool for ViewTemplatesTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, _params: Value, _ctx: ToolContext) -> Result<ToolResult, ToolError> {
        let result = self
            .client
            .call(ApiRequest::get("templates").use_org_credential(false))
            .await
            .map_err(|e| ToolError::api("Error retrieving templates", e))?;

        let templates = items(&result, "templates");
        if templates.is_empty() {
            return Ok(ToolResult::success("No templates found."));
        }
        let output = section(
            "Templates",
            templates.iter().map(|template| {
                format!(
                    "ID: {}\nName: {}\nCreated: {}\nUpdated: {}",
                    text(template, "id"),
                    text(template, "name"),
                    text(template, "created_at"),
                    text(template, "updated_at"),
                )
            }),
        );
        Ok(ToolResult::success_json(output, result))
    }
}

pub struct ViewTemplateDetailsTool {
    definition: ToolDefinition,
    client: Arc<OneSignalClient>,
}

impl ViewTemplateDetailsTool {
    pub fn new(client: Arc<OneSignalClient>) -> Self {
        let definition = ToolDefinition::new(
            "view_template_details",
            "View Template Details",
            "Get detailed information about a specific template.",
        )
        .with_parameters_schema(json!({
            "type": "object",
            "properties": {
                "template_id": {
                    "type": "string",
                    "description": "The ID of the template to retrieve details for"
                }
            },
            "required": ["template_id"]
        }));
        Self { definition, client }
    }
}

#[async_trait]
impl Tool for ViewTemplateDetailsTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, params: Value, _ctx: ToolContext) -> Result<ToolResult, ToolError> {
        let params: TemplateIdParams = parse_params(params)?;
        let template_id = path_segment("template_id", &params.template_id)?;
        let result = self
            .client
            .call(ApiRequest::get(format!("templates/{}", template_id)))
            .await
            .map_err(|e| ToolError::api("Error fetching template details", e))?;

        let output = [
            format!("ID: {}", text(&result, "id")),
            format!("Name: {}", text(&result, "name")),
            format!("Title: {}", localized(&result, "headings", "No heading")),
            format!("Message: {}", localized(&result, "contents", "No content")),
            format!("Platform: {}", text(&result, "platform")),
            format!("Created: {}", text(&result, "created_at")),
        ]
        .join("\n");
        Ok(ToolResult::success_json(output, result))
    }
}

pub struct CreateTemplateTool {
    definition: ToolDefinition,
    client: Arc<OneSignalClient>,
}

impl CreateTemplateTool {
    pub fn new(client: Arc<OneSignalClient>) -> Self {
        let definition = ToolDefinition::new(
            "create_template",
            "Create Template",
            "Create a new template in your OneSignal app.",
        )
        .with_parameters_schema(json!({
            "type": "object",
            "properties": {
                "name": { "type": "string", "description": "Name of the template" },
                "title": { "type": "string", "description": "Title/heading of the template" },
                "message": { "type": "string", "description": "Content/message of the template" }
            },
            "required": ["name", "title", "message"]
        }))
        .with_risk_level(RiskLevel::Medium);
        Self { definition, client }
    }
}

#[async_trait]
impl Tool for CreateTemplateTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, params: Value, _ctx: ToolContext) -> Result<ToolResult, ToolError> {
        let params: CreateTemplateParams = parse_params(params)?;
        let body = json!({
            "name": &params.name,
            "headings": { "en": params.title },
            "contents": { "en": params.message },
        });
        let result = self
            .client
            .call(ApiRequest::post("templates").with_body(body))
            .await
            .map_err(|e| ToolError::api("Error creating template", e))?;

        Ok(ToolResult::success_json(
            format!(
                "Template '{}' created successfully with ID: {}",
                params.name,
                text(&result, "id")
            ),
            result,
        ))
    }
}
