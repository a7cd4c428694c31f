//! Tool implementations, grouped by provider resource.

mod apps;
mod devices;
mod messages;
mod organization;
mod segments;
mod templates;

use std::sync::Arc;

use onesignal_client::OneSignalClient;
use onesignal_protocols::{ApiError, AppConfig, Tool, ToolError};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use apps::{AddAppTool, ListAppsTool, RemoveAppTool, SwitchAppTool, UpdateAppTool};
pub use devices::{ViewDeviceDetailsTool, ViewDevicesTool};
pub use messages::{CancelMessageTool, SendNotificationTool, ViewMessageDetailsTool, ViewMessagesTool};
pub use organization::{
    CreateAppApiKeyTool, CreateAppTool, UpdateOneSignalAppTool, ViewAppApiKeysTool,
    ViewAppDetailsTool, ViewAppsTool,
};
pub use segments::{CreateSegmentTool, DeleteSegmentTool, ViewSegmentsTool};
pub use templates::{CreateTemplateTool, ViewTemplateDetailsTool, ViewTemplatesTool};

/// Every tool, bound to one client.
pub fn all_tools(client: Arc<OneSignalClient>) -> Vec<Arc<dyn Tool>> {
    let apps = Arc::clone(client.apps());
    vec![
        Arc::new(ListAppsTool::new(Arc::clone(&apps))),
        Arc::new(AddAppTool::new(Arc::clone(&apps))),
        Arc::new(UpdateAppTool::new(Arc::clone(&apps))),
        Arc::new(RemoveAppTool::new(Arc::clone(&apps))),
        Arc::new(SwitchAppTool::new(apps)),
        Arc::new(SendNotificationTool::new(Arc::clone(&client))),
        Arc::new(ViewMessagesTool::new(Arc::clone(&client))),
        Arc::new(ViewMessageDetailsTool::new(Arc::clone(&client))),
        Arc::new(CancelMessageTool::new(Arc::clone(&client))),
        Arc::new(ViewDevicesTool::new(Arc::clone(&client))),
        Arc::new(ViewDeviceDetailsTool::new(Arc::clone(&client))),
        Arc::new(ViewSegmentsTool::new(Arc::clone(&client))),
        Arc::new(CreateSegmentTool::new(Arc::clone(&client))),
        Arc::new(DeleteSegmentTool::new(Arc::clone(&client))),
        Arc::new(ViewTemplatesTool::new(Arc::clone(&client))),
        Arc::new(ViewTemplateDetailsTool::new(Arc::clone(&client))),
        Arc::new(CreateTemplateTool::new(Arc::clone(&client))),
        Arc::new(ViewAppDetailsTool::new(Arc::clone(&client))),
        Arc::new(ViewAppsTool::new(Arc::clone(&client))),
        Arc::new(CreateAppTool::new(Arc::clone(&client))),
        Arc::new(UpdateOneSignalAppTool::new(Arc::clone(&client))),
        Arc::new(ViewAppApiKeysTool::new(Arc::clone(&client))),
        Arc::new(CreateAppApiKeyTool::new(client)),
    ]
}

/// Deserialize tool arguments. A missing argument object counts as `{}`.
pub(crate) fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T, ToolError> {
    let params = if params.is_null() {
        Value::Object(Default::default())
    } else {
        params
    };
    serde_json::from_value(params).map_err(|e| ToolError::InvalidParameters(e.to_string()))
}

/// Check a caller-supplied id before it goes into an endpoint path.
///
/// Ids that are empty or could change which resource the path names are
/// rejected instead of being sent.
pub(crate) fn path_segment<'a>(name: &str, value: &'a str) -> Result<&'a str, ToolError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ToolError::InvalidParameters(format!("{} must not be empty", name)));
    }
    if value.contains(['/', '\\', '?', '#', '%']) || value.contains("..") {
        return Err(ToolError::InvalidParameters(format!(
            "{} contains characters not allowed in an id: {}",
            name, value
        )));
    }
    Ok(value)
}

/// The current app, for tools that put its id in the endpoint path.
pub(crate) fn current_app(client: &OneSignalClient, context: &str) -> Result<AppConfig, ToolError> {
    client
        .apps()
        .current()
        .ok_or_else(|| ToolError::api(context, ApiError::MissingAppContext))
}

/// Failure of an organization-key call. Rejected credentials get a hint
/// about the organization key instead of the bare status.
pub(crate) fn org_error(context: &str, action: &str, err: ApiError) -> ToolError {
    if err.is_auth_failure() {
        ToolError::PermissionDenied(format!(
            "Your Organization API Key is either not configured or doesn't have permission to {}. \
             Make sure you've set the ONESIGNAL_ORG_API_KEY environment variable with a valid \
             Organization API Key.",
            action
        ))
    } else {
        ToolError::api(context, err)
    }
}
