//! Endpoint classification.

/// Endpoint prefixes that only accept the organization key.
pub const ORG_ENDPOINT_PREFIXES: &[&str] = &["apps", "players/csv_export", "notifications/csv_export"];

/// Whether `endpoint` needs the organization key.
///
/// Prefixes match whole path segments: `apps/123` is an organization
/// endpoint, `appsfoo` is not.
pub fn requires_org_credential(endpoint: &str) -> bool {
    let endpoint = endpoint.trim_start_matches('/');
    ORG_ENDPOINT_PREFIXES.iter().any(|prefix| {
        endpoint
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}
