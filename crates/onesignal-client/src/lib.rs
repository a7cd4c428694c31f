//! # OneSignal Client
//!
//! Routes provider calls to the right credential.
//!
//! A call names an endpoint relative to the API base URL. Organization
//! endpoints (see [`endpoint::ORG_ENDPOINT_PREFIXES`]) are signed with the
//! organization key; everything else is signed with an app key taken from
//! the [`AppRegistry`](onesignal_core::AppRegistry), and the app's id is
//! added to the request when the caller did not provide it.

pub mod client;
pub mod endpoint;
pub mod request;

pub use client::{ClientConfig, OneSignalClient, AUTH_SCHEME};
pub use endpoint::requires_org_credential;
pub use request::{ApiRequest, Method};
