use super::{AccountSource, SourceError, page_request};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub const GET_ACCOUNTS_URI: &str = "/public_api/v1/cloud_onboarding/get_accounts";

#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    /// Tenant API root, e.g. `https://api-tenant.xdr.us.paloaltonetworks.com`
    pub base_url: String,
    pub api_key: String,
    pub api_key_id: Option<String>,
    pub timeout: Duration,
}

/// Account source backed by the Cloud Onboarding public API
pub struct HttpSource {
    agent: ureq::Agent,
    url: String,
    api_key: String,
    api_key_id: Option<String>,
}

impl HttpSource {
    pub fn new(config: HttpSourceConfig) -> Self {
        let agent_config = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .http_status_as_error(false)
            .build();

        Self {
            agent: ureq::Agent::new_with_config(agent_config),
            url: format!("{}{}", config.base_url.trim_end_matches('/'), GET_ACCOUNTS_URI),
            api_key: config.api_key,
            api_key_id: config.api_key_id,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl AccountSource for HttpSource {
    fn fetch_page(
        &self,
        instance_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Value, SourceError> {
        let unavailable = |message: String| SourceError::Unavailable {
            instance_id: instance_id.to_string(),
            message,
        };

        let body = page_request(instance_id, offset, limit);
        debug!(url = %self.url, instance_id, offset, limit, "POST get_accounts");

        let mut request = self
            .agent
            .post(&self.url)
            .header("Authorization", &self.api_key)
            .header("Content-Type", "application/json");
        if let Some(key_id) = &self.api_key_id {
            request = request.header("x-xdr-auth-id", key_id);
        }

        let mut response = request
            .send_json(&body)
            .map_err(|e| unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                instance_id: instance_id.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .body_mut()
            .read_json::<Value>()
            .map_err(|e| unavailable(format!("invalid JSON reply: {e}")))
    }
}
