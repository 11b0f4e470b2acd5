use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::core::model::{PostmarkErrorBody, TemplateList, TemplateRecord, TemplateSummary, TemplateUpdate};
use crate::error::{ConfigError, NetworkError, Result};

pub const PAGE_SIZE: usize = 500;
const TOKEN_HEADER: &str = "X-Postmark-Server-Token";

/// The template endpoints the sync operations rely on.
#[async_trait]
pub trait TemplateApi: Send + Sync {
    async fn list_templates(&self) -> Result<Vec<TemplateSummary>>;
    async fn get_template(&self, template_id: u64) -> Result<TemplateRecord>;
    async fn update_template(&self, template_id: u64, update: &TemplateUpdate) -> Result<()>;
}

#[derive(Clone)]
pub struct PostmarkClient {
    client: reqwest::Client,
    base_url: String,
}

impl PostmarkClient {
    pub fn new(base_url: &str, server_token: &str) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("postmark-sync v{}", version);

        let mut headers = HeaderMap::new();
        let token = HeaderValue::from_str(server_token).map_err(|_| ConfigError::InvalidValue {
            field: "POSTMARK_SERVER_TOKEN".to_string(),
            value: "<not a valid header value>".to_string(),
        })?;
        headers.insert(TOKEN_HEADER, token);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .default_headers(headers)
            .build()
            .map_err(NetworkError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_base_url, &config.server_token)
    }

    async fn list_page(&self, offset: usize) -> Result<TemplateList> {
        let url = format!("{}/templates", self.base_url);
        debug!("Listing templates (count={}, offset={})", PAGE_SIZE, offset);

        let response = self
            .client
            .get(&url)
            .query(&[("count", PAGE_SIZE), ("offset", offset)])
            .send()
            .await
            .map_err(NetworkError::Http)?;

        Self::parse_json(response).await
    }

    async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let response = Self::check_status(response).await?;
        let body = response.text().await.map_err(NetworkError::Http)?;
        serde_json::from_str(&body).map_err(|e| {
            NetworkError::InvalidResponse {
                reason: e.to_string(),
            }
            .into()
        })
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(NetworkError::Authentication {
                status: status.as_u16(),
            }
            .into());
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<PostmarkErrorBody>(&body) {
            Ok(error) => format!("{} (ErrorCode {})", error.message, error.error_code),
            Err(_) if body.is_empty() => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
            Err(_) => body,
        };

        Err(NetworkError::Status {
            status: status.as_u16(),
            message,
        }
        .into())
    }
}

#[async_trait]
impl TemplateApi for PostmarkClient {
    async fn list_templates(&self) -> Result<Vec<TemplateSummary>> {
        let mut templates = Vec::new();
        let mut offset = 0;

        loop {
            let page = self.list_page(offset).await?;
            let received = page.templates.len();
            templates.extend(page.templates);
            offset += received;

            if received < PAGE_SIZE || templates.len() as u64 >= page.total_count {
                break;
            }
        }

        debug!("Listed {} remote templates", templates.len());
        Ok(templates)
    }

    async fn get_template(&self, template_id: u64) -> Result<TemplateRecord> {
        let url = format!("{}/templates/{}", self.base_url, template_id);
        debug!("Fetching template {}", template_id);

        let response = self.client.get(&url).send().await.map_err(NetworkError::Http)?;
        Self::parse_json(response).await
    }

    async fn update_template(&self, template_id: u64, update: &TemplateUpdate) -> Result<()> {
        let url = format!("{}/templates/{}", self.base_url, template_id);
        debug!("Updating template {}", template_id);

        let response = self
            .client
            .put(&url)
            .json(update)
            .send()
            .await
            .map_err(NetworkError::Http)?;

        Self::check_status(response).await?;
        Ok(())
    }
}
