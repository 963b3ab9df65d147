//! ureq 实现的上游 API 客户端
//!
//! ureq 是同步客户端，请求放在 spawn_blocking 中执行。

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, trace, warn};
use ureq::Agent;

use super::{ApiRequest, ApiResponse, BackendApi, BackendError, Method};
use crate::api::constants::BEARER_PREFIX;
use crate::config::BackendConfig;

/// HTTP client bound to one upstream base URL.
///
/// No retries and no caching; each call is attempted exactly once.
#[derive(Clone)]
pub struct HttpBackend {
    base_url: String,
    agent: Agent,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Self {
        // 4xx/5xx 作为普通响应返回，由调用方解释状态码
        let mut builder = Agent::config_builder().http_status_as_error(false);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout_global(Some(Duration::from_secs(secs)));
        }

        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            agent: builder.build().into(),
        }
    }

    /// Join the base URL and an API path
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn call_sync(agent: &Agent, url: &str, request: ApiRequest) -> Result<ApiResponse, BackendError> {
        let authorization = request
            .token
            .as_deref()
            .map(|token| format!("{}{}", BEARER_PREFIX, token));

        let result = match request.method {
            Method::Get => {
                let mut builder = agent.get(url).header("Accept", "application/json");
                if let Some(ref value) = authorization {
                    builder = builder.header("Authorization", value.as_str());
                }
                builder.call()
            }
            Method::Post => {
                let mut builder = agent.post(url).header("Accept", "application/json");
                if let Some(ref value) = authorization {
                    builder = builder.header("Authorization", value.as_str());
                }
                match request.body {
                    Some(ref body) => {
                        let bytes = serde_json::to_vec(body)
                            .map_err(|e| BackendError::Encode(e.to_string()))?;
                        builder
                            .header("Content-Type", "application/json")
                            .send(bytes.as_slice())
                    }
                    None => builder.send_empty(),
                }
            }
        };

        let response = result.map_err(|e| BackendError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let issued = response
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let text = response
            .into_body()
            .read_to_string()
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        Ok(ApiResponse {
            status,
            authorization: issued,
            body: decode_body(&text),
        })
    }
}

/// Empty or non-JSON bodies become `Value::Null`
pub(crate) fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            trace!("Backend body is not JSON ({}), ignoring", e);
            Value::Null
        }
    }
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn call(&self, request: ApiRequest) -> Result<ApiResponse, BackendError> {
        let url = self.url_for(&request.path);
        let agent = self.agent.clone();
        let method = request.method;
        let path = request.path.clone();
        let start = Instant::now();

        let result = tokio::task::spawn_blocking(move || Self::call_sync(&agent, &url, request))
            .await
            .map_err(|e| BackendError::Task(e.to_string()))?;

        match &result {
            Ok(response) => debug!(
                "Backend {} {} -> {} in {:?}",
                method,
                path,
                response.status,
                start.elapsed()
            ),
            Err(e) => warn!("Backend {} {} failed: {}", method, path, e),
        }

        result
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn backend(base_url: &str) -> HttpBackend {
        HttpBackend::new(&BackendConfig {
            base_url: base_url.to_string(),
            timeout_secs: Some(2),
        })
    }

    #[test]
    fn test_url_for_joins_without_double_slash() {
        let client = backend("http://api.local:8080/");
        assert_eq!(client.url_for("/links"), "http://api.local:8080/links");
        assert_eq!(client.url_for("abc123/true"), "http://api.local:8080/abc123/true");
        assert_eq!(client.base_url(), "http://api.local:8080");
    }

    #[test]
    fn test_decode_body() {
        assert_eq!(decode_body(""), Value::Null);
        assert_eq!(decode_body("  \n"), Value::Null);
        assert_eq!(decode_body("<html>oops</html>"), Value::Null);
        assert_eq!(decode_body(r#"{"message":"ok"}"#), json!({"message": "ok"}));
        assert_eq!(decode_body("[1,2]"), json!([1, 2]));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // 端口 9 (discard) 在测试环境中通常没有监听
        let client = backend("http://127.0.0.1:9");
        let err = client.call(ApiRequest::get("/links")).await.unwrap_err();
        assert!(matches!(err, BackendError::Transport(_)), "got: {:?}", err);
    }
}
