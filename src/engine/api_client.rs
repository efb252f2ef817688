use reqwest::blocking::Client;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

use crate::engine::error::ApiError;
use crate::model::response::{Ack, ChooseResponse, SceneResponse};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

/// The game server as seen by the client.
#[cfg_attr(test, mockall::automock)]
pub trait GameApi: Send {
    /// `GET /api/scene`
    fn scene(&self) -> Result<SceneResponse, ApiError>;

    /// `POST /api/choose`
    fn choose(&self, choice_idx: usize) -> Result<ChooseResponse, ApiError>;

    /// `POST /api/set_name`
    fn set_name(&self, name: &str) -> Result<(), ApiError>;

    /// `POST /api/reset`
    fn reset(&self) -> Result<(), ApiError>;

    /// `POST /api/set_key`
    fn set_key(&self, key: &str) -> Result<(), ApiError>;
}

pub struct HttpGameApi {
    client: Client,
    base_url: String,
}

impl HttpGameApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Sends a request and parses the body as JSON whatever the HTTP status.
    /// A body, when given, is sent as `application/json`.
    pub fn call(&self, path: &str, method: Method, body: Option<&Value>) -> Result<Value, ApiError> {
        debug!(%method, path, "api call");

        let mut req = self.client.request(method, self.url(path));
        if let Some(body) = body {
            req = req.json(body);
        }

        let transport = |source: reqwest::Error| ApiError::Transport {
            path: path.to_string(),
            source,
        };

        let text = req.send().map_err(transport)?.text().map_err(transport)?;

        serde_json::from_str(&text).map_err(|source| ApiError::Decode {
            path: path.to_string(),
            source,
        })
    }

    fn call_as<T: DeserializeOwned>(
        &self,
        path: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<T, ApiError> {
        let value = self.call(path, method, body)?;
        serde_json::from_value(value).map_err(|source| ApiError::Decode {
            path: path.to_string(),
            source,
        })
    }
}

impl GameApi for HttpGameApi {
    fn scene(&self) -> Result<SceneResponse, ApiError> {
        self.call_as("/api/scene", Method::GET, None)
    }

    fn choose(&self, choice_idx: usize) -> Result<ChooseResponse, ApiError> {
        self.call_as("/api/choose", Method::POST, Some(&json!({ "choice_idx": choice_idx })))
    }

    fn set_name(&self, name: &str) -> Result<(), ApiError> {
        // The reply carries nothing the client needs.
        self.call("/api/set_name", Method::POST, Some(&json!({ "name": name })))?;
        Ok(())
    }

    fn reset(&self) -> Result<(), ApiError> {
        self.call("/api/reset", Method::POST, Some(&json!({})))?;
        Ok(())
    }

    fn set_key(&self, key: &str) -> Result<(), ApiError> {
        let ack: Ack = self.call_as("/api/set_key", Method::POST, Some(&json!({ "key": key })))?;
        match ack.error {
            Some(e) => Err(ApiError::Server(e)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_path() {
        let api = HttpGameApi::new("http://localhost:8000/");
        assert_eq!(api.url("/api/scene"), "http://localhost:8000/api/scene");
        assert_eq!(api.url("api/choose"), "http://localhost:8000/api/choose");
    }

    #[test]
    fn unreachable_server_is_a_transport_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let api = HttpGameApi::new(&format!("http://127.0.0.1:{port}"));
        let err = api.scene().unwrap_err();
        assert!(matches!(err, ApiError::Transport { .. }), "{err}");
    }
}
