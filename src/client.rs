//! One HTTP call per API operation against the base resource path.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use ureq::{Agent, RequestBuilder};

use crate::config::ServerSettings;
use crate::error::{ClientError, Result};
use crate::model::{Address, AddressPayload, Customer, CustomerPayload, ErrorBody};
use crate::query::SearchQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        })
    }
}

/// A request relative to the base resource path.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Empty for the collection, otherwise starts with `/`
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    /// JSON body
    pub body: Option<String>,
}

impl ApiRequest {
    fn new(method: Method, path: String) -> Self {
        Self {
            method,
            path,
            query: Vec::new(),
            body: None,
        }
    }

    fn json<B: Serialize>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_string(body)?);
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status < 400
    }
}

/// Sends a single request and hands back whatever status the server chose.
pub trait Transport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse>;
}

/// Blocking transport over `ureq`.
pub struct HttpTransport {
    agent: Agent,
    base_url: String,
}

impl HttpTransport {
    pub fn new(settings: &ServerSettings) -> Self {
        let agent: Agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(settings.timeout())
            .build()
            .into();

        Self {
            agent,
            base_url: settings.base_url(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn prepare<B>(builder: RequestBuilder<B>, query: &[(&'static str, String)]) -> RequestBuilder<B> {
    query
        .iter()
        .fold(builder, |builder, (key, value)| builder.query(*key, value))
        .header("Accept", "application/json")
        .header("Content-Type", "application/json")
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, request.path);
        let query = &request.query;

        let mut response = match (request.method, request.body.as_deref()) {
            (Method::Get, _) => prepare(self.agent.get(&url), query).call()?,
            (Method::Delete, _) => prepare(self.agent.delete(&url), query).call()?,
            (Method::Post, Some(body)) => prepare(self.agent.post(&url), query).send(body)?,
            (Method::Post, None) => prepare(self.agent.post(&url), query).send_empty()?,
            (Method::Put, Some(body)) => prepare(self.agent.put(&url), query).send(body)?,
            (Method::Put, None) => prepare(self.agent.put(&url), query).send_empty()?,
        };

        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string()?;
        Ok(ApiResponse { status, body })
    }
}

/// Typed operations on the customers API.
pub struct RestClient<T> {
    transport: T,
}

impl<T: Transport> RestClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    pub fn create_customer(&self, payload: &CustomerPayload) -> Result<Customer> {
        let request = ApiRequest::new(Method::Post, String::new()).json(payload)?;
        self.fetch(&request)
    }

    pub fn update_customer(&self, id: &str, payload: &CustomerPayload) -> Result<Customer> {
        let request = ApiRequest::new(Method::Put, format!("/{id}")).json(payload)?;
        self.fetch(&request)
    }

    pub fn get_customer(&self, id: &str) -> Result<Customer> {
        self.fetch(&ApiRequest::new(Method::Get, format!("/{id}")))
    }

    pub fn delete_customer(&self, id: &str) -> Result<()> {
        self.execute(&ApiRequest::new(Method::Delete, format!("/{id}")))
            .map(drop)
    }

    pub fn search_customers(&self, query: &SearchQuery) -> Result<Vec<Customer>> {
        let mut request = ApiRequest::new(Method::Get, String::new());
        request.query = query.pairs().to_vec();
        self.fetch(&request)
    }

    pub fn activate_customer(&self, id: &str) -> Result<Customer> {
        self.fetch(&ApiRequest::new(Method::Put, format!("/{id}/activate")))
    }

    pub fn deactivate_customer(&self, id: &str) -> Result<Customer> {
        self.fetch(&ApiRequest::new(Method::Delete, format!("/{id}/deactivate")))
    }

    pub fn list_addresses(&self, customer_id: &str) -> Result<Vec<Address>> {
        self.fetch(&ApiRequest::new(
            Method::Get,
            format!("/{customer_id}/addresses"),
        ))
    }

    pub fn get_address(&self, customer_id: &str, address_id: &str) -> Result<Address> {
        self.fetch(&ApiRequest::new(
            Method::Get,
            format!("/{customer_id}/addresses/{address_id}"),
        ))
    }

    pub fn create_address(&self, customer_id: &str, payload: &AddressPayload) -> Result<Address> {
        let request = ApiRequest::new(Method::Post, format!("/{customer_id}/addresses"))
            .json(payload)?;
        self.fetch(&request)
    }

    pub fn update_address(
        &self,
        customer_id: &str,
        address_id: &str,
        payload: &AddressPayload,
    ) -> Result<Address> {
        let request = ApiRequest::new(
            Method::Put,
            format!("/{customer_id}/addresses/{address_id}"),
        )
        .json(payload)?;
        self.fetch(&request)
    }

    pub fn delete_address(&self, customer_id: &str, address_id: &str) -> Result<()> {
        self.execute(&ApiRequest::new(
            Method::Delete,
            format!("/{customer_id}/addresses/{address_id}"),
        ))
        .map(drop)
    }

    fn fetch<R: DeserializeOwned>(&self, request: &ApiRequest) -> Result<R> {
        let response = self.execute(request)?;
        Ok(serde_json::from_str(&response.body)?)
    }

    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
        log::debug!(
            "{} {}{}{}",
            request.method,
            request.path,
            if request.query.is_empty() { "" } else { "?" },
            request
                .query
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("&")
        );

        let response = self.transport.send(request)?;
        if response.is_success() {
            log::debug!("{} {} -> {}", request.method, request.path, response.status);
            return Ok(response);
        }

        let message = serde_json::from_str::<ErrorBody>(&response.body)
            .ok()
            .and_then(|body| body.message);
        log::warn!(
            "{} {} failed with HTTP {}: {}",
            request.method,
            request.path,
            response.status,
            message.as_deref().unwrap_or("<no message>")
        );

        Err(match message {
            Some(message) => ClientError::Api {
                status: response.status,
                message,
            },
            None => ClientError::Server {
                status: response.status,
            },
        })
    }
}
