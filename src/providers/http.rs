//! HTTP provider for a JSONPlaceholder-style `/users` endpoint
//!
//! ## Payload
//! A JSON array of person objects. Only `id`, `name` and `email` are read;
//! everything else (username, address, company, ...) is ignored.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::model::{Entry, EntryId};
use crate::providers::traits::*;

pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/users";

pub struct HttpProvider {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpProvider {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> ProviderResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("people-directory/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[derive(Deserialize, Debug)]
struct RemotePerson {
    id: EntryId,
    name: String,
    email: String,
}

impl From<RemotePerson> for Entry {
    fn from(p: RemotePerson) -> Self {
        Entry {
            id: p.id,
            name: p.name,
            email: p.email,
        }
    }
}

#[async_trait]
impl Provider for HttpProvider {
    fn name(&self) -> &str {
        &self.endpoint
    }

    async fn fetch_people(&self) -> ProviderResult<Vec<Entry>> {
        let response = self
            .client
            .get(&self.endpoint)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let people: Vec<RemotePerson> = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        log::debug!("Fetched {} people from {}", people.len(), self.endpoint);
        Ok(people.into_iter().map(Entry::from).collect())
    }
}
