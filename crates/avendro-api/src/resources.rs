//! Authenticated CRUD passthroughs for companies, clients and users

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;

use crate::client::ApiClient;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Companies,
    Clients,
    Users,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Companies => "companies",
            Resource::Clients => "clients",
            Resource::Users => "users",
        }
    }

    pub fn collection_path(&self) -> String {
        format!("/{}/", self.as_str())
    }

    pub fn item_path(&self, id: impl Display) -> String {
        format!("/{}/{}/", self.as_str(), id)
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ApiClient {
    /// `GET /{resource}/`
    pub async fn list<T>(&self, resource: Resource) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.get_json(&resource.collection_path()).await
    }

    /// `GET /{resource}/{id}/`
    pub async fn get<T>(&self, resource: Resource, id: impl Display) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.get_json(&resource.item_path(id)).await
    }

    /// `PATCH /{resource}/{id}/` with a partial body
    pub async fn update<B, T>(&self, resource: Resource, id: impl Display, patch: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let path = resource.item_path(id);
        let updated = self.send_json(Method::PATCH, &path, patch).await?;

        tracing::info!(%resource, path = %path, "Updated record");
        Ok(updated)
    }
}
