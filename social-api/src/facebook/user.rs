use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::error::Result;
use super::graph::GraphClient;
use super::types::{FacebookProfile, ImageType};

#[async_trait]
pub trait UserOperations: Send + Sync {
    /// Profile of the user the access token belongs to.
    async fn get_user_profile(&self) -> Result<FacebookProfile>;

    async fn get_user_profile_for(&self, user_id: &str) -> Result<FacebookProfile>;

    async fn get_user_profile_image(&self, user_id: &str, image_type: ImageType) -> Result<Vec<u8>>;

    /// Names of the permissions granted to the application.
    async fn get_user_permissions(&self) -> Result<Vec<String>>;
}

#[derive(Debug, Clone)]
pub struct UserTemplate {
    graph: Arc<GraphClient>,
}

impl UserTemplate {
    pub(crate) fn new(graph: Arc<GraphClient>) -> Self {
        Self { graph }
    }
}

/// Permissions come either as `{"permission": "x", "status": "granted"}`
/// rows or as one row of `{"x": 1, "y": 1}` flags.
fn granted_permissions(rows: Vec<Value>) -> Vec<String> {
    let mut granted = Vec::new();
    for row in rows {
        let Value::Object(map) = row else { continue };
        if let Some(name) = map.get("permission").and_then(Value::as_str) {
            if map.get("status").and_then(Value::as_str) == Some("granted") {
                granted.push(name.to_string());
            }
            continue;
        }
        granted.extend(
            map.iter()
                .filter(|(_, v)| v.as_i64() == Some(1))
                .map(|(k, _)| k.clone()),
        );
    }
    granted
}

#[async_trait]
impl UserOperations for UserTemplate {
    async fn get_user_profile(&self) -> Result<FacebookProfile> {
        self.get_user_profile_for("me").await
    }

    async fn get_user_profile_for(&self, user_id: &str) -> Result<FacebookProfile> {
        self.graph.fetch_object(user_id, Vec::new()).await
    }

    async fn get_user_profile_image(&self, user_id: &str, image_type: ImageType) -> Result<Vec<u8>> {
        self.graph.fetch_image(user_id, "picture", image_type).await
    }

    async fn get_user_permissions(&self) -> Result<Vec<String>> {
        let rows: Vec<Value> = self
            .graph
            .fetch_connections("me", "permissions", Vec::new())
            .await?;
        Ok(granted_permissions(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flag_style_permissions() {
        let rows = vec![json!({"publish_stream": 1, "read_stream": 1, "offline_access": 0})];
        assert_eq!(granted_permissions(rows), ["publish_stream", "read_stream"]);
    }

    #[test]
    fn row_style_permissions() {
        let rows = vec![
            json!({"permission": "email", "status": "granted"}),
            json!({"permission": "user_events", "status": "declined"}),
        ];
        assert_eq!(granted_permissions(rows), ["email"]);
    }
}
