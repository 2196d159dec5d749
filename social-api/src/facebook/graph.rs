//! Graph API request primitives shared by every Facebook operation group.

use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde_json::Value;
use social_common::{ResponseErrorTranslator, SocialError};
use social_http::{Auth, HttpClient, Method, RequestOpts, path_segment};

use super::error::{FacebookErrorHandler, Result};
use super::types::ImageType;

pub(crate) type Params<'a> = Vec<(&'a str, Cow<'a, str>)>;

#[derive(Debug)]
pub(crate) struct GraphClient {
    pub(crate) http: HttpClient,
    pub(crate) access_token: Option<String>,
    pub(crate) errors: FacebookErrorHandler,
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| SocialError::Decode(e.to_string()).into())
}

/// `connection` is a crate-built path; only the object id is caller input.
fn connection_path(id: &str, connection: &str) -> String {
    format!("{}/{connection}", path_segment(id))
}

impl GraphClient {
    fn opts<'a>(&'a self, query: Params<'a>, form: Params<'a>) -> RequestOpts<'a> {
        RequestOpts {
            auth: self.access_token.as_deref().map(Auth::OAuth2),
            query: (!query.is_empty()).then_some(query),
            form: (!form.is_empty()).then_some(form),
            ..Default::default()
        }
    }

    pub(crate) fn is_authorized(&self) -> bool {
        self.access_token.is_some()
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: Params<'_>,
        form: Params<'_>,
    ) -> Result<(u16, Vec<u8>)> {
        tracing::debug!(%method, path, "facebook.request");
        let resp = self
            .http
            .execute(method, path, self.opts(query, form))
            .await
            .map_err(|e| self.errors.from_http(e))?;
        Ok((resp.status.as_u16(), resp.body))
    }

    /// Graph reports some failures with a 2xx status, so every body is
    /// checked for an `error` object before it is handed out.
    fn checked(&self, status: u16, body: &[u8]) -> Result<Value> {
        let text = String::from_utf8_lossy(body);
        if let Some(err) = self.errors.translate(status, &text) {
            tracing::debug!(status, error = %err, "facebook.error.in_body");
            return Err(err);
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| SocialError::Decode(e.to_string()).into())
    }

    async fn get_value(&self, path: &str, query: Params<'_>) -> Result<Value> {
        let (status, body) = self.send(Method::GET, path, query, Vec::new()).await?;
        self.checked(status, &body)
    }

    async fn post_value(&self, path: &str, form: Params<'_>) -> Result<Value> {
        let (status, body) = self.send(Method::POST, path, Vec::new(), form).await?;
        self.checked(status, &body)
    }

    pub(crate) async fn fetch_object<T: DeserializeOwned>(
        &self,
        id: &str,
        query: Params<'_>,
    ) -> Result<T> {
        decode(self.get_value(&path_segment(id), query).await?)
    }

    /// Items of the `data` array of `{id}/{connection}`.
    pub(crate) async fn fetch_connections<T: DeserializeOwned>(
        &self,
        id: &str,
        connection: &str,
        query: Params<'_>,
    ) -> Result<Vec<T>> {
        let value = self
            .get_value(&connection_path(id, connection), query)
            .await?;
        data(value)
    }

    pub(crate) async fn fetch_image(
        &self,
        id: &str,
        connection: &str,
        image_type: ImageType,
    ) -> Result<Vec<u8>> {
        let query: Params<'_> = vec![("type", image_type.as_str().into())];
        let (status, body) = self
            .send(Method::GET, &connection_path(id, connection), query, Vec::new())
            .await?;
        if body.first() == Some(&b'{') {
            if let Some(err) = self
                .errors
                .translate(status, &String::from_utf8_lossy(&body))
            {
                return Err(err);
            }
        }
        Ok(body)
    }

    /// POST to `{id}/{connection}` and return the id of the created object.
    pub(crate) async fn publish(
        &self,
        id: &str,
        connection: &str,
        form: Params<'_>,
    ) -> Result<String> {
        let value = self
            .post_value(&connection_path(id, connection), form)
            .await?;
        match value.get("id") {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            _ => Err(SocialError::Decode(format!("publish reply carries no id: {value}")).into()),
        }
    }

    pub(crate) async fn post(&self, id: &str, connection: &str, form: Params<'_>) -> Result<()> {
        self.post_value(&connection_path(id, connection), form)
            .await
            .map(drop)
    }

    pub(crate) async fn delete(&self, id: &str) -> Result<()> {
        self.post_value(&path_segment(id), vec![("method", "delete".into())])
            .await
            .map(drop)
    }

    pub(crate) async fn delete_connection(&self, id: &str, connection: &str) -> Result<()> {
        self.post_value(
            &connection_path(id, connection),
            vec![("method", "delete".into())],
        )
        .await
        .map(drop)
    }

    pub(crate) async fn search<T: DeserializeOwned>(
        &self,
        query: &str,
        object_type: &str,
    ) -> Result<Vec<T>> {
        let params: Params<'_> = vec![("q", query.into()), ("type", object_type.into())];
        data(self.get_value("search", params).await?)
    }
}

fn data<T: DeserializeOwned>(mut value: Value) -> Result<Vec<T>> {
    match value.get_mut("data").map(Value::take) {
        Some(items) => decode(items),
        None => Ok(Vec::new()),
    }
}
