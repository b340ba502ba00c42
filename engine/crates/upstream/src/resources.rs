//! One method per API resource.

use serde_json::Value;

use crate::{request::RequestBody, AuthContext, QueryParams, UpstreamClient, UpstreamError, UpstreamRequest};

impl UpstreamClient {
    pub async fn film(&self, id: &str) -> Result<Value, UpstreamError> {
        self.get_object(["film", id], QueryParams::new(), None).await
    }

    pub async fn films(&self, params: QueryParams) -> Result<Vec<Value>, UpstreamError> {
        self.get_items(["films"], params, None).await
    }

    pub async fn film_statistics(&self, id: &str) -> Result<Value, UpstreamError> {
        self.get_object(["film", id, "statistics"], QueryParams::new(), None).await
    }

    pub async fn film_relationship(&self, id: &str, auth: Option<&AuthContext>) -> Result<Value, UpstreamError> {
        self.get_object(["film", id, "me"], QueryParams::new(), auth).await
    }

    pub async fn film_availability(
        &self,
        id: &str,
        auth: Option<&AuthContext>,
    ) -> Result<Vec<Value>, UpstreamError> {
        self.get_items(["film", id, "availability"], QueryParams::new(), auth).await
    }

    pub async fn film_members(&self, id: &str, params: QueryParams) -> Result<Vec<Value>, UpstreamError> {
        self.get_items(["film", id, "members"], params, None).await
    }

    pub async fn film_collection(&self, id: &str, params: QueryParams) -> Result<Value, UpstreamError> {
        self.get_object(["film-collection", id], params, None).await
    }

    pub async fn genres(&self) -> Result<Vec<Value>, UpstreamError> {
        self.get_items(["films", "genres"], QueryParams::new(), None).await
    }

    pub async fn services(&self) -> Result<Vec<Value>, UpstreamError> {
        self.get_items(["films", "film-services"], QueryParams::new(), None).await
    }

    pub async fn list(&self, id: &str) -> Result<Value, UpstreamError> {
        self.get_object(["list", id], QueryParams::new(), None).await
    }

    pub async fn lists(&self, params: QueryParams) -> Result<Vec<Value>, UpstreamError> {
        self.get_items(["lists"], params, None).await
    }

    pub async fn list_statistics(&self, id: &str) -> Result<Value, UpstreamError> {
        self.get_object(["list", id, "statistics"], QueryParams::new(), None).await
    }

    pub async fn list_comments(&self, id: &str, params: QueryParams) -> Result<Vec<Value>, UpstreamError> {
        self.get_items(["list", id, "comments"], params, None).await
    }

    pub async fn list_relationship(&self, id: &str, auth: Option<&AuthContext>) -> Result<Value, UpstreamError> {
        self.get_object(["list", id, "me"], QueryParams::new(), auth).await
    }

    pub async fn log_entry(&self, id: &str) -> Result<Value, UpstreamError> {
        self.get_object(["log-entry", id], QueryParams::new(), None).await
    }

    pub async fn log_entries(&self, params: QueryParams) -> Result<Vec<Value>, UpstreamError> {
        self.get_items(["log-entries"], params, None).await
    }

    pub async fn review_statistics(&self, id: &str) -> Result<Value, UpstreamError> {
        self.get_object(["log-entry", id, "statistics"], QueryParams::new(), None)
            .await
    }

    pub async fn review_comments(&self, id: &str, params: QueryParams) -> Result<Vec<Value>, UpstreamError> {
        self.get_items(["log-entry", id, "comments"], params, None).await
    }

    pub async fn review_relationship(&self, id: &str, auth: Option<&AuthContext>) -> Result<Value, UpstreamError> {
        self.get_object(["log-entry", id, "me"], QueryParams::new(), auth).await
    }

    pub async fn member(&self, id: &str) -> Result<Value, UpstreamError> {
        self.get_object(["member", id], QueryParams::new(), None).await
    }

    pub async fn members(&self, params: QueryParams) -> Result<Vec<Value>, UpstreamError> {
        self.get_items(["members"], params, None).await
    }

    pub async fn member_statistics(&self, id: &str) -> Result<Value, UpstreamError> {
        self.get_object(["member", id, "statistics"], QueryParams::new(), None).await
    }

    pub async fn member_log_entry_tags(&self, id: &str) -> Result<Vec<Value>, UpstreamError> {
        self.get_items(["member", id, "log-entry-tags"], QueryParams::new(), None)
            .await
    }

    pub async fn member_list_tags(&self, id: &str) -> Result<Vec<Value>, UpstreamError> {
        self.get_items(["member", id, "list-tags-2"], QueryParams::new(), None).await
    }

    pub async fn watchlist(&self, id: &str, params: QueryParams) -> Result<Vec<Value>, UpstreamError> {
        self.get_items(["member", id, "watchlist"], params, None).await
    }

    pub async fn me(&self, auth: Option<&AuthContext>) -> Result<Value, UpstreamError> {
        self.get_object(["me"], QueryParams::new(), auth).await
    }

    pub async fn contributor(&self, id: &str) -> Result<Value, UpstreamError> {
        self.get_object(["contributor", id], QueryParams::new(), None).await
    }

    pub async fn contributions(&self, id: &str, params: QueryParams) -> Result<Vec<Value>, UpstreamError> {
        self.get_items(["contributor", id, "contributions"], params, None).await
    }

    pub async fn search(&self, params: QueryParams) -> Result<Vec<Value>, UpstreamError> {
        self.get_items(["search"], params, None).await
    }

    /// Whether a username can be registered, as the API words it (`Available`, `NotAvailable`...).
    pub async fn username_check(&self, username: &str) -> Result<Value, UpstreamError> {
        let params = QueryParams::new().with("username", username);
        let mut response = self.get_object(["auth", "username-check"], params, None).await?;

        take_field(&mut response, "result")
    }

    /// Exchanges member credentials for an access token.
    pub async fn token(&self, username: &str, password: &str) -> Result<Value, UpstreamError> {
        let body = QueryParams::new()
            .with("grant_type", "password")
            .with("password", password)
            .with("username", username)
            .to_query_string();

        let request = UpstreamRequest::post(["auth", "token"]).with_body(RequestBody::Form(body));

        self.send(request, None).await
    }

    async fn get_object<const N: usize>(
        &self,
        path: [&str; N],
        params: QueryParams,
        auth: Option<&AuthContext>,
    ) -> Result<Value, UpstreamError> {
        self.send(UpstreamRequest::get(path).with_params(params), auth).await
    }

    async fn get_items<const N: usize>(
        &self,
        path: [&str; N],
        params: QueryParams,
        auth: Option<&AuthContext>,
    ) -> Result<Vec<Value>, UpstreamError> {
        let mut response = self.get_object(path, params, auth).await?;

        match take_field(&mut response, "items")? {
            Value::Array(items) => Ok(items),
            _ => Err(UpstreamError::MissingField("items")),
        }
    }
}

fn take_field(response: &mut Value, name: &'static str) -> Result<Value, UpstreamError> {
    response
        .as_object_mut()
        .and_then(|object| object.remove(name))
        .ok_or(UpstreamError::MissingField(name))
}
