use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap},
    response::Html,
};
use letterboxd_upstream::AuthContext;

use super::ServerState;

pub(super) async fn execute(
    State(state): State<ServerState>,
    headers: HeaderMap,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let auth = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(AuthContext::from_header);

    state.engine().execute(request.into_inner(), auth).await.into()
}

pub(super) async fn playground(State(state): State<ServerState>) -> Html<String> {
    Html(GraphiQLSource::build().endpoint(state.path()).finish())
}
