//! `Query` fields, one upstream call each.

use letterboxd_upstream::{AuthContext, QueryParams};
use serde_json::Value;

use crate::{entity::JsonObject, RequestContext, ResolveError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumString, strum::AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum RootField {
    Film,
    Films,
    FilmStatistics,
    RelationshipToFilm,
    FilmAvailability,
    FilmMembers,
    FilmCollection,
    Genres,
    Services,
    List,
    Lists,
    ListStatistics,
    ListComments,
    RelationshipToList,
    LogEntry,
    LogEntries,
    ReviewStatistics,
    ReviewComments,
    RelationshipToReview,
    Member,
    Members,
    MemberStatistics,
    MemberLogEntryTags,
    MemberListTags,
    Watchlist,
    Me,
    Contributor,
    Contributions,
    Search,
    UsernameCheck,
    GenerateToken,
}

/// Calls the endpoint behind `field`. Identifier arguments become part of the path, the others
/// are sent as query parameters in the order they were given.
pub async fn resolve_root(
    field: RootField,
    arguments: JsonObject,
    request: &RequestContext,
) -> Result<Value, ResolveError> {
    let api = &request.upstream;
    let token = access_token(&arguments);
    let auth = request.auth().or(token.as_ref());

    let value = match field {
        RootField::Film => api.film(&required(&arguments, "id")?).await?,
        RootField::Films => Value::Array(api.films(params(arguments)).await?),
        RootField::FilmStatistics => api.film_statistics(&required(&arguments, "film")?).await?,
        RootField::RelationshipToFilm => api.film_relationship(&required(&arguments, "film")?, auth).await?,
        RootField::FilmAvailability => {
            Value::Array(api.film_availability(&required(&arguments, "film")?, auth).await?)
        }
        RootField::FilmMembers => {
            let film = required(&arguments, "film")?;
            Value::Array(api.film_members(&film, params_except(arguments, "film")).await?)
        }
        RootField::FilmCollection => {
            let id = required(&arguments, "id")?;
            api.film_collection(&id, params_except(arguments, "id")).await?
        }
        RootField::Genres => Value::Array(api.genres().await?),
        RootField::Services => Value::Array(api.services().await?),

        RootField::List => api.list(&required(&arguments, "id")?).await?,
        RootField::Lists => Value::Array(api.lists(params(arguments)).await?),
        RootField::ListStatistics => api.list_statistics(&required(&arguments, "list")?).await?,
        RootField::ListComments => {
            let list = required(&arguments, "list")?;
            Value::Array(api.list_comments(&list, params_except(arguments, "list")).await?)
        }
        RootField::RelationshipToList => api.list_relationship(&required(&arguments, "list")?, auth).await?,

        RootField::LogEntry => api.log_entry(&required(&arguments, "id")?).await?,
        RootField::LogEntries => Value::Array(api.log_entries(params(arguments)).await?),
        RootField::ReviewStatistics => api.review_statistics(&required(&arguments, "logEntry")?).await?,
        RootField::ReviewComments => {
            let log_entry = required(&arguments, "logEntry")?;
            Value::Array(api.review_comments(&log_entry, params_except(arguments, "logEntry")).await?)
        }
        RootField::RelationshipToReview => {
            api.review_relationship(&required(&arguments, "logEntry")?, auth)
                .await?
        }

        RootField::Member => api.member(&required(&arguments, "id")?).await?,
        RootField::Members => Value::Array(api.members(params(arguments)).await?),
        RootField::MemberStatistics => api.member_statistics(&required(&arguments, "member")?).await?,
        RootField::MemberLogEntryTags => {
            Value::Array(api.member_log_entry_tags(&required(&arguments, "member")?).await?)
        }
        RootField::MemberListTags => Value::Array(api.member_list_tags(&required(&arguments, "member")?).await?),
        RootField::Watchlist => {
            let member = required(&arguments, "member")?;
            Value::Array(api.watchlist(&member, params_except(arguments, "member")).await?)
        }
        RootField::Me => api.me(auth).await?,

        RootField::Contributor => api.contributor(&required(&arguments, "id")?).await?,
        RootField::Contributions => {
            let contributor = required(&arguments, "contributor")?;
            Value::Array(api.contributions(&contributor, params_except(arguments, "contributor")).await?)
        }
        RootField::Search => Value::Array(api.search(params(arguments)).await?),

        RootField::UsernameCheck => api.username_check(&required(&arguments, "username")?).await?,
        RootField::GenerateToken => {
            let username = required(&arguments, "username")?;
            let password = required(&arguments, "password")?;

            api.token(&username, &password).await?
        }
    };

    Ok(value)
}

/// The `accessToken` argument of member-scoped fields. The `Authorization` header wins over it.
fn access_token(arguments: &JsonObject) -> Option<AuthContext> {
    arguments
        .get("accessToken")
        .and_then(Value::as_str)
        .and_then(AuthContext::from_header)
}

/// IDs may have been given as numbers.
fn required(arguments: &JsonObject, name: &'static str) -> Result<String, ResolveError> {
    match arguments.get(name) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(Value::Number(value)) => Ok(value.to_string()),
        _ => Err(ResolveError::MissingArgument(name)),
    }
}

fn params(arguments: JsonObject) -> QueryParams {
    QueryParams::from_arguments(arguments)
}

/// The arguments left once the identifier moved to the path.
fn params_except(arguments: JsonObject, identifier: &str) -> QueryParams {
    QueryParams::from_arguments(arguments.into_iter().filter(|(name, _)| name != identifier))
}
