//! HTTP request handlers for the config API.

use axum::{
    Json,
    extract::{FromRequestParts, Path, State},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::domain::envelope::{Defaults, Envelope, OptionData, RootData, SectionData};
use crate::ports::config_source::ConfigSource;

use super::{ApiError, AppState};

/// Percent-decoded path parameters. Rejections (e.g. a segment that decodes
/// to invalid UTF-8) are answered with the JSON envelope.
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::new(rejection.status(), rejection.body_text())),
        }
    }
}

/// Run a lookup on the blocking pool. Sources may do blocking I/O (a remote
/// `ConfigClient`), which must not happen on a runtime worker.
async fn query<T, F>(state: &AppState, lookup: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&dyn ConfigSource) -> Result<T, ApiError> + Send + 'static,
{
    let source = Arc::clone(&state.source);
    tokio::task::spawn_blocking(move || lookup(source.as_ref()))
        .await
        .map_err(|e| ApiError::internal(format!("config lookup aborted: {e}")))?
}

pub async fn root(State(state): State<Arc<AppState>>) -> Result<Json<Envelope<RootData>>, ApiError> {
    let data = query(&state, |source| {
        Ok(RootData {
            default_section: source.default_section()?,
            sections: source.sections()?,
        })
    })
    .await?;
    Ok(Json(Envelope::ok(data)))
}

pub async fn defaults(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Envelope<Defaults>>, ApiError> {
    let data = query(&state, |source| Ok(source.defaults()?)).await?;
    Ok(Json(Envelope::ok(data)))
}

pub async fn section(
    State(state): State<Arc<AppState>>,
    ApiPath(section): ApiPath<String>,
) -> Result<Json<Envelope<SectionData>>, ApiError> {
    tracing::debug!(%section, "section lookup");
    let data = query(&state, move |source| {
        if !source.has_section(&section)? {
            return Err(ApiError::no_such_section());
        }
        let options = source.get_section(&section)?;
        Ok(SectionData { section, options })
    })
    .await?;
    Ok(Json(Envelope::ok(data)))
}

pub async fn option(
    State(state): State<Arc<AppState>>,
    ApiPath((section, option)): ApiPath<(String, String)>,
) -> Result<Json<Envelope<OptionData>>, ApiError> {
    tracing::debug!(%section, %option, "option lookup");
    let data = query(&state, move |source| {
        if !source.has_section(&section)? {
            return Err(ApiError::no_such_section());
        }
        if !source.has_option(&section, &option)? {
            return Err(ApiError::no_such_option());
        }
        let value = source.get_option(&section, &option)?;
        Ok(OptionData {
            section,
            option: value,
        })
    })
    .await?;
    Ok(Json(Envelope::ok(data)))
}
