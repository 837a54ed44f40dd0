//! Corpus handlers: list, retag, delete

use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;
use tracing::{debug, info};

use super::{AppState, DEFAULT_LIMIT};
use crate::http::args::{RequestArgs, TagsArg};
use crate::http::error::ApiError;
use crate::http::types::UpdateResponse;
use crate::query::{Field, FilterValue, Predicate, QueryFilter, Sort};
use crate::stemming::Stemmer;
use crate::types::ClassificationObject;

/// Build the filter for a list request.
///
/// `keywords` narrows by stemmed keyword and always combines with the tag
/// predicate. `tags` wins over `tagged`; with neither, only untagged
/// documents are listed.
pub fn list_filter(args: &RequestArgs, stemmer: &dyn Stemmer) -> QueryFilter {
    let mut filter = QueryFilter::new();

    if let Some(words) = args.terms("keywords") {
        let stems = words.iter().map(|w| stemmer.stem(w)).collect();
        filter.insert(Field::StemmedKeywords, Predicate::AllOf(stems));
    }

    let tag_predicate = match args.terms("tags") {
        Some(tags) => Predicate::AllOf(tags),
        None if args.flag("tagged") => Predicate::NotEqual(FilterValue::List(Vec::new())),
        None => Predicate::Equals(FilterValue::List(Vec::new())),
    };
    filter.insert(Field::Tags, tag_predicate);
    filter
}

/// List documents endpoint
pub async fn list_documents(
    State(state): State<AppState>,
    args: RequestArgs,
) -> Result<Json<Vec<Value>>, ApiError> {
    let limit = args.int_or("limit", DEFAULT_LIMIT)?;
    let limit = usize::try_from(limit.unsigned_abs()).unwrap_or(usize::MAX);
    let filter = list_filter(&args, state.stemmer.as_ref());

    debug!("HTTP list request: filter={:?}, limit={}", filter, limit);

    let results = state.store.find(&filter, limit, Sort::newest_first())?;
    let dicts = results
        .iter()
        .map(ClassificationObject::to_dict)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(dicts))
}

/// Retag endpoint
pub async fn update_tags(
    State(state): State<AppState>,
    args: RequestArgs,
) -> Result<Json<UpdateResponse>, ApiError> {
    let id = args.required_int("id")?;
    let tags = TagsArg::from_args(&args, "tags");

    let mut object = state
        .store
        .find_by_id(id)?
        .ok_or_else(|| ApiError::document_not_found(id))?;

    object.tags = tags.into_stored();
    object.touch();
    state.store.save(&object)?;

    info!("Updated tags on document {}: {:?}", id, object.tags);

    Ok(Json(UpdateResponse {
        success: true,
        message: format!("Updated document with id {}", id),
        tags: object.tags,
    }))
}

/// Delete endpoint
///
/// Succeeds for any existing id, whether or not the optional tag scope
/// matched the stored tags.
pub async fn delete_document(
    State(state): State<AppState>,
    args: RequestArgs,
) -> Result<(StatusCode, String), ApiError> {
    let id = args.required_int("id")?;

    let mut filter = QueryFilter::new().with(Field::Id, Predicate::Equals(FilterValue::Int(id)));
    if let Some(tags) = args.terms("tags") {
        filter.insert(Field::Tags, Predicate::Equals(FilterValue::List(tags)));
    }

    if state.store.find_by_id(id)?.is_none() {
        return Err(ApiError::document_not_found(id));
    }

    let removed = state.store.remove(&filter)?;
    debug!("HTTP delete request: id={}, removed={}", id, removed);

    Ok((StatusCode::OK, format!("Document id {} successfully deleted", id)))
}
