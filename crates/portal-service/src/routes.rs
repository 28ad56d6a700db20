//! API route handlers.
//!
//! Thin JSON wrappers over the portal-query operations. Each handler
//! validates its inputs, delegates to the query layer, and returns the rows
//! in the portal's wire shapes.

use axum::extract::{Path, Query, State};
use axum::Json;
use portal_query::{
    aggregate_studies, aggregate_type_population, fetch_attributes, resolve_concepts,
    resolve_pmids, ConceptQuery,
};
use portal_types::{
    AttributeRow, AttributeTable, Concept, ConceptSet, Pmid, SearchType, StudySummary,
    TypePopulation,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::error::ApiError;
use crate::validate;
use crate::AppState;

/// Query parameters for `GET /api/concepts`.
#[derive(Debug, Deserialize)]
pub struct ConceptParams {
    /// Drug name to search.
    pub drug: Option<String>,
    /// Disease name to search.
    pub disease: Option<String>,
}

/// Body of `POST /api/pmid`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PmidRequest {
    /// The resolved concepts to search the literature for.
    pub concept_ids: Vec<Concept>,
    /// Which concept types the caller selected.
    pub search_type: SearchType,
}

/// A single-PMID row, used in both request and response bodies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PmidRow {
    /// The publication identifier.
    pub pmid: Pmid,
}

/// `GET /api/concepts?drug=&disease=` — resolves names to concepts.
///
/// Blank or absent parameters are treated as not searched; with neither
/// given the result is an empty list.
pub async fn get_concepts(
    State(state): State<AppState>,
    Query(params): Query<ConceptParams>,
) -> Result<Json<ConceptSet>, ApiError> {
    let query = ConceptQuery::from_input(params.drug.as_deref(), params.disease.as_deref());
    if let Some(name) = &query.drug_name {
        validate::validate_name(name, "drug").map_err(ApiError::BadRequest)?;
    }
    if let Some(name) = &query.disease_name {
        validate::validate_name(name, "disease").map_err(ApiError::BadRequest)?;
    }
    let concepts = resolve_concepts(state.source.as_ref(), &query).await?;
    Ok(Json(concepts))
}

/// `POST /api/pmid` — resolves a concept set to matching PMIDs.
pub async fn post_pmids(
    State(state): State<AppState>,
    Json(request): Json<PmidRequest>,
) -> Result<Json<Vec<PmidRow>>, ApiError> {
    validate::validate_concepts(request.concept_ids.iter()).map_err(ApiError::BadRequest)?;
    let concepts: ConceptSet = request.concept_ids.into();
    let pmids = resolve_pmids(state.source.as_ref(), &concepts, &request.search_type).await?;
    info!(pmids = pmids.len(), "pmid search");
    Ok(Json(pmids.into_iter().map(|pmid| PmidRow { pmid }).collect()))
}

/// `POST /api/study` — summarizes the publications behind a PMID list.
pub async fn post_study(
    State(state): State<AppState>,
    Json(rows): Json<Vec<PmidRow>>,
) -> Result<Json<Vec<StudySummary>>, ApiError> {
    validate::validate_pmids(rows.iter().map(|r| r.pmid.as_str()))
        .map_err(ApiError::BadRequest)?;
    let pmids: Vec<Pmid> = rows.into_iter().map(|r| r.pmid).collect();
    let studies = aggregate_studies(state.source.as_ref(), &pmids).await?;
    Ok(Json(studies))
}

/// `POST /api/type_population` — study-type and population labels per PMID.
pub async fn post_type_population(
    State(state): State<AppState>,
    Json(rows): Json<Vec<PmidRow>>,
) -> Result<Json<Vec<TypePopulation>>, ApiError> {
    validate::validate_pmids(rows.iter().map(|r| r.pmid.as_str()))
        .map_err(ApiError::BadRequest)?;
    let pmids: Vec<Pmid> = rows.into_iter().map(|r| r.pmid).collect();
    let types = aggregate_type_population(state.source.as_ref(), &pmids).await?;
    Ok(Json(types))
}

/// `POST /api/extradata/{table}` — attribute rows for the drug concepts in
/// the body. Unknown table names yield 404.
pub async fn post_extradata(
    State(state): State<AppState>,
    Path(table): Path<String>,
    Json(concepts): Json<Vec<Concept>>,
) -> Result<Json<Vec<AttributeRow>>, ApiError> {
    let table = AttributeTable::from_name(&table)
        .ok_or_else(|| ApiError::NotFound("Unknown path".to_string()))?;
    validate::validate_concepts(concepts.iter()).map_err(ApiError::BadRequest)?;
    let concepts: ConceptSet = concepts.into();
    let rows = fetch_attributes(state.source.as_ref(), table, &concepts).await?;
    Ok(Json(rows))
}

/// `GET /api/index` — static catalog of the API surface.
pub async fn get_index() -> Json<Value> {
    Json(json!({
        "info": {
            "title": "Knowledge Portal API",
            "description": "Query endpoints for the Silver knowledge portal",
            "version": env!("CARGO_PKG_VERSION"),
            "baseUrl": "/api",
        },
        "endpoints": [
            {
                "path": "/api/index",
                "method": "GET",
                "description": "List all available API endpoints",
            },
            {
                "path": "/api/concepts",
                "method": "GET",
                "description": "Resolve drug/disease names to concepts",
                "parameters": "drug, disease (query strings)",
            },
            {
                "path": "/api/pmid",
                "method": "POST",
                "description": "Resolve a concept set to matching PMIDs",
            },
            {
                "path": "/api/study",
                "method": "POST",
                "description": "Summarize the publications behind a PMID list",
            },
            {
                "path": "/api/type_population",
                "method": "POST",
                "description": "Study-type and population labels per PMID",
            },
            {
                "path": "/api/extradata/{table}",
                "method": "POST",
                "description": "Drug attribute rows (atc, epc, moa, pe, pk, label_stats)",
            },
        ],
    }))
}
