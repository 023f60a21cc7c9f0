//! Informational lookups over Gotham locations, rogues and the database.
//!
//! None of these touch the stores; they shape path and query parameters into
//! a response.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::extract::{ApiPath, ApiQuery};

/// Capitalises the first letter of every alphabetic run and lowercases the
/// rest, so `"arkham ASYLUM"` becomes `"Arkham Asylum"`.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_word = false;
    for c in input.chars() {
        if in_word {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        in_word = c.is_alphabetic();
    }
    out
}

#[derive(Serialize)]
pub struct ScanResponse {
    pub message: String,
}

/// GET /locations/{name}
pub async fn scan_location(ApiPath(name): ApiPath<String>) -> Json<ScanResponse> {
    Json(ScanResponse {
        message: format!("Scanning location: {}", title_case(&name)),
    })
}

#[derive(Debug, Deserialize)]
pub struct ThreatFilter {
    #[serde(default)]
    pub min_threat_level: i64,
}

#[derive(Serialize)]
pub struct LocationDetailsResponse {
    pub location: String,
    pub filter_min_threat: i64,
    pub data: String,
}

/// GET /locations/{name}/details?min_threat_level=
pub async fn location_details(
    ApiPath(name): ApiPath<String>,
    ApiQuery(filter): ApiQuery<ThreatFilter>,
) -> Json<LocationDetailsResponse> {
    let location = title_case(&name);
    Json(LocationDetailsResponse {
        data: format!(
            "Intel report for {location} with threat level > {} would go here.",
            filter.min_threat_level
        ),
        location,
        filter_min_threat: filter.min_threat_level,
    })
}

#[derive(Serialize)]
pub struct RogueCaseResponse {
    pub rogue: String,
    pub case_id: i64,
    pub status: &'static str,
}

/// GET /rogues/{name}/cases/{case_id}
///
/// A non-integer `case_id` is rejected with 400 by the path extractor.
pub async fn rogue_case(
    ApiPath((name, case_id)): ApiPath<(String, i64)>,
) -> Json<RogueCaseResponse> {
    Json(RogueCaseResponse {
        rogue: title_case(&name),
        case_id,
        status: "Case file found",
    })
}

fn default_search_limit() -> u32 {
    10
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub keyword: Option<String>,
    #[serde(default = "default_search_limit")]
    pub limit: u32,
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum SearchResponse {
    Searching {
        searching_for_keyword: String,
        results_limit: u32,
    },
    Prompt {
        message: &'static str,
        results_limit: u32,
    },
}

/// GET /search-database?keyword=&limit=
pub async fn search_database(ApiQuery(params): ApiQuery<SearchParams>) -> Json<SearchResponse> {
    let response = match params.keyword.filter(|k| !k.is_empty()) {
        Some(keyword) => SearchResponse::Searching {
            searching_for_keyword: keyword,
            results_limit: params.limit,
        },
        None => SearchResponse::Prompt {
            message: "Provide a 'keyword' query parameter to search the database.",
            results_limit: params.limit,
        },
    };
    Json(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_matches_word_boundaries() {
        assert_eq!(title_case("arkham asylum"), "Arkham Asylum");
        assert_eq!(title_case("ACE CHEMICALS"), "Ace Chemicals");
        assert_eq!(title_case("crime-alley"), "Crime-Alley");
        assert_eq!(title_case("o'neil"), "O'Neil");
        assert_eq!(title_case(""), "");
    }
}
