use crate::error::ApiError;
use crate::models::{Movie, MovieId, PageResponse, SearchResponse};
use crate::store::DataStore;
use std::collections::HashSet;
use tracing::debug;

// Pagination fields are reported as fixed values, not computed from the data.
const PAGE_CURRENT: u32 = 1;
const PAGE_TOTAL_PAGES: u32 = 1;
const SEARCH_CURRENT: u32 = 1;
const SEARCH_TOTAL_PAGES: u32 = 500;
const SEARCH_TOTAL_RESULTS: u32 = 10_000;

// Reads the leading signed decimal and ignores whatever follows it, so "2abc"
// and "1.0" are pages 2 and 1. No leading digit, or overflow, yields None.
pub fn parse_int_param(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let sign_len = usize::from(s.starts_with(&['+', '-'][..]));
    let digits = s[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len() - sign_len);
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse::<i64>().ok()
}

// First matching assignment wins; items keep store order.
pub fn resolve_page<'a>(
    store: &'a DataStore,
    raw_page: &str,
) -> Result<PageResponse<'a>, ApiError> {
    let page =
        parse_int_param(raw_page).ok_or_else(|| ApiError::InvalidPage(raw_page.to_string()))?;

    let assignment = store
        .assignments()
        .iter()
        .find(|a| a.page == page)
        .ok_or(ApiError::PageNotFound(page))?;

    let wanted: HashSet<MovieId> = assignment.movie_ids.iter().copied().collect();
    let items: Vec<&Movie> = store
        .movies()
        .iter()
        .filter(|m| wanted.contains(&m.id()))
        .collect();
    debug!(
        page,
        assigned = assignment.movie_ids.len(),
        matched = items.len(),
        "Resolved page"
    );

    let meta = store.metadata();
    Ok(PageResponse {
        created_by: meta.created_by.as_deref(),
        description: meta.description.as_deref(),
        favorite_count: meta.favorite_count,
        id: page,
        iso_639_1: meta.iso_639_1.as_deref(),
        item_count: items.len(),
        name: meta.name.as_deref(),
        poster_path: meta.poster_path.as_deref(),
        total_results: meta.total_results,
        page: PAGE_CURRENT,
        total_pages: PAGE_TOTAL_PAGES,
        items,
    })
}

pub fn search<'a>(store: &'a DataStore, query: &str) -> SearchResponse<'a> {
    let needle = query.to_lowercase();
    let results: Vec<&Movie> = store
        .movies()
        .iter()
        .filter(|m| matches_query(m, &needle))
        .collect();
    debug!(query = %query, matched = results.len(), "Search finished");

    SearchResponse {
        page: SEARCH_CURRENT,
        results,
        total_pages: SEARCH_TOTAL_PAGES,
        total_results: SEARCH_TOTAL_RESULTS,
    }
}

// `needle` must already be lowercased.
pub fn matches_query(movie: &Movie, needle: &str) -> bool {
    [movie.title(), movie.original_title(), movie.overview()]
        .into_iter()
        .any(|field| field.unwrap_or("").to_lowercase().contains(needle))
}

pub fn find_movie<'a>(store: &'a DataStore, raw_id: &str) -> Result<&'a Movie, ApiError> {
    let id =
        parse_int_param(raw_id).ok_or_else(|| ApiError::InvalidMovieId(raw_id.to_string()))?;
    store
        .movies()
        .iter()
        .find(|m| m.id() == id)
        .ok_or(ApiError::MovieNotFound(id))
}
