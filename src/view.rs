//! # Route Views
//!
//! Compose the route sequences the app renders from an already-fetched route
//! collection. Every function here is a pure read over its inputs: nothing is
//! cached, nothing is mutated, and the same inputs always give the same view.

use std::collections::BTreeSet;

use crate::config::WalkConfig;
use crate::favorites::FavoriteSet;
use crate::filter::{matches, FilterCriteria, QuickFilter};
use crate::Route;

/// Routes passing `criteria`, in their original order.
pub fn compute_view<'a>(routes: &'a [Route], criteria: &FilterCriteria) -> Vec<&'a Route> {
    routes.iter().filter(|r| matches(r, criteria)).collect()
}

/// Number of engaged filter dimensions, for display badges.
///
/// A positive minimum distance counts once, each selected difficulty counts
/// once, and a specific region counts once.
pub fn active_filter_count(criteria: &FilterCriteria) -> usize {
    let distance = usize::from(criteria.minimum_distance_km > 0.0);
    let region = usize::from(!criteria.selected_region.is_all());
    distance + criteria.selected_difficulties.len() + region
}

/// Routes passing a quick filter, in their original order.
pub fn quick_view<'a>(
    routes: &'a [Route],
    filter: QuickFilter,
    config: &WalkConfig,
) -> Vec<&'a Route> {
    routes.iter().filter(|r| filter.accepts(r, config)).collect()
}

/// Favorited routes, newest first.
///
/// Favorites whose route is not in `routes` are skipped.
pub fn saved_routes<'a>(routes: &'a [Route], favorites: &FavoriteSet) -> Vec<&'a Route> {
    let mut saved: Vec<&Route> = routes.iter().filter(|r| favorites.contains(&r.id)).collect();
    saved.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    saved
}

/// The `count` newest routes.
pub fn featured_routes(routes: &[Route], count: usize) -> Vec<&Route> {
    let mut newest: Vec<&Route> = routes.iter().collect();
    newest.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    newest.truncate(count);
    newest
}

/// Other routes of the same difficulty as `route`, at most `limit`.
pub fn similar_routes<'a>(routes: &'a [Route], route: &Route, limit: usize) -> Vec<&'a Route> {
    routes
        .iter()
        .filter(|r| r.difficulty == route.difficulty && r.id != route.id)
        .take(limit)
        .collect()
}

/// Distinct region tags present in `routes`, sorted.
pub fn available_regions(routes: &[Route]) -> Vec<&str> {
    routes
        .iter()
        .filter_map(|r| r.region.as_deref())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Placeholder text for an empty listing, or `None` when something is shown.
pub fn empty_view_message(total: usize, visible: usize) -> Option<&'static str> {
    if visible > 0 {
        None
    } else if total == 0 {
        Some("Nog geen routes beschikbaar.")
    } else {
        Some("Geen routes gevonden voor deze filter.")
    }
}
