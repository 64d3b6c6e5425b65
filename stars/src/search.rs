//! Naive k-nearest-neighbor search over a full catalog scan.
//!
//! Points are grouped by their exact distance to the query. Whole groups are
//! taken nearest first; a group that straddles the k-th slot contributes a
//! uniform random subset of just enough members to fill the result.
//! Distances that differ only in the last bit form separate groups.

use std::cmp::Ordering;

use glam::Vec3;
use rand::seq::index;
use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::catalog::Catalog;
use crate::point::StarId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("The star with name {name} does not exist in the data")]
    NameNotFound { name: String },
}

pub type SearchResult<T> = std::result::Result<T, SearchError>;

#[derive(Clone, Debug, PartialEq)]
pub enum NeighborQuery {
    Coordinate { k: usize, position: Vec3 },
    Name { k: usize, name: String },
}

impl NeighborQuery {
    pub fn k(&self) -> usize {
        match self {
            NeighborQuery::Coordinate { k, .. } | NeighborQuery::Name { k, .. } => *k,
        }
    }
}

pub fn search<R: Rng + ?Sized>(
    catalog: &Catalog,
    query: &NeighborQuery,
    rng: &mut R,
) -> SearchResult<Vec<StarId>> {
    match query {
        NeighborQuery::Coordinate { k, position } => {
            Ok(search_by_coordinate(catalog, *k, *position, rng))
        }
        NeighborQuery::Name { k, name } => search_by_name(catalog, *k, name, rng),
    }
}

/// Searches around the last point named `name`, which is always its own
/// nearest neighbor at distance zero.
pub fn search_by_name<R: Rng + ?Sized>(
    catalog: &Catalog,
    k: usize,
    name: &str,
    rng: &mut R,
) -> SearchResult<Vec<StarId>> {
    let origin = catalog
        .last_point_by_name(name)
        .ok_or_else(|| SearchError::NameNotFound {
            name: name.to_string(),
        })?;

    Ok(search_by_coordinate(catalog, k, origin.position(), rng))
}

/// Returns `min(k, catalog.len())` ids, nearest first.
///
/// When the catalog holds no more than `k` points every id is returned in
/// catalog order without measuring anything. Otherwise ids inside a fully
/// taken distance group keep catalog order, and the sampled boundary group
/// comes last in the order the sampler produced.
pub fn search_by_coordinate<R: Rng + ?Sized>(
    catalog: &Catalog,
    k: usize,
    origin: Vec3,
    rng: &mut R,
) -> Vec<StarId> {
    if catalog.len() <= k {
        return catalog.ids().collect();
    }

    let mut by_distance: Vec<(StarId, f32)> = catalog
        .points()
        .iter()
        .map(|point| (point.id(), point.distance_to(origin)))
        .collect();
    // stable, so equal distances stay in catalog order
    by_distance.sort_by(|(_, a), (_, b)| compare_distance(*a, *b));

    let mut neighbors = Vec::with_capacity(k);
    for group in by_distance.chunk_by(|(_, a), (_, b)| compare_distance(*a, *b).is_eq()) {
        let remaining = k - neighbors.len();
        if remaining == 0 {
            break;
        }

        if group.len() <= remaining {
            neighbors.extend(group.iter().map(|(id, _)| *id));
            continue;
        }

        debug!(
            "Sampling {} of {} stars tied at distance {}",
            remaining,
            group.len(),
            group[0].1
        );
        neighbors.extend(
            index::sample(rng, group.len(), remaining)
                .into_iter()
                .map(|member| group[member].0),
        );
        break;
    }

    assert_eq!(neighbors.len(), k);
    neighbors
}

/// Total order on distances: numeric order, every NaN equal to every other
/// NaN and greater than all numbers.
pub(crate) fn compare_distance(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => a.total_cmp(&b),
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
    }
}
