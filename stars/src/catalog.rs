use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::RwLock;

use crate::point::{Point, StarId};

/// Ordered, read-only collection of points with distinct ids.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    points: Vec<Point>,
    index_by_id: HashMap<StarId, usize>,
}

impl Catalog {
    /// Panics on a duplicate id; the loader reports those as malformed rows instead.
    pub fn from_points(points: Vec<Point>) -> Catalog {
        let mut index_by_id = HashMap::with_capacity(points.len());
        for (index, point) in points.iter().enumerate() {
            let prev = index_by_id.insert(point.id(), index);
            assert!(prev.is_none(), "Duplicate star id detected: {}", point.id());
        }

        Catalog {
            points,
            index_by_id,
        }
    }

    pub fn points(&self) -> &[Point] {
        self.points.as_slice()
    }
    pub fn len(&self) -> usize {
        self.points.len()
    }
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = StarId> + '_ {
        self.points.iter().map(Point::id)
    }

    pub fn point_by_id(&self, id: StarId) -> Option<&Point> {
        self.index_by_id.get(&id).map(|&index| &self.points[index])
    }

    /// Names are not unique; the match latest in catalog order wins.
    pub fn last_point_by_name(&self, name: &str) -> Option<&Point> {
        self.points.iter().rev().find(|point| point.name() == name)
    }
}

/// Holder of the most recently loaded catalog.
///
/// Replacement swaps the whole `Arc`, and readers work on a snapshot taken at
/// the start of a query, so a reload never shows a half-built catalog.
#[derive(Clone, Debug, Default)]
pub struct CatalogHandle {
    current: Arc<RwLock<Option<Arc<Catalog>>>>,
}

impl CatalogHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let catalog = Arc::new(catalog);
        *self.current.write() = Some(Arc::clone(&catalog));
        catalog
    }

    /// `None` until the first successful load; an empty catalog is `Some`.
    pub fn snapshot(&self) -> Option<Arc<Catalog>> {
        self.current.read().clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.current.read().is_some()
    }

    pub fn clear(&self) {
        *self.current.write() = None;
    }
}
