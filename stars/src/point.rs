use glam::Vec3;

use common::int_id_type;

int_id_type!(StarId, i64);

/// A single catalog entry. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    id: StarId,
    name: String,
    position: Vec3,
}

impl Point {
    pub fn new(id: StarId, name: impl Into<String>, position: Vec3) -> Self {
        Self {
            id,
            name: name.into(),
            position,
        }
    }

    pub fn id(&self) -> StarId {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn position(&self) -> Vec3 {
        self.position
    }
    pub fn x(&self) -> f32 {
        self.position.x
    }
    pub fn y(&self) -> f32 {
        self.position.y
    }
    pub fn z(&self) -> f32 {
        self.position.z
    }

    /// Euclidean distance in single precision.
    pub fn distance_to(&self, target: Vec3) -> f32 {
        let delta = target - self.position;
        (delta.x * delta.x + delta.y * delta.y + delta.z * delta.z).sqrt()
    }
}
