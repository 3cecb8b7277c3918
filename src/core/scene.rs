use std::sync::Arc;

use crate::core::bbox::Bbox;
use crate::shape::{Shape, ShapeT};

pub struct Scene {
    shapes: Vec<Arc<Shape>>,
    bbox: Bbox,
}

impl Scene {
    pub fn new(shapes: Vec<Arc<Shape>>) -> Self {
        let bbox = shapes
            .iter()
            .fold(Bbox::empty(), |bbox, shape| bbox.merge(shape.bbox()));
        Self { shapes, bbox }
    }

    pub fn shapes(&self) -> &[Arc<Shape>] {
        &self.shapes
    }

    pub fn bbox(&self) -> Bbox {
        self.bbox
    }
}
