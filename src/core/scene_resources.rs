use std::{collections::HashMap, sync::Arc};

use crate::{core::scene::Scene, shape::Shape};

/// Named resources accumulated while loading a scene description. Shapes
/// are reference counted so that sensors can share them with the scene
/// graph without owning them.
#[derive(Default)]
pub struct SceneResources {
    shapes: HashMap<String, Arc<Shape>>,
}

impl SceneResources {
    pub fn add_shape(&mut self, name: String, shape: Shape) -> anyhow::Result<()> {
        if self.shapes.contains_key(&name) {
            anyhow::bail!(format!("Duplicated shape name '{}'", name));
        } else {
            self.shapes.insert(name, Arc::new(shape));
            Ok(())
        }
    }

    pub fn clone_shape(&self, name: &str) -> anyhow::Result<Arc<Shape>> {
        if let Some(shape) = self.shapes.get(name) {
            Ok(shape.clone())
        } else {
            anyhow::bail!(format!("There is no shape named '{}'", name))
        }
    }

    pub fn to_scene(self) -> anyhow::Result<Scene> {
        let shapes = self.shapes.into_iter().map(|(_, shape)| shape).collect();
        let scene = Scene::new(shapes);
        log::info!("{} shapes", scene.shapes().len());
        Ok(scene)
    }
}
