use std::{convert::TryInto, path::Path};

use anyhow::Context;

use crate::{
    core::{
        film::Film,
        loader::InputParams,
        scene::Scene,
        scene_resources::SceneResources,
    },
    sensor::{self, Sensor, SensorT},
    shape,
};

/// Loads a scene description from a JSON file and returns the scene
/// together with its sensor, already attached to the scene.
pub fn load_scene<P: AsRef<Path>>(path: P) -> anyhow::Result<(Scene, Sensor)> {
    let json_file = std::fs::File::open(&path)?;
    let json_reader = std::io::BufReader::new(json_file);
    let json_value: serde_json::Value = serde_json::from_reader(json_reader)?;
    load_scene_from_json(&json_value)
}

pub fn load_scene_from_json(
    json_value: &serde_json::Value,
) -> anyhow::Result<(Scene, Sensor)> {
    let mut rsc = SceneResources::default();

    if let Some(shapes_value) = json_value.get("shapes") {
        let shapes = shapes_value
            .as_array()
            .context("scene - 'shapes' should be an array")?;
        for shape_value in shapes {
            let mut params: InputParams = shape_value.try_into()?;
            shape::create_shape_from_params(&mut rsc, &mut params)?;
        }
    }

    let film = if let Some(film_value) = json_value.get("film") {
        let mut params: InputParams = film_value.try_into()?;
        params.set_name("film".into());
        let film = Film::load(&mut params)?;
        params.check_unused_keys();
        film
    } else {
        Film::default()
    };

    let sensor_value = json_value
        .get("sensor")
        .context("scene - there is no 'sensor' field")?;
    let mut sensor_params: InputParams = sensor_value.try_into()?;
    let mut sensor = sensor::create_sensor_from_params(&rsc, &mut sensor_params, film)?;

    let scene = rsc.to_scene()?;
    // Attachment must complete before the first sampling call.
    sensor.set_scene(&scene);

    Ok((scene, sensor))
}
