use anyhow::*;
use rand::{Rng, SeedableRng};

use distant_sensor::loader;
use distant_sensor::sensor::SensorT;

const NUM_SAMPLES: u32 = 4096;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 1 {
        println!("Usage: distant-sensor <path-to-json>");
        return Ok(());
    }

    println!("Loading scene JSON...");
    let (_scene, sensor) = loader::load_scene(&args[0])?;

    println!("{}", sensor.describe());

    let mut rng = rand::rngs::SmallRng::from_entropy();
    let mut valid_count = 0_u32;
    let mut weight_sum = 0.0_f64;
    for _ in 0..NUM_SAMPLES {
        let sample = sensor.sample_ray(rng.gen(), rng.gen(), (rng.gen(), rng.gen()));
        if sample.valid {
            valid_count += 1;
        }
        weight_sum += sample.weight as f64;
    }

    println!(
        "{} samples: {:.1}% valid, mean weight {:.4}",
        NUM_SAMPLES,
        100.0 * valid_count as f64 / NUM_SAMPLES as f64,
        weight_sum / NUM_SAMPLES as f64
    );
    Ok(())
}
