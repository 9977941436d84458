use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use nalgebra_glm as glm;

use orbit_lab::Scene;
use orbit_lab::animation::{
    AxisAngle, BlendMode, Composition, CopyDirection, InterpolationMode, KeyRotation,
};
use orbit_lab::settings::Settings;

/// Step the orbit camera and rotation blend headlessly and print per-frame uniforms.
#[derive(Parser, Debug)]
#[command(name = "orbit-lab", version)]
struct Cli {
    /// Settings file; the per-user config is used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective settings back before running
    #[arg(long)]
    save_config: bool,

    #[arg(long, value_enum)]
    mode: Option<InterpolationMode>,

    #[arg(long, value_enum)]
    blend: Option<BlendMode>,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 180)]
    frames: u32,

    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Framebuffer size as WIDTHxHEIGHT
    #[arg(long, default_value = "900x720", value_parser = parse_size)]
    size: (u32, u32),

    /// Degrees
    #[arg(long, allow_hyphen_values = true)]
    longitude: Option<f32>,

    /// Degrees
    #[arg(long, allow_hyphen_values = true)]
    latitude: Option<f32>,

    #[arg(long)]
    distance: Option<f32>,

    /// First Euler key, "x,y,z" in degrees
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    euler1: Option<glm::Vec3>,

    /// Second Euler key, "x,y,z" in degrees
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    euler2: Option<glm::Vec3>,

    /// First axis-angle key, "x,y,z" axis
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    axis1: Option<glm::Vec3>,

    /// First axis-angle key angle in degrees
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    angle1: f32,

    /// Second axis-angle key, "x,y,z" axis
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    axis2: Option<glm::Vec3>,

    /// Second axis-angle key angle in degrees
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    angle2: f32,

    /// Model translation, "x,y,z"
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    translate: Option<glm::Vec3>,

    /// Model scale, "x,y,z"
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    scale: Option<glm::Vec3>,

    /// Order in which translate, rotation and scale are combined
    #[arg(long, value_enum)]
    composition: Option<Composition>,

    /// Derive the axis-angle keys from the Euler keys before running
    #[arg(long)]
    copy_from_euler: bool,

    /// Keep t frozen
    #[arg(long)]
    no_animate: bool,

    /// Print every frame as a JSON line
    #[arg(long)]
    json: bool,
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
    let h = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
    Ok((w, h))
}

fn parse_vec3(s: &str) -> Result<glm::Vec3, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f32>().map_err(|e| format!("bad number '{p}': {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    match parts.as_slice() {
        [x, y, z] => Ok(glm::vec3(*x, *y, *z)),
        _ => Err(format!("expected three comma-separated numbers, got '{s}'")),
    }
}

fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_path(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::load(),
    };
    if let Some(mode) = cli.mode {
        settings.animation.mode = mode;
    }
    if let Some(blend) = cli.blend {
        settings.animation.blend = blend;
    }
    if cli.no_animate {
        settings.animation.animate = false;
    }
    Ok(settings)
}

fn apply_overrides(cli: &Cli, scene: &mut Scene) {
    let camera = scene.camera_mut();
    camera.on_viewport(cli.size.0, cli.size.1);
    if let Some(longitude) = cli.longitude {
        camera.set_longitude(longitude);
    }
    if let Some(latitude) = cli.latitude {
        camera.set_latitude(latitude);
    }
    if let Some(distance) = cli.distance {
        camera.set_distance(distance);
    }

    let rotation = scene.rotation_mut();
    if let Some(e) = cli.euler1 {
        rotation.set_euler(KeyRotation::First, glm::radians(&e));
    }
    if let Some(e) = cli.euler2 {
        rotation.set_euler(KeyRotation::Second, glm::radians(&e));
    }
    let axis1 = cli.axis1.unwrap_or_else(|| glm::vec3(0.0, 0.0, 1.0));
    let axis2 = cli.axis2.unwrap_or_else(|| glm::vec3(0.0, 0.0, 1.0));
    rotation.set_axis_angle(KeyRotation::First, AxisAngle::from_degrees(axis1, cli.angle1));
    rotation.set_axis_angle(KeyRotation::Second, AxisAngle::from_degrees(axis2, cli.angle2));
    if let Some(t) = cli.translate {
        rotation.set_translation(t);
    }
    if let Some(s) = cli.scale {
        rotation.set_scale(s);
    }
    if let Some(composition) = cli.composition {
        rotation.set_composition(composition);
    }
    if cli.copy_from_euler {
        rotation.copy_configuration(CopyDirection::FromEuler);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let settings = load_settings(&cli)?;
    if cli.save_config {
        match &cli.config {
            Some(path) => settings
                .store_path(path)
                .with_context(|| format!("saving settings to {}", path.display()))?,
            None => settings.save(),
        }
    }

    let mut scene = Scene::new(&settings);
    apply_overrides(&cli, &mut scene);

    let camera = scene.camera().camera();
    log::info!(
        "running {} frames: lon={:.1} lat={:.1} dist={:.2} eye={:?} mode={:?} blend={:?}",
        cli.frames,
        camera.longitude(),
        camera.latitude(),
        camera.distance(),
        camera.eye_position(),
        scene.rotation().mode(),
        scene.rotation().blend(),
    );

    let mut last = scene.uniforms();
    for _ in 0..cli.frames {
        last = scene.tick(cli.dt);
        if cli.json {
            println!("{}", serde_json::to_string(&last)?);
        }
    }

    if !cli.json {
        println!("{}", serde_json::to_string_pretty(&last)?);
    }
    log::info!(
        "done after {} frames, t={:.3}",
        scene.frame(),
        scene.rotation().clock().t()
    );

    Ok(())
}
