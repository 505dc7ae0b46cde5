//! Progressive frame driver.
//!
//! Each call to [`Renderer::render_one_sample`] traces one primary ray per
//! pixel, adds the result to the film and resolves the display buffer.

use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::demo_scene::demo_scene;
use crate::error::RenderResult;
use crate::film::Film;
use crate::integrator::PathIntegrator;
use crate::sampler::{halton_2d, halton_disk};
use crate::scene::Scene;
use orb_math::{Color, Vec2};
use std::time::{Duration, Instant};

/// Halton bases for the sub-pixel jitter.
const JITTER_BASES: (u32, u32) = (2, 3);
/// Halton bases for the lens position.
const LENS_BASES: (u32, u32) = (4, 5);

/// Result of one accumulation pass.
#[derive(Debug)]
pub struct Frame<'a> {
    /// Display buffer, `0xAARRGGBB`, row-major with row 0 at the top
    pub pixels: &'a [u32],
    /// Primary rays traced by this pass
    pub rays_traced: u64,
    /// Samples per pixel accumulated so far, including this pass
    pub sample_count: u64,
    pub elapsed: Duration,
}

impl Frame<'_> {
    /// Throughput of this pass in millions of primary rays per second.
    pub fn mrays_per_second(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if seconds > 0.0 {
            self.rays_traced as f64 / seconds / 1.0e6
        } else {
            0.0
        }
    }
}

pub struct Renderer {
    config: RenderConfig,
    scene: Scene,
    camera: Camera,
    integrator: PathIntegrator,
    film: Film,
    total_rays: u64,
}

impl Renderer {
    /// Create a renderer for an already built scene.
    pub fn new(scene: Scene, config: RenderConfig) -> RenderResult<Self> {
        config.validate()?;

        let camera = config.camera.build(config.aspect_ratio());
        let integrator = PathIntegrator::new(config.max_depth, camera.origin());
        let film = Film::new(config.width, config.height);

        log::info!(
            "Renderer ready: {}x{}, max depth {}, exposure {:+} EV, {} spheres",
            config.width,
            config.height,
            config.max_depth,
            config.exposure,
            scene.sphere_count()
        );

        Ok(Self {
            config,
            scene,
            camera,
            integrator,
            film,
            total_rays: 0,
        })
    }

    /// Build the demo scene from `seed` and a renderer for it.
    pub fn initialize_scene(config: RenderConfig, seed: u64) -> RenderResult<Self> {
        let scene = demo_scene(seed, config.bvh.split)?;
        Self::new(scene, config)
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn film(&self) -> &Film {
        &self.film
    }

    /// Primary rays traced since creation or the last reset.
    pub fn total_rays(&self) -> u64 {
        self.total_rays
    }

    /// Accumulate one more sample per pixel and resolve the display buffer.
    pub fn render_one_sample(&mut self) -> Frame<'_> {
        let start = Instant::now();

        let sample_index = self.film.sample_count() + 1;
        let (jx, jy) = JITTER_BASES;
        let jitter = halton_2d(sample_index, jx, jy);
        let exposure = self.config.exposure_scale();
        let width = self.config.width as usize;
        let size = Vec2::new(self.config.width as f32, self.config.height as f32);

        let scene = &self.scene;
        let camera = &self.camera;
        let integrator = &self.integrator;

        self.film.accumulate(|index| {
            let i = index % width;
            let j = index / width;

            let x = (i as f32 + jitter.x) / size.x;
            let y = 1.0 - (j as f32 + jitter.y) / size.y;

            let (lx, ly) = LENS_BASES;
            let lens = halton_disk(sample_index + (i + j) as u64, lx, ly);

            let ray = camera.get_ray(Vec2::new(x, y), lens);
            integrator.ray_color(scene, &ray, 0) * exposure
        });

        let rays_traced = self.config.pixel_count() as u64;
        self.total_rays += rays_traced;
        let sample_count = self.film.sample_count();
        let pixels = self.film.resolve();

        let frame = Frame {
            pixels,
            rays_traced,
            sample_count,
            elapsed: start.elapsed(),
        };

        log::debug!(
            "Sample {}: {} rays in {:.1?} ({:.2} Mrays/s)",
            frame.sample_count,
            frame.rays_traced,
            frame.elapsed,
            frame.mrays_per_second()
        );

        frame
    }

    /// Mean radiance at pixel (x, y) after exposure, before tonemapping.
    ///
    /// Returns `None` outside the image.
    pub fn pixel_radiance(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.config.width || y >= self.config.height {
            return None;
        }
        let index = y as usize * self.config.width as usize + x as usize;
        Some(self.film.average(index))
    }

    /// Discard accumulated samples, e.g. after the scene or camera changed.
    pub fn reset(&mut self) {
        self.film.clear();
        self.total_rays = 0;
    }
}
