use clap::{Parser, Subcommand};
use drillscene_camera::{Camera, CameraMovement};
use drillscene_input::{Action, HOME_POSITION};
use drillscene_scene::{
    DEFAULT_SPHERE_SEGMENTS, DebugTextRenderer, Renderer, SceneFrame, drill_mesh,
    lamp_cube_mesh, sphere_mesh,
};
use tracing_subscriber::EnvFilter;

/// Square window, matching the desktop default.
const ASPECT: f32 = 1.0;

#[derive(Parser)]
#[command(name = "drillscene-cli", about = "Headless tool for the drill scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Fly the camera through a scripted sequence of frames
    Fly {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "10")]
        frames: u32,
        /// Seconds per frame
        #[arg(long, default_value = "0.016")]
        dt: f32,
        /// Horizontal pointer offset per frame
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        turn: f32,
        /// Vertical pointer offset per frame (positive looks up)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        climb: f32,
        /// Hold the forward key for every frame
        #[arg(long)]
        forward: bool,
        /// Scroll offset per frame
        #[arg(long, allow_hyphen_values = true)]
        zoom: Option<f32>,
        /// Emit one JSON camera state per frame instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print vertex and index counts for the scene geometry
    Mesh {
        /// Sphere segments along both axes
        #[arg(short, long, default_value_t = DEFAULT_SPHERE_SEGMENTS)]
        segments: u32,
    },
}

/// Per-frame input for a scripted flight.
#[derive(Debug, Clone, Copy)]
struct FlightStep {
    dt: f32,
    turn: f32,
    climb: f32,
    forward: bool,
    zoom: Option<f32>,
}

impl FlightStep {
    fn actions(&self) -> impl Iterator<Item = Action> {
        let look = Action::Look {
            xoffset: self.turn,
            yoffset: self.climb,
        };
        let forward = self
            .forward
            .then_some(Action::Move(CameraMovement::Forward));
        std::iter::once(look)
            .chain(forward)
            .chain(self.zoom.map(Action::Zoom))
    }

    fn apply(&self, camera: &mut Camera) {
        for action in self.actions() {
            action.apply_to_camera(camera, self.dt);
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("drillscene-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("camera: {}", drillscene_camera::crate_info());
            println!("scene: {}", drillscene_scene::crate_info());
            println!("input: {}", drillscene_input::crate_info());
        }
        Commands::Fly {
            frames,
            dt,
            turn,
            climb,
            forward,
            zoom,
            json,
        } => {
            let step = FlightStep {
                dt,
                turn,
                climb,
                forward,
                zoom,
            };
            tracing::debug!(?step, frames, "starting flight");

            let mut camera = Camera::at(HOME_POSITION);
            let renderer = DebugTextRenderer::new();
            for frame_index in 0..frames {
                step.apply(&mut camera);
                if json {
                    println!("{}", serde_json::to_string(&camera.state())?);
                } else {
                    let elapsed = (frame_index + 1) as f32 * dt;
                    let frame = SceneFrame::compose(&camera, ASPECT, elapsed);
                    println!("{}", renderer.render(&frame));
                }
            }
        }
        Commands::Mesh { segments } => {
            let sphere = sphere_mesh(segments, segments)?;
            let drill = drill_mesh();
            let lamp = lamp_cube_mesh();

            println!(
                "sphere: segments={segments}, vertices={}, indices={}, triangles={}",
                sphere.vertices.len(),
                sphere.indices.len(),
                sphere.triangle_count()
            );
            println!(
                "drill: vertices={}, triangles={}",
                drill.len(),
                drill.len() / 3
            );
            println!(
                "lamp: vertices={}, indices={}, triangles={}",
                lamp.vertices.len(),
                lamp.indices.len(),
                lamp.triangle_count()
            );
        }
    }

    Ok(())
}
