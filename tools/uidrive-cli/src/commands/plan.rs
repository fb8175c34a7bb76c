//! Dry-run a gesture and emit the events it would inject.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Subcommand;
use uidrive_common::clock::UptimeClock;
use uidrive_common::config::InteractionConfig;
use uidrive_event_model::event::{serialize_events, Coordinate};
use uidrive_event_model::keycode::parse_key_code;
use uidrive_interaction::path;
use uidrive_interaction::{
    InjectionSink, InteractionController, MemorySink, NotificationHub, RecordingSink,
    SimulatedDevice,
};

#[derive(Subcommand)]
pub enum Gesture {
    /// Tap at a point
    Click { x: i32, y: i32 },

    /// Press and hold at a point
    LongTap { x: i32, y: i32 },

    /// Straight swipe between two points
    Swipe {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,

        /// Number of interpolation steps
        #[arg(long, default_value = "10")]
        steps: u32,
    },

    /// Swipe through waypoints given as X,Y
    Path {
        #[arg(required = true, value_parser = parse_point)]
        points: Vec<Coordinate>,

        /// Steps per leg
        #[arg(long, default_value = "5")]
        steps: u32,
    },

    /// Two fingers moving towards a center point
    Pinch {
        #[arg(long, default_value = "540")]
        center_x: i32,

        #[arg(long, default_value = "960")]
        center_y: i32,

        /// Starting distance of each finger from the center
        #[arg(long, default_value = "300")]
        span: i32,

        /// Points per finger path
        #[arg(long, default_value = "10")]
        steps: u32,

        /// Move fingers apart instead
        #[arg(long)]
        out: bool,
    },

    /// Type text through the virtual keyboard
    Text { text: String },

    /// Tap a key by code or name (ENTER, KEYCODE_BACK, 66, a)
    Key {
        #[arg(value_parser = parse_key)]
        code: i32,

        /// Meta state flags
        #[arg(long, default_value = "0")]
        meta: i32,
    },
}

fn parse_point(s: &str) -> Result<Coordinate, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{s}'"))?;
    let x = x.trim().parse::<i32>().map_err(|e| format!("bad x in '{s}': {e}"))?;
    let y = y.trim().parse::<i32>().map_err(|e| format!("bad y in '{s}': {e}"))?;
    Ok(Coordinate::new(x, y))
}

fn parse_key(s: &str) -> Result<i32, String> {
    parse_key_code(s).ok_or_else(|| format!("unknown key '{s}'"))
}

/// Finger paths for a pinch around `center`.
fn pinch_paths(center: Coordinate, span: i32, steps: u32, out: bool) -> [Vec<Coordinate>; 2] {
    let finger = |direction: i32| {
        let far = Coordinate::new(center.x + direction * span, center.y);
        let near = Coordinate::new(center.x + direction * (span / 10).max(1), center.y);
        let (start, end) = if out { (near, far) } else { (far, near) };
        let mut points = vec![start];
        points.extend(path::interpolate(start, end, steps.saturating_sub(1)));
        points
    };
    [finger(-1), finger(1)]
}

pub async fn run(
    gesture: Gesture,
    output: Option<PathBuf>,
    config: InteractionConfig,
) -> anyhow::Result<()> {
    let clock = UptimeClock::start();
    let memory = Arc::new(MemorySink::new());

    let recording = match &output {
        Some(file) => Some(Arc::new(
            RecordingSink::create(memory.clone(), file.clone(), clock.epoch_wall())
                .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", file.display()))?,
        )),
        None => None,
    };
    let sink: Arc<dyn InjectionSink> = match &recording {
        Some(recording) => recording.clone(),
        None => memory.clone(),
    };

    let controller = InteractionController::new(
        sink,
        Arc::new(NotificationHub::default()),
        Arc::new(SimulatedDevice::new(config.long_press_fallback())),
    )
    .with_config(config)
    .with_clock(clock);

    let ok = match gesture {
        Gesture::Click { x, y } => controller.click(x, y).await,
        Gesture::LongTap { x, y } => controller.long_tap(x, y).await,
        Gesture::Swipe {
            x1,
            y1,
            x2,
            y2,
            steps,
        } => controller.swipe(x1, y1, x2, y2, steps).await,
        Gesture::Path { points, steps } => controller.swipe_path(&points, steps).await?,
        Gesture::Pinch {
            center_x,
            center_y,
            span,
            steps,
            out,
        } => {
            let paths = pinch_paths(Coordinate::new(center_x, center_y), span, steps, out);
            controller.generate_multi_pointer_gesture(&paths).await?
        }
        Gesture::Text { text } => controller.send_text(&text).await,
        Gesture::Key { code, meta } => controller.send_key(code, meta).await,
    };

    tracing::info!(ok, events = memory.len(), "Gesture planned");

    match (recording, output) {
        (Some(recording), Some(file)) => {
            let summary = recording
                .finish()
                .map_err(|e| anyhow::anyhow!("Failed to write {}: {e}", file.display()))?;
            println!(
                "Recorded {} events ({} rejected) to {}",
                summary.accepted,
                summary.rejected,
                file.display()
            );
        }
        _ => print!("{}", serialize_events(&memory.events())?),
    }

    Ok(())
}
