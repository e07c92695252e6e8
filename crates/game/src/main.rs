use engine::{run_app, InputAction, InputSnapshot, LoopConfig, Scene, SceneCommand, Vec2, World};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const PLAYER_SPEED_UNITS_PER_SECOND: f32 = 400.0;

struct GameplayScene {
    move_speed: f32,
}

impl GameplayScene {
    fn new() -> Self {
        Self {
            move_speed: PLAYER_SPEED_UNITS_PER_SECOND,
        }
    }
}

impl Scene for GameplayScene {
    fn load(&mut self, world: &mut World) {
        let spawn = world.logical().center();
        world.player_mut().position = spawn;
        info!(
            spawn_x = spawn.x,
            spawn_y = spawn.y,
            move_speed = self.move_speed,
            "player_spawned"
        );
    }

    fn update(
        &mut self,
        dt_seconds: f32,
        input: &InputSnapshot,
        world: &mut World,
    ) -> SceneCommand {
        if input.quit_requested() {
            return SceneCommand::Exit;
        }

        let logical = world.logical();
        let delta = movement_delta(input, dt_seconds, self.move_speed);
        let player = world.player_mut();
        player.position.x = clamp_axis(
            player.position.x + delta.x,
            player.half_extent.x,
            logical.width as f32,
        );
        player.position.y = clamp_axis(
            player.position.y + delta.y,
            player.half_extent.y,
            logical.height as f32,
        );

        SceneCommand::None
    }

    fn unload(&mut self, world: &mut World) {
        info!(
            player_x = world.player().position.x,
            player_y = world.player().position.y,
            "scene_unload"
        );
    }
}

fn movement_delta(input: &InputSnapshot, dt_seconds: f32, speed: f32) -> Vec2 {
    let mut x = 0.0f32;
    let mut y = 0.0f32;

    if input.is_down(InputAction::MoveRight) {
        x += 1.0;
    }
    if input.is_down(InputAction::MoveLeft) {
        x -= 1.0;
    }
    // Screen coordinates: +y is down, so MoveUp subtracts.
    if input.is_down(InputAction::MoveDown) {
        y += 1.0;
    }
    if input.is_down(InputAction::MoveUp) {
        y -= 1.0;
    }

    let len_sq = x * x + y * y;
    if len_sq > 0.0 {
        let inv_len = len_sq.sqrt().recip();
        x *= inv_len;
        y *= inv_len;
    }

    Vec2 {
        x: x * speed * dt_seconds,
        y: y * speed * dt_seconds,
    }
}

fn clamp_axis(value: f32, half_extent: f32, axis_extent: f32) -> f32 {
    let min = half_extent;
    let max = axis_extent - half_extent;
    // A sprite wider than the playfield inverts the bounds; pin to center.
    if min > max {
        return axis_extent * 0.5;
    }
    value.clamp(min, max)
}

fn main() {
    init_tracing();
    info!("=== Skiff Startup ===");

    let scene = GameplayScene::new();
    let config = LoopConfig::default();

    if let Err(err) = run_app(config, Box::new(scene)) {
        error!(error = %err, "startup_failed");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
