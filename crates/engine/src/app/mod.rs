mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;

pub use input::InputAction;
pub use loop_runner::{run_app, AppError, LoopConfig};
pub use metrics::LoopMetricsSnapshot;
pub use rendering::{Renderer, SurfaceSize, ViewportTransform};
pub use scene::{InputSnapshot, LogicalViewport, Player, Scene, SceneCommand, Vec2, World};
