pub mod agent;
pub mod color;
pub mod encoding;
pub mod sampler;
pub mod scene;
pub mod schema;
pub mod shapes;
pub mod surface;
pub mod world;

pub use scene::Scene;
pub use schema::{load_config, SceneConfig};
pub use shapes::ShapeKind;
