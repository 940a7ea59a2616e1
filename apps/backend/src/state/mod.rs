pub mod app_state;
pub mod random;

pub use app_state::AppState;
pub use random::SharedRandom;
