/// Terminal progress indicators
pub mod progress;

pub use progress::ProgressManager;
