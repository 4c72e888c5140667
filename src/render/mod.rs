pub mod transform;
pub mod writer;

pub use writer::StateRenderer;
