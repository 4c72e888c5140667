//! Resource identifier derivation

pub mod allocator;
pub mod normalizer;

pub use allocator::ResourceIdAllocator;
pub use normalizer::normalize_identifier;
