mod slice;

pub use slice::Slice;
