mod lamina;

pub use lamina::Lamina;
