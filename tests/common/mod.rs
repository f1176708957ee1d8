mod fixtures;
mod stub_backend;

pub use fixtures::*;
pub use stub_backend::*;
