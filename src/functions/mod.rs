// Host functions, grouped by category
pub mod prelude;

pub use prelude::install as install_prelude;
