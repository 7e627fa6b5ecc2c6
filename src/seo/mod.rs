//! SEO metadata resolution for public routes.

mod cache;
mod clock;
mod dataset;
mod head;
mod resolver;
pub mod routes;

pub use cache::*;
pub use clock::*;
pub use dataset::*;
pub use head::*;
pub use resolver::*;
