mod index;

pub use index::{welcome, API_ROUTES};
