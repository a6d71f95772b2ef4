pub mod dates;
pub mod db;
pub mod routes;
mod startup;
mod utils;

pub use dates::*;
pub use db::*;
pub use routes::*;
pub use startup::*;
pub use utils::*;
