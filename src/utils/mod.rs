pub mod colors;
pub mod formatting;
pub mod params;
pub mod path;
pub mod table;

pub use formatting::value_to_string;
pub use params::parse_params;
