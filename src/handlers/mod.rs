pub mod airports;
pub mod cities;
pub mod flights;
