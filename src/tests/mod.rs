pub mod fixtures;
mod store;
