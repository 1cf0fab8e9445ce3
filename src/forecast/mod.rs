pub mod clean;
pub mod extract;
pub mod merge;
pub mod retention;
pub mod short;
pub mod types;
