#[cfg(test)]
mod tests;

pub mod catalog;
pub mod loader;
pub mod point;
pub mod search;
