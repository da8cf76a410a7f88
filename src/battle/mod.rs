pub mod ai;
pub mod calculators;
pub mod effectiveness;
pub mod engine;
pub mod rng;
pub mod scheduler;
pub mod state;

#[cfg(test)]
mod tests;
