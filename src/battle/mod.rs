pub mod damage;
pub mod engine;
pub mod move_effects;
pub mod state;
pub mod status;

#[cfg(test)]
mod tests;
