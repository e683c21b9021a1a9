pub mod cli;
pub mod defs;
pub mod renderer;
pub mod sim;
pub mod world;
