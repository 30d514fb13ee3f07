pub mod field;
pub mod ripple;
pub mod rng;
pub mod sampler;
