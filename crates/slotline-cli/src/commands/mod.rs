pub mod derive;
pub mod input;
pub mod pools;
