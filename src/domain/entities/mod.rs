pub mod filter;
pub mod player;
