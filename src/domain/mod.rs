pub mod catalog;
pub mod date;
pub mod entities;
