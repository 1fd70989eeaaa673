pub mod health;
pub mod project;
