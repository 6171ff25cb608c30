pub mod claim;
pub mod health;
