pub mod prediction;
pub mod providers;
