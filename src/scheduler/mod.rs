pub mod clock;
pub mod matcher;
pub mod repo;
pub mod runner;
