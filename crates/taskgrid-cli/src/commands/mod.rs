pub mod policies;
pub mod run;
