pub mod naming;
pub mod percentage;
