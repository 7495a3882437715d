pub mod directory;
pub mod employee_request;
pub mod scheduled_deactivation;
