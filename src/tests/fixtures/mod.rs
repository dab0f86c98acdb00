pub mod harness;
pub mod registration_request;
