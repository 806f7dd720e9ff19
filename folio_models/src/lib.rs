pub mod contact;
pub mod email_address;
pub mod export;
pub mod form;
mod macros;
