pub mod api;
pub mod contact;
