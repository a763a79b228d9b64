//! Pure helpers shared by domain types.

pub mod phone;

pub use phone::normalize_phone_number;
