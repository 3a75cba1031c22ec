//! Page components, one per route.

pub mod dashboard;
pub mod forgot_password;
pub mod landing;
pub mod sign_in;
pub mod sign_up;
