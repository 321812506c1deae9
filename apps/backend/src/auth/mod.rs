pub mod claims;
pub mod cookies;
pub mod jwt;
pub mod password;
pub mod roles;
pub mod session;
