mod password;
mod token;

pub use password::{hash_password, is_strong_password, verify_password, PasswordError};
pub use token::{Claims, TokenKeys, TOKEN_TTL_SECONDS};
