pub mod bcrypt;
pub mod errors;
pub mod legacy;

pub use self::bcrypt::PasswordHasher;
pub use errors::PasswordError;
pub use legacy::is_hashed;
