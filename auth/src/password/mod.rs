pub mod errors;
pub mod hasher;
pub mod normalize;
pub mod stored_hash;

pub use errors::PasswordError;
pub use hasher::CredentialHasher;
pub use normalize::NormalizedPassword;
pub use stored_hash::StoredHash;
