// src/signer.rs

/// Salt appended to every parameter string before hashing. The remote
/// service rejects any request whose `sign` field was not produced with
/// this exact value.
pub const SIGN_SALT: &str = "tB87#kPtkxqOS2";

/// Computes the `sign` field for a request.
///
/// The remote contract is `hex(md5(params + salt))`, lowercase, no
/// separators. `params` must be the exact concatenated string the
/// endpoint expects (e.g. `fid=<id>&time=<ts>`) — field order and the
/// absence of extra whitespace are part of the contract.
#[derive(Debug, Clone)]
pub struct Signer {
    salt: String,
}

impl Signer {
    pub fn new() -> Self {
        Self {
            salt: SIGN_SALT.to_string(),
        }
    }

    pub fn with_salt(salt: &str) -> Self {
        Self {
            salt: salt.to_string(),
        }
    }

    pub fn sign(&self, params: &str) -> String {
        let digest = md5::compute(format!("{}{}", params, self.salt));
        format!("{:x}", digest)
    }
}

impl Default for Signer {
    fn default() -> Self {
        Self::new()
    }
}
