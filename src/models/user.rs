use serde::Deserialize;

// Static credential entry; passwords are stored and compared in plaintext.
#[derive(Debug, Deserialize, Clone)]
pub struct User {
    pub username: String,
    pub password: String,
}
