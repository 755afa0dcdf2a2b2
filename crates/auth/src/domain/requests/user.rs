#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    /// Already hashed.
    pub password: String,
}
