pub mod activation;
pub mod identity;
pub mod login;
pub mod register;
pub mod token;

#[cfg(test)]
mod fixtures;
