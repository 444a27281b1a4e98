pub mod token_builder;
pub mod token_issuer;
pub mod validation;

pub use token_issuer::TokenIssuer;
