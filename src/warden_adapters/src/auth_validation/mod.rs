pub mod bearer_token_validator;
pub mod jwt_token_codec;
