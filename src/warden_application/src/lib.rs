pub mod use_cases;

#[cfg(test)]
mod test_support;

pub use use_cases::{
    change_password::ChangePasswordUseCase,
    create_pool::CreatePoolUseCase,
    federated::FederatedAuthError,
    federated_login::FederatedLoginUseCase,
    federated_register::FederatedRegisterUseCase,
    force_password_change::ForcePasswordChangeUseCase,
    forgot_password::ForgotPasswordUseCase,
    login::{LoginError, LoginResponse, LoginUseCase},
    register::RegisterUseCase,
    reset_password::ResetPasswordUseCase,
};
