//! Sign-in and sign-out.
//!
//! Navigation is not handled here: the router watches the session signal
//! and moves the user once the session changes.

use storeadmin::ApiResult;
use storeadmin_shared::LoginCredentials;
use tracing::info;

use crate::state::Services;

/// Exchanges credentials for a token and stores the session.
pub async fn login(services: &Services, email: String, password: String) -> ApiResult<()> {
    let response = services
        .api
        .user()
        .login(LoginCredentials { email, password })
        .await?;
    services.session.login(response.user, response.token);
    info!("signed in");
    Ok(())
}

pub fn logout(services: &Services) {
    services.session.logout();
    info!("signed out");
}

/// Label for the navbar.
pub fn display_name(session: &storeadmin::Session) -> String {
    session
        .user
        .as_ref()
        .and_then(|user| user.display_name())
        .unwrap_or("Admin")
        .to_string()
}
