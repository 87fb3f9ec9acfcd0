use serde_json::json;
use tahfeez_core::{validate_registration, Credentials, RegisterRequest};

use crate::cli_args::{LoginArgs, RegisterArgs, StatusArgs};
use crate::modules::shared::print_json;
use crate::{prompt_line, prompt_password};
use tahfeez_client::Services;

pub(crate) async fn handle_login(args: LoginArgs, services: &Services) -> anyhow::Result<()> {
    let username = match args.username {
        Some(username) => username,
        None => prompt_line("Username: ")?,
    };
    let password = match args.password {
        Some(password) => password,
        None => prompt_password("Password: ")?,
    };
    let response = services
        .auth
        .login(&Credentials::new(username.trim(), password))
        .await;
    if !response.success {
        anyhow::bail!(response.error.unwrap_or_else(|| "login failed".to_string()));
    }
    println!("Logged in as {}", username.trim());
    Ok(())
}

pub(crate) async fn handle_register(args: RegisterArgs, services: &Services) -> anyhow::Result<()> {
    let (password, password_confirm) = match args.password {
        Some(password) => (password.clone(), password),
        None => (
            prompt_password("Password: ")?,
            prompt_password("Confirm password: ")?,
        ),
    };
    let request = RegisterRequest {
        username: args.username,
        email: args.email,
        password,
        password_confirm,
        first_name: args.first_name,
        last_name: args.last_name,
    };
    if let Err(errors) = validate_registration(&request) {
        anyhow::bail!("{errors}");
    }
    let response = services.auth.register(&request).await;
    let user = response
        .into_result()
        .map_err(|error| anyhow::anyhow!(error))?;
    println!("Registered {} (id {})", user.username, user.id);
    Ok(())
}

pub(crate) async fn handle_logout(services: &Services) -> anyhow::Result<()> {
    services.auth.logout().await;
    println!("Logged out");
    Ok(())
}

pub(crate) async fn handle_status(args: StatusArgs, services: &Services) -> anyhow::Result<()> {
    let authenticated = if args.verify {
        Some(services.auth.is_authenticated().await)
    } else {
        None
    };
    let claims = services.tokens.access_token_claims();
    print_json(&json!({
        "state": services.auth.session_state(),
        "mock_auth": services.auth.is_mock(),
        "use_api": services.preferences.use_api(),
        "language": services.preferences.language(),
        "user": services.auth.current_user(),
        "access_expires_at": claims.and_then(|claims| claims.expires_at()),
        "authenticated": authenticated,
    }))
}
