//! Account commands: signup, signin, signout

use std::path::Path;

use anyhow::{Result, bail};

use tokenverse::domain::Role;

use super::open_app;

/// Register a new account
pub async fn signup_command(
    config: Option<&Path>,
    email: &str,
    password: &str,
    role: &str,
    name: &str,
) -> Result<()> {
    let Some(role) = Role::from_str(role) else {
        bail!("Unknown role: {role} (expected 'user' or 'brand')");
    };

    let app = open_app(config)?;
    let user = app.identity.sign_up(email, password, role, name)?;

    println!("Created {} account {} ({})", user.role, user.name, user.email);
    if role == Role::User {
        println!(
            "Starting balance: {} points, {} tokens",
            user.points, user.tokens_earned
        );
    }
    println!("Sign in with `tokenverse signin --email {}`", user.email);
    Ok(())
}

/// Sign in and persist the session token
pub async fn signin_command(config: Option<&Path>, email: &str, password: &str) -> Result<()> {
    let app = open_app(config)?;
    let session = app.identity.sign_in(email, password)?;

    println!("Signed in as {}", session.email);
    Ok(())
}

/// End the current session
pub async fn signout_command(config: Option<&Path>) -> Result<()> {
    let app = open_app(config)?;
    app.identity.sign_out()?;

    println!("Signed out.");
    Ok(())
}
