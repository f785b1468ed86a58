use tracing::error;
use crate::config::{INDEX_PAGE, LOGIN_FORM_PAGE, LOGIN_PAGE};
use crate::core::storage::KeyValueStore;
use crate::dialog::Dialog;
use super::{field, FormFields, PageContext, PageOutcome};

/// `#loginForm`: logs in, persists the session, and goes to the index page.
pub async fn submit_login<S: KeyValueStore, D: Dialog>(
    ctx: &mut PageContext<S, D>,
    form: &FormFields,
) -> PageOutcome<()> {
    let result = ctx
        .client
        .login(field(form, "email"), form.get("password").map(String::as_str).unwrap_or_default())
        .await;

    let saved = result.and_then(|session| ctx.sessions.save(&session));
    match saved {
        Ok(()) => {
            ctx.dialog.alert("Login successful!");
            PageOutcome::Redirect(INDEX_PAGE.to_string())
        }
        Err(e) => {
            error!("Login failed: {}", e);
            ctx.client.end_session();
            ctx.dialog.alert("Login failed. Check your email and password.");
            PageOutcome::Failed(e.message().to_string())
        }
    }
}

/// `#registerForm`: creates the account and sends the user to the login form.
pub async fn submit_register<S: KeyValueStore, D: Dialog>(
    ctx: &mut PageContext<S, D>,
    form: &FormFields,
) -> PageOutcome<()> {
    let result = ctx
        .client
        .register(
            field(form, "name"),
            field(form, "email"),
            form.get("password").map(String::as_str).unwrap_or_default(),
        )
        .await;

    match result {
        Ok(_) => {
            ctx.dialog.alert("Registration successful! You can now log in.");
            PageOutcome::Redirect(LOGIN_FORM_PAGE.to_string())
        }
        Err(e) => {
            error!("Registration failed: {}", e);
            ctx.dialog.alert("Registration failed. Try again.");
            PageOutcome::Failed(e.message().to_string())
        }
    }
}

/// Ends the session locally and in storage.
pub fn logout<S: KeyValueStore, D: Dialog>(ctx: &mut PageContext<S, D>) -> PageOutcome<()> {
    ctx.client.logout();
    match ctx.sessions.clear() {
        Ok(()) => PageOutcome::Redirect(LOGIN_PAGE.to_string()),
        Err(e) => {
            error!("Could not clear stored session: {}", e);
            PageOutcome::Failed(e.message().to_string())
        }
    }
}
