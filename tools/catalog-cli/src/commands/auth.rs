//! Login, signup and logout.

use anyhow::{anyhow, bail, Result};
use catalog_auth::{LoginRequest, SignupRequest};
use catalog_core::Notice;

use super::{report_validation, secret_or_prompt, value_or_prompt, LoginArgs, SignupArgs};
use crate::context::Context;

/// Log in and persist the returned token.
pub async fn login(args: LoginArgs, ctx: &Context) -> Result<()> {
    let request = LoginRequest::new(
        value_or_prompt(args.email, "Email")?,
        secret_or_prompt(args.password, "Password")?,
    );

    if let Err(errors) = request.validate() {
        report_validation(&ctx.output, &errors);
        bail!("Login Failed: {} invalid field(s)", errors.len());
    }

    let client = ctx.client()?;
    let mut session = ctx.session()?;

    let spinner = ctx.output.spinner("Logging in...");
    let result = client.login(&request).await;
    spinner.finish_and_clear();

    let response = result.map_err(|e| anyhow!("Login Failed: {}", e.user_message()))?;
    session.sign_in(response.token)?;
    ctx.output.debug(&format!("Token saved to {}", ctx.config.token_path()?.display()));

    ctx.output.notice(&Notice {
        description: Some("You have successfully logged in.".to_string()),
        ..Notice::success("Login Successful")
    });
    Ok(())
}

/// Create an account and persist the returned token.
pub async fn signup(args: SignupArgs, ctx: &Context) -> Result<()> {
    let request = SignupRequest::new(
        value_or_prompt(args.username, "Username")?,
        value_or_prompt(args.email, "Email")?,
        secret_or_prompt(args.password, "Password")?,
    );

    if let Err(errors) = request.validate() {
        report_validation(&ctx.output, &errors);
        bail!("Signup Failed: {} invalid field(s)", errors.len());
    }

    let client = ctx.client()?;
    let mut session = ctx.session()?;

    let spinner = ctx.output.spinner("Signing up...");
    let result = client.signup(&request).await;
    spinner.finish_and_clear();

    let response = result.map_err(|e| anyhow!("Signup Failed: {}", e.user_message()))?;
    session.sign_in(response.token)?;

    ctx.output.notice(&Notice {
        description: Some("You have successfully signed up.".to_string()),
        ..Notice::success("Signup Successful")
    });
    Ok(())
}

/// Forget the stored token.
pub async fn logout(ctx: &Context) -> Result<()> {
    let mut session = ctx.session()?;
    if !session.is_logged_in() {
        ctx.output.info("Not logged in.");
        return Ok(());
    }

    session.sign_out()?;
    ctx.output.notice(&Notice::success("Logged out"));
    Ok(())
}
