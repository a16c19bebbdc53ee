//! Setup command: validate a connection and optionally save it.

use secrecy::ExposeSecret;
use serde::Serialize;

use immich_core::validate_setup;

use crate::cli::{GlobalOpts, SetupArgs};
use crate::config::Target;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct SetupView {
    title: String,
    host: String,
    user_id: String,
    email: String,
}

pub async fn handle(args: SetupArgs, target: &Target, global: &GlobalOpts) -> Result<(), CliError> {
    let info = validate_setup(&target.host, target.api_key.clone(), &target.transport()).await?;

    let view = SetupView {
        title: info.title.clone(),
        host: info.credentials.host().to_string(),
        user_id: info.user.id.clone(),
        email: info.user.email.clone(),
    };
    let out = output::render_single(
        &global.output,
        &view,
        |v| format!("Connected: {}", v.title),
        |v| v.title.clone(),
    )?;
    output::print_output(&out, global.quiet);

    let Some(profile_name) = args.save else {
        return Ok(());
    };

    let mut cfg = immich_config::load_config()?;
    let mut profile = cfg.profiles.remove(&profile_name).unwrap_or_default();
    profile.host = info.credentials.host().to_string();

    let api_key = info.credentials.api_key().expose_secret();
    if args.keyring {
        immich_config::store_api_key(&profile_name, api_key)?;
        profile.api_key = None;
    } else {
        profile.api_key = Some(api_key.to_owned());
    }

    if cfg.profiles.is_empty() {
        cfg.default_profile = Some(profile_name.clone());
    }
    cfg.profiles.insert(profile_name.clone(), profile);
    let path = immich_config::save_config(&cfg)?;

    if !global.quiet {
        eprintln!("Saved profile '{profile_name}' to {}", path.display());
    }
    Ok(())
}
