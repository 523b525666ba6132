use std::io::Write;
use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;

use crate::core::types::UserId;
use crate::provider::Error;
use crate::store::CredentialStore;

#[derive(Parser)]
#[clap(
    name = "tubeauth-util",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS")
)]
pub struct Options {
    #[clap(long, env = "CREDENTIALS_DIR", default_value = "secrets/credentials", parse(from_os_str))]
    credentials_dir: PathBuf,
    #[clap(subcommand)]
    command: SubCommand,
}

#[derive(Parser)]
enum SubCommand {
    ListCredentials(ListCredentials),
    ShowCredential(ShowCredential),
    DeleteCredential(DeleteCredential),
}

#[derive(Parser)]
struct ListCredentials;

#[derive(Parser)]
struct ShowCredential {
    #[clap(short, long)]
    user_id: UserId,
}

#[derive(Parser)]
struct DeleteCredential {
    #[clap(short, long)]
    user_id: UserId,
}

async fn list_credentials(
    _c: &ListCredentials,
    store: &CredentialStore,
    out: &mut impl Write,
) -> Result<(), Error> {
    for user_id in store.list().await? {
        writeln!(out, "{}", user_id)?;
    }
    Ok(())
}

async fn show_credential(
    c: &ShowCredential,
    store: &CredentialStore,
    out: &mut impl Write,
) -> Result<(), Error> {
    let bundle = store
        .load(&c.user_id)
        .await?
        .ok_or_else(|| Error::InvalidInput(format!("no credentials stored for {}", c.user_id)))?;

    let expiry = match bundle.expiry {
        Some(expiry) if bundle.is_expired_at(Utc::now()) => format!("{} (expired)", expiry.to_rfc3339()),
        Some(expiry) => expiry.to_rfc3339(),
        None => "never".to_string(),
    };

    writeln!(out, "user_id: {}", c.user_id)?;
    writeln!(out, "client_id: {}", bundle.client_id.0)?;
    writeln!(out, "token_uri: {}", bundle.token_uri)?;
    writeln!(out, "scopes: {}", bundle.scopes.as_joined())?;
    writeln!(out, "expiry: {}", expiry)?;
    writeln!(out, "refresh_token: {}", if bundle.refresh_token.is_some() { "present" } else { "missing" })?;
    Ok(())
}

async fn delete_credential(
    c: &DeleteCredential,
    store: &CredentialStore,
    out: &mut impl Write,
) -> Result<(), Error> {
    if store.delete(&c.user_id).await? {
        writeln!(out, "Deleted credentials for {}", c.user_id)?;
    } else {
        writeln!(out, "No credentials stored for {}", c.user_id)?;
    }
    Ok(())
}

pub async fn run_cli_action(opts: Options, out: &mut impl Write) -> Result<(), Error> {
    use SubCommand::*;

    let store = CredentialStore::new(&opts.credentials_dir);

    match &opts.command {
        ListCredentials(c) => list_credentials(c, &store, out).await,
        ShowCredential(c) => show_credential(c, &store, out).await,
        DeleteCredential(c) => delete_credential(c, &store, out).await,
    }
}
