//! Mint a development access token signed with the server's `JWT_SECRET`.
//!
//! ```text
//! JWT_SECRET=... mint-token --sub 0190c3c2-7d3e-7c4a-9b1e-3f2a1d5e6f70
//! ```

use anyhow::Context;
use chrono::{Duration, Utc};
use clap::Parser;

use shopfront_api::config::ApiConfig;
use shopfront_auth::{Hs256JwtIssuer, PrincipalId};

#[derive(Debug, Parser)]
#[command(name = "mint-token", about = "Print a signed bearer token for the product API")]
struct Args {
    /// Principal id for the `sub` claim (random when omitted).
    #[arg(long)]
    sub: Option<PrincipalId>,

    /// Token lifetime in seconds (defaults to TOKEN_TTL_SECS).
    #[arg(long)]
    ttl_secs: Option<i64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = ApiConfig::from_env()?;

    let ttl = match args.ttl_secs {
        Some(secs) => Duration::try_seconds(secs).context("--ttl-secs is out of range")?,
        None => config.token_ttl,
    };
    let sub = args.sub.unwrap_or_default();

    let issuer = Hs256JwtIssuer::new(config.jwt_secret.as_bytes(), ttl)?;
    let token = issuer
        .issue(sub, Utc::now())
        .context("failed to sign access token")?;

    if config.uses_dev_secret() {
        eprintln!("warning: signed with the insecure dev secret");
    }
    println!("{token}");
    Ok(())
}
