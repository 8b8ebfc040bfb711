/*
[INPUT]:  CLI arguments, JSON/YAML config file or TPT_* environment variables
[OUTPUT]: API results printed to stdout
[POS]:    Binary entry point - demo of the client and user flows
[UPDATE]: When changing CLI flags or subcommands
*/

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tpt_adapter::{Config, TptClient, User};

#[derive(Parser, Debug)]
#[command(name = "tpt-cli", version, about = "TPT API demo client")]
struct Cli {
    /// JSON or YAML config; falls back to TPT_* environment variables
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the client-credentials handshake and print the bearer token
    Token,
    /// Print news for a symbol
    News {
        #[arg(long, default_value = "AAPL")]
        symbol: String,
    },
    /// Print the URL a user visits to authorize this application
    AuthorizeUrl {
        #[arg(long, default_value = "http://localhost:8080/oauth")]
        redirect_uri: String,
    },
    /// Print the user's account details
    Account(UserArgs),
    /// Revoke a user token
    Revoke {
        #[arg(long)]
        user_token: String,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct UserArgs {
    /// Authorization code from the redirect
    #[arg(long)]
    code: Option<String>,
    /// Previously exchanged user token
    #[arg(long)]
    user_token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let config = load_config(args.config_path.as_ref())?;
    info!(endpoint = %config.endpoint, "configuration loaded");

    let client = TptClient::new(config).context("create client")?;

    if let Command::AuthorizeUrl { redirect_uri } = &args.command {
        let url = client
            .authorize_url(redirect_uri)
            .context("build authorize url")?;
        println!("{url}");
        return Ok(());
    }

    let token = client.oauth().await.context("client oauth")?;

    match args.command {
        Command::Token => {
            println!("{}", token.token);
            if let Some(expiry) = token.expiry {
                println!("expires {expiry}");
            }
        }
        Command::News { symbol } => {
            let news = client.get_news(&symbol).await.context("get news")?;
            for item in news.items {
                println!("{}\n  {}\n  {}", item.title, item.url, item.summary);
            }
        }
        Command::Account(user_args) => {
            let user = resolve_user(&client, user_args).await?;
            let details = user
                .get_account_details()
                .await
                .context("get account details")?;
            println!("{details:#?}");
        }
        Command::Revoke { user_token } => {
            let mut user = client.user(user_token).await.context("load user")?;
            user.revoke_token().await.context("revoke token")?;
            println!("revoked");
        }
        Command::AuthorizeUrl { .. } => unreachable!("handled before oauth"),
    }

    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("load config from {}", path.display())),
        None => Config::from_env().context("load config from environment"),
    }
}

async fn resolve_user(client: &TptClient, args: UserArgs) -> Result<User> {
    match (args.code, args.user_token) {
        (Some(code), _) => {
            let user = client
                .exchange_user_code(&code)
                .await
                .context("exchange user code")?;
            println!("user token: {}", user.token());
            Ok(user)
        }
        (None, Some(token)) => client.user(token).await.context("load user"),
        (None, None) => Err(anyhow!("either --code or --user-token is required")),
    }
}
