use clap::{Parser, Subcommand};
use gatehouse_flags::GITHUB_ACCESS_TOKEN_COOKIE;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "gatehouse", version, about = "GitHub sign-in glue for a single page app")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the API, the OAuth callback and the single page app.
    ///
    /// Reads the GitHub app client secret from `GITHUB_APP_CLIENT_SECRET`.
    Serve {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        bind: Option<SocketAddr>,
        #[arg(long)]
        ui_dir: Option<PathBuf>,
    },
    /// Print the startup flags for a cookie jar as JSON.
    Flags {
        #[arg(long, env = "GATEHOUSE_COOKIE", default_value = "")]
        cookie: String,
        #[arg(long, default_value = GITHUB_ACCESS_TOKEN_COOKIE)]
        name: String,
    },
    /// Run a script against the `document.cookie` shim, then print the
    /// startup flags it leaves behind.
    Run {
        script: PathBuf,
        #[arg(long, default_value = GITHUB_ACCESS_TOKEN_COOKIE)]
        name: String,
    },
    /// Evaluate an expression after startup, with `document.cookie` seeded
    /// from `--cookie` and `flags` installed.
    Eval {
        expression: String,
        /// A `Set-Cookie` style string, applied in order. Repeatable.
        #[arg(long)]
        cookie: Vec<String>,
        #[arg(long, default_value = GITHUB_ACCESS_TOKEN_COOKIE)]
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn flags_defaults_to_token_cookie() {
        let args = Args::try_parse_from(["gatehouse", "flags", "--cookie", "a=1"]).unwrap();
        match args.command {
            Command::Flags { cookie, name } => {
                assert_eq!(cookie, "a=1");
                assert_eq!(name, "github-access-token");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn eval_collects_repeated_cookies() {
        let args = Args::try_parse_from([
            "gatehouse", "eval", "flags", "--cookie", "a=1", "--cookie", "b=2; path=/",
        ])
        .unwrap();
        match args.command {
            Command::Eval { expression, cookie, .. } => {
                assert_eq!(expression, "flags");
                assert_eq!(cookie, ["a=1", "b=2; path=/"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
