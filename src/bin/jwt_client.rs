//! Service account JWT client
//!
//! Reads a service account key file, signs an RS256 token for the given
//! audience and prints it. The token is meant to be sent as
//! `authorization: Bearer <token>` to a bookstore deployment.
//!
//! ```text
//! jwt-client --audience my-service \
//!     --service-account-file sa.json \
//!     --service-account-email sa@project.iam.gserviceaccount.com
//! ```

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use bookstore_grpc::auth::jwt::{assemble_token, DEFAULT_VALIDITY_SECS};
use bookstore_grpc::config::LoggingConfig;
use bookstore_grpc::logging;

const USAGE: &str = "requires: --audience, --service-account-file, --service-account-email";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The audience for the JWT. Required.
    #[arg(long)]
    audience: Option<String>,
    /// Path to service account JSON file. Required.
    #[arg(long)]
    service_account_file: Option<String>,
    /// Email associated with the service account. Required.
    #[arg(long)]
    service_account_email: Option<String>,
}

/// Returns `(audience, file, email)` when every flag is present and non-empty.
fn required(args: Args) -> Option<(String, String, String)> {
    let present = |value: Option<String>| value.filter(|v| !v.is_empty());
    Some((
        present(args.audience)?,
        present(args.service_account_file)?,
        present(args.service_account_email)?,
    ))
}

fn main() -> ExitCode {
    let args = Args::parse();

    let _ = logging::init(&LoggingConfig::default(), std::io::stderr);

    let Some((audience, keyfile, email)) = required(args) else {
        println!("{}", USAGE);
        return ExitCode::FAILURE;
    };

    match assemble_token(&keyfile, &email, &audience, DEFAULT_VALIDITY_SECS) {
        Ok(token) => {
            println!("Auth token: {}", token);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_flags_required() {
        let args = Args::parse_from(["jwt-client", "--audience", "my-service"]);
        assert!(required(args).is_none());
    }

    #[test]
    fn test_empty_flag_counts_as_missing() {
        let args = Args::parse_from([
            "jwt-client",
            "--audience",
            "",
            "--service-account-file",
            "sa.json",
            "--service-account-email",
            "sa@project.iam.gserviceaccount.com",
        ]);
        assert!(required(args).is_none());
    }

    #[test]
    fn test_flags_parse() {
        let args = Args::parse_from([
            "jwt-client",
            "--audience",
            "my-service",
            "--service-account-file",
            "sa.json",
            "--service-account-email",
            "sa@project.iam.gserviceaccount.com",
        ]);
        let (audience, keyfile, email) = required(args).unwrap();
        assert_eq!(audience, "my-service");
        assert_eq!(keyfile, "sa.json");
        assert_eq!(email, "sa@project.iam.gserviceaccount.com");
    }
}
