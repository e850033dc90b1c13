//! Terraform provider binary for Meshguard
//!
//! Providers are launched by the `terraform` CLI, which owns the plugin
//! handshake and transport; this binary is not meant to be executed by hand.

use std::process::ExitCode;

use tracing::error;

fn main() -> ExitCode {
    // Log to stderr; stdout belongs to the plugin handshake.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if std::env::var("TF_PLUGIN_MAGIC_COOKIE").is_err() {
        eprintln!("This binary is a plugin. These are not meant to be executed directly.");
        eprintln!("Please execute the program that consumes these plugins, which will load any plugins automatically.");
        return ExitCode::FAILURE;
    }

    error!("the plugin wire transport is not part of this build; see the project documentation");
    ExitCode::FAILURE
}
