// SPDX-FileCopyrightText: 2022 Hewlett-Packard Development Company, L.P.
//
// SPDX-License-Identifier: GPL-3.0-only

use clap::{ArgAction, Parser};
use nitro_client::{Client, NitroConf, TransportConfig};
use std::{env, ffi::OsString, path::PathBuf, process, time::Duration};
use tracing_subscriber::EnvFilter;

use crate::{Credentials, Error, OutputDir, Result, DEFAULT_ENDPOINTS};

const REQUIRED_FLAGS: &str =
    "the -server, -user, and -password flags are required. see nsextract -h";

// Accepted with a single dash too, e.g. `-server 10.0.0.1:443`
const LONG_FLAGS: &[&str] = &[
    "server",
    "user",
    "password",
    "output-dir",
    "config",
    "timeout",
    "verify-certificates",
    "verbose",
    "help",
    "version",
];

// Flags whose next argument is a value, whatever it looks like
const VALUE_FLAGS: &[&str] = &["server", "user", "password", "output-dir", "config", "timeout"];

/// Extract NetScaler load balancing configuration as JSON files.
#[derive(Debug, Parser)]
#[command(name = "nsextract", version)]
pub struct Args {
    /// NetScaler in format of fqdn:port or ip:port
    #[arg(long, env = "NSEXTRACT_SERVER", allow_hyphen_values = true)]
    pub server: Option<String>,
    /// NetScaler username
    #[arg(long, env = "NSEXTRACT_USER", allow_hyphen_values = true)]
    pub user: Option<String>,
    /// NetScaler password
    #[arg(
        long,
        env = "NSEXTRACT_PASSWORD",
        hide_env_values = true,
        allow_hyphen_values = true
    )]
    pub password: Option<String>,
    /// Directory the JSON files are written to
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,
    /// TOML configuration file. `/etc/nsextract.conf` is used if present
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Request timeout. Requests wait indefinitely by default
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
    /// Verify the appliance's TLS certificate
    #[arg(long)]
    pub verify_certificates: bool,
    /// More output, may be repeated
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Server and credentials, all of which must be given and non-empty.
    pub fn target(&self) -> Result<(String, Credentials)> {
        match (
            non_empty(&self.server),
            non_empty(&self.user),
            non_empty(&self.password),
        ) {
            (Some(server), Some(user), Some(password)) => {
                Ok((server.to_string(), Credentials::new(user, password)))
            }
            _ => Err(Error::Config(REQUIRED_FLAGS.to_string())),
        }
    }

    /// Flags take precedence over the configuration file.
    pub fn transport_config(&self, conf: &NitroConf) -> TransportConfig {
        let mut config = conf.transport_config();
        if self.verify_certificates {
            config.skip_certificate_verification = false;
        }
        if let Some(secs) = self.timeout {
            config.timeout = Some(Duration::from_secs(secs));
        }
        config
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

/// Rewrite `-flag` and `-flag=value` to their double dash form. The value
/// following a flag is passed through untouched, as Go's `flag` package does.
pub fn normalize_args<I: IntoIterator<Item = OsString>>(args: I) -> Vec<OsString> {
    let mut value_next = false;
    args.into_iter()
        .map(|arg| {
            if std::mem::take(&mut value_next) {
                return arg;
            }
            let (name, inline_value) = match arg.to_str().and_then(long_flag) {
                Some(flag) => flag,
                None => return arg,
            };
            value_next = !inline_value && VALUE_FLAGS.contains(&name);
            match arg.to_str() {
                Some(s) if !s.starts_with("--") => OsString::from(format!("-{}", s)),
                _ => arg,
            }
        })
        .collect()
}

/// Name of a known long flag given with one or two dashes, and whether it
/// carries its value after `=`.
fn long_flag(arg: &str) -> Option<(&str, bool)> {
    let flag = arg.strip_prefix("--").or_else(|| arg.strip_prefix('-'))?;
    let (name, inline_value) = match flag.split_once('=') {
        Some((name, _)) => (name, true),
        None => (flag, false),
    };
    LONG_FLAGS.contains(&name).then_some((name, inline_value))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("nsextract={0},nitro_client={0}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

fn extract(args: &Args) -> anyhow::Result<()> {
    let (server, credentials) = args.target()?;

    let conf = NitroConf::load(args.config.as_deref())?;
    let config = args.transport_config(&conf);
    tracing::debug!("{:?}", config);

    let output = OutputDir::create(&args.output_dir)?;
    let client = Client::new(&server, &config)?;

    crate::extract(&client, &credentials, &DEFAULT_ENDPOINTS, |resource| {
        output.write(&resource).map(drop)
    })?;
    Ok(())
}

pub fn run() {
    let args = Args::parse_from(normalize_args(env::args_os()));
    init_logging(args.verbose);

    if let Err(err) = extract(&args) {
        eprintln!("nsextract: {:#}", err);
        process::exit(1);
    }
}
