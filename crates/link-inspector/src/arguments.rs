use {
    alloy::primitives::Address,
    std::{
        fmt::{self, Display, Formatter},
        path::PathBuf,
    },
    universal_link::{SigningScheme, format},
};

#[derive(Debug, clap::Parser)]
#[clap(about = "Decodes universal links and verifies who signed them")]
pub struct Arguments {
    /// The log filter. Logs are written to stderr, stdout only carries the
    /// reports.
    #[clap(long, env, default_value = "warn,link_inspector=info,universal_link=info")]
    pub log: String,

    /// Whether to use JSON format for the logs.
    #[clap(long, env, default_value = "false")]
    pub use_json_logs: bool,

    /// Path to an optional configuration file in TOML format. Without it the
    /// defaults for links shared by the wallet app are used.
    #[clap(long, env)]
    pub config: Option<PathBuf>,

    /// The account that is expected to have signed the links. Without it the
    /// recovered signer is only reported.
    #[clap(long, env, value_parser = format::parse_address)]
    pub expected_owner: Option<Address>,

    /// How the payload was hashed before signing (`keccak256` or `ethsign`).
    /// Overrides the configuration file.
    #[clap(long, env)]
    pub signing_scheme: Option<SigningScheme>,

    /// The links to inspect.
    #[clap(required = true)]
    pub links: Vec<String>,
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "log: {}", self.log)?;
        writeln!(f, "use_json_logs: {}", self.use_json_logs)?;
        display_option(
            f,
            "config",
            &self.config.as_ref().map(|path| path.display()),
        )?;
        display_option(
            f,
            "expected_owner",
            &self.expected_owner.as_ref().map(format::address),
        )?;
        display_option(f, "signing_scheme", &self.signing_scheme)?;
        writeln!(f, "links: {}", self.links.len())?;
        Ok(())
    }
}

fn display_option(f: &mut Formatter<'_>, name: &str, option: &Option<impl Display>) -> fmt::Result {
    write!(f, "{name}: ")?;
    match option {
        Some(display) => writeln!(f, "{display}"),
        None => writeln!(f, "None"),
    }
}
