use {
    anyhow::{Context, Result},
    serde::Deserialize,
    std::path::Path,
    universal_link::{LinkFormat, SigningScheme, link, verifier},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct File {
    /// Link prefixes that are accepted in front of the encoded order, e.g.
    /// `https://app.awallet.io/`.
    #[serde(default = "default_prefixes")]
    accepted_prefixes: Vec<String>,

    /// How sellers hash the order payload before signing it.
    #[serde(default)]
    signing_scheme: SigningScheme,

    /// How many recovered owners are kept in memory.
    #[serde(default = "default_owner_cache_size")]
    owner_cache_size: u64,
}

fn default_prefixes() -> Vec<String> {
    vec![link::DEFAULT_PREFIX.to_string()]
}

fn default_owner_cache_size() -> u64 {
    verifier::DEFAULT_CACHE_SIZE
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub link_format: LinkFormat,
    pub signing_scheme: SigningScheme,
    pub owner_cache_size: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            link_format: LinkFormat::default(),
            signing_scheme: SigningScheme::default(),
            owner_cache_size: verifier::DEFAULT_CACHE_SIZE,
        }
    }
}

impl From<File> for Config {
    fn from(file: File) -> Self {
        Self {
            link_format: LinkFormat::new(file.accepted_prefixes),
            signing_scheme: file.signing_scheme,
            owner_cache_size: file.owner_cache_size,
        }
    }
}

/// Parses the configuration from TOML text.
pub fn parse(data: &str) -> Result<Config> {
    let file: File = toml::de::from_str(data).context("invalid link inspector configuration")?;
    anyhow::ensure!(
        !file.accepted_prefixes.is_empty(),
        "at least one accepted link prefix is required"
    );
    Ok(file.into())
}

/// Loads the configuration from a TOML file.
pub fn load(path: &Path) -> Result<Config> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("I/O error while reading {path:?}"))?;
    parse(&data).with_context(|| format!("failed to load {path:?}"))
}
