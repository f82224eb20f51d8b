use {
    crate::{arguments::Arguments, config, report::Report},
    anyhow::{Context, Result},
    clap::Parser,
    std::{io::Write, process::ExitCode},
    universal_link::Verifier,
};

/// Entry point of the binary. Exits with `0` if every link decoded and was
/// signed by the expected owner (or any recoverable owner if none was
/// given), `1` if some link is untrusted and `2` if the inspection itself
/// failed.
pub fn start(args: impl Iterator<Item = String>) -> ExitCode {
    let args = Arguments::parse_from(args);
    let obs_config = observe::Config::new(
        &args.log,
        None,
        observe::Format::json(args.use_json_logs),
    )
    .with_stderr_only();
    observe::tracing::initialize(&obs_config);
    tracing::info!("running link inspector with validated arguments:\n{}", args);

    match run(&args, &mut std::io::stdout().lock()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!(?err, "link inspection failed");
            ExitCode::from(2)
        }
    }
}

/// Inspects every link in `args`, writing one JSON report per line to `out`.
/// Returns whether all links are trustworthy.
pub fn run(args: &Arguments, out: &mut impl Write) -> Result<bool> {
    let config = match &args.config {
        Some(path) => config::load(path)?,
        None => config::Config::default(),
    };
    let verifier = Verifier::new(
        args.signing_scheme.unwrap_or(config.signing_scheme),
        config.owner_cache_size,
    );
    tracing::debug!(
        scheme = %verifier.scheme(),
        prefixes = ?config.link_format.prefixes(),
        "loaded configuration"
    );

    let mut all_ok = true;
    for link in &args.links {
        let report = match config.link_format.parse(link) {
            Ok(order) => match args.expected_owner {
                Some(expected) => {
                    Report::verified(&order, verifier.verify_owner(&order, expected))
                }
                None => Report::resolved(&order, verifier.resolve_owner(&order)),
            },
            Err(err) => Report::malformed(link, &err),
        };
        tracing::info!(ok = report.is_ok(), "inspected link");
        all_ok &= report.is_ok();

        serde_json::to_writer(&mut *out, &report).context("failed to serialize report")?;
        writeln!(out).context("failed to write report")?;
    }
    Ok(all_ok)
}
