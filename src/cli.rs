// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{env, ffi::OsString, path::PathBuf};

use crate::catalog;
use crate::core::config::RunnerSettings;
use crate::core::registry::TestRegistry;
use crate::infra::t;

pub mod commands;

/// Parsed command line of one invocation.
/// 一次调用的已解析命令行。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    /// Device family to run device-specific tests for; empty for generic only.
    pub device_name: String,
    /// Request JUnit XML reports.
    pub xml: bool,
    pub report_dir: Option<PathBuf>,
    pub verbosity: Option<u8>,
    pub config: Option<PathBuf>,
    pub lang: Option<String>,
    /// Print the resolved suite instead of running it.
    pub list: bool,
}

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` or `--lang=<VALUE>` argument.
fn pre_parse_language() -> Option<String> {
    find_language(env::args())
}

/// Finds the value of the last `--lang` option in `args`, in either form clap accepts.
pub fn find_language<I>(args: I) -> Option<String>
where
    I: IntoIterator<Item = String>,
{
    let mut found = None;
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--" {
            break;
        }
        if arg == "--lang" {
            found = args.next();
        } else if let Some(value) = arg.strip_prefix("--lang=") {
            found = Some(value.to_string());
        }
    }
    found
}

fn build_cli(locale: &str) -> Command {
    Command::new("mpm-unit-tests")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about", locale = locale).to_string())
        .arg(
            Arg::new("device_name")
                .help(t!("arg_device_name", locale = locale).to_string())
                .value_name("DEVICE_NAME")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("xml")
                .short('x')
                .long("xml")
                .help(t!("arg_xml", locale = locale).to_string())
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("report-dir")
                .long("report-dir")
                .help(t!("arg_report_dir", locale = locale).to_string())
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .help(t!("arg_verbosity", locale = locale).to_string())
                .value_name("LEVEL")
                .value_parser(clap::value_parser!(u8).range(0..=2))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help(t!("arg_config", locale = locale).to_string())
                .value_name("CONFIG")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .help(t!("arg_list", locale = locale).to_string())
                .action(ArgAction::SetTrue),
        )
}

fn from_matches(matches: &ArgMatches) -> CliArgs {
    CliArgs {
        device_name: matches
            .get_one::<String>("device_name")
            .cloned()
            .unwrap_or_default(),
        xml: matches.get_flag("xml"),
        report_dir: matches.get_one::<PathBuf>("report-dir").cloned(),
        verbosity: matches.get_one::<u8>("verbosity").copied(),
        config: matches.get_one::<PathBuf>("config").cloned(),
        lang: matches.get_one::<String>("lang").cloned(),
        list: matches.get_flag("list"),
    }
}

/// Parses the process arguments, exiting with usage on error like clap does.
pub fn parse_args() -> CliArgs {
    let locale = crate::resolve_locale(pre_parse_language().as_deref());
    from_matches(&build_cli(&locale).get_matches())
}

/// Parses an explicit argument list. Messages are in English.
pub fn parse_from<I, T>(args: I) -> Result<CliArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    build_cli("en")
        .try_get_matches_from(args)
        .map(|matches| from_matches(&matches))
}

/// Merges the optional settings file with the flags given on the command line.
/// Flags win over the file.
///
/// 合并可选的设置文件与命令行上给出的参数。命令行参数优先于文件。
pub fn resolve_settings(args: &CliArgs) -> Result<RunnerSettings> {
    let mut settings = match &args.config {
        Some(path) => RunnerSettings::from_file(path)?,
        None => RunnerSettings::default(),
    };
    if let Some(lang) = &args.lang {
        settings.language = Some(lang.clone());
    }
    if let Some(level) = args.verbosity {
        settings.verbosity = level.try_into().map_err(anyhow::Error::msg)?;
    }
    if let Some(dir) = &args.report_dir {
        settings.report_dir = dir.clone();
    }
    Ok(settings)
}

/// Runs one invocation against the built-in catalogue and reports whether
/// every test passed.
pub fn process_command(args: CliArgs) -> Result<bool> {
    let registry = catalog::default_registry(catalog::SIMULATED);
    process_with_registry(&args, &registry)
}

/// Runs one invocation against `registry`.
///
/// 针对 `registry` 执行一次调用。
pub fn process_with_registry(args: &CliArgs, registry: &TestRegistry) -> Result<bool> {
    let settings = resolve_settings(args)?;
    let locale = crate::init(settings.language.as_deref());

    if args.list {
        commands::list::execute(registry, &args.device_name, &locale);
        return Ok(true);
    }

    commands::run::execute(registry, &args.device_name, args.xml, &settings, &locale)
}

/// Process exit status for the outcome of [`process_command`]: 0 when every
/// test passed, 1 when any test failed or errored or the harness itself failed.
pub fn exit_status(outcome: &Result<bool>) -> u8 {
    match outcome {
        Ok(true) => 0,
        Ok(false) | Err(_) => 1,
    }
}
