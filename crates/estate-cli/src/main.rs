// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result};
use config::Config;
use estate_api::{Backend, Client, MemoryBackend};
use estate_app::AppState;
use log::info;
use runtime::ApiRuntime;
use std::env;
use std::path::PathBuf;

const DEMO_SEED: u64 = 1_977;
const DEMO_PROPERTY_COUNT: usize = 40;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `estate --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;

    let _logger = logging::init_logging(config.log_level(), &config.log_dir()?)?;

    if options.demo {
        info!("running against in-memory demo data");
        let backend = MemoryBackend::new(
            estate_testkit::demo_owners(),
            estate_testkit::demo_properties(DEMO_SEED, DEMO_PROPERTY_COUNT),
        );
        return launch(backend, "in-memory demo data", &config, &options);
    }

    let base_url = config.api_base_url(options.api_url.as_deref());
    let client = Client::new(&base_url, config.api_timeout()?).with_context(|| {
        format!(
            "invalid [api] config in {}; fix base_url/timeout values or pass --api-url",
            options.config_path.display()
        )
    })?;
    info!("using estate API at {}", client.base_url());
    launch(client, &base_url, &config, &options)
}

fn launch<B: Backend>(
    backend: B,
    source: &str,
    config: &Config,
    options: &CliOptions,
) -> Result<()> {
    if options.check_only {
        let owners = backend.list_owners().with_context(|| {
            format!("check {source}; start the API or point --api-url at a running instance")
        })?;
        println!("ok: {source} answered with {} owners", owners.len());
        return Ok(());
    }

    let mut state = AppState::new(config.form_policy(), config.require_login());
    let mut runtime = ApiRuntime::new(backend, config.api_username());
    estate_tui::run_app(&mut state, &mut runtime)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    api_url: Option<String>,
    print_config_path: bool,
    demo: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        api_url: None,
        print_config_path: false,
        demo: false,
        print_example: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--api-url" => {
                let value = iter.next().ok_or_else(|| {
                    anyhow::anyhow!("--api-url requires a URL such as http://127.0.0.1:8000")
                })?;
                options.api_url = Some(value.as_ref().to_owned());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("estate: property records in the terminal");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --api-url <url>          Override the API base URL");
    println!("  --demo                   Launch with seeded demo data (in-memory)");
    println!("  --check                  Validate config and reach the API");
    println!("  --help                   Show this help");
}
