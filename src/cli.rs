use crate::{config, error::Result, store::ReportStore};
use clap::{clap_app, ArgMatches};
use std::process::exit;

pub fn matches() -> ArgMatches<'static> {
  clap_app!(reportes =>
    (@arg config: -c --config +takes_value "config file (default: data/config.toml)")
    (@subcommand migrate =>
      (about: "create the postgis extension and the reportes table, then exit")
    )
    (@subcommand help => )
  )
  .help(
    r#"USAGE (cli): [-c <config>] <command>

Options:
-c, --config <path>   config file, defaults to data/config.toml

Commmands:
(none)      start the http server
migrate     create the postgis extension and the reportes table
help        print help message
"#,
  )
  .get_matches()
}

pub fn config_path<'a>(matches: &'a ArgMatches) -> &'a str {
  matches.value_of("config").unwrap_or(config::DEFAULT_PATH)
}

/// Runs a one-shot subcommand, if any, and exits. Returns when the server should start.
pub fn load(matches: &ArgMatches, store: &dyn ReportStore) -> Result<()> {
  match matches.subcommand() {
    /*** migrate ***/
    ("migrate", Some(_)) => {
      store.init_schema(true)?;
      log::info!("schema ready");
      exit(0);
    }

    _ => (),
  };
  Ok(())
}
