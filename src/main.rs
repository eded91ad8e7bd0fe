use anyhow::Result;
use clap::{App, Arg};
use pagestamp::build::build_site;
use pagestamp::config::Config;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let matches = App::new("pagestamp")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Stamps the site's pages out of `_template.html`")
        .arg(
            Arg::with_name("directory")
                .short("C")
                .long("directory")
                .value_name("DIR")
                .help("The directory holding the template and content fragments")
                .default_value(".")
                .takes_value(true),
        )
        .get_matches();

    // `directory` has a default value, so it's always present
    let directory = matches.value_of("directory").unwrap_or(".");
    build_site(&Config::new(Path::new(directory)))?;
    Ok(())
}
