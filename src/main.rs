//! Prerender - per-route SEO documents for a single-page site.

mod cli;
mod config;
mod contact;
mod generator;
mod logger;
mod prerender;
mod seo;
mod utils;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use contact::{ContactForm, EmailJs};
use generator::sitemap::build_sitemap;
use prerender::{prerender_routes, route_output_path};
use seo::{MetaInjector, SeoProps, canonical_url};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::set_verbose(cli.verbose);
    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { .. } => build_all(&config),
        Commands::Routes => {
            list_routes(&config);
            Ok(())
        }
        Commands::Contact {
            name,
            email,
            message,
            dry_run,
        } => send_contact(&config, name, email, message, *dry_run),
    }
}

/// Generate route documents, then the sitemap.
fn build_all(config: &SiteConfig) -> Result<()> {
    let generated = prerender_routes(config)?;
    build_sitemap(config)?;

    let incomplete = generated.iter().filter(|r| !r.missing.is_empty()).count();
    if incomplete == 0 {
        log!("prerender"; "done");
    } else {
        log!("prerender"; "done ({incomplete} route(s) with missing tags)");
    }
    Ok(())
}

/// Print route table with canonical URL and destination.
///
/// With `--verbose`, also prints the head a client-side navigation to the
/// route ends up with.
fn list_routes(config: &SiteConfig) {
    for route in &config.routes {
        let file = route_output_path(&config.build.output, route);
        log!("route"; "{}", route.path);
        println!("  title: {}", route.title);
        println!("  url:   {}", canonical_url(&config.site.url, &route.path));
        println!("  image: {}", route.image);
        println!("  file:  {}", file.display());

        if logger::is_verbose() {
            let mut injector = MetaInjector::new(config.site.clone());
            injector.sync(&SeoProps::from(route));
            for line in injector.head().render().lines() {
                println!("    {line}");
            }
        }
    }
}

fn send_contact(
    config: &SiteConfig,
    name: &str,
    email: &str,
    message: &str,
    dry_run: bool,
) -> Result<()> {
    let form = ContactForm::new(name, email, message)?;
    let now = chrono::Local::now();

    if dry_run {
        let time = contact::format_time_fr(&now);
        let requests = [
            contact::admin_request(&form, &config.contact, &time),
            contact::reply_request(&form, &config.contact),
        ];
        for request in &requests {
            println!("{}", serde_json::to_string_pretty(request)?);
        }
        return Ok(());
    }

    let transport = EmailJs::new(&config.contact.endpoint)?;
    contact::submit(&form, &config.contact, &transport, &now)?;
    Ok(())
}
