use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;

use colorbook::cli::{Args, Command};
use colorbook::config::Config;
use colorbook::panels::{CollectionKind, ColorBook};
use colorbook::remote::{HttpTransport, RemoteColorLookup};
use colorbook::storage::FileStore;
use colorbook::{logging, render};

type Book = ColorBook<FileStore, HttpTransport>;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut config =
        Config::load(args.config.as_deref()).context("failed to load configuration")?;
    if let Some(dir) = args.data_dir {
        config.data_dir = Some(dir);
    }
    if let Some(url) = args.api_url {
        config.api_base_url = url;
    }

    let resolver = config.name_resolver()?;
    let store = FileStore::new(config.data_dir()?);
    tracing::debug!(dir = %store.dir().display(), "using data directory");
    let lookup = RemoteColorLookup::http(&config.api_base_url);
    let mut book = ColorBook::with_store(resolver, lookup, store);

    run(&mut book, args.command).await
}

async fn run(book: &mut Book, command: Command) -> Result<()> {
    match command {
        Command::Name { name, save } => {
            let name = name.join(" ");
            let Some(record) = book.names.search(&name) else {
                bail!("color name is empty");
            };
            println!("{}", render::record(record));
            if save {
                report_save(book.names.save_current()?);
            }
        }
        Command::Mix {
            first,
            second,
            save,
        } => {
            book.mixes.set_inputs(&first, &second);
            let record = book.mixes.mix()?;
            println!("{}", render::record(record));
            if save {
                report_save(book.mixes.save_current()?);
            }
        }
        Command::Lookup { token, save } => {
            let record = book
                .api
                .search(&token)
                .await
                .context("lookup failed; use a hex code such as FF0000")?;
            println!("{}", render::record(record));
            if save {
                report_save(book.api.save_current()?);
            }
        }
        Command::List { collection } => {
            let kind = CollectionKind::from(collection);
            println!("{}", render::list(kind, book.list(kind)));
        }
        Command::Delete { collection, id } => {
            let kind = CollectionKind::from(collection);
            let before = book.list(kind).len();
            let remaining = book.delete(kind, id)?.len();
            if remaining < before {
                println!("{} removed {id}", "✓".green().bold());
            } else {
                println!("{} no record with id {id}", "!".yellow().bold());
            }
        }
    }
    Ok(())
}

fn report_save(inserted: bool) {
    if inserted {
        println!("{} saved", "✓".green().bold());
    } else {
        println!("{} already saved", "!".yellow().bold());
    }
}
