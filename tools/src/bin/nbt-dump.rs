use clap::{App, Arg, ArgMatches};
use env_logger::Env;
use log::error;
use nbtree_tools::{decode, encode, parse_flavor, Format, Result, FLAVORS};
use std::io::Write;

fn dump(args: &ArgMatches) -> Result<()> {
    let path = args.value_of("file").unwrap_or_default();
    let flavor = parse_flavor(args.value_of("flavor").unwrap_or("big"))?;
    let format = match args.is_present("json") {
        true => Format::Json,
        false => Format::Snbt,
    };

    let data = std::fs::read(path)?;
    let tag = decode(&data, Format::Nbt, flavor)?;

    let mut out = std::io::stdout();
    if format == Format::Snbt && !tag.name().is_empty() {
        // Text has no root name. Show it as a single entry compound instead.
        writeln!(out, "{}", tag)?;
    } else {
        out.write_all(&encode(&tag, format, flavor, false)?)?;
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let matches = App::new("nbt-dump")
        .about("Print an NBT file as text")
        .arg(Arg::with_name("file").takes_value(true).required(true))
        .arg(
            Arg::with_name("flavor")
                .long("flavor")
                .takes_value(true)
                .possible_values(FLAVORS)
                .default_value("big"),
        )
        .arg(
            Arg::with_name("json")
                .long("json")
                .takes_value(false)
                .required(false),
        )
        .get_matches();

    if let Err(e) = dump(&matches) {
        error!("{}", e);
        std::process::exit(1);
    }
}
