use clap::{App, Arg, ArgMatches};
use env_logger::Env;
use log::{error, info};
use nbtree_tools::{decode, encode, parse_flavor, Format, Result, FLAVORS, FORMATS};

fn convert(args: &ArgMatches) -> Result<()> {
    let input = args.value_of("input").unwrap_or_default();
    let output = args.value_of("output").unwrap_or_default();
    let from: Format = args.value_of("from").unwrap_or("nbt").parse()?;
    let to: Format = args.value_of("to").unwrap_or("nbt").parse()?;
    let flavor = parse_flavor(args.value_of("flavor").unwrap_or("big"))?;
    let gzip = args.is_present("gzip");

    let data = std::fs::read(input)?;
    let tag = decode(&data, from, flavor)?;
    let out = encode(&tag, to, flavor, gzip)?;
    std::fs::write(output, &out)?;

    info!("wrote {} bytes to {}", out.len(), output);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let matches = App::new("nbt-convert")
        .about("Convert between binary NBT, SNBT and JSON")
        .arg(Arg::with_name("input").takes_value(true).required(true))
        .arg(Arg::with_name("output").takes_value(true).required(true))
        .arg(
            Arg::with_name("from")
                .long("from")
                .takes_value(true)
                .required(true)
                .possible_values(FORMATS),
        )
        .arg(
            Arg::with_name("to")
                .long("to")
                .takes_value(true)
                .required(true)
                .possible_values(FORMATS),
        )
        .arg(
            Arg::with_name("flavor")
                .long("flavor")
                .takes_value(true)
                .possible_values(FLAVORS)
                .default_value("big"),
        )
        .arg(
            Arg::with_name("gzip")
                .long("gzip")
                .takes_value(false)
                .required(false),
        )
        .get_matches();

    if let Err(e) = convert(&matches) {
        error!("{}", e);
        std::process::exit(1);
    }
}
