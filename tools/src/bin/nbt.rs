use std::io::{self, Write};

use clap::{App, Arg, ArgMatches};
use env_logger::Env;
use log::{info, LevelFilter};
use nbtree::NamedTag;
use nbtree_tools::{load, render, run_shell, InputFormat, OutputFormat, Result};

fn output_format(args: &ArgMatches) -> OutputFormat {
    let pretty = !args.is_present("no-format");
    if args.is_present("bin") {
        OutputFormat::Binary
    } else if args.is_present("json") {
        OutputFormat::Json { pretty }
    } else {
        OutputFormat::Snbt { pretty }
    }
}

fn run(args: &ArgMatches) -> Result<()> {
    let file = args.value_of("file").ok_or("no input file given")?;
    let format = match args.is_present("snbt") {
        true => InputFormat::Text,
        false => InputFormat::Binary,
    };

    let data = std::fs::read(file)?;
    info!("read {} bytes from {}", data.len(), file);

    let mut tag = load(&data, format)?;

    if args.is_present("interactive") {
        let (name, mut root) = tag.into_parts();
        let stdin = io::stdin();
        run_shell(&mut root, stdin.lock(), io::stdout(), !args.is_present("no-format"))?;
        tag = NamedTag::new(name, root);

        // The shell prints what it is asked for; only save the edited tree
        // if somewhere to save it was given.
        if !args.is_present("out") {
            return Ok(());
        }
    }

    let output = render(&tag, output_format(args))?;
    match args.value_of("out") {
        Some(path) => {
            std::fs::write(path, &output)?;
            info!("wrote {} bytes to {}", output.len(), path);
        }
        None => io::stdout().write_all(&output)?,
    }

    Ok(())
}

fn main() {
    let matches = App::new("nbt")
        .about("inspect, convert and edit NBT documents")
        .arg(
            Arg::with_name("file")
                .takes_value(true)
                .required(true)
                .help("NBT file to read, gzipped binary unless --snbt is given"),
        )
        .arg(
            Arg::with_name("snbt")
                .long("snbt")
                .takes_value(false)
                .help("read the input as SNBT text"),
        )
        .arg(
            Arg::with_name("out")
                .long("out")
                .takes_value(true)
                .help("write the result to this file instead of stdout"),
        )
        .arg(
            Arg::with_name("no-format")
                .long("no-format")
                .takes_value(false)
                .help("compact output with no whitespace"),
        )
        .arg(
            Arg::with_name("bin")
                .long("bin")
                .takes_value(false)
                .conflicts_with("json")
                .help("write gzipped binary NBT"),
        )
        .arg(
            Arg::with_name("json")
                .long("json")
                .takes_value(false)
                .help("write a JSON view of the tree"),
        )
        .arg(
            Arg::with_name("debug")
                .long("debug")
                .takes_value(false)
                .help("trace decoding to stderr"),
        )
        .arg(
            Arg::with_name("interactive")
                .long("interactive")
                .takes_value(false)
                .help("explore and edit the tree with keys, get and set"),
        )
        .get_matches();

    let mut logger = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    logger.format_timestamp(None);
    if matches.is_present("debug") {
        logger.filter_level(LevelFilter::Trace);
    }
    logger.init();

    if let Err(e) = run(&matches) {
        eprintln!("nbt: {}", e);
        std::process::exit(1);
    }
}
