use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use digit_ring::{
    io::{load_config, load_ring, save_decimal},
    DigitRing, RingConfig,
};
use log::{debug, info};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    debug!("Starting with {args:#?}.");
    let mut config = match &args.config {
        Some(path) => load_config(path).await?,
        None => RingConfig::default(),
    };
    if let Some(base) = args.base {
        config = config.base(base).validate()?;
    }
    if let Some(scale_base) = args.scale_base {
        config = config.scale_base(scale_base).validate()?;
    }

    let mut ring = match (&args.value, &args.input) {
        (Some(value), _) => DigitRing::from_decimal_with_base(value, config.base)?,
        (None, Some(input)) => load_ring(input, config.base).await?,
        (None, None) => bail!("Either an input file or `--value` is required."),
    };
    info!("Loaded {ring}.");

    match args.sort {
        Some(Order::Asc) => ring.sort_ascending(),
        Some(Order::Desc) => ring.sort_descending(),
        None => {}
    }
    match args.shift {
        Some(Shift::Left) => ring.shift_left(),
        Some(Shift::Right) => ring.shift_right(),
        None => {}
    }
    if let Some(modulo) = &args.modulo {
        let divisor = DigitRing::from_decimal_with_base(modulo, config.base)?;
        ring = ring.residue(&divisor)?;
    }
    if args.scale {
        ring = ring.change_scale_to(config.scale_base)?;
    }

    if args.report {
        print!("{}", ring.to_report()?);
    } else {
        println!("{ring}");
    }
    if let Some(output) = &args.output {
        save_decimal(output, &ring).await?;
        info!("Saved {} to {output}.", ring.to_decimal_string());
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Order {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Shift {
    Left,
    Right,
}

#[derive(Debug, Parser)]
#[clap(
    author,
    version,
    about = "Loads a decimal number into a circular list of base-3 digits.\n\
Optionally sorts or rotates the digits, takes a residue, changes scale,\n\
and saves the decimal value of the result."
)]
struct Args {
    #[clap(help = "File holding the decimal number, possibly over several lines.")]
    input: Option<String>,
    #[clap(short, long, help = "Decimal number to use instead of an input file.")]
    value: Option<String>,
    #[clap(short, long, help = "TOML file with `base` and `scale_base`.")]
    config: Option<String>,
    #[clap(short, long, help = "Base of the digit list, overriding the config.")]
    base: Option<u8>,
    #[clap(long, help = "Base used by `--scale`, overriding the config.")]
    scale_base: Option<u8>,
    #[clap(long, value_enum, help = "Sort the digits.")]
    sort: Option<Order>,
    #[clap(long, value_enum, help = "Rotate the digits by one position.")]
    shift: Option<Shift>,
    #[clap(short, long, help = "Decimal divisor to take the residue against.")]
    modulo: Option<String>,
    #[clap(short, long, action, help = "Convert the result to the scale base.")]
    scale: bool,
    #[clap(short, long, action, help = "Print a TOML report instead of the digits.")]
    report: bool,
    #[clap(short, long, help = "File to save the decimal value of the result to.")]
    output: Option<String>,
}
