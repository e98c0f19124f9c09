use std::{env, fs};

use anyhow::Context;
use dotenvy::dotenv;
use secret_share::{Config, shares};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), anyhow::Error> {
    if let Err(err) = dotenv()
        && !err.not_found()
    {
        return Err(anyhow::anyhow!("Error while loading .env file: {err}"));
    }

    let config = match Config::parse_environment() {
        Ok(c) => c,
        Err(e) => {
            return Err(anyhow::anyhow!(
                "Failed to parse environment variables for configuration: {e}"
            ));
        }
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_filter(Into::<LevelFilter>::into(config.log_level)),
        )
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("0") => run_split(&args[1..]),
        Some("1") => run_combine(&args[1..]),
        Some(other) => {
            print_usage();
            Err(anyhow::anyhow!("unknown mode {other}, expected 0 or 1"))
        }
        None => {
            print_usage();
            Err(anyhow::anyhow!("missing mode argument"))
        }
    }
}

fn print_usage() {
    eprintln!("Usage: secret-share MODE param1 param2 ... paramk");
    eprintln!("For MODE = 0, secret-share 0 input_path N T output_prefix");
    eprintln!("MODE = 0 splits input_path into N share files, T is the threshold.");
    eprintln!("For MODE = 1, secret-share 1 N output_path input_path_1 ... input_path_N");
    eprintln!("MODE = 1 reconstructs the plaintext from N share files.");
}

fn run_split(args: &[String]) -> Result<(), anyhow::Error> {
    let [input_path, n, t, output_prefix] = args else {
        print_usage();
        return Err(anyhow::anyhow!(
            "mode 0 takes exactly 4 arguments: input_path N T output_prefix"
        ));
    };
    let n: u64 = n
        .parse()
        .with_context(|| format!("share count must be an integer, got {n}"))?;
    let t: u64 = t
        .parse()
        .with_context(|| format!("threshold must be an integer, got {t}"))?;

    let data =
        fs::read(input_path).with_context(|| format!("failed to read input file {input_path}"))?;

    let share_buffers = shares::construct(&data, n, t, &mut rand::rng())?;

    for (i, buffer) in share_buffers.iter().enumerate() {
        let path = format!("{output_prefix}{i}");
        fs::write(&path, buffer).with_context(|| format!("failed to write share file {path}"))?;
    }
    info!(
        input = %input_path,
        shares = n,
        threshold = t,
        "wrote share files {output_prefix}0 through {output_prefix}{}",
        n - 1
    );
    Ok(())
}

fn run_combine(args: &[String]) -> Result<(), anyhow::Error> {
    let Some((n, rest)) = args.split_first() else {
        print_usage();
        return Err(anyhow::anyhow!(
            "mode 1 takes arguments: N output_path input_path_1 ... input_path_N"
        ));
    };
    let n: usize = n
        .parse()
        .with_context(|| format!("share count must be an integer, got {n}"))?;
    let Some((output_path, input_paths)) = rest.split_first() else {
        print_usage();
        return Err(anyhow::anyhow!("missing output_path argument"));
    };
    if input_paths.len() != n {
        print_usage();
        return Err(anyhow::anyhow!(
            "expected {n} share files, got {}",
            input_paths.len()
        ));
    }

    let share_buffers = input_paths
        .iter()
        .map(|path| fs::read(path).with_context(|| format!("failed to read share file {path}")))
        .collect::<Result<Vec<Vec<u8>>, anyhow::Error>>()?;

    let plaintext = shares::reconstruct(&share_buffers)?;

    fs::write(output_path, &plaintext)
        .with_context(|| format!("failed to write output file {output_path}"))?;
    info!(
        output = %output_path,
        bytes = plaintext.len(),
        shares = n,
        "reconstructed plaintext"
    );
    Ok(())
}
