//! quantum-lab: run the simulated protocols from the command line.
//!
//! Usage:
//!   quantum-lab key-agreement --length 256
//!   quantum-lab random-bits 64
//!   quantum-lab encrypt "hello" --algorithm CRYSTALS-Kyber
//!   quantum-lab attack intercept-resend
//!
//! Every command prints one JSON document on stdout.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::debug;
use serde::Serialize;

use quantum_lab::attack::{estimate_grover, estimate_shor};
use quantum_lab::bb84::bits_to_binary;
use quantum_lab::{AlgorithmProfile, LabConfig, QuantumLab};

/// Seeded quantum protocol simulations
#[derive(Parser)]
#[command(name = "quantum-lab")]
#[command(about = "Classical simulations of BB84, QRNG and toy PQC transforms", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Fixed seed for reproducible output (overrides QUANTUM_LAB_SEED)
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Largest bit count a request may ask for (overrides QUANTUM_LAB_MAX_BITS)
    #[arg(long, global = true)]
    max_bits: Option<usize>,

    /// Pretty-print JSON output
    #[arg(short, long, global = true)]
    pretty: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Agree on a shared key with BB84
    KeyAgreement {
        /// Identifier echoed back in the response
        #[arg(short, long, default_value = "cli")]
        key_id: String,
        /// Number of BB84 rounds to run
        #[arg(short, long, default_value_t = 256)]
        length: usize,
    },
    /// Draw random bits from measured superpositions
    RandomBits {
        /// How many bits to draw
        #[arg(default_value_t = 32)]
        count: usize,
    },
    /// Wrap a message in the base64 envelope
    Encrypt {
        message: String,
        #[arg(short, long, default_value = "CRYSTALS-Kyber")]
        algorithm: String,
    },
    /// Open a base64 envelope
    Decrypt { ciphertext: String },
    /// Hash a document and derive a measurement signature from the digest
    Sign { document: String },
    /// Rotate a bit string through an algorithm profile
    Transform {
        /// Bits such as 10110
        bits: String,
        #[arg(short, long, default_value = "Kyber")]
        algorithm: String,
    },
    /// Simulate an attack on the key agreement
    Attack {
        /// intercept-resend, photon-number-splitting, man-in-the-middle, shor, grover
        protocol: String,
    },
    /// Resource estimates for Shor and Grover
    Estimate {
        /// RSA modulus size for Shor
        #[arg(long, default_value_t = 2048)]
        rsa_bits: u32,
        /// Search space size for Grover
        #[arg(long, default_value_t = 1_000_000)]
        search_space: u64,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TransformOutput {
    algorithm: &'static str,
    input: String,
    output: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let config = build_config(&cli)?;
    debug!("config: {:?}", config);
    let lab = QuantumLab::new(config)?;

    let output = match cli.command {
        Commands::KeyAgreement { key_id, length } => {
            serde_json::to_value(lab.run_key_agreement(key_id, length)?)?
        }
        Commands::RandomBits { count } => serde_json::to_value(lab.generate_random_bits(count)?)?,
        Commands::Encrypt { message, algorithm } => {
            serde_json::to_value(lab.encrypt(&message, &algorithm)?)?
        }
        Commands::Decrypt { ciphertext } => serde_json::to_value(lab.decrypt(&ciphertext)?)?,
        Commands::Sign { document } => serde_json::to_value(lab.sign_document(&document)?)?,
        Commands::Transform { bits, algorithm } => {
            let profile = AlgorithmProfile::from_name(&algorithm)
                .with_context(|| format!("unknown algorithm profile {:?}", algorithm))?;
            let input = parse_bits(&bits)?;
            let output = lab.transform(&input, profile)?;
            serde_json::to_value(TransformOutput {
                algorithm: profile.name(),
                input: bits_to_binary(&input),
                output: bits_to_binary(&output),
            })?
        }
        Commands::Attack { protocol } => serde_json::to_value(lab.simulate_attack(&protocol))?,
        Commands::Estimate {
            rsa_bits,
            search_space,
        } => serde_json::json!({
            "shor": estimate_shor(rsa_bits)?,
            "grover": estimate_grover(search_space)?,
        }),
    };

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", rendered);
    Ok(())
}

/// Environment first, then command-line flags on top.
fn build_config(cli: &Cli) -> Result<LabConfig> {
    let mut config = LabConfig::from_env().context("reading QUANTUM_LAB_* environment")?;
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(max) = cli.max_bits {
        config = config.with_max_request_bits(max);
    }
    Ok(config)
}

fn parse_bits(text: &str) -> Result<Vec<bool>> {
    text.chars()
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            other => bail!("invalid bit {:?} in {:?}", other, text),
        })
        .collect()
}
