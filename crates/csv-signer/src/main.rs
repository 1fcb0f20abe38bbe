use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

use csv_signer::signing::RSA_KEY_BITS;
use csv_signer::{
    KeyGenOptions, RecordSigner, RsaSigner, RsaVerifier,
    digest_file, sign_file, verify_file, write_keypair,
};

mod output;

use output::Report;

#[derive(Parser)]
#[command(
    name = "csv-signer",
    version,
    about = "Sign delimited text files with a trailing signature record and verify them",
    arg_required_else_help = true
)]
struct Args {
    /// Emit a JSON report on stdout.
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug). Logs go to stderr.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign INPUT with PRIVATE_KEY and write it, plus a signature line, to OUTPUT.
    Sign {
        input: PathBuf,
        output: PathBuf,
        private_key: PathBuf,
    },
    /// Verify the signature line of FILE against PUBLIC_KEY.
    Verify { file: PathBuf, public_key: PathBuf },
    /// Generate an RSA keypair as unencrypted PEM files.
    Genkey {
        private_key_out: PathBuf,
        public_key_out: PathBuf,
        #[arg(long, default_value_t = RSA_KEY_BITS)]
        bits: usize,
        /// Derive the key from a seed. Only for fixtures and tests.
        #[arg(long)]
        seed: Option<String>,
    },
    /// Print the content digest of FILE, ignoring a signature line if present.
    Digest { file: PathBuf },
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => return usage(e),
    };
    init_logging(args.verbose);

    match run(args.command) {
        Ok(report) => {
            output::print(&report, args.json);
            if report.success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            output::print_error(&e, args.json);
            ExitCode::FAILURE
        }
    }
}

fn usage(error: clap::Error) -> ExitCode {
    let _ = error.print();
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn run(command: Command) -> Result<Report> {
    match command {
        Command::Sign { input, output, private_key } => sign(&input, &output, &private_key),
        Command::Verify { file, public_key } => verify(&file, &public_key),
        Command::Genkey { private_key_out, public_key_out, bits, seed } => {
            genkey(&private_key_out, &public_key_out, KeyGenOptions { bits, seed })
        }
        Command::Digest { file } => {
            let digest = digest_file(&file)
                .with_context(|| format!("computing digest of {}", file.display()))?;
            Ok(Report::Digest {
                file: file.display().to_string(),
                digest: digest.to_hex(),
            })
        }
    }
}

fn sign(input: &Path, output: &Path, private_key: &Path) -> Result<Report> {
    let signer = RsaSigner::from_pem_file(private_key).context("loading private key")?;
    let signed = sign_file(input, output, &signer)
        .with_context(|| format!("signing {}", input.display()))?;

    Ok(Report::Sign {
        output: output.display().to_string(),
        digest: signed.digest.to_hex(),
        signature: signed.trailer.signature_hex().to_owned(),
        algorithm: signer.algorithm().to_owned(),
    })
}

fn verify(file: &Path, public_key: &Path) -> Result<Report> {
    let verifier = RsaVerifier::from_pem_file(public_key).context("loading public key")?;
    let verification = verify_file(file, &verifier)
        .with_context(|| format!("verifying {}", file.display()))?;

    Ok(Report::Verify {
        file: file.display().to_string(),
        digest: verification.digest.to_hex(),
        valid: verification.valid,
    })
}

fn genkey(private_key_out: &Path, public_key_out: &Path, options: KeyGenOptions) -> Result<Report> {
    write_keypair(private_key_out, public_key_out, &options).context("generating keypair")?;

    Ok(Report::Genkey {
        private_key: private_key_out.display().to_string(),
        public_key: public_key_out.display().to_string(),
        bits: options.bits,
    })
}
