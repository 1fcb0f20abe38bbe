use serde::Serialize;

use csv_signer::SignerError;

/// Outcome of a successfully executed command.
#[derive(Debug, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Report {
    Sign {
        output: String,
        digest: String,
        signature: String,
        algorithm: String,
    },
    Verify {
        file: String,
        digest: String,
        valid: bool,
    },
    Genkey {
        private_key: String,
        public_key: String,
        bits: usize,
    },
    Digest {
        file: String,
        digest: String,
    },
}

impl Report {
    /// An invalid signature is a normal result but still a failed command.
    pub fn success(&self) -> bool {
        !matches!(self, Report::Verify { valid: false, .. })
    }
}

#[derive(Serialize)]
struct Envelope<'a> {
    ok: bool,
    #[serde(flatten)]
    report: &'a Report,
}

#[derive(Serialize)]
struct ErrorReport<'a> {
    ok: bool,
    error: &'a str,
    message: String,
}

pub fn print(report: &Report, json: bool) {
    if json {
        print_json(&Envelope {
            ok: report.success(),
            report,
        });
        return;
    }

    match report {
        Report::Sign { output, digest, signature, .. } => {
            println!("content digest: {digest}");
            println!("signature: {signature}");
            println!("signed file written to: {output}");
        }
        Report::Verify { digest, valid, .. } => {
            println!("content digest: {digest}");
            if *valid {
                println!("signature valid");
            } else {
                eprintln!("signature verification failed");
            }
        }
        Report::Genkey { private_key, public_key, bits } => {
            println!("generated {bits}-bit RSA keypair");
            println!("private key: {private_key}");
            println!("public key: {public_key}");
        }
        Report::Digest { file, digest } => {
            println!("{digest}  {file}");
        }
    }
}

pub fn print_error(error: &anyhow::Error, json: bool) {
    if json {
        let kind = error
            .downcast_ref::<SignerError>()
            .map_or("internal", SignerError::kind);
        print_json(&ErrorReport {
            ok: false,
            error: kind,
            message: format!("{error:#}"),
        });
    } else {
        eprintln!("error: {error:#}");
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("error: serializing report: {e}"),
    }
}
