use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as ClapParser;
use pca_core::{PcaError, Policy, Proof};
use serde::Serialize;

/// Proof-Carrying Authorization checker: reads a policy file and a proof
/// file, parses both, and reports whether the proof establishes the
/// claimed formula under the policy (spec §6 "process-level contract").
#[derive(ClapParser)]
#[command(name = "pca")]
#[command(about = "Check a proof against a policy in a says-modality authorization logic")]
struct Cli {
    /// Path to the policy file (`name : Form ;` declarations).
    policy: PathBuf,

    /// Path to the typing-judgment file (`Proof : Form`).
    proof: PathBuf,

    /// Emit the outcome as a JSON object instead of plain text.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Outcome {
    success: bool,
    message: String,
}

/// Distinguishes a failure that never reached the core (file I/O, parse
/// error — always exit code 1 per spec §6) from a `PcaError` raised by
/// `verify`, whose exit code depends on its kind.
enum Failure {
    BeforeChecking(String),
    Checking(PcaError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => {
            emit(&cli, true, "ok");
            ExitCode::from(0)
        }
        Err(Failure::BeforeChecking(message)) => {
            emit(&cli, false, &message);
            ExitCode::from(1)
        }
        Err(Failure::Checking(err)) => {
            let code = err.exit_code() as u8;
            emit(&cli, false, &err.to_string());
            ExitCode::from(code)
        }
    }
}

fn run(cli: &Cli) -> Result<(), Failure> {
    let policy_src = fs::read_to_string(&cli.policy)
        .map_err(|e| Failure::BeforeChecking(format!("failed to read policy file: {}", e)))?;
    let proof_src = fs::read_to_string(&cli.proof)
        .map_err(|e| Failure::BeforeChecking(format!("failed to read proof file: {}", e)))?;

    let mut policy_parser = pca_core::Parser::new(&policy_src);
    let policy: Policy = policy_parser
        .parse_policy()
        .map_err(|e| Failure::BeforeChecking(format!("failed to parse policy: {}", e)))?;
    policy_parser
        .finish()
        .map_err(|e| Failure::BeforeChecking(format!("failed to parse policy: {}", e)))?;

    let mut proof_parser = pca_core::Parser::new(&proof_src);
    let (proof, claimed): (Proof, _) = proof_parser
        .parse_typing()
        .map_err(|e| Failure::BeforeChecking(format!("failed to parse typing judgment: {}", e)))?;
    proof_parser
        .finish()
        .map_err(|e| Failure::BeforeChecking(format!("failed to parse typing judgment: {}", e)))?;

    if !cli.json {
        println!("policy: {}", policy.to_concrete_string());
        println!("judgment: {} : {}", proof.to_concrete_string(), claimed.to_concrete_string());
    }

    pca_core::verify(&policy, &proof, &claimed).map_err(Failure::Checking)
}

fn emit(cli: &Cli, success: bool, message: &str) {
    if cli.json {
        let outcome = Outcome { success, message: message.to_string() };
        match serde_json::to_string_pretty(&outcome) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("error: failed to serialize outcome: {}", e),
        }
    } else if success {
        println!("{}", message);
    } else {
        eprintln!("error: {}", message);
    }
}
