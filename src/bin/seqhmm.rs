use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::info;
use seqhmm::cli::{self, OutputStyle};
use seqhmm::io::{read_string, write_string};
use seqhmm::profile::ProfileParams;

#[derive(Parser, Debug)]
#[clap(author, about, version)]
struct Opts {
    /// Print results as JSON instead of tab separated tables
    #[clap(long, global = true)]
    json: bool,
    /// Write the output into this file instead of stdout
    #[clap(short, long, global = true)]
    output: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct ProfileOpts {
    /// Input document filename (`-` for stdin)
    input: String,
    /// JSON file of `{"theta": .., "pseudocount": ..}`
    #[clap(long)]
    params: Option<String>,
    /// Gap fraction threshold of insert columns
    #[clap(long)]
    theta: Option<f64>,
    /// Pseudocount added to every legal transition and emission
    #[clap(long)]
    pseudocount: Option<f64>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Most probable hidden path of emissions
    Viterbi {
        /// Input document filename (`-` for stdin)
        input: String,
    },
    /// Probability of emissions
    Likelihood {
        /// Input document filename (`-` for stdin)
        input: String,
    },
    /// Posterior probability of states at each position
    SoftDecode {
        /// Input document filename (`-` for stdin)
        input: String,
    },
    /// Estimate a model from emissions and the hidden path
    Estimate {
        /// Input document filename (`-` for stdin)
        input: String,
    },
    /// Viterbi learning
    ViterbiLearn {
        /// Input document filename (`-` for stdin)
        input: String,
    },
    /// Baum-Welch learning
    BaumWelch {
        /// Input document filename (`-` for stdin)
        input: String,
    },
    /// Probability of a hidden path
    PathProb {
        /// Input document filename (`-` for stdin)
        input: String,
    },
    /// Construct a profile HMM from a multiple alignment
    Profile(ProfileOpts),
    /// Align a sequence to the profile HMM of a multiple alignment
    Align(ProfileOpts),
}

///
/// Parameters from `--params` overwritten by `--theta`/`--pseudocount`.
/// `None` if none of them is given, so the values of the document are used.
///
fn profile_params(opts: &ProfileOpts, text: &str) -> anyhow::Result<Option<ProfileParams>> {
    let base = match &opts.params {
        Some(filename) => {
            let json = read_string(filename)?;
            let params: ProfileParams = serde_json::from_str(&json)
                .with_context(|| format!("cannot parse params file {}", filename))?;
            Some(params)
        }
        None => None,
    };
    if base.is_none() && opts.theta.is_none() && opts.pseudocount.is_none() {
        return Ok(None);
    }
    let mut params = match base {
        Some(params) => params,
        None => document_params(text)?,
    };
    if let Some(theta) = opts.theta {
        params.theta = theta;
    }
    if let Some(sigma) = opts.pseudocount {
        params.pseudocount = Some(sigma);
    }
    params.validate()?;
    info!("params\n{}", params);
    Ok(Some(params))
}

/// `theta` and pseudocount written in the profile document itself
fn document_params(text: &str) -> anyhow::Result<ProfileParams> {
    use seqhmm::io::input::{AlignmentInput, ProfileAlignmentInput};
    if let Ok(input) = text.parse::<AlignmentInput>() {
        return Ok(input.params);
    }
    let input: ProfileAlignmentInput = text.parse()?;
    Ok(input.params)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts: Opts = Opts::parse();
    info!("opts={:?}", opts);
    let style = if opts.json {
        OutputStyle::Json
    } else {
        OutputStyle::Text
    };

    let read = |filename: &str| -> anyhow::Result<String> {
        read_string(filename).with_context(|| format!("cannot read {}", filename))
    };
    let output = match &opts.command {
        Commands::Viterbi { input } => cli::viterbi(&read(input)?, style)?,
        Commands::Likelihood { input } => cli::likelihood(&read(input)?, style)?,
        Commands::SoftDecode { input } => cli::soft_decode(&read(input)?, style)?,
        Commands::Estimate { input } => cli::estimate(&read(input)?, style)?,
        Commands::ViterbiLearn { input } => cli::viterbi_learn(&read(input)?, style)?,
        Commands::BaumWelch { input } => cli::baum_welch(&read(input)?, style)?,
        Commands::PathProb { input } => cli::path_prob(&read(input)?, style)?,
        Commands::Profile(p) => {
            let text = read(&p.input)?;
            cli::profile(&text, profile_params(p, &text)?, style)?
        }
        Commands::Align(p) => {
            let text = read(&p.input)?;
            cli::align(&text, profile_params(p, &text)?, style)?
        }
    };

    match &opts.output {
        Some(filename) => write_string(filename, &output)
            .with_context(|| format!("cannot write {}", filename))?,
        None => print!("{}", output),
    }
    Ok(())
}
