//! Command-line arguments for `unlz4r`.
//!
//! [`Args`] is the raw clap surface. [`Args::into_plan`] validates it and
//! resolves defaults (environment, stdin handling, recursive expansion) into
//! an [`Invocation`] that `main` dispatches without further decisions.

use anyhow::{bail, Context};
use clap::{ArgAction, Parser};

use crate::cli::constants::{DISPLAY_LEVEL_DEFAULT, LZ4_EXTENSION};
use crate::config::DecoderConfig;
use crate::io::file_io::{NUL_MARK, STDIN_MARK, STDOUT_MARK};
use crate::io::prefs::Prefs;
use crate::util::create_file_list;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "unlz4r")]
#[command(version)]
#[command(about = "Decompress LZ4 frame files", long_about = None)]
pub struct Args {
    /// Input files; `-` or no file reads standard input
    pub files: Vec<String>,

    /// Write decoded data to standard output
    #[arg(short = 'c', long = "stdout")]
    pub stdout: bool,

    /// Destination file (single input only; `-` for standard output)
    #[arg(short = 'o', long = "output", value_name = "FILE", conflicts_with = "stdout")]
    pub output: Option<String>,

    /// Decode and verify the input without writing anything
    #[arg(short = 't', long = "test")]
    pub test: bool,

    /// Overwrite existing output files
    #[arg(short = 'f', long = "force")]
    pub force: bool,

    /// Keep source files (default)
    #[arg(short = 'k', long = "keep", conflicts_with = "remove")]
    pub keep: bool,

    /// Remove source files after successful decoding
    #[arg(long = "rm")]
    pub remove: bool,

    /// Walk directories and decode every `.lz4` file found
    #[arg(short = 'r', long = "recursive")]
    pub recursive: bool,

    /// Number of files decoded in parallel (0 = one per core)
    #[arg(short = 'T', long = "threads", value_name = "N")]
    pub threads: Option<usize>,

    /// Verify checksums and declared content size
    #[arg(long = "verify")]
    pub verify: bool,

    /// Skip checksum verification even if LZ4_VERIFY is set
    #[arg(long = "no-verify", conflicts_with = "verify")]
    pub no_verify: bool,

    /// Increase verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Decrease verbosity (repeatable)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,
}

/// Where decoded data goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Every input is written to standard output, in order.
    Stdout,
    /// Output is decoded and dropped (`--test`).
    Discard,
    /// Single input written to an explicit path.
    File(String),
    /// Each `name.lz4` is written to `name`.
    StripSuffix,
}

impl Destination {
    /// Suffix argument for `decompress_multiple_filenames`.
    pub fn suffix(&self) -> &str {
        match self {
            Destination::Stdout => STDOUT_MARK,
            Destination::Discard => NUL_MARK,
            Destination::File(_) | Destination::StripSuffix => LZ4_EXTENSION,
        }
    }
}

/// A validated, fully-resolved invocation.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub inputs: Vec<String>,
    pub destination: Destination,
    pub prefs: Prefs,
    pub display_level: u32,
}

impl Args {
    /// Resolve these arguments against the environment (`LZ4_VERIFY`,
    /// `LZ4_NBWORKERS`).
    pub fn into_plan(self) -> anyhow::Result<Invocation> {
        let verify_env = std::env::var(crate::config::ENV_VERIFY).ok();
        let workers_env = std::env::var(crate::config::ENV_NBWORKERS).ok();
        self.into_plan_with_env(verify_env.as_deref(), workers_env.as_deref())
    }

    /// Same as [`Args::into_plan`] with the environment passed explicitly.
    pub fn into_plan_with_env(
        self,
        verify_env: Option<&str>,
        workers_env: Option<&str>,
    ) -> anyhow::Result<Invocation> {
        let mut inputs: Vec<String> = if self.files.is_empty() {
            vec![STDIN_MARK.to_string()]
        } else {
            self.files
                .iter()
                .map(|f| if f == "-" { STDIN_MARK.to_string() } else { f.clone() })
                .collect()
        };

        if self.recursive {
            let expanded = create_file_list(&inputs, Some(LZ4_EXTENSION))
                .context("cannot expand input directories")?;
            inputs = expanded
                .into_iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect();
            if inputs.is_empty() {
                bail!("no {} files found", LZ4_EXTENSION);
            }
        }

        let reads_stdin = inputs.iter().any(|i| i == STDIN_MARK);
        if reads_stdin && inputs.len() > 1 {
            bail!("standard input cannot be combined with other inputs");
        }

        let destination = if self.test {
            Destination::Discard
        } else if self.stdout {
            Destination::Stdout
        } else if let Some(out) = self.output {
            if inputs.len() > 1 {
                bail!("--output requires a single input file");
            }
            if out == "-" {
                Destination::Stdout
            } else {
                Destination::File(out)
            }
        } else if reads_stdin {
            Destination::Stdout
        } else {
            Destination::StripSuffix
        };

        let verify_checksums = if self.verify {
            true
        } else if self.no_verify {
            false
        } else {
            DecoderConfig::from_env_value(verify_env).verify_checksums
        };

        let nb_workers = match self.threads {
            Some(0) | None => init_nb_workers_env(workers_env, self.threads.is_none()),
            Some(n) => n.min(crate::config::NB_WORKERS_MAX),
        };

        let prefs = Prefs {
            overwrite: self.force,
            test_mode: self.test,
            remove_src_file: self.remove,
            preserve_file_stat: true,
            verify_checksums,
            nb_workers,
        };

        let display_level = (DISPLAY_LEVEL_DEFAULT + u32::from(self.verbose))
            .saturating_sub(u32::from(self.quiet))
            .min(4);

        Ok(Invocation {
            inputs,
            destination,
            prefs,
            display_level,
        })
    }
}

/// Worker count when `-T` is absent or zero. An explicit `-T0` means one per
/// core regardless of `LZ4_NBWORKERS`.
fn init_nb_workers_env(workers_env: Option<&str>, from_env: bool) -> usize {
    if from_env {
        crate::config::init_nb_workers_from(workers_env)
    } else {
        crate::config::nb_workers_default()
    }
}

/// Parse the process arguments.
pub fn parse_args() -> Args {
    Args::parse()
}
