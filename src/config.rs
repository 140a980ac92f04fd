// config.rs: Decoder configuration and environment-driven defaults.
//
// Compile-time constants live here alongside `DecoderConfig`, the only knob
// the frame decoder itself takes. Environment overrides follow the same
// pattern throughout: a `*_from(Option<&str>)` function holds the parsing
// logic so it can be tested without touching the process environment. The
// CLI reads the real variables and hands their values in.

/// Environment variable selecting the number of decoding worker threads.
pub const ENV_NBWORKERS: &str = "LZ4_NBWORKERS";

/// Environment variable enabling checksum verification (`1`/`0`).
pub const ENV_VERIFY: &str = "LZ4_VERIFY";

// Maximum number of decoding worker threads selectable at runtime.
pub const NB_WORKERS_MAX: usize = 200;

/// Default worker count: one per logical core, capped at [`NB_WORKERS_MAX`].
pub fn nb_workers_default() -> usize {
    num_cpus::get().clamp(1, NB_WORKERS_MAX)
}

// ─────────────────────────────────────────────────────────────────────────────
// DecoderConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Options for a [`FrameDecoder`](crate::frame::FrameDecoder).
///
/// The default decoder is permissive: header, block, and content checksums
/// are read to keep the stream aligned but never compared, and the declared
/// content size is not cross-checked. `verify_checksums` turns all four
/// checks on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderConfig {
    pub verify_checksums: bool,
}

impl DecoderConfig {
    pub const fn new() -> Self {
        DecoderConfig {
            verify_checksums: false,
        }
    }

    /// Builder-style setter for [`DecoderConfig::verify_checksums`].
    pub const fn verify_checksums(mut self, verify: bool) -> Self {
        self.verify_checksums = verify;
        self
    }

    /// Defaults overridden by a `LZ4_VERIFY` value.
    pub fn from_env_value(env_val: Option<&str>) -> Self {
        let mut config = Self::new();
        if let Some(env) = env_val {
            match parse_switch(env) {
                Some(verify) => config.verify_checksums = verify,
                None => crate::displaylevel!(
                    2,
                    "Ignore environment variable setting {}={}: expected 0 or 1\n",
                    ENV_VERIFY,
                    env
                ),
            }
        }
        config
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Worker count
// ─────────────────────────────────────────────────────────────────────────────

/// Worker count from a `LZ4_NBWORKERS` value.
///
/// A valid unsigned value is clamped to `1..=NB_WORKERS_MAX`; `0` means
/// auto-detect. Unset or non-numeric values fall back to
/// [`nb_workers_default`], warning about the latter.
pub fn init_nb_workers_from(env_val: Option<&str>) -> usize {
    if let Some(env) = env_val {
        match env.trim().parse::<usize>() {
            Ok(0) => return nb_workers_default(),
            Ok(n) => return n.min(NB_WORKERS_MAX),
            Err(_) => crate::displaylevel!(
                2,
                "Ignore environment variable setting {}={}: not a valid unsigned value\n",
                ENV_NBWORKERS,
                env
            ),
        }
    }
    nb_workers_default()
}
