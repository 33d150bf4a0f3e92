use std::io::Read;
use std::path::PathBuf;

pub fn read_stdin() -> anyhow::Result<Vec<u8>> {
    let mut buf = Vec::new();
    std::io::stdin().read_to_end(&mut buf)?;
    Ok(buf)
}

/// Short human-readable token count: `999`, `1.0k`, `1.00M`.
///
/// Buckets compare the signed value, so any negative count prints as a
/// plain integer.
pub fn format_tokens(tokens: Option<i64>) -> String {
    let Some(n) = tokens else {
        return "0".to_string();
    };
    if n < 1_000 {
        n.to_string()
    } else if n < 1_000_000 {
        format!("{:.1}k", n as f64 / 1e3)
    } else {
        format!("{:.2}M", n as f64 / 1e6)
    }
}

/// Best-effort `.env` bootstrap. Variables already set in the process
/// environment win. Returns the file that was loaded, if any.
#[cfg(feature = "dotenv")]
pub fn load_env_file() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

#[cfg(not(feature = "dotenv"))]
pub fn load_env_file() -> Option<PathBuf> {
    None
}
