use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::models::common::Config;

const ENV_PREFIX: &str = "TX_DASHBOARD";

pub fn load_config<P: AsRef<Path>>(file_name: P) -> Result<Config> {
    // Build the path to the config file
    let manifest_dir = env!("CARGO_MANIFEST_DIR").to_string();
    let config_path = Path::new(&manifest_dir).join(file_name);
    info!("Config path: {}", config_path.to_string_lossy());

    // File is optional, every field has a default. Env vars like
    // TX_DASHBOARD__SERVER__PORT=9000 override the file.
    let settings = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("failed to read config file")?;

    let config: Config = settings
        .try_deserialize()
        .context("failed to parse config YAML")?;

    Ok(config)
}

// 1806808 -> "1,806,808"
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// Dollar amounts keep at most two decimals, trailing zeros dropped: 79692.76 -> "79,692.76", 0.3 -> "0.3"
pub fn format_usd(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = format_thousands(cents / 100);
    let fraction = cents % 100;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };

    match fraction {
        0 => format!("{sign}{whole}"),
        f if f % 10 == 0 => format!("{sign}{whole}.{}", f / 10),
        f => format!("{sign}{whole}.{f:02}"),
    }
}

// 0xfd29445e0716ae540dd85e2a5748641c070e5e77 -> 0xfd29...5e77
// Short values (labels such as "Titan Builder" are used in place of addresses) are kept as is.
pub fn shorten_address(address: &str) -> String {
    if !address.starts_with("0x") || address.chars().count() <= 10 {
        return address.to_string();
    }
    let chars: Vec<char> = address.chars().collect();
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000), "1,000");
        assert_eq!(format_thousands(1_806_808), "1,806,808");
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(79_692.76), "79,692.76");
        assert_eq!(format_usd(82_897.5), "82,897.5");
        assert_eq!(format_usd(0.3), "0.3");
        assert_eq!(format_usd(0.0), "0");
        assert_eq!(format_usd(31.1), "31.1");
    }

    #[test]
    fn test_shorten_address() {
        assert_eq!(
            shorten_address("0xfd29445e0716ae540dd85e2a5748641c070e5e77"),
            "0xfd29...5e77"
        );
        assert_eq!(shorten_address("Titan Builder"), "Titan Builder");
        assert_eq!(shorten_address("0x1234"), "0x1234");
    }
}
