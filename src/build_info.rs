//! Build information module
//!
//! Compile-time constants for build number and timestamp.

use serde::Serialize;

/// Build number, incremented on each recompilation
pub const BUILD_NUMBER: u64 = match option_env!("SERVINGS_BUILD_NUMBER") {
    Some(s) => match parse_u64(s) {
        Some(n) => n,
        None => 0,
    },
    None => 0,
};

/// Build timestamp in ISO 8601 format
pub const BUILD_TIMESTAMP: &str = match option_env!("SERVINGS_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Package description from Cargo.toml
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Parse a decimal u64 in a const context
const fn parse_u64(s: &str) -> Option<u64> {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return None;
    }
    let mut result: u64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b < b'0' || b > b'9' {
            return None;
        }
        result = result * 10 + (b - b'0') as u64;
        i += 1;
    }
    Some(result)
}

/// Build information for the status tool
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub description: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: BUILD_NUMBER,
            build_timestamp: BUILD_TIMESTAMP,
            description: DESCRIPTION,
        }
    }
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self::current()
    }
}

/// Banner text, including the size of the loaded catalog
pub fn startup_banner(catalog_ingredients: usize, catalog_recipes: usize) -> Vec<String> {
    let info = BuildInfo::current();
    let rule = "=".repeat(47);
    vec![
        rule.clone(),
        "  Servings - recipe scaling server".to_string(),
        format!("  Version: {} | Build: {}", info.version, info.build_number),
        format!("  Compiled: {}", info.build_timestamp),
        format!(
            "  Catalog: {} ingredients | {} recipes",
            catalog_ingredients, catalog_recipes
        ),
        rule,
    ]
}

/// Print the startup banner to stderr
pub fn print_startup_banner(catalog_ingredients: usize, catalog_recipes: usize) {
    for line in startup_banner(catalog_ingredients, catalog_recipes) {
        eprintln!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_u64() {
        assert_eq!(parse_u64("42"), Some(42));
        assert_eq!(parse_u64("0"), Some(0));
        assert_eq!(parse_u64(""), None);
        assert_eq!(parse_u64("4x2"), None);
    }

    #[test]
    fn test_build_info_uses_package_metadata() {
        let info = BuildInfo::current();
        assert_eq!(info.name, "servings");
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_banner_reports_catalog_size() {
        let lines = startup_banner(7, 1);
        assert_eq!(lines.first(), lines.last());
        assert!(lines.iter().any(|l| l.contains("Servings - recipe scaling server")));
        assert!(lines.contains(&"  Catalog: 7 ingredients | 1 recipes".to_string()));
        assert!(lines.iter().any(|l| l.contains(VERSION)));
    }
}
