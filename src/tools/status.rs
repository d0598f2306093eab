//! Status Tool
//!
//! Runtime status of the Servings service, plus usage instructions for
//! assistants driving the scaling tools.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::config::RunMode;

/// Scaling instructions for AI assistants
pub const SCALING_INSTRUCTIONS: &str = r#"
# Servings Scaling Instructions

## Workflow

1. Call `list_recipes` to see the named base recipes and their serving counts.
2. Call `scale_recipe` with `recipe_id` and `target_servings`.
3. Show each ingredient as `formatted_quantity` + `unit_label` + `display_name`,
   e.g. "1 ½ medium tomato".
4. Report nutrition from `totals`.

To scale a custom list, pass `ingredients` (catalog ids, optionally with
`quantity`, `weight_grams` and `macros`) plus `base_servings` instead of a
`recipe_id`. Use `list_ingredients` for the valid ids.

## Rounding

| Ingredient | Shown as |
|------------|----------|
| Proteins and whole items | nearest whole number |
| Less than 1 | nearest 1/8 |
| 1 to 10 | nearest 1/4 |
| 10 or more | nearest whole number |

- `formatted_quantity` is for display only. Never add up formatted values.
- `totals` are computed from the exact, unrounded amounts.
- A formatted quantity of "" means the amount rounds to zero (e.g. a quarter
  of a red onion for one serving). Decide whether to hide or mention it.

## Errors

Scaling errors come back as `{"error": ..., "kind": ...}`:
- `invalid_servings` - servings must be a number greater than 0
- `unknown_ingredient` - the id is not in the catalog
- `invalid_quantity` - a quantity was negative
- `recipe_not_found` / `missing_recipe` - check the recipe id
"#;

/// Runtime status of the Servings service
#[derive(Debug, Clone, Serialize)]
pub struct ServingsStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Catalog information
    pub catalog_ingredients: usize,
    pub catalog_recipes: usize,

    /// Subscriber log information
    pub mode: &'static str,
    pub mailing_list_configured: bool,
    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
    mode: RunMode,
    mailing_list_configured: bool,
    catalog_ingredients: usize,
    catalog_recipes: usize,
}

impl StatusTracker {
    pub fn new(
        database_path: PathBuf,
        mode: RunMode,
        mailing_list_configured: bool,
        catalog_ingredients: usize,
        catalog_recipes: usize,
    ) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
            mode,
            mailing_list_configured,
            catalog_ingredients,
            catalog_recipes,
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> ServingsStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        ServingsStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            catalog_ingredients: self.catalog_ingredients,
            catalog_recipes: self.catalog_recipes,
            mode: self.mode.as_str(),
            mailing_list_configured: self.mailing_list_configured,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_catalog_and_mode() {
        let tracker = StatusTracker::new(
            PathBuf::from("/nonexistent/servings.db"),
            RunMode::Production,
            false,
            7,
            1,
        );
        let status = tracker.get_status();
        assert_eq!(status.catalog_ingredients, 7);
        assert_eq!(status.catalog_recipes, 1);
        assert_eq!(status.mode, "production");
        assert!(status.database_size_bytes.is_none());
        assert_eq!(status.process_id, std::process::id());
    }
}
