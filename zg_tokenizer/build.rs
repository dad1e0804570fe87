// build.rs - TOML-driven constant generation for tokenizer limits
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    lexical: LexicalLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct LexicalLimits {
    max_expression_length: usize,
    max_token_count: usize,
    max_grouping_depth: usize,
    max_span_length: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    max_log_message_length: usize,
    memory_log_capacity: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=ZG_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=ZG_CONFIG_DIR");

    let profile = env::var("ZG_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("ZG_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of zg_tokenizer directory)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_EXPRESSION_LENGTH: usize = 10_000_000;

    let lexical = &config.lexical;

    if lexical.max_expression_length == 0
        || lexical.max_token_count == 0
        || lexical.max_grouping_depth == 0
        || lexical.max_span_length == 0
    {
        panic!("LIMITS: lexical limits must be non-zero");
    }

    if lexical.max_expression_length > ABSOLUTE_MAX_EXPRESSION_LENGTH {
        panic!("LIMITS: max_expression_length exceeds absolute maximum");
    }

    // A valid expression nested d deep needs at least 2d + 1 characters
    if lexical.max_grouping_depth < lexical.max_expression_length / 2 {
        panic!("LIMITS: max_grouping_depth must be at least half of max_expression_length");
    }

    // Input length is the only size guard a valid expression can hit
    if lexical.max_token_count < lexical.max_expression_length {
        panic!("LIMITS: max_token_count must be at least max_expression_length");
    }

    if lexical.max_span_length != lexical.max_expression_length {
        panic!("LIMITS: max_span_length must equal max_expression_length");
    }

    if config.logging.max_log_message_length < 64 {
        panic!("LIMITS: max_log_message_length too small (min: 64)");
    }

    if profile == "production" && lexical.max_expression_length > 1_000_000 {
        panic!("PRODUCTION: max_expression_length too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod lexical {{
        pub const MAX_EXPRESSION_LENGTH: usize = {};
        pub const MAX_TOKEN_COUNT: usize = {};
        pub const MAX_GROUPING_DEPTH: usize = {};
        pub const MAX_SPAN_LENGTH: usize = {};
    }}

    pub mod logging {{
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const MEMORY_LOG_CAPACITY: usize = {};
    }}
}}
"#,
        profile,
        config.lexical.max_expression_length,
        config.lexical.max_token_count,
        config.lexical.max_grouping_depth,
        config.lexical.max_span_length,
        config.logging.max_log_message_length,
        config.logging.memory_log_capacity,
    );

    fs::write(output_path, constants_code).unwrap();
}
