//! Build script for nixie-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates clock.toml and bakes it into the binary as `CLOCK_CONFIG`

use std::env;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use nixie_core::config::{ButtonLayout, ClockConfig};

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    setup_linker(&out_dir);
    let config = load_config();
    generate_config(&out_dir, &config);
}

/// Set up linker search paths for memory.x
fn setup_linker(out_dir: &Path) {
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Read, parse and validate clock.toml
fn load_config() -> ClockConfig {
    println!("cargo:rerun-if-changed=clock.toml");

    let config_path = Path::new("clock.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: clock.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a clock.toml configuration file.          ║\n\
            ║  Please create one in the nixie-firmware directory.              ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read clock.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: ClockConfig = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid clock.toml                                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    if let Err(e) = config.validate() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid value in clock.toml                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(&e.to_string())
        );
    }

    println!("cargo:warning=clock.toml validated successfully");
    config
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Emit `CLOCK_CONFIG` as a Rust constant
fn generate_config(out_dir: &Path, config: &ClockConfig) {
    let buttons = match config.buttons {
        ButtonLayout::TwoButton => "ButtonLayout::TwoButton",
        ButtonLayout::ThreeButton => "ButtonLayout::ThreeButton",
    };
    let motion = match config.motion {
        Some(m) => format!("Some(MotionConfig {{ timeout_minutes: {} }})", m.timeout_minutes),
        None => "None".to_string(),
    };
    let blink = match config.blink_period_ms {
        Some(ms) => format!("Some({})", ms),
        None => "None".to_string(),
    };
    let c = &config.conditioning;

    let mut code = String::new();
    writeln!(code, "/// Clock configuration from clock.toml").unwrap();
    writeln!(code, "pub const CLOCK_CONFIG: ClockConfig = ClockConfig {{").unwrap();
    writeln!(code, "    buttons: {},", buttons).unwrap();
    writeln!(code, "    debounce_ms: {},", config.debounce_ms).unwrap();
    writeln!(code, "    blank_leading_zero: {},", config.blank_leading_zero).unwrap();
    writeln!(code, "    conditioning: ConditioningConfig {{").unwrap();
    writeln!(code, "        period_minutes: {},", c.period_minutes).unwrap();
    writeln!(code, "        startup_ms: {},", c.startup_ms).unwrap();
    writeln!(code, "        periodic_ms: {},", c.periodic_ms).unwrap();
    writeln!(code, "        digit_delay_ms: {},", c.digit_delay_ms).unwrap();
    writeln!(code, "    }},").unwrap();
    writeln!(code, "    motion: {},", motion).unwrap();
    writeln!(code, "    blink_period_ms: {},", blink).unwrap();
    writeln!(code, "}};").unwrap();

    fs::write(out_dir.join("clock_config.rs"), code).unwrap();
}
