//! Build script for lumen-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml and turns it into `board_config.rs` constants

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Count rate the blink timer prescales down to
const TICK_RATE_HZ: i64 = 1_000;

/// Largest 16-bit register value (PSC)
const REGISTER_MAX: i64 = u16::MAX as i64;

/// STM32L432KC maximum system clock
const MAX_SYSCLK_HZ: i64 = 80_000_000;

/// Baud rates the ST-LINK virtual COM port supports
const BAUDRATES: [i64; 8] = [
    9_600, 19_200, 38_400, 57_600, 115_200, 230_400, 460_800, 921_600,
];

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    setup_linker(&out_dir);

    let board = validate_config();
    write_board_config(&out_dir, &board);
}

/// Set up linker search paths for memory.x
fn setup_linker(out_dir: &Path) {
    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validated board settings
struct BoardConfig {
    sysclk_hz: i64,
    baudrate: i64,
}

/// Validate board.toml configuration at compile time
fn validate_config() -> BoardConfig {
    // Re-run if board.toml changes
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    // Check if config file exists
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a board.toml configuration file.          ║\n\
            ║  Please create one in the lumen-firmware directory.              ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    // Read the config file
    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in board.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    let sysclk_hz = validate_clock(&config, &mut errors);
    let baudrate = validate_serial(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid board configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=board.toml validated successfully");

    BoardConfig {
        sysclk_hz,
        baudrate,
    }
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

/// Look up an integer field, recording an error if missing or mistyped
fn integer_field(
    config: &toml::Value,
    section: &str,
    key: &str,
    errors: &mut Vec<String>,
) -> Option<i64> {
    let table = match config.get(section) {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push(format!("[{}] must be a table", section));
            return None;
        }
        None => {
            errors.push(format!("Missing [{}] section", section));
            return None;
        }
    };

    match table.get(key) {
        Some(toml::Value::Integer(value)) => Some(*value),
        Some(_) => {
            errors.push(format!("[{}] '{}' must be an integer", section, key));
            None
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            None
        }
    }
}

/// Validate the timer clock so the 1 kHz prescaler is exact and fits PSC
fn validate_clock(config: &toml::Value, errors: &mut Vec<String>) -> i64 {
    let Some(sysclk_hz) = integer_field(config, "clock", "sysclk_hz", errors) else {
        return 0;
    };

    if sysclk_hz < TICK_RATE_HZ || sysclk_hz > MAX_SYSCLK_HZ {
        errors.push(format!(
            "[clock] sysclk_hz must be {}-{}",
            TICK_RATE_HZ, MAX_SYSCLK_HZ
        ));
    } else if sysclk_hz % TICK_RATE_HZ != 0 {
        errors.push("[clock] sysclk_hz must be a multiple of 1000".to_string());
    } else if sysclk_hz / TICK_RATE_HZ - 1 > REGISTER_MAX {
        errors.push("[clock] sysclk_hz too fast for a 1 kHz 16-bit prescaler".to_string());
    }

    sysclk_hz
}

/// Validate the serial baud rate
fn validate_serial(config: &toml::Value, errors: &mut Vec<String>) -> i64 {
    let Some(baudrate) = integer_field(config, "serial", "baudrate", errors) else {
        return 0;
    };

    if !BAUDRATES.contains(&baudrate) {
        errors.push(format!("[serial] unsupported baudrate {}", baudrate));
    }

    baudrate
}

/// Emit the validated values as Rust constants
fn write_board_config(out_dir: &Path, board: &BoardConfig) {
    let mut f = File::create(out_dir.join("board_config.rs")).unwrap();
    writeln!(f, "/// Timer kernel clock in Hz (board.toml `[clock] sysclk_hz`)").unwrap();
    writeln!(f, "pub const SYSCLK_HZ: u32 = {};", board.sysclk_hz).unwrap();
    writeln!(f, "/// USART2 baud rate (board.toml `[serial] baudrate`)").unwrap();
    writeln!(f, "pub const BAUDRATE: u32 = {};", board.baudrate).unwrap();
}
