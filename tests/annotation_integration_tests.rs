//! End-to-end tests for the in-place annotation pipeline.
//!
//! These drive `GCodeAnnotator::run` against real files. The controller
//! address points at a loopback discard port so every send fails fast with
//! connection-refused; delivery failure must never change the written file.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use gcode_chamber_control::{Config, GCodeAnnotator, RunSummary};

const UNREACHABLE_CONTROLLER: &str = "127.0.0.1:9";

fn write_gcode(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp gcode file");
    file.write_all(content.as_bytes()).expect("write gcode");
    file
}

fn annotate_file(path: &Path) -> RunSummary {
    let annotator = GCodeAnnotator::new(Config::with_controller(UNREACHABLE_CONTROLLER));
    annotator.run(path).expect("annotate file")
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).expect("read annotated file")
}

#[test]
fn pla_end_to_end_ordering() {
    let file = write_gcode("M104 S200\nG1 X10\nM84\n");
    let summary = annotate_file(file.path());

    assert_eq!(summary.profile.filament.to_string(), "PLA");
    assert_eq!(summary.profile.chamber_temp_c, 0);
    // LEDs + fan at start, heater-off + fan at end; nothing delivered.
    assert_eq!(summary.effects, 4);
    assert_eq!(summary.delivered, 0);

    let output = read(file.path());
    let expected = "\
; === Chamber Controller ===\n\
; Detected filament: PLA\n\
; Turning on chamber LEDs\n\
; Starting exhaust fan (30%)\n\
; ===================================\n\
M104 S200\n\
G1 X10\n\
M84\n\
\n\
; === Chamber Cooldown ===\n\
; Turning off chamber heater\n\
; Setting exhaust fan to 100% for cooling\n\
; Chamber will cool for 2 minutes, then turn off automatically\n\
; (Manual: visit http://127.0.0.1:9 to control)\n";
    assert_eq!(output, expected);
}

#[test]
fn abs_marker_sets_chamber_temperature() {
    let file = write_gcode("; filament_type = ABS\nM140 S100\nG1 X10\n");
    let summary = annotate_file(file.path());

    assert_eq!(summary.profile.filament.to_string(), "ABS");
    assert_eq!(summary.profile.chamber_temp_c, 50);

    let output = read(file.path());
    assert!(output.contains("; Detected filament: ABS\n"));
    assert!(output.contains("; Setting chamber to 50°C\n"));
    // Start block sits between the marker comment and the heat line.
    let marker = output.find("filament_type").unwrap();
    let header = output.find("; === Chamber Controller ===").unwrap();
    let heat = output.find("M140").unwrap();
    assert!(marker < header && header < heat);
}

#[test]
fn no_heat_token_means_no_start_block() {
    let file = write_gcode("G28\nG1 X10 Y10\n; End of custom gcode\n");
    annotate_file(file.path());

    let output = read(file.path());
    assert!(!output.contains("Chamber Controller"));
    assert!(output.contains("; === Chamber Cooldown ===\n"));
    assert!(output.starts_with("G28\nG1 X10 Y10\n"));
}

#[test]
fn cooldown_repeats_for_every_trigger_line() {
    let file = write_gcode("M104 S200\nM84\n; End of gcode\n");
    annotate_file(file.path());

    let output = read(file.path());
    let cooldowns = output.matches("; === Chamber Cooldown ===").count();
    assert_eq!(cooldowns, 2);
}

#[test]
fn reprocessing_is_not_idempotent() {
    // The original M104/M84 lines still carry their trigger tokens after the
    // first pass, so a second run duplicates both blocks.
    let file = write_gcode("M104 S200\nM84\n");
    annotate_file(file.path());
    let once = read(file.path());
    annotate_file(file.path());
    let twice = read(file.path());

    assert_ne!(once, twice);
    assert_eq!(twice.matches("; === Chamber Controller ===").count(), 2);
    assert_eq!(twice.matches("; === Chamber Cooldown ===").count(), 2);
}

#[test]
fn missing_file_is_an_error() {
    let annotator = GCodeAnnotator::new(Config::with_controller(UNREACHABLE_CONTROLLER));
    let result = annotator.run(Path::new("/nonexistent/benchy.gcode"));
    assert!(result.is_err());
    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("benchy.gcode"));
}
