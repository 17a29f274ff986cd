//! Integration tests for the `room-availability` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the timeline,
//! rooms, summary, and next subcommands through the actual binary, including
//! stdin piping, file I/O, config loading, and error handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the bookings.json fixture.
fn bookings_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/bookings.json")
}

/// Helper: path to the config.json fixture.
fn config_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/config.json")
}

fn bin() -> Command {
    Command::cargo_bin("room-availability").unwrap()
}

/// Helper: run a command that must succeed and parse its stdout as JSON.
fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("command should run");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout must be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// timeline subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn timeline_single_day_from_file() {
    let report = json_output(bin().args([
        "timeline",
        "-i",
        bookings_path(),
        "--start",
        "2026-03-16",
        "--end",
        "2026-03-16",
    ]));

    let intervals = report["intervals"].as_array().unwrap();
    // Room 214 and Room 215 each split in three, Room 1001 fully free.
    assert_eq!(intervals.len(), 7);
    assert_eq!(report["rooms"], serde_json::json!(["Room 214", "Room 215", "Room 1001"]));
    assert_eq!(report["skipped"], serde_json::json!(["evt-5"]));

    assert_eq!(intervals[0]["start"], "2026-03-16T09:00:00");
    assert_eq!(intervals[0]["end"], "2026-03-16T10:00:00");
    assert_eq!(intervals[0]["isAvailable"], true);
    assert_eq!(intervals[1]["id"], "evt-1");
    assert_eq!(intervals[1]["isAvailable"], false);
}

#[test]
fn timeline_booked_slices_carry_original_booking_bounds() {
    let report = json_output(bin().args([
        "timeline",
        "--config",
        config_path(),
        "--opening",
        "10:30:00",
        "--start",
        "2026-03-16",
        "--end",
        "2026-03-16",
        "--room",
        "Room 214",
        "-i",
        bookings_path(),
    ]));

    let booked = &report["intervals"][0];
    assert_eq!(booked["id"], "evt-1");
    assert_eq!(booked["start"], "2026-03-16T10:30:00");
    assert_eq!(booked["bookingStart"], "2026-03-16T10:00:00");
    assert_eq!(booked["bookingEnd"], "2026-03-16T11:00:00");

    let free = &report["intervals"][1];
    assert_eq!(free["isAvailable"], true);
    assert!(free.get("bookingStart").is_none());
}

#[test]
fn timeline_reads_stdin_and_filters_room() {
    let feed = std::fs::read_to_string(bookings_path()).unwrap();

    let report = json_output(
        bin()
            .args([
                "timeline",
                "--start",
                "2026-03-16",
                "--end",
                "2026-03-17",
                "--room",
                "Room 215",
            ])
            .write_stdin(feed),
    );

    let intervals = report["intervals"].as_array().unwrap();
    assert_eq!(intervals.len(), 4);
    assert!(intervals.iter().all(|i| i["room"] == "Room 215"));
    assert_eq!(report["rooms"].as_array().unwrap().len(), 3);
}

#[test]
fn timeline_defaults_to_today_plus_seven() {
    let report = json_output(bin().args(["timeline", "-i", bookings_path(), "--today", "2026-03-16"]));

    assert_eq!(report["range"]["start"], "2026-03-16");
    assert_eq!(report["range"]["end"], "2026-03-23");
}

#[test]
fn timeline_uses_config_file() {
    let report = json_output(bin().args([
        "timeline",
        "--config",
        config_path(),
        "--today",
        "2026-03-16",
        "-i",
        bookings_path(),
    ]));

    assert_eq!(report["range"]["end"], "2026-03-17");
    assert_eq!(report["window"]["opening"], "08:00:00");
    assert_eq!(report["intervals"][0]["start"], "2026-03-16T08:00:00");
}

#[test]
fn timeline_opening_and_closing_override_config() {
    let report = json_output(bin().args([
        "timeline",
        "--config",
        config_path(),
        "--opening",
        "07:30:00",
        "--start",
        "2026-03-16",
        "--end",
        "2026-03-16",
        "-i",
        bookings_path(),
    ]));

    assert_eq!(report["window"]["opening"], "07:30:00");
    assert_eq!(report["window"]["closing"], "18:00:00");
}

#[test]
fn timeline_to_output_file() {
    let output_path = "/tmp/room-availability-test-timeline.json";
    let _ = std::fs::remove_file(output_path);

    bin()
        .args([
            "timeline",
            "-i",
            bookings_path(),
            "--start",
            "2026-03-16",
            "--end",
            "2026-03-16",
            "-o",
            output_path,
        ])
        .assert()
        .success();

    let content = std::fs::read_to_string(output_path).expect("output file must exist");
    let report: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(report["intervals"].as_array().unwrap().len(), 7);

    let _ = std::fs::remove_file(output_path);
}

#[test]
fn timeline_inverted_range_fails() {
    bin()
        .args([
            "timeline",
            "-i",
            bookings_path(),
            "--start",
            "2026-03-20",
            "--end",
            "2026-03-18",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date range"));
}

#[test]
fn timeline_inverted_window_fails() {
    bin()
        .args([
            "timeline",
            "-i",
            bookings_path(),
            "--opening",
            "21:00:00",
            "--closing",
            "09:00:00",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --opening/--closing"));
}

#[test]
fn invalid_feed_json_fails() {
    bin()
        .arg("timeline")
        .write_stdin("this is not valid json {{{")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse booked intervals JSON"));
}

#[test]
fn missing_input_file_fails() {
    bin()
        .args(["rooms", "-i", "/tmp/room-availability-does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// rooms subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn rooms_lists_numbered_rooms_without_unknown() {
    bin()
        .args(["rooms", "-i", bookings_path()])
        .assert()
        .success()
        .stdout("Room 214\nRoom 215\nRoom 1001\n");
}

#[test]
fn rooms_fall_back_to_configured_defaults() {
    bin()
        .args(["rooms", "--config", config_path()])
        .write_stdin("[]")
        .assert()
        .success()
        .stdout("Room 101\nRoom 102\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// summary and next subcommands
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn summary_reports_current_booking() {
    let summary = json_output(bin().args([
        "summary",
        "-i",
        bookings_path(),
        "--room",
        "Room 214",
        "--now",
        "2026-03-16T10:30:00",
    ]));

    assert_eq!(summary["roomNumber"], "214");
    assert_eq!(summary["floor"], "2");
    assert_eq!(summary["availableNow"], false);
    assert_eq!(summary["currentBooking"]["id"], "evt-1");
    assert_eq!(summary["upcomingBookings"][1]["id"], "evt-3");
}

#[test]
fn summary_limit_caps_upcoming_lists() {
    let summary = json_output(bin().args([
        "summary",
        "-i",
        bookings_path(),
        "--room",
        "Room 214",
        "--now",
        "2026-03-16T08:00:00",
        "--limit",
        "1",
    ]));

    assert_eq!(summary["upcomingBookings"].as_array().unwrap().len(), 1);
    assert_eq!(summary["upcomingAvailability"].as_array().unwrap().len(), 1);
    assert_eq!(summary["availableMinutesToday"], 660);
}

#[test]
fn next_finds_first_long_enough_slot() {
    bin()
        .args([
            "next",
            "-i",
            bookings_path(),
            "--room",
            "Room 214",
            "--minutes",
            "120",
            "--now",
            "2026-03-16T09:00:00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Room 214 2026-03-16 11:00 - 21:00"));
}

#[test]
fn next_fails_when_nothing_fits() {
    bin()
        .args([
            "next",
            "-i",
            bookings_path(),
            "--room",
            "Room 214",
            "--minutes",
            "1000",
            "--now",
            "2026-03-16T09:00:00",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No free slot of 1000 minutes in Room 214"));
}

#[test]
fn next_rejects_negative_minutes() {
    bin()
        .args(["next", "-i", bookings_path(), "--room", "Room 214", "--minutes=-5"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn next_rejects_out_of_range_minutes_without_crashing() {
    bin()
        .args([
            "next",
            "-i",
            bookings_path(),
            "--room",
            "Room 214",
            "--minutes",
            "200000000000000",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid value"))
        .stderr(predicate::str::contains("panicked").not());
}
