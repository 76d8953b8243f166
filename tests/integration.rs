//! Integration tests for the squadron engine binary.
//!
//! Drives full protocol sessions by spawning the engine process, sending
//! commands via stdin, and verifying stdout responses.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

/// Sends a sequence of commands to the engine and collects stdout lines.
fn run_engine(commands: &[&str]) -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_squadron");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start squadron");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    for cmd in commands {
        writeln!(stdin, "{}", cmd).unwrap();
    }
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
    lines
}

fn count_prefix(lines: &[String], prefix: &str) -> usize {
    lines.iter().filter(|l| l.starts_with(prefix)).count()
}

/// One rookie (skill 2, ship 1) against one academy pilot (skill 1, ship 2).
const SETUP: [&str; 3] = ["addship p1 rookie-pilot", "addship p2 academy-pilot", "start"];

/// One full round in which the rookie flies a red Koiogran turn.
const ROUND: [&str; 13] = [
    "assign 1 4.F.R",
    "assign 2 2.F.S",
    "next",
    "select 2",
    "next",
    "reveal",
    "next",
    "action skip",
    "next",
    "select 1",
    "next",
    "reveal",
    "next",
];

#[test]
fn handshake_with_protocol_version() {
    let lines = run_engine(&["squadron", "quit"]);

    assert!(lines.iter().any(|l| l == "id name squadron"));
    assert!(lines.iter().any(|l| l == "protocol_version 1"));
    assert!(lines.iter().any(|l| l == "squadronok"));

    let ok_idx = lines.iter().position(|l| l == "squadronok").unwrap();
    let proto_idx = lines.iter().position(|l| l == "protocol_version 1").unwrap();
    assert!(proto_idx < ok_idx, "protocol_version must appear before squadronok");
}

#[test]
fn handshake_includes_options() {
    let lines = run_engine(&["squadron", "quit"]);
    let option_lines: Vec<&String> = lines.iter().filter(|l| l.starts_with("option ")).collect();
    assert!(!option_lines.is_empty(), "handshake should include option declarations");
    for opt in &option_lines {
        assert!(opt.contains("type "), "option line missing type: {}", opt);
    }
}

#[test]
fn isready_response() {
    let lines = run_engine(&["isready", "quit"]);
    assert!(lines.contains(&"readyok".to_string()));
}

#[test]
fn unknown_commands_are_ignored() {
    let lines = run_engine(&["foobar", "", "isready", "quit"]);
    assert_eq!(lines, vec!["readyok".to_string()]);
}

#[test]
fn quit_stops_processing() {
    let lines = run_engine(&["quit", "isready"]);
    assert!(lines.is_empty());
}

#[test]
fn malformed_command_reports_error() {
    let lines = run_engine(&["assign 1 9.F.S", "select", "isready", "quit"]);
    assert_eq!(count_prefix(&lines, "error "), 2);
    assert_eq!(lines.last().map(String::as_str), Some("readyok"));
}

#[test]
fn play_commands_before_start_fail() {
    let lines = run_engine(&["next", "status", "quit"]);
    assert_eq!(count_prefix(&lines, "error "), 2);
}

#[test]
fn roster_commands_report_indices() {
    let lines = run_engine(&[
        "addship p1 luke-skywalker",
        "copyship p1 0",
        "addship p2 darth-vader",
        "faction p2 rebels",
        "quit",
    ]);
    assert_eq!(lines[0], "added p1 0");
    assert!(lines[1].starts_with("error "), "unique pilot copied: {}", lines[1]);
    assert_eq!(lines[2], "added p2 0");
    assert_eq!(lines[3], "removed 1");
}

#[test]
fn wrong_faction_is_rejected() {
    let lines = run_engine(&["addship p1 darth-vader", "quit"]);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("error "));
}

#[test]
fn start_enters_planning() {
    let mut commands = SETUP.to_vec();
    commands.push("quit");
    let lines = run_engine(&commands);
    assert!(lines.contains(&"phase Planning".to_string()));
    assert!(lines.iter().any(|l| l.starts_with("event ") && l.contains("phase_started")));
}

#[test]
fn next_with_missing_maneuvers_stays_in_planning() {
    let lines = run_engine(&[
        "addship p1 rookie-pilot",
        "addship p2 academy-pilot",
        "start",
        "assign 1 2.F.S",
        "next",
        "quit",
    ]);
    assert_eq!(count_prefix(&lines, "phase "), 1);
    assert!(lines.last().is_some_and(|l| l.starts_with("error ")));
}

#[test]
fn full_round_walks_every_phase() {
    let mut commands = SETUP.to_vec();
    commands.extend(ROUND);
    commands.push("quit");
    let lines = run_engine(&commands);

    let phases: Vec<&str> = lines
        .iter()
        .filter_map(|l| l.strip_prefix("phase "))
        .collect();
    assert_eq!(
        phases,
        vec![
            "Planning", "Activation", "Movement", "Action", "Activation", "Movement", "Action", "End",
        ]
    );
    assert!(lines.iter().any(|l| l.contains("\"stress_gained\":true")));
    assert!(!lines.iter().any(|l| l.contains("maneuver_substituted")));
}

#[test]
fn stressed_red_maneuver_is_substituted() {
    let mut commands = SETUP.to_vec();
    commands.extend(ROUND);
    commands.push("next");
    commands.extend(ROUND);
    commands.push("quit");
    let lines = run_engine(&commands);

    assert_eq!(count_prefix(&lines, "error "), 0, "unexpected errors: {:?}", lines);
    let substituted: Vec<&String> = lines
        .iter()
        .filter(|l| l.starts_with("event ") && l.contains("maneuver_substituted"))
        .collect();
    assert_eq!(substituted.len(), 1);
    assert!(lines.contains(
        &"warning p1 Red maneuver while stressed: maneuver is changed to white straight 2".to_string()
    ));
}

#[test]
fn ai_players_play_a_round_with_go() {
    let lines = run_engine(&[
        "setoption name Seed value 7",
        "playertype p1 ai",
        "playertype p2 ai",
        "addship p1 luke-skywalker",
        "addship p2 darth-vader",
        "start",
        "go",
        "status",
        "quit",
    ]);
    assert_eq!(count_prefix(&lines, "error "), 0, "unexpected errors: {:?}", lines);
    assert!(lines.iter().any(|l| l.contains("round_ended")));
    let status = lines.iter().find(|l| l.starts_with("status ")).unwrap();
    assert!(status.contains("\"round\":2"));
}

#[test]
fn go_waits_for_human() {
    let lines = run_engine(&[
        "playertype p2 ai",
        "addship p1 rookie-pilot",
        "addship p2 academy-pilot",
        "start",
        "go",
        "quit",
    ]);
    assert_eq!(count_prefix(&lines, "error "), 0, "unexpected errors: {:?}", lines);
    assert!(lines.iter().any(|l| l.contains("maneuver_assigned")));
    assert_eq!(count_prefix(&lines, "phase "), 1);
}

#[test]
fn movement_cannot_be_skipped_without_reveal() {
    let mut commands = SETUP.to_vec();
    commands.extend([
        "assign 1 4.F.R",
        "assign 2 2.F.S",
        "next",
        "select 2",
        "next",
        "next",
        "reveal",
        "next",
        "quit",
    ]);
    let lines = run_engine(&commands);

    assert_eq!(count_prefix(&lines, "error "), 1, "unexpected output: {:?}", lines);
    let error_idx = lines.iter().position(|l| l.starts_with("error ")).unwrap();
    let performed_idx = lines.iter().position(|l| l.contains("maneuver_performed")).unwrap();
    assert!(error_idx < performed_idx);
    let phases: Vec<&str> = lines.iter().filter_map(|l| l.strip_prefix("phase ")).collect();
    assert_eq!(phases, vec!["Planning", "Activation", "Movement", "Action"]);
}
