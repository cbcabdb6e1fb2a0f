use std::process::Command;

fn run_sim(seed1: &str, seed2: &str) -> serde_json::Value {
    let output = Command::new(env!("CARGO_BIN_EXE_sim"))
        .args([seed1, seed2])
        .output()
        .expect("failed to run sim binary");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    serde_json::from_str(stdout.trim()).expect("invalid json")
}

#[test]
fn sim_binary_smoke() {
    let v = run_sim("1", "2");
    let winner = v["winner"].as_str().expect("winner should be a string");
    assert!(winner == "player1" || winner == "player2");
    let loser = if winner == "player1" { "player2" } else { "player1" };
    assert_eq!(v[loser]["ships_remaining"], 0);
    let shots = v["player1"]["shots"].as_u64().unwrap() + v["player2"]["shots"].as_u64().unwrap();
    assert_eq!(v["turns"].as_u64(), Some(shots));
}

#[test]
fn sim_binary_is_deterministic() {
    assert_eq!(run_sim("5", "6"), run_sim("5", "6"));
}

#[test]
fn sim_binary_rejects_bad_args() {
    let output = Command::new(env!("CARGO_BIN_EXE_sim"))
        .arg("1")
        .output()
        .expect("failed to run sim binary");
    assert!(!output.status.success());
}
