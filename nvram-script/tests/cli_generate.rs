use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use base64::{engine::general_purpose, Engine as _};
use flate2::write::GzEncoder;
use flate2::Compression;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

fn bin() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("nvram-script"))
}

fn path_as_str(path: &Path) -> &str {
    path.to_str().expect("utf8 path")
}

fn cert_archive() -> String {
    let mut builder = tar::Builder::new(Vec::new());
    for (path, body) in [("etc/cert.pem", "CERT DATA\n"), ("etc/key.pem", "KEY DATA\n")] {
        let mut header = tar::Header::new_gnu();
        header.set_size(body.len() as u64);
        header.set_mode(0o600);
        builder
            .append_data(&mut header, path, body.as_bytes())
            .expect("append member");
    }
    let tar = builder.into_inner().expect("finish tar");
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    std::io::Write::write_all(&mut encoder, &tar).expect("gzip");
    general_purpose::STANDARD.encode(encoder.finish().expect("finish gzip"))
}

#[test]
fn generate_writes_sectioned_script() {
    let dir = tempdir().expect("tempdir");
    let output = dir.path().join("set-nvram.sh");

    bin()
        .arg("generate")
        .arg("--input")
        .arg(fixture("fixtures/nvram.txt"))
        .arg("--base")
        .arg(fixture("fixtures/defaults.txt"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("values written to"))
        .stdout(predicate::str::contains("loop $wl over wl0 wl1 wl2"));

    let script = fs::read_to_string(&output).expect("script");
    assert!(script.starts_with("# Identification\nnvram set router_name=gateway\n"));
    assert!(script.contains("# WAN\n"));
    assert!(script.contains("for wl in wl0 wl1 wl2; do\n"));
    assert!(script.contains("nvram set wl1_channel=44\n"));
    assert!(!script.contains("lan_netmask"));
    assert!(!script.contains("http_id"));
    assert!(script.ends_with("# Save\nnvram commit\n"));
}

#[test]
fn generate_json_summary() {
    let dir = tempdir().expect("tempdir");
    let output = dir.path().join("out.sh");

    bin()
        .arg("generate")
        .arg("-i")
        .arg(fixture("fixtures/nvram.txt"))
        .arg("-b")
        .arg(fixture("fixtures/defaults.txt"))
        .arg("-o")
        .arg(&output)
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"factorings\""))
        .stdout(predicate::str::contains("\"lines_saved\": 3"));
}

#[test]
fn no_factor_keeps_every_instance_setting() {
    let dir = tempdir().expect("tempdir");
    let output = dir.path().join("out.sh");

    bin()
        .arg("generate")
        .arg("-i")
        .arg(fixture("fixtures/nvram.txt"))
        .arg("-b")
        .arg(fixture("fixtures/defaults.txt"))
        .arg("-o")
        .arg(&output)
        .arg("--no-factor")
        .assert()
        .success();

    let script = fs::read_to_string(&output).expect("script");
    assert!(!script.contains("for wl in"));
    assert!(script.contains("nvram set wl2_ssid=home\n"));
}

#[test]
fn generate_also_writes_diff_file() {
    let dir = tempdir().expect("tempdir");
    let output = dir.path().join("out.sh");
    let diff = dir.path().join("diff.txt");

    bin()
        .arg("generate")
        .arg("-i")
        .arg(fixture("fixtures/nvram.txt"))
        .arg("-b")
        .arg(fixture("fixtures/defaults.txt"))
        .arg("-o")
        .arg(&output)
        .arg("--diff-output")
        .arg(&diff)
        .assert()
        .success();

    let text = fs::read_to_string(diff).expect("diff file");
    assert!(text.contains("wan_proto=pppoe\n"));
    assert!(text.contains("script_init=echo start\nlogger -t init ready\n"));
    assert!(!text.contains("lan_netmask"));
}

#[test]
fn identical_dumps_write_nothing() {
    let dir = tempdir().expect("tempdir");
    let output = dir.path().join("out.sh");

    bin()
        .arg("generate")
        .arg("-i")
        .arg(fixture("fixtures/defaults.txt"))
        .arg("-b")
        .arg(fixture("fixtures/defaults.txt"))
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("no differences"));

    assert!(!output.exists());
}

#[test]
fn missing_input_fails_without_output() {
    let dir = tempdir().expect("tempdir");
    let output = dir.path().join("out.sh");

    bin()
        .arg("generate")
        .arg("-i")
        .arg(dir.path().join("absent.txt"))
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));

    assert!(!output.exists());
}

#[test]
fn missing_base_fails() {
    let dir = tempdir().expect("tempdir");

    bin()
        .arg("generate")
        .arg("-i")
        .arg(fixture("fixtures/nvram.txt"))
        .arg("-b")
        .arg(dir.path().join("absent.txt"))
        .arg("-o")
        .arg(dir.path().join("out.sh"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.txt"));
}

#[test]
fn refuses_to_overwrite_input() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("nvram.txt");
    fs::write(&input, "wan_proto=pppoe\n").expect("write input");

    bin()
        .arg("generate")
        .arg("-i")
        .arg(path_as_str(&input))
        .arg("-o")
        .arg(path_as_str(&input))
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to overwrite"));

    assert_eq!(fs::read_to_string(&input).expect("input"), "wan_proto=pppoe\n");
}

#[test]
fn refuses_input_reached_through_missing_directory() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("nvram.txt");
    fs::write(&input, "wan_proto=pppoe\n").expect("write input");

    bin()
        .current_dir(dir.path())
        .arg("generate")
        .arg("-i")
        .arg("nvram.txt")
        .arg("-o")
        .arg("missing/../nvram.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to overwrite"));

    assert_eq!(fs::read_to_string(&input).expect("input"), "wan_proto=pppoe\n");
}

#[test]
fn certificate_archive_becomes_credential_block() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("nvram.txt");
    let output = dir.path().join("out.sh");
    fs::write(
        &input,
        format!("wan_proto=pppoe\nhttps_crt_file={}\n", cert_archive()),
    )
    .expect("write input");

    bin()
        .arg("generate")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let script = fs::read_to_string(&output).expect("script");
    assert!(script.contains("echo 'CERT DATA' > /etc/cert.pem\n"));
    assert!(script.contains("echo 'KEY DATA' > /etc/key.pem\n"));
    assert!(!script.contains("nvram set https_crt_file=H4s"));
    assert!(script.ends_with(
        "openssl enc -A -base64)\"\n\n# Save\nnvram commit\n"
    ));
}

#[test]
fn broken_certificate_archive_still_writes_script() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("nvram.txt");
    let output = dir.path().join("out.sh");
    fs::write(&input, "wan_proto=pppoe\nhttps_crt_file=%%%not-base64%%%\n").expect("write input");

    bin()
        .arg("generate")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("certificate block omitted"));

    let script = fs::read_to_string(&output).expect("script");
    assert!(script.contains("nvram set wan_proto=pppoe\n"));
    assert!(!script.contains("/etc/cert.pem"));
}

#[test]
fn invalid_rules_file_is_fatal() {
    let dir = tempdir().expect("tempdir");
    let rules = dir.path().join("rules.toml");
    fs::write(&rules, "[[category]]\nname = \"Broken\"\npattern = \"(\"\n").expect("write rules");

    bin()
        .arg("generate")
        .arg("-i")
        .arg(fixture("fixtures/nvram.txt"))
        .arg("-o")
        .arg(dir.path().join("out.sh"))
        .arg("--rules")
        .arg(&rules)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load category rules"));
}
