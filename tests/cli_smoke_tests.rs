mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

fn script(home: &std::path::Path, input: &str) -> assert_cmd::assert::Assert {
    Command::cargo_bin("pledge_ledger_cli")
        .expect("binary exists")
        .env("PLEDGE_LEDGER_CLI_SCRIPT", "1")
        .env("PLEDGE_LEDGER_HOME", home)
        .env_remove("RUST_LOG")
        .write_stdin(input.to_string())
        .assert()
}

#[test]
fn help_and_version_are_available() {
    let home = common::temp_base();
    script(&home, "help\nversion\nexit\n")
        .success()
        .stdout(contains("=== Commands ==="))
        .stdout(contains("pay <YYYY-MM> <amount>"))
        .stdout(contains(concat!("pledge_ledger ", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn registration_flows_into_roster_and_report() {
    let home = common::temp_base();
    let input = "add \"Ana Mora\" 8888-0000 10000 4000\npeople\nreport\nexit\n";
    script(&home, input)
        .success()
        .stdout(contains("[ok] Registered Ana Mora."))
        .stdout(contains("8888-0000"))
        .stdout(contains("Con pendiente"))
        .stdout(contains("Total pendiente del mes: ₡6 000,00"));

    let ledger = std::fs::read_to_string(home.join("ledger.json")).unwrap();
    assert!(ledger.contains("\"Ana Mora\""));
}

#[test]
fn payments_update_the_selected_history() {
    let home = common::temp_base();
    let input = "add Ana 1 5000\nselect 1\npay 2026-03 5000\npay 2026-02 1000\nexit\n";
    script(&home, input)
        .success()
        .stdout(contains("=== Ana ==="))
        .stdout(contains("No hay abonos registrados"))
        .stdout(contains("marzo de 2026"))
        .stdout(contains("febrero de 2026"))
        .stdout(contains("₡4 000,00"));
}

#[test]
fn bad_input_is_reported_inline_and_the_shell_continues() {
    let home = common::temp_base();
    let input = "add Ana 1 muchos\npay 2026-03 10\nreprot\npeople\nexit\n";
    script(&home, input)
        .success()
        .stdout(contains("[x] Invalid input"))
        .stdout(contains("select a person first").or(contains("no person selected")))
        .stdout(contains("Did you mean `report`?"))
        .stdout(contains("No hay personas registradas."));
}

#[test]
fn exports_land_in_the_exports_directory() {
    let home = common::temp_base();
    let input = "add Ana 1 5000\nreport 2026-10\nexport-report html\nselect 1\nexport\nexit\n";
    script(&home, input).success().stdout(contains("Report written to"));

    let exports = home.join("exports");
    assert!(exports.join("reporte_general_misiones_2026-10.html").exists());
    assert!(exports.join("reporte_misiones_ana.txt").exists());
}

#[test]
fn logout_blocks_changes_until_login() {
    let home = common::temp_base();
    let input = "logout\nadd Ana 1 5000\nlogin\nadd Ana 1 5000\npeople\nexit\n";
    script(&home, input)
        .success()
        .stdout(contains("[ok] Session ended."))
        .stdout(contains("[x] Invalid input: sign in first"))
        .stdout(contains("[ok] Session started."))
        .stdout(contains("[ok] Registered Ana."));
}

#[test]
fn config_set_is_saved_and_applied() {
    let home = common::temp_base();
    let input = "config set currency USD\nconfig set locale en-US\nadd Ana 1 5000\npeople\nconfig set rows_per_page 0\nexit\n";
    script(&home, input)
        .success()
        .stdout(contains("[ok] Saved currency."))
        .stdout(contains("$5,000.00"))
        .stdout(contains("Monthly pledge"))
        .stdout(contains("rows_per_page must be a positive whole number"));

    let saved = std::fs::read_to_string(home.join("config.json")).unwrap();
    assert!(saved.contains("\"currency\": \"USD\""));
    assert!(saved.contains("\"locale\": \"en-US\""));
}
