use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn finboard_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("finboard"))
}

fn cmd_with_home() -> (tempfile::TempDir, Command) {
    let home = tempfile::tempdir().expect("tempdir");
    let mut cmd = finboard_cmd();
    cmd.env("FINBOARD_HOME", home.path());
    cmd.env_remove("FINBOARD_TODAY");
    (home, cmd)
}

fn run_ok_out(home: &tempfile::TempDir, args: &[&str]) -> String {
    let mut cmd = finboard_cmd();
    cmd.env("FINBOARD_HOME", home.path());
    cmd.env_remove("FINBOARD_TODAY");
    cmd.args(args);
    let out = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(out).expect("utf8 stdout")
}

#[test]
fn budgets_report_percentages_remaining_and_totals() {
    let home = tempfile::tempdir().expect("tempdir");

    let out = run_ok_out(&home, &["--format", "tsv", "budgets"]);

    assert!(out.contains("NAME\tBUDGET\tSPENT\tUSED\tREMAINING\tSTATUS"));
    assert!(out.contains("Food & Dining\t10000\t12500\t125\t-2500\texceeded"));
    assert!(out.contains("Travel\t5000\t3800\t76\t1200\tok"));
    assert!(out.contains("Utilities\t4000\t3200\t80\t800\tok"));
    assert!(out.contains("total_budget\t32000"));
    assert!(out.contains("total_spent\t27000"));
    assert!(out.contains("over_budget\t1"));
}

#[test]
fn budgets_table_shows_overspend_as_over_by() {
    let home = tempfile::tempdir().expect("tempdir");

    let out = run_ok_out(&home, &["budgets"]);

    assert!(out.contains("over by ₹2,500"));
    assert!(out.contains("Total budget: ₹32,000"));
    assert!(out.contains("1 over budget"));
}

#[test]
fn budgets_json_carries_status_and_totals() {
    let home = tempfile::tempdir().expect("tempdir");

    let out = run_ok_out(&home, &["--format", "json", "budgets"]);
    let v: serde_json::Value = serde_json::from_str(&out).expect("json");

    assert_eq!(v["totals"]["over_budget_count"], 1);
    assert_eq!(v["budgets"].as_array().map(|a| a.len()), Some(6));
    assert_eq!(v["budgets"][0]["name"], "Food & Dining");
    assert_eq!(v["budgets"][0]["status"]["over_budget"], true);
    assert_eq!(v["budgets"][0]["tone"], "exceeded");
}

#[test]
fn expenses_search_is_case_insensitive() {
    let home = tempfile::tempdir().expect("tempdir");

    let out = run_ok_out(&home, &["--format", "tsv", "expenses", "--search", "SWIGGY"]);

    assert!(out.contains("2024-12-23\tSwiggy Order\tfood\t450"));
    assert!(!out.contains("Zomato"));
    assert!(out.contains("total\t450"));
}

#[test]
fn expenses_without_filters_lists_every_transaction() {
    let home = tempfile::tempdir().expect("tempdir");

    let out = run_ok_out(&home, &["--format", "tsv", "expenses"]);
    let rows: Vec<&str> = out
        .lines()
        .filter(|l| l.starts_with("2024-"))
        .collect();

    assert_eq!(rows.len(), 12);
    assert!(rows[0].contains("Swiggy Order"));
    assert!(rows[11].contains("Movie Tickets"));
    assert!(out.contains("total\t27457"));
}

#[test]
fn expenses_category_filter_combines_with_search() {
    let home = tempfile::tempdir().expect("tempdir");

    let out = run_ok_out(&home, &["--format", "tsv", "expenses", "--category", "food"]);
    assert!(out.contains("total\t4230"));
    assert!(!out.contains("Uber Ride"));

    let out = run_ok_out(
        &home,
        &["expenses", "--category", "utilities", "--search", "zzz"],
    );
    assert!(out.contains("No transactions found"));
    assert!(out.contains("Monthly total: ₹0"));
}

#[test]
fn expenses_rejects_unknown_category() {
    let (_home, mut cmd) = cmd_with_home();
    cmd.args(["expenses", "--category", "groceries"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown category"));
}

#[test]
fn goals_show_status_and_monthly_required() {
    let home = tempfile::tempdir().expect("tempdir");

    let out = run_ok_out(
        &home,
        &["--format", "tsv", "--today", "2024-12-23", "goals"],
    );

    assert!(out.contains("Emergency Fund\t2025-06-30\t136000\t200000\t68\t189\t9143\tOn Track"));
    assert!(out.contains("Vacation Trip\t2025-03-31\t45000\t80000\t56.25\t98\t8750\tBehind"));
}

#[test]
fn goals_add_appends_for_the_session_only() {
    let home = tempfile::tempdir().expect("tempdir");

    let out = run_ok_out(
        &home,
        &[
            "--format",
            "tsv",
            "--today",
            "2024-12-23",
            "goals",
            "add",
            "Dream Vacation",
            "100000",
            "2027-01-01",
        ],
    );
    assert!(out.contains("Added goal 'Dream Vacation'"));
    assert!(out.contains("Dream Vacation\t2027-01-01\t0\t100000\t0\t739\t4000\tOn Track"));

    let out = run_ok_out(&home, &["--format", "tsv", "--today", "2024-12-23", "goals"]);
    assert!(!out.contains("Dream Vacation"));
}

#[test]
fn goals_add_rejects_non_numeric_target() {
    let (_home, mut cmd) = cmd_with_home();
    cmd.args(["goals", "add", "Trip", "lots", "2027-01-01"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid goal target"));
}

#[test]
fn subscriptions_summary_and_renewal_window() {
    let home = tempfile::tempdir().expect("tempdir");

    let out = run_ok_out(
        &home,
        &["--format", "tsv", "--today", "2024-12-30", "subscriptions"],
    );
    assert!(out.contains("monthly_total\t3630"));
    assert!(out.contains("potential_savings\t3849"));
    assert!(out.contains("renewing_soon\t1"));
    assert!(out.contains("Gym Membership\tHealth\t1500\t2025-01-01\tinactive"));
    assert!(out.contains("Hotstar\tEntertainment\t499\t2025-01-05\tconsider cancelling"));
}

#[test]
fn config_set_changes_renewal_window() {
    let home = tempfile::tempdir().expect("tempdir");

    let out = run_ok_out(&home, &["config", "set", "renewal_window_days", "10"]);
    assert!(out.contains("Set renewal_window_days = 10."));

    let out = run_ok_out(
        &home,
        &["--format", "tsv", "--today", "2024-12-29", "subscriptions"],
    );
    assert!(out.contains("renewing_soon\t2"));
}

#[test]
fn config_grouping_changes_money_format() {
    let home = tempfile::tempdir().expect("tempdir");

    let out = run_ok_out(&home, &["--today", "2024-12-23", "goals"]);
    assert!(out.contains("₹1,36,000"));

    run_ok_out(&home, &["config", "set", "grouping", "western"]);
    let out = run_ok_out(&home, &["--today", "2024-12-23", "goals"]);
    assert!(out.contains("₹136,000"));

    let out = run_ok_out(&home, &["config", "show"]);
    assert!(out.contains("\"grouping\": \"western\""));
}

#[test]
fn config_set_rejects_unknown_key() {
    let (_home, mut cmd) = cmd_with_home();
    cmd.args(["config", "set", "colour", "blue"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn insights_and_investments() {
    let home = tempfile::tempdir().expect("tempdir");

    let out = run_ok_out(&home, &["--format", "tsv", "insights"]);
    assert!(out.contains("positive\t4"));
    assert!(out.contains("needs_attention\t2"));
    assert!(out.contains("negative\tFood expenses increased\t↑ 18%"));

    let out = run_ok_out(&home, &["--format", "tsv", "investments", "--risk", "low"]);
    let rows: Vec<&str> = out.lines().skip(1).filter(|l| !l.is_empty()).collect();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.contains("\tlow\t")));
}

#[test]
fn dashboard_derives_savings() {
    let home = tempfile::tempdir().expect("tempdir");

    let out = run_ok_out(
        &home,
        &["--format", "tsv", "--today", "2024-12-23", "dashboard"],
    );
    assert!(out.contains("Monthly income\t85000"));
    assert!(out.contains("Savings this month\t40500"));
    assert!(out.contains("Savings rate\t47.65"));
    assert!(out.contains("Savings goal\t68"));
    assert!(out.contains("Rent & EMI\t18000\t40.45"));
}

#[test]
fn invalid_today_is_an_error() {
    let (_home, mut cmd) = cmd_with_home();
    cmd.args(["--today", "23/12/2024", "goals"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}
