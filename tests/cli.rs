use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn expenses(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("expenses").unwrap();
    cmd.env("MY_EXPENSES_DATA_DIR", dir.path());
    cmd
}

fn init() -> TempDir {
    let dir = TempDir::new().unwrap();
    expenses(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));
    dir
}

#[test]
fn init_creates_default_payment_methods() {
    let dir = init();

    expenses(&dir)
        .args(["method", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cash"))
        .stdout(predicate::str::contains("Card"))
        .stdout(predicate::str::contains("Bank Transfer"));

    assert!(dir.path().join("config.json").exists());
}

#[test]
fn duplicate_payment_method_is_rejected() {
    let dir = init();

    expenses(&dir)
        .args(["method", "add", "cash"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn paying_moves_an_expense_out_of_the_default_listing() {
    let dir = init();

    expenses(&dir).args(["category", "add", "Rent"]).assert().success();
    expenses(&dir).args(["person", "add", "Maria"]).assert().success();
    expenses(&dir)
        .args([
            "expense", "add", "800", "--title", "April", "--due", "2025-04-01", "--category",
            "Rent", "--person", "Maria", "--method", "Card",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("800.00 €"));
    expenses(&dir)
        .args(["expense", "add", "15,50", "--title", "Snacks", "--due", "2025-04-03"])
        .assert()
        .success();

    expenses(&dir)
        .args(["expense", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("April"))
        .stdout(predicate::str::contains("Snacks"))
        .stdout(predicate::str::contains("2 expense(s)"));

    expenses(&dir)
        .args(["expense", "pay", "april"])
        .assert()
        .success()
        .stdout(predicate::str::contains("800.00 €"));

    expenses(&dir)
        .args(["expense", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Snacks"))
        .stdout(predicate::str::contains("April").not());

    expenses(&dir)
        .args(["expense", "list", "--paid"])
        .assert()
        .success()
        .stdout(predicate::str::contains("April"))
        .stdout(predicate::str::contains("Is Paid"));

    expenses(&dir)
        .args(["expense", "list", "--query", "paid_name=paid&search_name=apr"])
        .assert()
        .success()
        .stdout(predicate::str::contains("April"))
        .stdout(predicate::str::contains("1 expense(s)"));

    expenses(&dir)
        .args(["expense", "list", "--paid", "--person", "Maria"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Maria"));

    expenses(&dir)
        .args(["expense", "show", "April"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Paid Value:     800.00 €"))
        .stdout(predicate::str::contains("Payment Method: Card"));
}

#[test]
fn report_summarizes_every_expense() {
    let dir = init();

    expenses(&dir).args(["category", "add", "Rent"]).assert().success();
    expenses(&dir)
        .args(["expense", "add", "800", "--title", "April", "--category", "Rent", "--paid"])
        .assert()
        .success();
    expenses(&dir)
        .args(["expense", "add", "15.50", "--title", "Snacks"])
        .assert()
        .success();

    expenses(&dir)
        .args(["report", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("815.50 €"))
        .stdout(predicate::str::contains("15.50 €"))
        .stdout(predicate::str::contains("800.00 €"))
        .stdout(predicate::str::contains("Rent"))
        .stdout(predicate::str::contains("None"));

    expenses(&dir)
        .args(["report", "--all", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_value\": 81550"))
        .stdout(predicate::str::contains("\"paid_value\": 1550"));
}

#[test]
fn deleting_a_category_keeps_its_expenses() {
    let dir = init();

    expenses(&dir).args(["category", "add", "Water"]).assert().success();
    expenses(&dir)
        .args(["expense", "add", "42", "--title", "Bill", "--category", "Water"])
        .assert()
        .success();

    expenses(&dir)
        .args(["category", "delete", "water"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 expense(s) are now uncategorized"));

    expenses(&dir)
        .args(["expense", "show", "Bill"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Category:       (none)"));
}

#[test]
fn export_writes_csv() {
    let dir = init();
    let output = dir.path().join("expenses.csv");

    expenses(&dir)
        .args(["expense", "add", "9.99", "--title", "Music"])
        .assert()
        .success();

    expenses(&dir)
        .arg("export")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 expense(s)"));

    let contents = std::fs::read_to_string(&output).unwrap();
    assert!(contents.starts_with("ID,Title,Due Date,Final Value"));
    assert!(contents.contains("Music"));
    assert!(contents.contains("9.99,0.00,false"));
}

#[test]
fn audit_lists_changes() {
    let dir = init();

    expenses(&dir).args(["person", "add", "Joao"]).assert().success();

    expenses(&dir)
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("Joao"));
}

#[test]
fn unknown_expense_is_reported() {
    let dir = init();

    expenses(&dir)
        .args(["expense", "show", "nothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Expense not found: nothing"));
}

#[test]
fn time_only_date_format_is_refused() {
    let dir = init();

    expenses(&dir)
        .args(["config", "--date-format", "%H:%M"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format: '%H:%M'"));

    expenses(&dir)
        .args(["config", "--date-format", "%d/%m/%Y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Date format:     %d/%m/%Y"));

    expenses(&dir)
        .args(["expense", "add", "12", "--title", "Gas", "--due", "2025-05-09"])
        .assert()
        .success()
        .stdout(predicate::str::contains("09/05/2025"));

    expenses(&dir)
        .args(["expense", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("09/05/2025"));
}

#[test]
fn oversized_amount_is_rejected() {
    let dir = init();

    expenses(&dir)
        .args(["expense", "add", "50000000000000000", "--title", "Huge"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount out of range"));

    expenses(&dir)
        .args(["expense", "add", "1000000000000", "--title", "First"])
        .assert()
        .success();
    expenses(&dir)
        .args(["expense", "add", "1000000000000", "--title", "Second"])
        .assert()
        .success();

    expenses(&dir)
        .args(["report", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2000000000000.00 €"));
}

#[test]
fn padded_paid_marker_lists_unpaid_expenses() {
    let dir = init();

    expenses(&dir)
        .args(["expense", "add", "10", "--title", "Settled", "--paid"])
        .assert()
        .success();
    expenses(&dir)
        .args(["expense", "add", "20", "--title", "Open"])
        .assert()
        .success();

    expenses(&dir)
        .args(["expense", "list", "--query", "paid_name=%20paid%20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Open"))
        .stdout(predicate::str::contains("Settled").not());
}
