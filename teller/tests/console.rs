use teller::console::LineConsole;
use teller::ledger::Bank;

fn run_session(bank: &mut Bank, input: &str) -> String {
    let mut console = LineConsole::new(input.as_bytes(), Vec::new()).echoing();
    teller::run(bank, &mut console).unwrap();
    String::from_utf8(console.into_output()).unwrap()
}

#[test]
fn new_customer_session() {
    let mut bank = Bank::new("Rust Savings");
    let transcript = run_session(
        &mut bank,
        "login\nalice\n1111\n1111\ndeposit 500\nwithdraw cash 300 100 done\nshow\nexit\nshow\n",
    );

    let alice = bank.find("alice").unwrap();
    assert_eq!(3410, alice.balance());
    assert_eq!(Some(alice.id()), bank.session());

    assert!(transcript.contains("Guest@Rust Savings $: login"));
    assert!(transcript.contains("alice@Rust Savings $: deposit 500"));
    assert!(transcript.contains("     3 Note(s) of Rs. 100/-"));
    assert!(transcript.contains("the user alice who has Rs. 3410/-"));
    assert!(transcript.trim_end().ends_with("alice@Rust Savings $: exit"));
    assert_eq!(1, transcript.matches("currently under alice's control").count());
}

#[test]
fn returning_customer_with_wrong_pin() {
    let mut bank = Bank::new("Rust Savings");
    bank.create_account("alice", 1111).unwrap();

    let transcript = run_session(&mut bank, "login\nalice\n9999\ndeposit 100\n");

    assert!(transcript.contains("Failure: Not logged in, wrong PIN!"));
    assert!(transcript.contains("Failure: login required"));
    assert_eq!(None, bank.session());
    assert_eq!(Some(3210), bank.find("alice").map(|a| a.balance()));
}

#[test]
fn switching_customers() {
    let mut bank = Bank::new("Rust Savings");
    run_session(
        &mut bank,
        "login\nalice\n1\n1\nwithdraw 210\nlogin\nbob\n2\n2\ndeposit 90\nlogout\nexit\n",
    );

    assert_eq!(Some(3000), bank.find("alice").map(|a| a.balance()));
    assert_eq!(Some(3300), bank.find("bob").map(|a| a.balance()));
    assert_eq!(2, bank.accounts().len());
    assert_eq!(None, bank.session());
}

#[test]
fn invalid_utf8_line_does_not_end_the_session() {
    let mut bank = Bank::new("Rust Savings");
    bank.create_account("alice", 1111).unwrap();
    bank.login("alice", 1111).unwrap();

    let mut console = LineConsole::new(&b"caf\xe9\ndeposit 100\nexit\n"[..], Vec::new());
    teller::run(&mut bank, &mut console).unwrap();
    let transcript = String::from_utf8(console.into_output()).unwrap();

    assert_eq!(Some(3310), bank.find("alice").map(|a| a.balance()));
    assert!(transcript.contains("Success: You have deposited into the account!"));
}

#[test]
fn end_of_input_ends_the_session() {
    let mut bank = Bank::new("Rust Savings");
    let transcript = run_session(&mut bank, "help\nwithdraw cash");

    assert!(transcript.contains("Failure: Incomplete operation and command."));
    assert!(transcript.ends_with("Guest@Rust Savings $: \n"));
}
