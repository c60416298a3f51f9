use std::io::{self, Cursor, Write};
use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;

use shopping_cart_cli::cli::{LineInput, MenuChoice, Session, SessionError, Transition};
use shopping_cart_cli::models::item::StoreItemRequest;
use shopping_cart_cli::services::catalog_service::Catalog;

type ScriptedSession<'c> = Session<'c, LineInput<Cursor<Vec<u8>>, std::io::Sink>, Vec<u8>>;

fn scenario_catalog() -> Catalog {
    Catalog::from_requests(vec![
        StoreItemRequest::new(1, "Laptop", Decimal::new(120000, 2)),
        StoreItemRequest::new(2, "Smartphone", Decimal::new(80000, 2)),
    ])
    .unwrap()
}

fn session<'c>(catalog: &'c Catalog, script: &str) -> ScriptedSession<'c> {
    console::set_colors_enabled(false);
    let input = LineInput::new(Cursor::new(script.as_bytes().to_vec()), std::io::sink());
    Session::new(catalog, input, Vec::new())
}

fn run_script(catalog: &Catalog, script: &str) -> String {
    let mut session = session(catalog, script);
    session.run().expect("session runs");
    String::from_utf8(session.into_output()).unwrap()
}

#[test]
fn test_menu_lists_all_choices() {
    let catalog = scenario_catalog();

    let output = run_script(&catalog, "6\n");

    assert!(output.contains("=== E-Commerce System ==="));
    for choice in MenuChoice::ALL {
        assert!(output.contains(&choice.to_string()), "missing {}", choice);
    }
    assert!(output.contains("Exiting... Thank you for visiting!"));
}

#[test]
fn test_view_products() {
    let catalog = scenario_catalog();

    let output = run_script(&catalog, "1\n6\n");

    assert!(output.contains("Available Products:"));
    assert!(output.contains("Laptop"));
    assert!(output.contains("$1200.00"));
    assert!(output.contains("Smartphone"));
}

#[test]
fn test_add_merges_and_totals() {
    let catalog = scenario_catalog();
    let mut session = session(&catalog, "2\n1\n2\n2\n2\n1\n2\n1\n1\n");

    session.run().unwrap();

    let lines = session.cart().lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].item().name(), "Laptop");
    assert_eq!(lines[0].quantity(), 3);
    assert_eq!(lines[1].item().name(), "Smartphone");
    assert_eq!(lines[1].quantity(), 1);
    assert_eq!(session.cart().total_amount(), Decimal::new(440000, 2));

    let output = String::from_utf8(session.into_output()).unwrap();
    assert_eq!(output.matches("Product added to cart.").count(), 3);
}

#[test]
fn test_unknown_id_never_reaches_cart() {
    let catalog = scenario_catalog();
    let mut session = session(&catalog, "2\n99\n1\n2\n-1\n1\n");

    session.run().unwrap();

    assert!(session.cart().is_empty());
    let output = String::from_utf8(session.into_output()).unwrap();
    assert_eq!(output.matches("Invalid Product ID.").count(), 2);
}

#[test]
fn test_view_empty_cart() {
    let catalog = scenario_catalog();

    let output = run_script(&catalog, "3\n6\n");

    assert!(output.contains("Your cart is empty."));
    assert!(!output.contains("Your Cart:"));
}

#[test]
fn test_view_cart_with_lines() {
    let catalog = scenario_catalog();

    let output = run_script(&catalog, "2\n2\n2\n3\n6\n");

    assert!(output.contains("Your Cart:"));
    assert!(output.contains("Smartphone"));
    assert!(output.contains("$1600.00"));
}

#[test]
fn test_remove_reports_success_even_when_absent() {
    let catalog = scenario_catalog();
    let mut session = session(&catalog, "2\n1\n1\n4\n2\n4\n1\n4\n1\n6\n");

    session.run().unwrap();

    assert!(session.cart().is_empty());
    let output = String::from_utf8(session.into_output()).unwrap();
    assert_eq!(output.matches("Product removed from cart.").count(), 3);
}

#[test]
fn test_checkout_prints_total_and_clears() {
    let catalog = scenario_catalog();
    let mut session = session(&catalog, "2\n1\n2\n2\n2\n1\n2\n1\n1\n5\n3\n6\n");

    session.run().unwrap();

    assert!(session.cart().is_empty());
    let output = String::from_utf8(session.into_output()).unwrap();
    let checkout = output.find("=== Checkout ===").expect("checkout header");
    let after = &output[checkout..];
    assert!(after.contains("Your Cart:"));
    assert!(after.contains("Total Amount: $4400.00"));
    assert!(after.contains("Thank you for your purchase!"));
    assert!(after.contains("Your cart is empty."));
}

#[test]
fn test_checkout_empty_cart() {
    let catalog = scenario_catalog();

    let output = run_script(&catalog, "5\n6\n");

    assert!(output.contains("Your cart is empty."));
    assert!(output.contains("Total Amount: $0.00"));
}

#[test]
fn test_invalid_choice_continues() {
    let catalog = scenario_catalog();

    let output = run_script(&catalog, "0\n7\n6\n");

    assert_eq!(output.matches("Invalid choice. Please try again.").count(), 2);
    assert!(output.contains("Exiting..."));
}

#[test]
fn test_malformed_input_reprompts() {
    let catalog = scenario_catalog();
    let mut session = session(&catalog, "abc\n2\none\n2\n1\nlots\n2\n1\n2\n6\n");

    session.run().unwrap();

    assert_eq!(session.cart().quantity_of(1), Some(2));
    let output = String::from_utf8(session.into_output()).unwrap();
    assert!(output.contains("'abc' is not a valid whole number."));
    assert!(output.contains("'one' is not a valid whole number."));
    assert!(output.contains("'lots' is not a valid whole number."));
}

#[test]
fn test_non_positive_quantity_is_rejected() {
    let catalog = scenario_catalog();
    let mut session = session(&catalog, "2\n1\n0\n2\n1\n-3\n6\n");

    session.run().unwrap();

    assert!(session.cart().is_empty());
    let output = String::from_utf8(session.into_output()).unwrap();
    assert_eq!(output.matches("Quantity must be at least 1.").count(), 2);
}

#[test]
fn test_end_of_input_stops_session() {
    let catalog = scenario_catalog();
    let mut session = session(&catalog, "2\n1\n");

    session.run().unwrap();

    assert!(session.cart().is_empty());
}

#[test]
fn test_step_transitions() {
    let catalog = scenario_catalog();
    let mut session = session(&catalog, "3\n9\nx\n6\n");

    assert_eq!(session.step().unwrap(), Transition::Continue);
    assert!(matches!(
        session.step(),
        Err(SessionError::InvalidChoice { choice: 9 })
    ));
    assert!(matches!(
        session.step(),
        Err(SessionError::MalformedInput { ref input }) if input == "x"
    ));
    assert_eq!(session.step().unwrap(), Transition::Stop);
    assert!(matches!(session.step(), Err(SessionError::InputClosed)));
}

#[test]
fn test_error_recoverability() {
    assert!(SessionError::NotFound { id: 5 }.is_recoverable());
    assert!(SessionError::InvalidChoice { choice: 0 }.is_recoverable());
    assert!(SessionError::MalformedInput { input: "?".into() }.is_recoverable());
    assert!(!SessionError::InputClosed.is_recoverable());
    assert!(!SessionError::Io(std::io::Error::new(std::io::ErrorKind::Other, "boom")).is_recoverable());
}

#[derive(Clone, Default)]
struct SharedLog(Arc<Mutex<Vec<u8>>>);

impl Write for SharedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedLog {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

fn run_with_warn_log(catalog: &Catalog, script: &str) -> String {
    let log = SharedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        run_script(catalog, script);
    });
    log.contents()
}

#[test]
fn test_user_mistakes_do_not_log_warnings() {
    let catalog = scenario_catalog();

    let log = run_with_warn_log(&catalog, "abc\n9\n2\n99\n1\n2\n1\n0\n6\n");

    assert!(log.is_empty(), "unexpected warnings: {}", log);
}

#[test]
fn test_input_closed_logs_warning() {
    let catalog = scenario_catalog();

    let log = run_with_warn_log(&catalog, "3\n");

    assert!(log.contains("Input closed"));
}

#[test]
fn test_oversized_amount_is_rejected_without_crash() {
    let catalog = Catalog::from_requests(vec![StoreItemRequest::new(
        1,
        "Yacht",
        Decimal::from_i128_with_scale(100_000_000_000_000_000_000, 0),
    )])
    .unwrap();
    let mut session = session(&catalog, "2\n1\n1000000000\n3\n5\n6\n");

    session.run().unwrap();

    assert!(session.cart().is_empty());
    let output = String::from_utf8(session.into_output()).unwrap();
    assert!(output.contains("would make the cart total too large"));
    assert!(output.contains("Total Amount: $0.00"));
}
