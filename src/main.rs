use clap::Parser;
use deribit_console::config::Config;
use deribit_console::errors::Result;
use deribit_console::models::{OpenOrder, OrderBookSnapshot, PositionSnapshot};
use deribit_console::venue::{Credentials, DeribitClient};
use rust_decimal::Decimal;
use std::io::{self, Write};
use std::str::FromStr;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "Deribit Console")]
#[command(version = "0.1.0")]
#[command(about = "An interactive trading console for the Deribit testnet JSON-RPC API", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Parse command line arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load_from_file(&args.config)?;
    config.expand_env_vars()?;

    // Initialize logging
    init_logging(&config.logging.level)?;

    info!("Starting Deribit Console v0.1.0");
    info!("Venue: {}", config.venue.api_url);

    let mut client =
        DeribitClient::new(config.venue.api_url.clone(), config.error_log.max_entries);
    let credentials = Credentials::new(
        config.credentials.client_id.clone(),
        config.credentials.client_secret.clone(),
    );

    // A session is established exactly once; without one, no private
    // action can be attempted for this run.
    if let Err(e) = client.authenticate(&credentials).await {
        error!("Unable to obtain access token, aborting operations: {}", e);
        return Ok(());
    }
    info!("Authenticated successfully");

    run_menu(&client).await
}

/// Initialize logging based on configuration
fn init_logging(level: &str) -> Result<()> {
    let log_level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).map_err(|e| {
        deribit_console::errors::DeribitError::ConfigError(format!("Failed to set logger: {}", e))
    })?;

    Ok(())
}

/// Interactive menu loop. One action is in flight at a time; a failed
/// action is reported immediately and can be retried by picking it again.
async fn run_menu(client: &DeribitClient) -> Result<()> {
    loop {
        println!("\nMENU:");
        println!("1. PLACE ORDER");
        println!("2. CANCEL ORDER");
        println!("3. MODIFY ORDER");
        println!("4. GET ORDER BOOK");
        println!("5. GET POSITION");
        println!("6. GET OPEN ORDERS");
        println!("7. EXIT");
        println!("8. VIEW ERROR LOG");

        let choice = match prompt("Enter a choice")? {
            Some(line) => line,
            None => return Ok(()), // stdin closed
        };

        match choice.as_str() {
            "1" => {
                let Some(instrument) = prompt("Instrument name")? else {
                    return Ok(());
                };
                let Some(price) = prompt_decimal("Price")? else {
                    return Ok(());
                };
                let Some(amount) = prompt_decimal("Amount")? else {
                    return Ok(());
                };
                match client.place_order(&instrument, price, amount).await {
                    Ok(result) => println!("Place order response:\n{:#}", result),
                    Err(e) => eprintln!("Failed to place order: {}", e),
                }
            }
            "2" => {
                let Some(order_id) = prompt("Order id")? else {
                    return Ok(());
                };
                match client.cancel_order(&order_id).await {
                    Ok(result) => println!("Cancel order response:\n{:#}", result),
                    Err(e) => eprintln!("Failed to cancel order: {}", e),
                }
            }
            "3" => {
                let Some(order_id) = prompt("Order id")? else {
                    return Ok(());
                };
                let Some(price) = prompt_decimal("Price")? else {
                    return Ok(());
                };
                let Some(amount) = prompt_decimal("Amount")? else {
                    return Ok(());
                };
                match client.modify_order(&order_id, amount, price).await {
                    Ok(result) => println!("Modify order response:\n{:#}", result),
                    Err(e) => eprintln!("Failed to modify order: {}", e),
                }
            }
            "4" => {
                let Some(instrument) = prompt("Instrument name")? else {
                    return Ok(());
                };
                match client.get_order_book(&instrument).await {
                    Ok(book) => print_order_book(&instrument, &book),
                    Err(e) => eprintln!("Failed to fetch order book: {}", e),
                }
            }
            "5" => {
                let Some(instrument) = prompt("Instrument name")? else {
                    return Ok(());
                };
                match client.get_position(&instrument).await {
                    Ok(position) => print_position(&instrument, &position),
                    Err(e) => eprintln!("Failed to fetch position: {}", e),
                }
            }
            "6" => match client.get_open_orders().await {
                Ok(orders) => print_open_orders(&orders),
                Err(e) => eprintln!("Failed to fetch open orders: {}", e),
            },
            "7" => {
                println!("Exiting.");
                return Ok(());
            }
            "8" => print_error_log(&client.error_log()),
            other => eprintln!("Invalid choice '{}'. Please try again.", other),
        }
    }
}

/// Prompt for one line of input. `None` means stdin was closed.
fn prompt(label: &str) -> Result<Option<String>> {
    print!("{}: ", label);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Prompt until a valid decimal is entered. String parsing happens here,
/// at the boundary — the client only ever sees validated numbers.
fn prompt_decimal(label: &str) -> Result<Option<Decimal>> {
    loop {
        let Some(raw) = prompt(label)? else {
            return Ok(None);
        };
        match Decimal::from_str(&raw) {
            Ok(value) => return Ok(Some(value)),
            Err(e) => eprintln!("Invalid number '{}': {}", raw, e),
        }
    }
}

fn print_order_book(instrument: &str, book: &OrderBookSnapshot) {
    println!("\nOrder book for {}:", instrument);
    println!(
        "Best bid: {} x {}",
        fmt_opt(&book.best_bid_price),
        fmt_opt(&book.best_bid_amount)
    );
    println!(
        "Best ask: {} x {}",
        fmt_opt(&book.best_ask_price),
        fmt_opt(&book.best_ask_amount)
    );

    println!("Asks:");
    for level in &book.asks {
        println!("  Price: {}, Amount: {}", level.price, level.amount);
    }
    println!("Bids:");
    for level in &book.bids {
        println!("  Price: {}, Amount: {}", level.price, level.amount);
    }

    println!("Mark price: {}", fmt_opt(&book.mark_price));
    println!("Open interest: {}", fmt_opt(&book.open_interest));
    println!("Timestamp: {}", fmt_opt(&book.timestamp));
}

fn print_position(instrument: &str, position: &PositionSnapshot) {
    println!("\nPosition details for {}:", instrument);
    println!(
        "Estimated liquidation price: {}",
        fmt_opt(&position.estimated_liquidation_price)
    );
    println!("Size currency: {}", fmt_opt(&position.size_currency));
    println!("Realized funding: {}", fmt_opt(&position.realized_funding));
    println!("Total profit loss: {}", fmt_opt(&position.total_profit_loss));
    println!(
        "Realized profit loss: {}",
        fmt_opt(&position.realized_profit_loss)
    );
    println!(
        "Floating profit loss: {}",
        fmt_opt(&position.floating_profit_loss)
    );
    println!("Leverage: {}", fmt_opt(&position.leverage));
    println!("Average price: {}", fmt_opt(&position.average_price));
    println!("Delta: {}", fmt_opt(&position.delta));
    println!("Interest value: {}", fmt_opt(&position.interest_value));
    println!("Mark price: {}", fmt_opt(&position.mark_price));
    println!("Settlement price: {}", fmt_opt(&position.settlement_price));
    println!("Index price: {}", fmt_opt(&position.index_price));
    println!("Direction: {}", fmt_opt(&position.direction));
    println!(
        "Open orders margin: {}",
        fmt_opt(&position.open_orders_margin)
    );
    println!("Initial margin: {}", fmt_opt(&position.initial_margin));
    println!(
        "Maintenance margin: {}",
        fmt_opt(&position.maintenance_margin)
    );
    println!("Kind: {}", fmt_opt(&position.kind));
    println!("Size: {}", fmt_opt(&position.size));
}

fn print_open_orders(orders: &[OpenOrder]) {
    if orders.is_empty() {
        println!("\nNo open orders.");
        return;
    }

    println!("\nOpen orders:");
    for order in orders {
        println!(
            "Instrument: {}, Order ID: {}, Price: {}, Amount: {}",
            order.instrument_name, order.order_id, order.price, order.amount
        );
    }
}

fn print_error_log(entries: &[String]) {
    if entries.is_empty() {
        println!("\nNo errors logged.");
        return;
    }

    println!("\nError log:");
    for (i, entry) in entries.iter().enumerate() {
        println!("{}. {}", i + 1, entry);
    }
}

fn fmt_opt<T: std::fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "-".to_string(),
    }
}
