use std::str::FromStr;
use clap::{Args, Parser, Subcommand};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(name = "food-order")]
#[command(about = "client cli used to place and look up food orders", version, long_about = None
)]
struct Cli {
    #[arg(long, env = "ORDER_SERVER_HOST", default_value = "http://localhost:8080", help = "Base url of the order server")]
    host: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// order related ops
    #[command(arg_required_else_help = true)]
    Order(OrderArgs),
}

#[derive(Debug, Args)]
pub(crate) struct OrderArgs {
    #[command(subcommand)]
    command: OrderCmds,
}

#[derive(Debug, Subcommand)]
enum OrderCmds {
    /// place a new order
    #[command(arg_required_else_help = true)]
    Create(CreateArgs),
    /// show an existing order
    #[command(arg_required_else_help = true)]
    Get {
        #[arg(help = "Id of the order")]
        id: String,
    },
}

#[derive(Debug, Args)]
struct CreateArgs {
    #[arg(short = 'r', long, help = "Restaurant to order from")]
    restaurant: String,
    #[arg(short = 'c', long, help = "Name of the customer")]
    customer: String,
    #[arg(short = 't', long = "type", default_value = "dine-in", help = "Order type, e.g. dine-in, takeaway, delivery")]
    order_type: String,
    #[arg(long = "item", help = "Menu item and quantity.", value_name = "MENU_ITEM_ID:QTY", num_args = 1.., required = true)]
    items: Vec<ItemArg>,
}

#[derive(Debug, Clone, Serialize)]
struct ItemArg {
    menu_item_id: String,
    quantity: i32,
}

impl FromStr for ItemArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, qty) = s.split_once(':').unwrap_or((s, "1"));
        let quantity = qty.parse().map_err(|_| format!("invalid quantity in `{s}`"))?;
        Ok(Self { menu_item_id: id.to_string(), quantity })
    }
}

#[derive(Debug, Deserialize)]
struct OrderLine {
    name: String,
    quantity: i32,
    price: i64,
    total: i64,
}

#[derive(Debug, Deserialize)]
struct OrderResponse {
    #[serde(rename = "_id")]
    id: String,
    customer_name: String,
    order_type: String,
    created_at: String,
    items: Vec<OrderLine>,
    total_price: i64,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

fn print_order(order: &OrderResponse) {
    println!("order {} ({}) for {} at {}", order.id, order.order_type, order.customer_name, order.created_at);
    for line in &order.items {
        println!("  {:>3} x {:<24} {:>8} {:>8}", line.quantity, line.name, line.price, line.total);
    }
    println!("  total {:>41}", order.total_price);
}

async fn print_failure(res: reqwest::Response) {
    let status = res.status();
    match res.json::<ErrorResponse>().await {
        Ok(body) => println!("request failed with {}: {}", status, body.message),
        Err(_) => println!("got unexpected status code, {}", status),
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Cli::parse();
    let host = args.host.trim_end_matches('/');

    match args.command {
        Commands::Order(order) => match order.command {
            OrderCmds::Create(args) => {
                println!("placing order at restaurant={}", args.restaurant);
                let res = Client::new()
                    .post(format!("{}/orders", host))
                    .json(&serde_json::json!({
                        "restaurant_id": args.restaurant,
                        "customer_name": args.customer,
                        "order_type": args.order_type,
                        "items": args.items,
                    }))
                    .send()
                    .await?;
                match res.status() {
                    StatusCode::CREATED => print_order(&res.json::<OrderResponse>().await?),
                    _ => print_failure(res).await,
                }
            }
            OrderCmds::Get { id } => {
                let res = Client::new().get(format!("{}/orders/{}", host, id)).send().await?;
                match res.status() {
                    StatusCode::OK => print_order(&res.json::<OrderResponse>().await?),
                    StatusCode::NOT_FOUND => println!("order {} not found", id),
                    _ => print_failure(res).await,
                }
            }
        },
    };
    Ok(())
}
