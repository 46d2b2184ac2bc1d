use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Order Desk - customers, products and orders from the terminal
#[derive(Parser, Debug)]
#[command(name = "order-desk")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Run 'order-desk' without arguments for the interactive form.")]
pub struct Cli {
    /// SQLite database file (overrides config and ORDER_DESK_DB_PATH)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add, list and inspect customers
    #[command(subcommand)]
    Customer(CustomerCommand),

    /// Add and list products
    #[command(subcommand)]
    Product(ProductCommand),

    /// Create and list orders
    #[command(subcommand)]
    Order(OrderCommand),

    /// Order statistics
    #[command(subcommand)]
    Report(ReportCommand),
}

#[derive(Subcommand, Debug)]
pub enum CustomerCommand {
    /// Add a customer
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        city: Option<String>,

        /// Customer id (generated when omitted)
        #[arg(long)]
        id: Option<String>,
    },

    /// List customers
    List,

    /// Contact card and total spent
    Show { customer_id: String },

    /// Change email and/or phone
    Update {
        customer_id: String,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProductCommand {
    /// Add a product
    Add {
        #[arg(long)]
        name: String,

        #[arg(long, allow_negative_numbers = true)]
        price: f64,

        /// Stock keeping unit (generated when omitted)
        #[arg(long)]
        sku: Option<String>,
    },

    /// List products
    List,
}

#[derive(Subcommand, Debug)]
pub enum OrderCommand {
    /// Create a one-item order
    Create {
        /// Customer id
        #[arg(long)]
        customer: String,

        /// Product SKU
        #[arg(long)]
        sku: String,

        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,
    },

    /// List orders
    List {
        #[arg(long, value_enum, default_value_t = SortKey::Date)]
        sort: SortKey,

        /// Largest first
        #[arg(long)]
        desc: bool,
    },
}

/// Order list sort key.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Date,
    Total,
    Customer,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ReportCommand {
    /// Customers with the most orders
    TopCustomers {
        /// Number of rows
        #[arg(short)]
        n: Option<usize>,
    },

    /// Orders per day as a bar chart
    Timeline,

    /// Best-selling products by quantity
    TopProducts {
        /// Number of rows
        #[arg(short)]
        k: Option<usize>,
    },

    /// Who bought what
    Graph,
}
