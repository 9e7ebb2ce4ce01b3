use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use customers::config::{config_dir, load_config, load_form, save_form, CONFIG_TEMPLATE};
use customers::error::{ClientError, Result};
use customers::render::{address_form, customer_form};
use customers::{Flavor, FormState, HttpTransport, RestClient, ResultsTable, Session};

#[derive(Parser)]
#[command(name = "customers")]
#[command(version, about = "Form-driven CLI client for the customers REST API", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.customers or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    /// Server origin, overrides config.toml (e.g. http://localhost:8000)
    #[arg(long, global = true)]
    server: Option<String>,

    /// Talk to the legacy /customers API
    #[arg(long, global = true)]
    legacy: bool,

    /// Print result tables as HTML
    #[arg(long, global = true)]
    html: bool,

    /// Log requests to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a template config.toml
    Init,

    /// Show the current form and flash message
    Show,

    /// Clear the form and the flash message
    Clear,

    /// Create a customer from the form
    Create(CustomerFields),

    /// Update the customer whose id is in the form
    Update(CustomerFields),

    /// Load a customer into the form
    Retrieve(IdField),

    /// Delete a customer
    Delete(IdField),

    /// Search customers by name, nickname, email or birthday
    Search(SearchFields),

    /// Activate a customer
    Activate(IdField),

    /// Deactivate a customer
    Deactivate(IdField),

    /// Manage a customer's addresses
    #[command(subcommand)]
    Address(AddressCommands),
}

#[derive(Subcommand)]
enum AddressCommands {
    /// List all addresses of a customer
    List(AddressFields),

    /// Load one address into the form
    Get(AddressFields),

    /// Create an address for a customer
    Create(AddressFields),

    /// Update an address
    Update(AddressFields),

    /// Delete an address
    Delete(AddressFields),
}

/// Values typed into the customer form before the command runs
#[derive(Args)]
struct CustomerFields {
    #[arg(long)]
    id: Option<String>,
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    nickname: Option<String>,
    #[arg(long)]
    password: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    gender: Option<String>,
    #[arg(long)]
    birthday: Option<String>,
    #[arg(long, value_name = "true|false")]
    active: Option<bool>,
}

#[derive(Args)]
struct SearchFields {
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    nickname: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    birthday: Option<String>,
}

#[derive(Args)]
struct IdField {
    /// Customer id (default: the id in the form)
    #[arg(long)]
    id: Option<String>,
}

#[derive(Args)]
struct AddressFields {
    #[arg(long)]
    customer_id: Option<String>,
    #[arg(long)]
    address_id: Option<String>,
    #[arg(long)]
    address: Option<String>,
}

fn type_into(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *field = value;
    }
}

impl CustomerFields {
    fn apply(self, form: &mut FormState) {
        let customer = &mut form.customer;
        type_into(&mut customer.customer_id, self.id);
        type_into(&mut customer.first_name, self.first_name);
        type_into(&mut customer.last_name, self.last_name);
        type_into(&mut customer.nickname, self.nickname);
        type_into(&mut customer.password, self.password);
        type_into(&mut customer.email, self.email);
        type_into(&mut customer.gender, self.gender);
        type_into(&mut customer.birthday, self.birthday);
        type_into(&mut customer.is_active, self.active.map(|b| b.to_string()));
    }
}

impl SearchFields {
    fn apply(self, form: &mut FormState) {
        let customer = &mut form.customer;
        type_into(&mut customer.first_name, self.first_name);
        type_into(&mut customer.last_name, self.last_name);
        type_into(&mut customer.nickname, self.nickname);
        type_into(&mut customer.email, self.email);
        type_into(&mut customer.birthday, self.birthday);
    }
}

impl IdField {
    fn apply(self, form: &mut FormState) {
        type_into(&mut form.customer.customer_id, self.id);
    }
}

impl AddressFields {
    fn apply(self, form: &mut FormState) {
        let address = &mut form.address;
        type_into(&mut address.customer_id, self.customer_id);
        type_into(&mut address.address_id, self.address_id);
        type_into(&mut address.address, self.address);
    }
}

/// Which part of the form a command shows afterwards
#[derive(Clone, Copy)]
enum Panel {
    Customer,
    Address,
    Both,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    if matches!(cli.command, Commands::Init) {
        return cmd_init(&cfg_dir);
    }

    let mut config = load_config(&cfg_dir)?;
    if let Some(url) = cli.server {
        config.server.url = url;
    }
    if cli.legacy {
        config.server.flavor = Flavor::Legacy;
    }

    let mut form = load_form(&cfg_dir)?;

    let command = match cli.command {
        Commands::Show => {
            print_form(&form, Panel::Both, true);
            return Ok(());
        }
        command => command,
    };

    let transport = HttpTransport::new(&config.server);
    log::debug!("Using {}", transport.base_url());
    let client = RestClient::new(transport);

    let (panel, outcome) = dispatch(&client, &mut form, config.server.flavor, command);

    // The form keeps failure effects too, so save it before reporting
    save_form(&cfg_dir, &form)?;
    print_form(&form, panel, outcome.is_ok());

    // What the user sees on failure is the flash, never the raw cause
    let outcome = outcome.map_err(|e| {
        log::debug!("Command failed: {e}");
        ClientError::CommandFailed(form.flash.clone())
    });

    if let Some(table) = outcome? {
        if cli.html {
            println!("{}", table.to_html().into_string());
        } else {
            println!("{}", table.to_text());
        }
        println!("{} result(s)", table.len());
    }

    Ok(())
}

fn dispatch(
    client: &RestClient<HttpTransport>,
    form: &mut FormState,
    flavor: Flavor,
    command: Commands,
) -> (Panel, Result<Option<ResultsTable>>) {
    match command {
        Commands::Create(fields) => {
            fields.apply(form);
            (Panel::Customer, Session::new(client, form, flavor).create_customer().map(|_| None))
        }
        Commands::Update(fields) => {
            fields.apply(form);
            (Panel::Customer, Session::new(client, form, flavor).update_customer().map(|_| None))
        }
        Commands::Retrieve(id) => {
            id.apply(form);
            (Panel::Customer, Session::new(client, form, flavor).retrieve_customer().map(|_| None))
        }
        Commands::Delete(id) => {
            id.apply(form);
            (Panel::Customer, Session::new(client, form, flavor).delete_customer().map(|_| None))
        }
        Commands::Search(fields) => {
            fields.apply(form);
            (Panel::Customer, Session::new(client, form, flavor).search_customers().map(Some))
        }
        Commands::Activate(id) => {
            id.apply(form);
            (Panel::Customer, Session::new(client, form, flavor).activate_customer().map(|_| None))
        }
        Commands::Deactivate(id) => {
            id.apply(form);
            (Panel::Customer, Session::new(client, form, flavor).deactivate_customer().map(|_| None))
        }
        Commands::Clear => {
            Session::new(client, form, flavor).clear();
            (Panel::Both, Ok(None))
        }
        Commands::Address(command) => (Panel::Address, dispatch_address(client, form, flavor, command)),
        Commands::Init | Commands::Show => (Panel::Both, Ok(None)),
    }
}

fn dispatch_address(
    client: &RestClient<HttpTransport>,
    form: &mut FormState,
    flavor: Flavor,
    command: AddressCommands,
) -> Result<Option<ResultsTable>> {
    match command {
        AddressCommands::List(fields) => {
            fields.apply(form);
            Session::new(client, form, flavor).search_addresses().map(Some)
        }
        AddressCommands::Get(fields) => {
            fields.apply(form);
            Session::new(client, form, flavor).retrieve_address().map(|_| None)
        }
        AddressCommands::Create(fields) => {
            fields.apply(form);
            Session::new(client, form, flavor).create_address().map(|_| None)
        }
        AddressCommands::Update(fields) => {
            fields.apply(form);
            Session::new(client, form, flavor).update_address().map(|_| None)
        }
        AddressCommands::Delete(fields) => {
            fields.apply(form);
            Session::new(client, form, flavor).delete_address().map(|_| None)
        }
    }
}

fn print_form(form: &FormState, panel: Panel, with_flash: bool) {
    if with_flash && !form.flash.is_empty() {
        println!("{}", form.flash);
    }
    if matches!(panel, Panel::Customer | Panel::Both) {
        println!("Customer");
        println!("{}", customer_form(&form.customer));
    }
    if matches!(panel, Panel::Address | Panel::Both) {
        println!("Address");
        println!("{}", address_form(&form.address));
    }
}

/// Initialize config directory with the template config
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(ClientError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;

    println!("Initialized customers config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Point it at your server:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!("  2. Look up a customer:       customers retrieve --id <customer-id>");

    Ok(())
}
