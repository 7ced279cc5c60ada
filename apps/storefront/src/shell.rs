//! # Interactive Shell
//!
//! Line-oriented front end over the storefront commands. Each input line
//! is one UI event.
//!
//! ```text
//! pedal> list ban kenda
//!   [3] Ban Slick (Kenda)  Rp 95.000  out of stock
//! Showing 1 results for "kenda"
//! pedal> add 2
//! ✓ Product added: Velg B was added to your cart
//! pedal> save name=Ban Kenda 23c; price=150000; stock=4; category=ban
//! ✓ Product added: Ban Kenda 23c
//! ```
//!
//! Errors always reach the user through the notification sink, so the
//! shell itself only prints command output.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::commands::cart::CartResponse;
use crate::commands::catalog::ProductDto;
use crate::commands::{admin, cart, catalog, checkout, session};
use crate::error::ApiError;
use crate::state::{ConfigState, SessionState};
use pedal_core::validation::ProductForm;
use pedal_core::{NotificationSink, StoreBackend, ALL_CATEGORIES};

const HELP: &str = "\
commands:
  list [category|all] [search...]   browse the catalog
  featured                          featured products
  show <id>                         product details
  add <id>                          add one unit to the cart
  qty <id> <n>                      set quantity (0 removes)
  rm <id>                           remove from the cart
  clear                             empty the cart
  cart                              show the cart
  checkout                          order summary
  login <email> / logout
  admin                             list products with stock
  edit <id>                         show the edit form
  save key=value; ...               create a product
  update <id> key=value; ...        edit a product
  delete <id>                       delete a product
  help / quit";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List { category: String, query: String },
    Featured,
    Show(String),
    Add(String),
    Quantity(String, i64),
    Remove(String),
    Clear,
    Cart,
    Checkout,
    Login(String),
    Logout,
    Admin,
    Edit(String),
    Save {
        id: Option<String>,
        fields: Vec<(String, String)>,
    },
    Delete(String),
    Help,
    Quit,
}

/// Parses one input line. `Err` carries a usage message.
pub fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim_start();
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim_end_matches(['\r', '\n']);

    let id = |usage: &str| -> Result<String, String> {
        match rest.trim() {
            "" => Err(format!("usage: {}", usage)),
            id => Ok(id.to_string()),
        }
    };

    match verb.trim() {
        "list" | "ls" => {
            let (category, query) = rest.trim_start().split_once(' ').unwrap_or((rest.trim(), ""));
            let category = if category.is_empty() { ALL_CATEGORIES } else { category };
            Ok(ShellCommand::List {
                category: category.to_string(),
                query: query.to_string(),
            })
        }
        "featured" => Ok(ShellCommand::Featured),
        "show" => id("show <id>").map(ShellCommand::Show),
        "add" => id("add <id>").map(ShellCommand::Add),
        "qty" => {
            let mut parts = rest.split_whitespace();
            match (parts.next(), parts.next().map(str::parse::<i64>)) {
                (Some(id), Some(Ok(n))) => Ok(ShellCommand::Quantity(id.to_string(), n)),
                _ => Err("usage: qty <id> <n>".to_string()),
            }
        }
        "rm" | "remove" => id("rm <id>").map(ShellCommand::Remove),
        "clear" => Ok(ShellCommand::Clear),
        "cart" => Ok(ShellCommand::Cart),
        "checkout" => Ok(ShellCommand::Checkout),
        "login" => id("login <email>").map(ShellCommand::Login),
        "logout" => Ok(ShellCommand::Logout),
        "admin" => Ok(ShellCommand::Admin),
        "edit" => id("edit <id>").map(ShellCommand::Edit),
        "save" => Ok(ShellCommand::Save {
            id: None,
            fields: parse_fields(rest)?,
        }),
        "update" => {
            let (id, fields) = rest.trim_start().split_once(' ').unwrap_or((rest.trim(), ""));
            if id.is_empty() {
                return Err("usage: update <id> key=value; ...".to_string());
            }
            Ok(ShellCommand::Save {
                id: Some(id.to_string()),
                fields: parse_fields(fields)?,
            })
        }
        "delete" => id("delete <id>").map(ShellCommand::Delete),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" => Ok(ShellCommand::Quit),
        "" => Err(String::new()),
        other => Err(format!("unknown command: {} (try `help`)", other)),
    }
}

/// `name=Ban Kenda 23c; price=150000` → `[("name", "Ban Kenda 23c"), ("price", "150000")]`
fn parse_fields(raw: &str) -> Result<Vec<(String, String)>, String> {
    raw.split(';')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
                .ok_or_else(|| format!("expected key=value, got `{}`", pair))
        })
        .collect()
}

/// Writes parsed `key=value` pairs into the admin form.
fn apply_fields(form: &mut ProductForm, fields: Vec<(String, String)>) -> Result<(), ApiError> {
    for (key, value) in fields {
        match key.as_str() {
            "name" => form.name = value,
            "description" => form.description = value,
            "price" => form.price = value,
            "stock" => form.stock = value,
            "image" => form.image = value,
            "category" => form.category = value,
            "brand" => form.brand = value,
            "original_price" | "originalPrice" => form.original_price = value,
            "featured" => form.featured = matches!(value.as_str(), "true" | "yes" | "1"),
            other => match other.strip_prefix("spec.") {
                Some(spec) => {
                    form.specifications.insert(spec.to_string(), value);
                }
                None => return Err(ApiError::validation(format!("unknown field: {}", other))),
            },
        }
    }
    Ok(())
}

/// The shell's view of the running storefront.
pub struct Shell<'a, B> {
    backend: &'a B,
    config: &'a ConfigState,
    sink: &'a dyn NotificationSink,
    pub session: SessionState,
}

impl<'a, B: StoreBackend> Shell<'a, B> {
    pub fn new(
        backend: &'a B,
        config: &'a ConfigState,
        sink: &'a dyn NotificationSink,
        session: SessionState,
    ) -> Self {
        Shell {
            backend,
            config,
            sink,
            session,
        }
    }

    /// Reads commands from stdin until EOF or `quit`.
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = std::io::stdout();

        writeln!(stdout, "{} (type `help` for commands)", self.config.store_name)?;
        loop {
            write!(stdout, "pedal> ")?;
            stdout.flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            match parse_command(&line) {
                Ok(ShellCommand::Quit) => break,
                Ok(command) => {
                    // Failures were already sent to the sink
                    if let Ok(output) = self.execute(command).await {
                        if !output.is_empty() {
                            writeln!(stdout, "{}", output)?;
                        }
                    }
                }
                Err(usage) if usage.is_empty() => {}
                Err(usage) => writeln!(stdout, "{}", usage)?,
            }
        }
        Ok(())
    }

    /// Runs one command and renders its output.
    pub async fn execute(&mut self, command: ShellCommand) -> Result<String, ApiError> {
        debug!(?command, "shell command");
        let (backend, sink) = (self.backend, self.sink);
        let session = &mut self.session;

        match command {
            ShellCommand::List { category, query } => {
                let response = catalog::list_products(session, &category, &query);
                let mut out = render_products(&response.products);
                if let Some(summary) = response.summary {
                    out.push('\n');
                    out.push_str(&summary);
                }
                Ok(out)
            }
            ShellCommand::Featured => Ok(render_products(&catalog::featured_products(session))),
            ShellCommand::Show(id) => catalog::get_product(session, &id)
                .map(|p| render_detail(&p))
                .map_err(|e| self.report(e)),
            ShellCommand::Add(id) => cart::add_to_cart(backend, session, sink, &id)
                .await
                .map(|_| String::new())
                .map_err(|e| self.report(e)),
            ShellCommand::Quantity(id, n) => {
                Ok(render_cart(&cart::update_cart_item(backend, session, sink, &id, n).await))
            }
            ShellCommand::Remove(id) => {
                Ok(render_cart(&cart::remove_from_cart(backend, session, sink, &id).await))
            }
            ShellCommand::Clear => Ok(render_cart(&cart::clear_cart(backend, session, sink).await)),
            ShellCommand::Cart => Ok(render_cart(&cart::get_cart(session))),
            ShellCommand::Checkout => {
                let summary = checkout::checkout_summary(session, self.config)
                    .map_err(|e| self.report(e))?;
                let mut out = format!("{}\n", summary.store_name);
                for line in &summary.lines {
                    out.push_str(&format!(
                        "  {} x{}  {}\n",
                        line.product.name, line.quantity, line.line_total
                    ));
                }
                out.push_str(&format!(
                    "Subtotal ({} items): {}\nShipping: {}\nTotal: {}",
                    summary.item_count, summary.subtotal, summary.shipping_fee, summary.total_label
                ));
                Ok(out)
            }
            ShellCommand::Login(email) => session::sign_in(backend, session, sink, &email)
                .await
                .map(|cart| render_cart(&cart)),
            ShellCommand::Logout => {
                session::sign_out(session, sink);
                Ok(String::new())
            }
            ShellCommand::Admin => {
                let records = admin::list_admin_products(backend, sink).await?;
                Ok(records
                    .iter()
                    .map(|r| {
                        format!(
                            "  [{}] {}  {}  stock {}  updated {}",
                            r.product.id,
                            r.product.name,
                            r.product.price,
                            r.stock,
                            r.updated_at.format("%Y-%m-%d %H:%M")
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
            ShellCommand::Edit(id) => {
                let form = admin::edit_form(backend, &id).await.map_err(|e| self.report(e))?;
                Ok(format!(
                    "update {} name={}; description={}; price={}; stock={}; image={}; category={}; brand={}; original_price={}; featured={}",
                    id,
                    form.name,
                    form.description,
                    form.price,
                    form.stock,
                    form.image,
                    form.category,
                    form.brand,
                    form.original_price,
                    form.featured
                ))
            }
            ShellCommand::Save { id, fields } => {
                let mut form = match &id {
                    Some(id) => admin::edit_form(backend, id).await.map_err(|e| self.report(e))?,
                    None => ProductForm::default(),
                };
                apply_fields(&mut form, fields).map_err(|e| self.report(e))?;
                admin::save_product(backend, &mut self.session, sink, &form, id.as_deref())
                    .await
                    .map(|p| format!("  [{}] {}", p.id, p.name))
            }
            ShellCommand::Delete(id) => {
                admin::delete_product(backend, session, sink, &id).await?;
                Ok(String::new())
            }
            ShellCommand::Help => Ok(HELP.to_string()),
            ShellCommand::Quit => Ok(String::new()),
        }
    }

    fn report(&self, err: ApiError) -> ApiError {
        self.sink.notify(err.to_notification());
        err
    }
}

fn render_products(products: &[ProductDto]) -> String {
    if products.is_empty() {
        return "No products found".to_string();
    }
    products
        .iter()
        .map(|p| {
            let mut row = format!("  [{}] {} ({})  {}", p.id, p.name, p.brand, p.price_label);
            if p.discount_percent > 0 {
                row.push_str(&format!("  -{}%", p.discount_percent));
            }
            if !p.in_stock {
                row.push_str("  out of stock");
            }
            row
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_detail(p: &ProductDto) -> String {
    let mut out = format!(
        "{}\n  {} / {}\n  {}",
        p.name,
        p.brand,
        p.category.label(),
        p.price_label
    );
    if let Some(original) = p.original_price {
        out.push_str(&format!(" (was {}, -{}%)", original, p.discount_percent));
    }
    if !p.description.is_empty() {
        out.push_str(&format!("\n  {}", p.description));
    }
    for (key, value) in &p.specifications {
        out.push_str(&format!("\n  {}: {}", key, value));
    }
    out
}

fn render_cart(cart: &CartResponse) -> String {
    if cart.items.is_empty() {
        return "Your cart is empty".to_string();
    }
    let mut out = String::new();
    for line in &cart.items {
        out.push_str(&format!(
            "  [{}] {} x{}  {}\n",
            line.product.id, line.product.name, line.quantity, line.line_total
        ));
    }
    out.push_str(&format!("{} items, total {}", cart.item_count, cart.total_label));
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{sample_products, RecordingBackend, RIDER_EMAIL};
    use crate::commands::catalog::refresh_catalog;
    use pedal_core::notification::NotificationLog;

    #[test]
    fn test_parse_list() {
        assert_eq!(
            parse_command("list").unwrap(),
            ShellCommand::List {
                category: "all".to_string(),
                query: String::new()
            }
        );
        assert_eq!(
            parse_command("list ban kenda 23c").unwrap(),
            ShellCommand::List {
                category: "ban".to_string(),
                query: "kenda 23c".to_string()
            }
        );
    }

    #[test]
    fn test_parse_cart_commands() {
        assert_eq!(parse_command("add 7").unwrap(), ShellCommand::Add("7".to_string()));
        assert_eq!(
            parse_command("qty 7 3").unwrap(),
            ShellCommand::Quantity("7".to_string(), 3)
        );
        assert!(parse_command("qty 7 many").is_err());
        assert!(parse_command("add").is_err());
        assert!(parse_command("dance").unwrap_err().contains("unknown command"));
    }

    #[test]
    fn test_parse_save_fields() {
        let command = parse_command("update p-1 name=Ban Kenda 23c; price = 150000;").unwrap();
        assert_eq!(
            command,
            ShellCommand::Save {
                id: Some("p-1".to_string()),
                fields: vec![
                    ("name".to_string(), "Ban Kenda 23c".to_string()),
                    ("price".to_string(), "150000".to_string()),
                ]
            }
        );
        assert!(parse_command("save name").is_err());
    }

    #[test]
    fn test_apply_fields() {
        let mut form = ProductForm::default();
        apply_fields(
            &mut form,
            vec![
                ("brand".to_string(), "Kenda".to_string()),
                ("featured".to_string(), "yes".to_string()),
                ("spec.Size".to_string(), "700x23c".to_string()),
            ],
        )
        .unwrap();
        assert_eq!(form.brand, "Kenda");
        assert!(form.featured);
        assert_eq!(form.specifications["Size"], "700x23c");

        assert!(apply_fields(&mut form, vec![("colour".to_string(), "red".to_string())]).is_err());
    }

    #[tokio::test]
    async fn test_shopping_session() {
        let backend = RecordingBackend::with_products(sample_products());
        let config = ConfigState::default();
        let sink = NotificationLog::new();
        let mut session = SessionState::new();
        refresh_catalog(&backend, &mut session).await.unwrap();
        let mut shell = Shell::new(&backend, &config, &sink, session);

        let listing = shell.execute(parse_command("list all KENDA").unwrap()).await.unwrap();
        assert!(listing.contains("Ban Slick"));
        assert!(listing.ends_with("Showing 1 results for \"KENDA\""));

        shell.execute(ShellCommand::Login(RIDER_EMAIL.to_string())).await.unwrap();
        shell.execute(ShellCommand::Add("1".to_string())).await.unwrap();
        shell.execute(ShellCommand::Add("2".to_string())).await.unwrap();
        let cart = shell.execute(ShellCommand::Cart).await.unwrap();
        assert!(cart.ends_with("2 items, total Rp 1.500.000"));

        let summary = shell.execute(ShellCommand::Checkout).await.unwrap();
        assert!(summary.starts_with("Pedal Fixie Store"));
        assert_eq!(backend.calls(), vec!["upsert 1 1", "upsert 2 1"]);
    }

    #[tokio::test]
    async fn test_huge_quantity_from_the_prompt() {
        let backend = RecordingBackend::with_products(sample_products());
        let config = ConfigState::default();
        let sink = NotificationLog::new();
        let mut session = SessionState::new();
        refresh_catalog(&backend, &mut session).await.unwrap();
        let mut shell = Shell::new(&backend, &config, &sink, session);

        shell.execute(parse_command("add 1").unwrap()).await.unwrap();
        let cart = shell
            .execute(parse_command("qty 1 10000000000000").unwrap())
            .await
            .unwrap();

        assert!(cart.ends_with("999 items, total Rp 999.000.000"));
    }

    #[tokio::test]
    async fn test_errors_go_to_sink() {
        let backend = RecordingBackend::with_products(sample_products());
        let config = ConfigState::default();
        let sink = NotificationLog::new();
        let mut shell = Shell::new(&backend, &config, &sink, SessionState::new());

        assert!(shell.execute(ShellCommand::Checkout).await.is_err());
        assert!(shell.execute(ShellCommand::Show("404".to_string())).await.is_err());

        let notes = sink.take();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].description.as_deref(), Some("Cart is empty"));
        assert_eq!(notes[1].description.as_deref(), Some("Product not found: 404"));
    }

    #[tokio::test]
    async fn test_admin_update_through_shell() {
        let backend = RecordingBackend::with_products(sample_products());
        let config = ConfigState::default();
        let sink = NotificationLog::new();
        let mut session = SessionState::new();
        refresh_catalog(&backend, &mut session).await.unwrap();
        let mut shell = Shell::new(&backend, &config, &sink, session);

        let out = shell
            .execute(parse_command("update 2 price=450000").unwrap())
            .await
            .unwrap();
        assert_eq!(out, "  [2] Velg B");
        assert_eq!(
            shell.session.catalog.get("2").map(|p| p.price.units()),
            Some(450_000)
        );
    }
}
