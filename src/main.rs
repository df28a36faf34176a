use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io;
use std::process::ExitCode;

use agrilease::api::{
    ApiClient, ApiError, Category, Collection, Envelope, FarmFilter, FarmStatus, MachineFilter,
    MapFilter, MarketplaceApi, MockApi, Payload,
};
use agrilease::core::config::{self, CliOverrides, ResolvedConfig};
use agrilease::core::{AppState, Store};
use agrilease::ui::validate::{self, Rule, EMAIL_PATTERN};
use agrilease::ui::{MapView, PageSlicer, Toasts, cards, format, nav};
use clap::{Parser, Subcommand};
use log::{error, info};
use reqwest::Method;
use serde::Serialize;
use serde_json::{Value, json};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "agrilease", version, about = "Farm machinery rental marketplace")]
struct Args {
    /// Simulated API delay in milliseconds for every call
    #[arg(long, global = true)]
    delay_ms: Option<u64>,

    /// Items per page
    #[arg(long, global = true)]
    per_page: Option<usize>,

    /// Page to show; out-of-range values clamp to the first or last page
    #[arg(long, global = true, default_value_t = 1, allow_negative_numbers = true)]
    page: i64,

    /// Print the raw {success, data} envelope instead of cards
    #[arg(long, global = true)]
    json: bool,

    /// Backend for `request` (overrides config and AGRILEASE_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Browse machines for rent
    Machines {
        #[arg(long, value_enum)]
        category: Option<Category>,
        /// Case-insensitive substring of the district
        #[arg(long)]
        district: Option<String>,
        #[arg(long)]
        available: Option<bool>,
        /// Case-insensitive substring of the machine name
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Show one machine
    Machine { id: u64 },
    /// List farms
    Farms {
        #[arg(long, value_enum)]
        status: Option<FarmStatus>,
    },
    /// Crop guide
    Crops,
    /// Current conditions and the 7-day forecast
    Weather { location: Option<String> },
    /// Marketplace totals
    Stats,
    /// Machine pins for the map view
    Map {
        #[arg(long, value_enum)]
        category: Option<Category>,
        #[arg(long)]
        available: Option<bool>,
        #[arg(long, requires = "lng", allow_negative_numbers = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lng: Option<f64>,
        #[arg(long)]
        zoom: Option<u8>,
    },
    /// Dashboard: stats, weather and crops fetched together
    Overview,
    /// Run a query with a raw JSON filter object
    Query {
        #[arg(value_enum)]
        collection: Collection,
        /// e.g. '{"category":"Tractor","available":true}'
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Sign in and remember the session
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the saved session
    Logout,
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Book a machine (requires login)
    Rent {
        machine_id: u64,
        #[arg(long)]
        farm: Option<String>,
        #[arg(long)]
        days: Option<u32>,
    },
    /// Send a request to the real backend with the saved token
    Request {
        endpoint: String,
        #[arg(long, default_value = "GET")]
        method: String,
        #[arg(long)]
        body: Option<String>,
    },
}

#[derive(Debug)]
enum CliError {
    Api(ApiError),
    Io(io::Error),
    Input(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Api(e) => write!(f, "{e}"),
            CliError::Io(e) => write!(f, "storage error: {e}"),
            CliError::Input(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ApiError> for CliError {
    fn from(e: ApiError) -> Self {
        CliError::Api(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            delay_ms: self.delay_ms,
            page_size: self.per_page,
            base_url: self.base_url.clone(),
        }
    }
}

/// One page of a list, as printed by `--json`.
#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
struct PageOf<T> {
    items: Vec<T>,
    page: usize,
    total_pages: usize,
    total: usize,
}

fn page_of<T: Clone>(items: Vec<T>, page_size: usize, page: i64) -> PageOf<T> {
    let total = items.len();
    let mut slicer = PageSlicer::new(items, page_size, |_: &T| {});
    slicer.go_to(page);
    PageOf {
        items: slicer.current_slice().to_vec(),
        page: slicer.current_page(),
        total_pages: slicer.total_pages(),
        total,
    }
}

struct Cli {
    api: MockApi,
    config: ResolvedConfig,
    store: Store,
    state: AppState,
    toasts: Toasts,
    page: i64,
    json: bool,
}

impl Cli {
    fn emit<T: Serialize>(&self, data: T) -> Result<bool, CliError> {
        if self.json {
            let envelope = Envelope::ok(data);
            let text = serde_json::to_string_pretty(&envelope)
                .map_err(|e| CliError::Input(e.to_string()))?;
            println!("{text}");
        }
        Ok(self.json)
    }

    /// Prints the selected page as cards, or as a [`PageOf`] envelope with `--json`.
    fn list<T: Serialize + Clone>(&self, items: Vec<T>, render: impl Fn(&T) -> String) -> Result<(), CliError> {
        if self.json {
            self.emit(page_of(items, self.config.page_size, self.page))?;
        } else {
            self.print_paged(items, render);
        }
        Ok(())
    }

    /// Prints one page of `items` through a PageSlicer, then the page index.
    fn print_paged<T>(&self, items: Vec<T>, render: impl Fn(&T) -> String) {
        if items.is_empty() {
            println!("No results found.");
            return;
        }
        let total = items.len();
        let mut slicer = PageSlicer::new(items, self.config.page_size, |item: &T| {
            println!("{}\n", render(item));
        });
        slicer.go_to(self.page);

        let index: Vec<String> = slicer
            .index()
            .iter()
            .map(|b| if b.active { format!("[{}]", b.number) } else { b.number.to_string() })
            .collect();
        if !index.is_empty() {
            println!("Pages: {}", index.join(" "));
        }
        println!(
            "Showing page {} of {} ({} results)",
            slicer.current_page(),
            slicer.total_pages(),
            total
        );
    }

    fn flush_toasts(&mut self) {
        for toast in self.toasts.drain() {
            println!("{toast}");
        }
    }

    async fn run(&mut self, command: Command) -> Result<(), CliError> {
        match command {
            Command::Machines {
                category,
                district,
                available,
                query,
            } => {
                let filter = MachineFilter {
                    category,
                    district,
                    available,
                    query,
                };
                let machines = self.api.get_machines(&filter).await?;
                let currency = self.config.currency.clone();
                self.list(machines, |m| cards::render_machine_card(m, &currency))?;
            }
            Command::Machine { id } => {
                let machine = self.api.get_machine_by_id(id).await?;
                if !self.emit(&machine)? {
                    println!("{}", cards::render_machine_card(&machine, &self.config.currency));
                    println!("Owner: {}", machine.owner);
                }
            }
            Command::Farms { status } => {
                let farms = self.api.get_farms(&FarmFilter { status }).await?;
                self.list(farms, cards::render_farm_card)?;
            }
            Command::Crops => {
                let crops = self.api.get_crops().await?;
                self.list(crops, cards::render_crop_card)?;
            }
            Command::Weather { location } => {
                let location = location.unwrap_or_else(|| self.config.default_location.clone());
                let weather = self.api.get_weather(&location).await?;
                if !self.emit(&weather)? {
                    let now = &weather.current;
                    println!(
                        "{} {} {}°C (feels {}°C), {}",
                        now.icon, weather.location, now.temp, now.feels_like, now.condition
                    );
                    println!("Humidity {}%  Wind {} km/h", now.humidity, now.wind);
                    for day in &weather.forecast {
                        println!(
                            "  {:<4}{} {:>3}° / {:>3}°  rain {}%",
                            day.day, day.icon, day.high, day.low, day.rain
                        );
                    }
                }
            }
            Command::Stats => {
                let stats = self.api.get_stats().await?;
                if !self.emit(&stats)? {
                    println!("Machines:        {}", format::thousands(stats.total_machines));
                    println!("Operators:       {}", format::thousands(stats.total_operators));
                    println!("Farms:           {}", format::thousands(stats.total_farms));
                    println!("Active rentals:  {}", format::thousands(stats.active_rentals));
                    println!(
                        "Monthly revenue: {}",
                        format::currency(stats.monthly_revenue as f64, &self.config.currency)
                    );
                    println!("Average rating:  {}", stats.avg_rating);
                }
            }
            Command::Map {
                category,
                available,
                lat,
                lng,
                zoom,
            } => {
                let mut view = MapView::new();
                view.filter_markers(&MapFilter { category, available });
                if let (Some(lat), Some(lng)) = (lat, lng) {
                    view.fly_to(lat, lng, zoom);
                }
                if !self.emit(json!({
                    "center": view.center(),
                    "zoom": view.zoom(),
                    "markers": view.markers(),
                    "stats": view.stats(),
                }))? {
                    let center = view.center();
                    println!("Centre {:.4}, {:.4} at zoom {}", center.lat, center.lng, view.zoom());
                    for marker in view.markers() {
                        println!("{} {}\n", marker.icon.emoji, marker.popup);
                    }
                    let stats = view.stats();
                    println!(
                        "{} machines, {} available, {} unavailable",
                        stats.total, stats.available, stats.unavailable
                    );
                }
            }
            Command::Overview => {
                let location = self.config.default_location.clone();
                let (stats, weather, crops) = futures::try_join!(
                    self.api.get_stats(),
                    self.api.get_weather(&location),
                    self.api.get_crops()
                )?;
                if !self.emit(json!({ "stats": stats, "weather": weather, "crops": crops }))? {
                    let greeting = match &self.state.user {
                        Some(user) => format!("Hello, {}!", user.first_name()),
                        None => "Welcome to AgriLease".to_string(),
                    };
                    println!("{greeting}");
                    println!(
                        "{} machines · {} farms · {} active rentals",
                        format::thousands(stats.total_machines),
                        format::thousands(stats.total_farms),
                        format::thousands(stats.active_rentals)
                    );
                    println!(
                        "{} {}: {}°C, {}",
                        weather.current.icon, weather.location, weather.current.temp, weather.current.condition
                    );
                    let names: Vec<&str> = crops.iter().map(|c| c.name.as_str()).collect();
                    println!("Crop guide: {}", format::truncate(&names.join(", "), format::DEFAULT_TRUNCATE));
                }
            }
            Command::Query { collection, filter } => {
                let filters = match filter {
                    Some(raw) => serde_json::from_str(&raw)
                        .map_err(|e| CliError::Input(format!("filter is not valid JSON: {e}")))?,
                    None => Value::Null,
                };
                let envelope = Envelope::from(self.api.query(collection, filters).await);
                let text = serde_json::to_string_pretty(&envelope)
                    .map_err(|e| CliError::Input(e.to_string()))?;
                println!("{text}");
            }
            Command::Login { email, password } => {
                let session = self.api.login(&email, &password).await?;
                self.state.login(&self.store, session, &mut self.toasts)?;
                if let Some(label) = nav::login_label(self.state.user.as_ref()) {
                    println!("Signed in: {label}");
                }
            }
            Command::Logout => {
                self.state.logout(&self.store, &mut self.toasts)?;
            }
            Command::Register { name, email, password } => {
                let form = HashMap::from([
                    ("name".to_string(), name),
                    ("email".to_string(), email),
                    ("password".to_string(), password),
                ]);
                let rules = [
                    ("name", Rule::new().required()),
                    (
                        "email",
                        Rule::new()
                            .required()
                            .pattern(EMAIL_PATTERN, Some("Enter a valid email address."))
                            .map_err(|e| CliError::Input(e.to_string()))?,
                    ),
                    ("password", Rule::new().required().min_length(6)),
                ];
                let result = validate::validate_form(&form, &rules);
                if !result.is_valid() {
                    let problems: Vec<String> = result.errors().map(|(f, m)| format!("{f}: {m}")).collect();
                    return Err(CliError::Input(problems.join("; ")));
                }
                let payload: Payload = form
                    .into_iter()
                    .filter(|(key, _)| key != "password")
                    .map(|(key, value)| (key, Value::String(value)))
                    .collect();
                let user = self.api.register(payload).await?;
                if !self.emit(&user)? {
                    self.toasts.success("Account created! Please login.");
                }
            }
            Command::Rent { machine_id, farm, days } => {
                let Some((machine, next)) = self.state.book(&self.api, machine_id, &mut self.toasts).await?
                else {
                    return Ok(());
                };
                let mut payload = Payload::new();
                payload.insert("machineId".to_string(), json!(machine.id));
                if let Some(user) = &self.state.user {
                    payload.insert("renter".to_string(), json!(user.email));
                }
                if let Some(farm) = farm {
                    payload.insert("farm".to_string(), json!(farm));
                }
                if let Some(days) = days {
                    payload.insert("days".to_string(), json!(days));
                }
                let rental = self.api.create_rental(payload).await?;
                if !self.emit(&rental)? {
                    let field = |key: &str| rental.get(key).cloned().unwrap_or(Value::Null);
                    println!("Rental #{} is {}", field("id"), field("status"));
                    println!("Continue at {next}");
                }
            }
            Command::Request { endpoint, method, body } => {
                let method = Method::from_bytes(method.to_uppercase().as_bytes())
                    .map_err(|e| CliError::Input(format!("bad method: {e}")))?;
                let body: Option<Value> = body
                    .map(|raw| serde_json::from_str(&raw))
                    .transpose()
                    .map_err(|e| CliError::Input(format!("body is not valid JSON: {e}")))?;
                let client = ApiClient::new(&self.config.base_url).with_token(self.state.token.clone());
                let response: Value = client.request(method, &endpoint, body.as_ref()).await?;
                let text = serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::Input(e.to_string()))?;
                println!("{text}");
            }
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to agrilease.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("agrilease.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: {e}, using defaults");
            Default::default()
        }
    };
    let resolved = config::resolve(&file_config, &args.overrides());
    info!("{} v{} starting up", resolved.app_name, resolved.version);

    let store = match Store::open_default() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("✗ Could not open local storage: {e}");
            return ExitCode::FAILURE;
        }
    };
    let state = AppState::load(&store);

    let mut cli = Cli {
        api: MockApi::new(resolved.latency).with_default_location(resolved.default_location.clone()),
        config: resolved,
        store,
        state,
        toasts: Toasts::new(),
        page: args.page,
        json: args.json,
    };

    let result = cli.run(args.command).await;
    if let Err(e) = &result {
        error!("Command failed: {e}");
        if cli.json {
            if let Ok(text) = serde_json::to_string_pretty(&Envelope::<()>::err(e)) {
                println!("{text}");
            }
        } else {
            cli.toasts.error(e.to_string());
        }
    }
    cli.flush_toasts();

    if result.is_ok() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_flag_reaches_resolved_config() {
        let args = Args::try_parse_from(["agrilease", "--base-url", "http://10.0.0.5:8080/api/v1", "stats"]).unwrap();
        let resolved = config::resolve(&Default::default(), &args.overrides());
        assert_eq!(resolved.base_url, "http://10.0.0.5:8080/api/v1");
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from(["agrilease", "machines", "--per-page", "2", "--page", "-4", "--json"]).unwrap();
        assert_eq!(args.overrides().page_size, Some(2));
        assert_eq!(args.page, -4);
        assert!(args.json);
    }

    #[test]
    fn test_json_page_follows_slicer() {
        let page = page_of((1..=25).collect::<Vec<i32>>(), 10, 3);
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert_eq!((page.page, page.total_pages, page.total), (3, 3, 25));

        let clamped = page_of((1..=25).collect::<Vec<i32>>(), 10, 99);
        assert_eq!(clamped.page, 3);
        let low = page_of((1..=25).collect::<Vec<i32>>(), 10, 0);
        assert_eq!(low.items.first(), Some(&1));
    }

    #[test]
    fn test_json_page_shape() {
        let page = page_of(vec!["a", "b", "c"], 2, 2);
        let value = serde_json::to_value(Envelope::ok(page)).unwrap();
        assert_eq!(
            value,
            json!({ "success": true, "data": { "items": ["c"], "page": 2, "totalPages": 2, "total": 3 } })
        );
    }

    #[test]
    fn test_empty_json_page() {
        let page = page_of(Vec::<u64>::new(), 10, 1);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
    }
}
