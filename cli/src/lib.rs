//! Command-line front end for the FlexiRide rental API.
//!
//! Each invocation builds one [`AuthClient`], runs one command and exits.
//! The session persists between invocations through the identity store.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use flexiride_client::search::{VehicleSearch, bookings_for, distinct_brands};
use flexiride_client::{AuthClient, BookingService, ClientConfig, Deployment, VehicleService};
use flexiride_identity::IdentityStore;
use flexiride_types::{
    Booking, BookingId, BookingRequest, BookingStatus, Role, Session, Vehicle,
    VehicleFilterParams, VehicleId, VehicleType, VehicleUpdate,
};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "flexiride")]
#[command(about = "FlexiRide vehicle rental client")]
pub struct Cli {
    /// Backend to use (production or development)
    #[arg(long, env = "FLEXIRIDE_ENV", default_value = "development")]
    pub env: Deployment,

    /// Backend origin override, e.g. http://127.0.0.1:8080
    #[arg(long)]
    pub origin: Option<String>,

    /// Directory holding the saved session
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Keep the session in memory only
    #[arg(long, conflicts_with = "data_dir")]
    pub ephemeral: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and save the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "FLEXIRIDE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "FLEXIRIDE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the saved session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Browse and manage the vehicle catalog
    #[command(subcommand)]
    Vehicles(VehicleCommand),
    /// Browse and manage bookings
    #[command(subcommand)]
    Bookings(BookingCommand),
}

#[derive(Subcommand, Debug)]
pub enum VehicleCommand {
    /// List the catalog, optionally fuzzy-searching brand and model
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one vehicle
    Get { id: VehicleId },
    /// Filter the catalog on the server
    Filter {
        #[arg(long = "brand")]
        brands: Vec<String>,
        #[arg(long = "model")]
        models: Vec<String>,
        #[arg(long = "type")]
        types: Vec<VehicleType>,
        #[arg(long)]
        min_price: Option<f64>,
        #[arg(long)]
        max_price: Option<f64>,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// List the brands in the catalog
    Brands,
    /// Add a vehicle (admin)
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        brand: String,
        #[arg(long)]
        model: String,
        #[arg(long = "type")]
        vehicle_type: VehicleType,
        #[arg(long)]
        price_per_day: f64,
        #[arg(long, default_value_t = 0.0)]
        advance: f64,
        #[arg(long, default_value = "")]
        image_url: String,
    },
    /// Change fields of a vehicle, keeping the rest (admin)
    Edit {
        id: VehicleId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long = "type")]
        vehicle_type: Option<VehicleType>,
        #[arg(long)]
        price_per_day: Option<f64>,
        #[arg(long)]
        advance: Option<f64>,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Remove a vehicle (admin)
    Delete { id: VehicleId },
}

#[derive(Subcommand, Debug)]
pub enum BookingCommand {
    /// List your bookings, or everyone's with --all
    List {
        #[arg(long)]
        all: bool,
        #[arg(long)]
        status: Option<BookingStatus>,
    },
    /// Book a vehicle
    Create {
        vehicle: VehicleId,
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
    },
    /// Cancel a booking
    Cancel { id: BookingId },
}

/// Builds the client described by the global flags.
pub fn build_client(cli: &Cli) -> Result<AuthClient> {
    let config = match &cli.origin {
        Some(origin) => ClientConfig {
            deployment: cli.env,
            ..ClientConfig::with_origin(origin)
        },
        None => ClientConfig::for_deployment(cli.env),
    };

    let store = if cli.ephemeral {
        IdentityStore::in_memory()
    } else if let Some(dir) = &cli.data_dir {
        IdentityStore::at_dir(dir)
    } else {
        IdentityStore::detect()
    };

    debug!("Using {} backend at {}", config.deployment, config.api_base_url);
    AuthClient::new(config, store).context("Failed to create API client")
}

/// Runs one command, writing results to `out`.
pub async fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let auth = Arc::new(build_client(&cli)?);
    let json = cli.json;

    match cli.command {
        Command::Login { email, password } => {
            let session = auth.login(&email, &password).await?;
            emit(out, json, &UserView::from(&session), |out| print_session(out, &session))
        }
        Command::Register {
            name,
            email,
            password,
        } => {
            let session = auth.register(&name, &email, &password).await?;
            emit(out, json, &UserView::from(&session), |out| print_session(out, &session))
        }
        Command::Logout => {
            auth.logout();
            writeln!(out, "Signed out")?;
            Ok(())
        }
        Command::Whoami => match auth.current_user() {
            Some(session) => emit(out, json, &UserView::from(&session), |out| {
                print_session(out, &session)
            }),
            None => {
                writeln!(out, "Not signed in")?;
                Ok(())
            }
        },
        Command::Vehicles(command) => run_vehicles(&auth, command, json, out).await,
        Command::Bookings(command) => run_bookings(&auth, command, json, out).await,
    }
}

async fn run_vehicles(
    auth: &Arc<AuthClient>,
    command: VehicleCommand,
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let service = VehicleService::new(auth.clone());

    match command {
        VehicleCommand::List { search } => {
            let vehicles = service.list().await?;
            let matches: Vec<&Vehicle> = match search.as_deref() {
                Some(query) => VehicleSearch::new(&vehicles).search(query),
                None => vehicles.iter().collect(),
            };
            emit(out, json, &matches, |out| print_vehicles(out, &matches))
        }
        VehicleCommand::Get { id } => {
            let vehicle = service.get(id).await?;
            emit(out, json, &vehicle, |out| print_vehicles(out, &[&vehicle]))
        }
        VehicleCommand::Filter {
            brands,
            models,
            types,
            min_price,
            max_price,
            from,
            to,
        } => {
            let params = VehicleFilterParams {
                brands,
                models,
                types,
                start_price: min_price,
                end_price: max_price,
                start_date: from,
                end_date: to,
            };
            let vehicles = service.filter(&params).await?;
            let refs: Vec<&Vehicle> = vehicles.iter().collect();
            emit(out, json, &vehicles, |out| print_vehicles(out, &refs))
        }
        VehicleCommand::Brands => {
            let brands = distinct_brands(&service.list().await?);
            emit(out, json, &brands, |out| {
                for brand in &brands {
                    writeln!(out, "{brand}")?;
                }
                Ok(())
            })
        }
        VehicleCommand::Add {
            name,
            brand,
            model,
            vehicle_type,
            price_per_day,
            advance,
            image_url,
        } => {
            require_admin(auth)?;
            let update = VehicleUpdate {
                name,
                brand,
                model,
                vehicle_type,
                price_per_day,
                advance,
                image_url,
            };
            let vehicle = service.create(&update).await?;
            emit(out, json, &vehicle, |out| print_vehicles(out, &[&vehicle]))
        }
        VehicleCommand::Edit {
            id,
            name,
            brand,
            model,
            vehicle_type,
            price_per_day,
            advance,
            image_url,
        } => {
            require_admin(auth)?;
            let current = service.get(id).await?;
            let mut update = VehicleUpdate::from(&current);
            if let Some(name) = name {
                update.name = name;
            }
            if let Some(brand) = brand {
                update.brand = brand;
            }
            if let Some(model) = model {
                update.model = model;
            }
            if let Some(vehicle_type) = vehicle_type {
                update.vehicle_type = vehicle_type;
            }
            if let Some(price_per_day) = price_per_day {
                update.price_per_day = price_per_day;
            }
            if let Some(advance) = advance {
                update.advance = advance;
            }
            if let Some(image_url) = image_url {
                update.image_url = image_url;
            }
            let vehicle = service.update(id, &update).await?;
            emit(out, json, &vehicle, |out| print_vehicles(out, &[&vehicle]))
        }
        VehicleCommand::Delete { id } => {
            require_admin(auth)?;
            let vehicle = service.delete(id).await?;
            emit(out, json, &vehicle, |out| {
                writeln!(out, "Deleted {} ({})", vehicle.name, vehicle.id)?;
                Ok(())
            })
        }
    }
}

async fn run_bookings(
    auth: &Arc<AuthClient>,
    command: BookingCommand,
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let service = BookingService::new(auth.clone());
    let user = require_login(auth)?;

    match command {
        BookingCommand::List { all, status } => {
            let bookings = if all {
                require_admin(auth)?;
                service.list().await?
            } else {
                service.list_by_email(&user.email).await?
            };
            let selected: Vec<&Booking> = match (status, all) {
                (Some(status), false) => bookings_for(&user.id, status, &bookings),
                (Some(status), true) => bookings.iter().filter(|b| b.status == status).collect(),
                (None, _) => bookings.iter().collect(),
            };
            emit(out, json, &selected, |out| print_bookings(out, &selected))
        }
        BookingCommand::Create { vehicle, from, to } => {
            if to < from {
                bail!("--to ({to}) is before --from ({from})");
            }
            let request = BookingRequest {
                email: user.email.clone(),
                vehicle_id: vehicle,
                start_date: from,
                end_date: to,
            };
            let booking = service.create(&request).await?;
            emit(out, json, &booking, |out| print_bookings(out, &[&booking]))
        }
        BookingCommand::Cancel { id } => {
            let booking = service.cancel(id).await?;
            emit(out, json, &booking, |out| print_bookings(out, &[&booking]))
        }
    }
}

/// The printable part of a session. The bearer token never reaches stdout.
#[derive(Serialize)]
struct UserView<'a> {
    id: &'a str,
    email: &'a str,
    name: &'a str,
    role: Role,
}

impl<'a> From<&'a Session> for UserView<'a> {
    fn from(session: &'a Session) -> Self {
        Self {
            id: &session.id,
            email: &session.email,
            name: &session.name,
            role: session.role,
        }
    }
}

fn require_login(auth: &AuthClient) -> Result<Session> {
    auth.current_user()
        .context("Not signed in; run `flexiride login` first")
}

fn require_admin(auth: &AuthClient) -> Result<()> {
    if !auth.has_role(Role::Admin) {
        bail!("This command requires an admin account");
    }
    Ok(())
}

/// Writes `value` as JSON, or through `text` otherwise.
fn emit<T, F>(out: &mut dyn Write, json: bool, value: &T, text: F) -> Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    if json {
        serde_json::to_writer_pretty(&mut *out, value)?;
        writeln!(out)?;
        Ok(())
    } else {
        text(out)
    }
}

fn print_session(out: &mut dyn Write, session: &Session) -> Result<()> {
    writeln!(
        out,
        "{} <{}> [{}] id={}",
        session.name, session.email, session.role, session.id
    )?;
    Ok(())
}

fn print_vehicles(out: &mut dyn Write, vehicles: &[&Vehicle]) -> Result<()> {
    if vehicles.is_empty() {
        writeln!(out, "No vehicles found")?;
    }
    for v in vehicles {
        writeln!(
            out,
            "{}  {:<24} {:<10} {:>8.2}/day  advance {:.2}  {}",
            v.id, v.name, v.vehicle_type, v.price_per_day, v.advance, v.brand
        )?;
    }
    Ok(())
}

fn print_bookings(out: &mut dyn Write, bookings: &[&Booking]) -> Result<()> {
    if bookings.is_empty() {
        writeln!(out, "No bookings found")?;
    }
    for b in bookings {
        writeln!(
            out,
            "{}  {} -> {}  {:<15} {:>9.2}  vehicle {}",
            b.id, b.start_date, b.end_date, b.status, b.total_price, b.vehicle_id
        )?;
    }
    Ok(())
}
