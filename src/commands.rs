//! CLI commands
//!
//! Each invocation rebuilds the storefront: the catalog from its fixture and the
//! cart from the data directory. Orders live only for the invocation that
//! places them.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use clap::{Args, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::info;

use crate::{
    config::{GeminiArgs, KicksConfig},
    design_lab::{DesignLabError, GeminiConfig, GeminiImageEditor, ImageEditor, encode_image},
    domain::{
        carts::{CartEngine, FileKeyValueStore, StoredCartRepository},
        catalog::{
            CatalogStore, FixtureError,
            models::ProductId,
            seed::load_catalog_fixture,
        },
        orders::{
            OrderManager, TracingNotifier,
            models::{CheckoutDetails, ContactDetails, PaymentDetails, ShippingAddress},
        },
        search::{CategoryFilter, ProductFilter, SortMode},
    },
    pricing::parse_price_bound,
    render::{RenderError, write_cart, write_order, write_products},
    storefront::{Storefront, StorefrontError},
};

/// Errors from running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The catalog could not be loaded.
    #[error(transparent)]
    Catalog(#[from] FixtureError),

    /// The storefront rejected the request.
    #[error(transparent)]
    Storefront(#[from] StorefrontError),

    /// Output could not be written.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Image editing failed.
    #[error("design lab failed: {0}")]
    DesignLab(#[from] DesignLabError),

    /// An input or output file could not be accessed.
    #[error("{path}: {source}")]
    File {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The chosen payment method needs more details.
    #[error("payment method {0} requires {1}")]
    MissingPaymentDetail(PaymentChoice, &'static str),

    /// No Gemini API key is configured.
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,
}

/// Storefront commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse the catalog
    Products(ProductsArgs),

    /// Suggest search completions
    Suggest {
        /// Partially typed query
        partial: String,
    },

    /// Show products related to a product
    Related {
        /// Product id
        product_id: String,
    },

    /// Manage the cart
    #[command(subcommand)]
    Cart(CartCommand),

    /// Place an order for the cart contents
    Checkout(CheckoutArgs),

    /// Edit a sneaker photo from a text instruction
    DesignLab(DesignLabArgs),
}

/// Shop page filters.
#[derive(Debug, Args)]
pub struct ProductsArgs {
    /// Match name or brand
    #[arg(long, default_value = "")]
    pub query: String,

    /// Only these brands (repeatable)
    #[arg(long = "brand")]
    pub brands: Vec<String>,

    /// Category, or "All"
    #[arg(long, default_value = "All")]
    pub category: CategoryFilter,

    /// Lowest price, e.g. 99.99
    #[arg(long, value_parser = parse_price_bound)]
    pub min_price: Option<u64>,

    /// Highest price, e.g. 250
    #[arg(long, value_parser = parse_price_bound)]
    pub max_price: Option<u64>,

    /// newest, price-asc or price-desc
    #[arg(long, default_value = "newest")]
    pub sort: SortMode,
}

impl ProductsArgs {
    fn filter(&self) -> ProductFilter {
        self.brands
            .iter()
            .fold(ProductFilter::default(), |filter, brand| filter.with_brand(brand.as_str()))
            .with_query(self.query.as_str())
            .with_category(self.category)
            .with_price_range(self.min_price, self.max_price)
    }
}

/// Cart commands.
#[derive(Debug, Subcommand)]
pub enum CartCommand {
    /// Show the cart
    Show,

    /// Add one unit of a product in a size
    Add {
        /// Product id
        product_id: String,
        /// Size
        size: String,
    },

    /// Remove a line
    Remove {
        /// Product id
        product_id: String,
        /// Size
        size: String,
    },

    /// Change a line's quantity by a delta (never below 1)
    Update {
        /// Product id
        product_id: String,
        /// Size
        size: String,
        /// Quantity change, e.g. 2 or -1
        #[arg(allow_hyphen_values = true)]
        delta: i32,
    },

    /// Empty the cart
    Clear,
}

/// Payment method selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PaymentChoice {
    /// Cash on delivery
    Cod,
    /// Credit card
    Card,
    /// `InstaPay` wallet
    Instapay,
    /// Orange Money wallet
    Orangemoney,
}

impl Display for PaymentChoice {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Cod => "cod",
            Self::Card => "card",
            Self::Instapay => "instapay",
            Self::Orangemoney => "orangemoney",
        })
    }
}

/// Checkout form.
#[derive(Debug, Args)]
pub struct CheckoutArgs {
    /// Contact email
    #[arg(long)]
    pub email: String,

    /// Contact phone
    #[arg(long)]
    pub phone: String,

    /// Given name
    #[arg(long)]
    pub first_name: String,

    /// Family name
    #[arg(long)]
    pub last_name: String,

    /// Street address
    #[arg(long)]
    pub address: String,

    /// City
    #[arg(long)]
    pub city: String,

    /// ZIP / postal code
    #[arg(long)]
    pub zip: String,

    /// State or region
    #[arg(long)]
    pub region: Option<String>,

    /// Payment method
    #[arg(long, value_enum, default_value_t = PaymentChoice::Cod)]
    pub payment: PaymentChoice,

    /// Wallet number for `InstaPay` / Orange Money
    #[arg(long)]
    pub wallet_number: Option<String>,

    /// Name on card
    #[arg(long)]
    pub card_name: Option<String>,

    /// Card number
    #[arg(long)]
    pub card_number: Option<String>,

    /// Card expiry, MM/YY
    #[arg(long)]
    pub expiry: Option<String>,

    /// Card security code
    #[arg(long)]
    pub cvc: Option<String>,
}

impl CheckoutArgs {
    fn into_details(self) -> Result<CheckoutDetails, CommandError> {
        let payment = match self.payment {
            PaymentChoice::Cod => PaymentDetails::CashOnDelivery,
            PaymentChoice::Instapay => PaymentDetails::InstaPay {
                wallet_number: required(self.wallet_number, self.payment, "--wallet-number")?,
            },
            PaymentChoice::Orangemoney => PaymentDetails::OrangeMoney {
                wallet_number: required(self.wallet_number, self.payment, "--wallet-number")?,
            },
            PaymentChoice::Card => PaymentDetails::Card {
                card_name: required(self.card_name, self.payment, "--card-name")?,
                card_number: required(self.card_number, self.payment, "--card-number")?,
                expiry: required(self.expiry, self.payment, "--expiry")?,
                cvc: required(self.cvc, self.payment, "--cvc")?,
            },
        };

        Ok(CheckoutDetails {
            contact: ContactDetails {
                email: self.email,
                phone: self.phone,
                first_name: self.first_name,
                last_name: self.last_name,
            },
            address: ShippingAddress {
                street: self.address,
                city: self.city,
                postal_code: self.zip,
                region: self.region,
            },
            payment,
        })
    }
}

fn required(
    value: Option<String>,
    choice: PaymentChoice,
    flag: &'static str,
) -> Result<String, CommandError> {
    value
        .filter(|value| !value.trim().is_empty())
        .ok_or(CommandError::MissingPaymentDetail(choice, flag))
}

/// Design lab inputs.
#[derive(Debug, Args)]
pub struct DesignLabArgs {
    /// JPEG to edit
    #[arg(long)]
    pub image: PathBuf,

    /// Edit instruction, e.g. "make the swoosh neon green"
    #[arg(long)]
    pub prompt: String,

    /// Where to write the edited JPEG
    #[arg(long)]
    pub output: PathBuf,
}

/// Run the configured command, writing results to `out`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the storefront rejects the
/// request, the image edit fails or output cannot be written.
pub async fn run(config: KicksConfig, mut out: impl io::Write) -> Result<(), CommandError> {
    let KicksConfig {
        data_dir,
        catalog,
        gemini,
        command,
        ..
    } = config;

    let open = || open_storefront(catalog.as_deref(), &data_dir);

    match command {
        Command::Products(args) => {
            let store = open()?;
            let products = store.browse(&args.filter(), args.sort);

            write_products(&mut out, &products)?;
        }
        Command::Suggest { partial } => {
            for suggestion in open()?.suggest(&partial) {
                writeln!(out, "{suggestion}").map_err(RenderError::from)?;
            }
        }
        Command::Related { product_id } => {
            let store = open()?;
            let related = store.related(&ProductId::new(product_id))?;

            write_products(&mut out, &related)?;
        }
        Command::Cart(command) => run_cart(&mut open()?, command, &mut out)?,
        Command::Checkout(args) => {
            let details = args.into_details()?;
            let order = open()?.checkout(details)?;

            write_order(&mut out, &order)?;
        }
        Command::DesignLab(args) => design_lab(&gemini, &args, out).await?,
    }

    Ok(())
}

fn open_storefront(catalog: Option<&Path>, data_dir: &Path) -> Result<Storefront, CommandError> {
    let catalog = match catalog {
        Some(path) => CatalogStore::new(load_catalog_fixture(path)?),
        None => CatalogStore::seeded()?,
    };

    let repository = StoredCartRepository::new(FileKeyValueStore::new(data_dir));

    Ok(Storefront::new(
        catalog,
        CartEngine::new(Box::new(repository)),
        OrderManager::new(Arc::new(TracingNotifier)),
    ))
}

fn run_cart(
    store: &mut Storefront,
    command: CartCommand,
    out: &mut impl io::Write,
) -> Result<(), CommandError> {
    let items = match command {
        CartCommand::Show => store.cart().items(),
        CartCommand::Add { product_id, size } => {
            store.add_to_cart(&ProductId::new(product_id), &size)?
        }
        CartCommand::Remove { product_id, size } => {
            store.remove_from_cart(&ProductId::new(product_id), &size)
        }
        CartCommand::Update {
            product_id,
            size,
            delta,
        } => store.update_quantity(&ProductId::new(product_id), &size, delta),
        CartCommand::Clear => {
            store.clear_cart();
            store.cart().items()
        }
    };

    write_cart(out, items)?;

    Ok(())
}

async fn design_lab(
    gemini: &GeminiArgs,
    args: &DesignLabArgs,
    mut out: impl io::Write,
) -> Result<(), CommandError> {
    let api_key = gemini
        .gemini_api_key
        .clone()
        .ok_or(CommandError::MissingApiKey)?;

    let image = fs::read(&args.image).map_err(|source| CommandError::File {
        path: args.image.clone(),
        source,
    })?;

    let editor = GeminiImageEditor::new(GeminiConfig {
        base_url: gemini.gemini_base_url.clone(),
        api_key,
        model: gemini.gemini_model.clone(),
    });

    let edited = editor.edit(&encode_image(&image), &args.prompt).await?;

    fs::write(&args.output, edited.bytes()).map_err(|source| CommandError::File {
        path: args.output.clone(),
        source,
    })?;

    info!(output = %args.output.display(), bytes = edited.bytes().len(), "edited image saved");

    writeln!(out, "Saved edited image to {}", args.output.display()).map_err(RenderError::from)?;

    Ok(())
}
