//! Catalog search pipeline: question → intent/filters → catalog → shaped result.
//!
//! Each stage either hands its output to the next (`Step::Proceed`) or ends
//! the request with a fixed reply (`Step::EarlyReply`). The narrator runs only
//! on a final `Proceed`.

use tracing::{debug, info};

use crate::catalog::models::CatalogDorm;
use crate::catalog::resolver::resolve_catalog;
use crate::catalog::store::CatalogStore;
use crate::errors::AppError;
use crate::search::extractor::{extract, FilterSet, Intent};
use crate::search::shaper::{shape, ShapedDorm};

pub const GREETING_REPLY: &str = "Hello! I am your DormHub assistant. \
    Ask about available dormitories or rooms in Lapu-Lapu or Mandaue.";
pub const BLOCKED_REGION_REPLY: &str =
    "Sorry, DormHub currently only has dorms in Lapu-Lapu or Mandaue.";
pub const NO_DORMS_REPLY: &str = "No dorms available";
const DEFAULT_CITIES_LABEL: &str = "Lapu-Lapu or Mandaue";

#[derive(Debug, Clone, PartialEq)]
pub enum Step<T> {
    EarlyReply(String),
    Proceed(T),
}

/// Decides from the question alone whether a catalog lookup is needed.
pub fn triage(question: &str) -> Step<FilterSet> {
    let (intent, filters) = extract(question);
    match intent {
        Intent::Greeting => Step::EarlyReply(GREETING_REPLY.to_string()),
        Intent::BlockedRegion => Step::EarlyReply(BLOCKED_REGION_REPLY.to_string()),
        Intent::Search => Step::Proceed(filters),
    }
}

/// Shapes the resolved catalog, or explains why nothing can be shown.
pub fn shape_or_reply(catalog: Vec<CatalogDorm>, filters: &FilterSet) -> Step<Vec<ShapedDorm>> {
    if catalog.is_empty() {
        return Step::EarlyReply(NO_DORMS_REPLY.to_string());
    }
    let shaped = shape(catalog, filters);
    if shaped.is_empty() {
        return Step::EarlyReply(no_match_reply(&filters.allowed_cities));
    }
    Step::Proceed(shaped)
}

/// "No available rooms in Mandaue within the specified price range."
pub fn no_match_reply(cities: &[String]) -> String {
    let label = if cities.is_empty() {
        DEFAULT_CITIES_LABEL.to_string()
    } else {
        title_case(&cities.join(", "))
    };
    format!("No available rooms in {label} within the specified price range.")
}

/// Upper-cases the first letter of every alphabetic run: "lapu-lapu" → "Lapu-Lapu".
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Runs the full search for one question. Store failures propagate; every
/// other outcome is a `Step`.
pub async fn search_catalog(
    store: &dyn CatalogStore,
    question: &str,
) -> Result<Step<Vec<ShapedDorm>>, AppError> {
    let filters = match triage(question) {
        Step::EarlyReply(reply) => {
            debug!("Question answered without lookup");
            return Ok(Step::EarlyReply(reply));
        }
        Step::Proceed(filters) => filters,
    };

    info!(
        cities = ?filters.allowed_cities,
        price_min = ?filters.price_min,
        price_max = ?filters.price_max,
        "Searching catalog"
    );

    let catalog = resolve_catalog(store).await?;
    let step = shape_or_reply(catalog, &filters);
    if let Step::Proceed(dorms) = &step {
        debug!(
            "{} dorms matched (price bounds applied: {})",
            dorms.len(),
            filters.has_price_bounds()
        );
    }
    Ok(step)
}
