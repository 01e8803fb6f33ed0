//! Prompt builders for the narrator. Output must be byte-stable for the same
//! input so summaries are reproducible.

use crate::catalog::models::{DormProfile, Room};
use crate::search::shaper::ShapedDorm;

/// Catalog summary prompt. Replace `{dorms_json}` before sending.
pub const CATALOG_PROMPT_TEMPLATE: &str = "\
You are a friendly dorm recommendation assistant.
Generate a short text summary for the user based on these dorms and rooms:
{dorms_json}
";

/// Embeds the shaped dorms verbatim as JSON. Field order follows the struct
/// definitions, so the text is stable across calls.
pub fn catalog_prompt(dorms: &[ShapedDorm]) -> Result<String, serde_json::Error> {
    let dorms_json = serde_json::to_string(dorms)?;
    Ok(CATALOG_PROMPT_TEMPLATE.replace("{dorms_json}", &dorms_json))
}

fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or("N/A")
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

/// Line-oriented fact sheet for one dorm followed by the tenant's question.
pub fn dorm_prompt(profile: &DormProfile, rooms: &[Room], question: &str) -> String {
    let landlord = match &profile.landlord {
        Some(l) => format!(
            "{}, Email: {}, Phone: {}",
            l.name,
            or_na(l.email.as_deref()),
            or_na(l.phone.as_deref())
        ),
        None => "N/A".to_string(),
    };

    let room_lines: String = rooms
        .iter()
        .map(|room| {
            format!(
                "- Room {}, Type: {}, Price: {}, Availability: {}, Furnishing: {}, Gender: {}, Features: {}\n",
                or_na(room.number.as_deref()),
                or_na(room.room_type.as_deref()),
                room.price,
                or_na(room.availability.as_deref()),
                or_na(room.furnishing_status.as_deref()),
                or_na(room.gender_preference.as_deref()),
                list_or_none(&room.features),
            )
        })
        .collect();

    format!(
        "Name: {name}\n\
         Address: {address}\n\
         Description: {description}\n\
         Amenities: {amenities}\n\
         Rules: {rules}\n\
         Landlord: {landlord}\n\
         Rooms:\n\
         {room_lines}\n\nTenant Question: {question}",
        name = profile.dorm_name,
        address = profile.address,
        description = or_na(profile.description.as_deref()),
        amenities = list_or_none(&profile.amenities),
        rules = list_or_none(&profile.rules),
    )
}
