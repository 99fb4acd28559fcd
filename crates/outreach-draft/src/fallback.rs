//! Deterministic fallback messages.
//!
//! The same guest name always picks the same template, so a page that is
//! reloaded while the drafting service is down shows a stable message.

use sha2::{Digest, Sha256};

use outreach_model::first_name;

/// Longest accepted generated message, in characters (exclusive).
pub const MAX_MESSAGE_CHARS: usize = 200;

/// Templates; `{name}` is replaced with the guest's first name.
pub const FALLBACK_TEMPLATES: &[&str] = &[
    "Hey {name}! Need your address for our save the date card. Where should I send this romantic chaos?",
    "Yo {name}! Got a save the date with your name on it - where do I aim this love missile?",
    "{name}, holding our save the date hostage until you give me your address!",
    "Quick {name}! Save the date needs a destination. What are your mailing coordinates?",
    "Address alert {name}! Save the date deployment requires your location!",
    "Psst {name}... got any good addresses? Asking for a save the date card.",
    "{name}, the mailman is asking about you. Where does he find the legendary {name} for our save the date?",
    "URGENT {name}! Save the date emergency. Deploy your address immediately!",
    "{name}, my save the date is lost without your address. Save it from the postal wilderness!",
    "Listen {name}, assembled a team of carrier pigeons for our save the date. Save them the trip - address please?",
    "Breaking news {name}: Address needed for top secret save the date mission!",
    "{name}! Address detective here. Need your location for save the date crimes!",
    "Warning {name}: Fancy save the date paper incoming! Coordinates required!",
    "Help {name}! Where should this save the date find you hiding?",
    "{name}, if a save the date were to magically appear, where would it land?",
    "Attention {name}! Save the date alert system activated. Please provide target coordinates!",
    "{name}, our save the date is having an identity crisis without your address!",
    "Mission impossible {name}: Deliver save the date to mysterious location. Need intel!",
    "{name}! Save the date carrier pigeon union is on strike. Regular mail address needed!",
    "Emergency broadcast {name}: Save the date requires immediate address extraction!",
];

/// Picks the fallback message for a guest.
pub fn fallback_message(guest_name: &str) -> String {
    let key = guest_name.trim().to_lowercase();
    let digest = Sha256::digest(key.as_bytes());
    let seed = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    let index = seed as usize % FALLBACK_TEMPLATES.len();

    let name = match first_name(guest_name) {
        "" => "friend",
        name => name,
    };
    FALLBACK_TEMPLATES[index].replace("{name}", name)
}

/// Strips non-ASCII characters and checks the length limit.
///
/// Returns `None` when nothing usable is left.
pub fn clean_response(text: &str) -> Option<String> {
    let ascii: String = text.chars().filter(char::is_ascii).collect();
    let trimmed = ascii.trim();
    if trimmed.is_empty() || trimmed.len() >= MAX_MESSAGE_CHARS {
        return None;
    }
    Some(trimmed.to_string())
}
