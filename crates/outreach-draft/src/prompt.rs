//! Prompt construction for outreach messages.

use rand::Rng;
use rand::seq::SliceRandom;

use outreach_model::WeddingDetails;

pub const STYLES: &[&str] = &[
    "super casual and funny",
    "playfully dramatic",
    "hilariously over-the-top",
    "charmingly silly",
    "witty and clever",
    "goofily enthusiastic",
    "sarcastically sweet",
];

pub const SCENARIOS: &[&str] = &[
    "save the date emergency",
    "address collection mission",
    "fancy save the date delivery quest",
    "mailbox invasion plan",
    "save the date distribution operation",
];

/// Per-request variation so repeated drafts differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptVariant {
    pub style: &'static str,
    pub scenario: &'static str,
    /// Message number in the prompt and sampling seed for the model.
    pub seed: u32,
}

impl PromptVariant {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            style: STYLES.choose(rng).copied().unwrap_or(STYLES[0]),
            scenario: SCENARIOS.choose(rng).copied().unwrap_or(SCENARIOS[0]),
            seed: rng.gen_range(1000..=9999),
        }
    }
}

/// Builds the generation prompt for one guest.
pub fn build_prompt(first_name: &str, details: &WeddingDetails, variant: &PromptVariant) -> String {
    let PromptVariant {
        style,
        scenario,
        seed,
    } = variant;
    let sender = details.sender_name();
    format!(
        "You are {sender}, writing message #{seed} for {first_name}. Be {style} about this {scenario}.

CRITICAL: This message must be COMPLETELY DIFFERENT from any previous message. Be creative and original!

Write a unique, funny message to {first_name} asking for their address for a save the date card.

Requirements:
- Make it {style} and totally unique
- Use ONLY {first_name}'s FIRST NAME
- Keep under 30 words
- Be playful about the {scenario}
- Try wordplay or puns with \"{first_name}\" if possible
- NO emojis (text only)
- NO signatures or names at the end
- NO mention of specific dates or couple names
- NO quotation marks anywhere in the message
- Make it sound like YOU are asking for the address
- Mention it's for a save the date card in a funny way

Different approaches to try:
- Rhyming messages with {first_name}
- Alliteration with their name
- Funny analogies
- Silly threats (like carrier pigeons)
- Over-dramatic pleas
- Clever wordplay with {first_name}

Make this message #{seed} completely unique and personal for {first_name}:"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn variant_draws_from_tables() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let variant = PromptVariant::random(&mut rng);
            assert!(STYLES.contains(&variant.style));
            assert!(SCENARIOS.contains(&variant.scenario));
            assert!((1000..=9999).contains(&variant.seed));
        }
    }

    #[test]
    fn prompt_names_guest_and_sender() {
        let variant = PromptVariant {
            style: STYLES[0],
            scenario: SCENARIOS[1],
            seed: 4242,
        };
        let prompt = build_prompt("Ada", &WeddingDetails::default(), &variant);
        assert!(prompt.starts_with("You are Charles & Jessica, writing message #4242 for Ada."));
        assert!(prompt.contains("address collection mission"));
    }
}
