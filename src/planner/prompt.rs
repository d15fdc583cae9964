//! Prompts for the travel planner, rendered with Handlebars. Strict
//! mode makes a missing field a render error instead of silently
//! sending the model a half empty instruction block.

use std::fmt;

use anyhow::Result;
use handlebars::{Handlebars, no_escape};
use serde::Serialize;

#[derive(Debug)]
pub enum Prompt {
    Instructions,
    Welcome,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The knowledge snippet embedded in every request.
#[derive(Debug, Serialize)]
pub struct CityGuide {
    pub city: &'static str,
    pub audience: &'static str,
    pub attractions: &'static [&'static str],
    pub restaurants: &'static str,
    pub transport: &'static str,
}

pub const HONG_KONG: CityGuide = CityGuide {
    city: "Hong Kong",
    audience: "families and seniors",
    attractions: &[
        "Victoria Peak (Sky Terrace)",
        "Star Ferry",
        "Hong Kong Museum of History",
        "Science Museum",
        "Hong Kong Park",
        "Kowloon Park",
        "Temple Street Night Market",
        "Ladies' Market",
        "Tsim Sha Tsui Promenade",
        "Avenue of Stars",
        "Hong Kong Space Museum",
        "Cultural Centre",
    ],
    restaurants: "Dim sum at accessible hotels, soft meal options at major shopping malls, vegetarian restaurants in Central and Causeway Bay.",
    transport: "MTR has elevator access at most stations, buses have wheelchair spaces, taxis are accessible, Star Ferry has assistance available.",
};

/// Quick examples offered to new users.
pub const EXAMPLE_PROMPTS: [&str; 4] = [
    "Plan a 3-day trip for elderly parents with wheelchairs",
    "Vegetarian restaurants in Central with soft meals",
    "Accessible attractions for families with young children",
    "Budget-friendly itinerary under $100/day",
];

const INSTRUCTIONS_PROMPT: &str = r"You are an expert {{city}} travel planner specializing in accessible tourism for {{audience}}.

EXPERTISE:
- Complete knowledge of {{city}} attractions, restaurants, transportation
- Accessibility features: wheelchair access, elevators, step-free routes
- Dietary accommodations: soft meals, vegetarian, halal, allergies
- Budget planning with senior/child discounts
- Safe, comfortable itineraries with appropriate pacing
- Weather considerations and seasonal recommendations
- Transportation: MTR, buses, taxis, ferries with accessibility info

GUIDELINES:
1. Always prioritize accessibility and safety
2. Limit to 2-3 venues per day to prevent fatigue
3. Include detailed accessibility information for each recommendation
4. Provide cost estimates with available discounts
5. Explain reasoning for each recommendation
6. Consider weather and walking distances
7. Ask clarifying questions when needed
8. Be conversational and helpful

RESPONSE FORMAT:
- For general questions: Provide helpful, detailed answers
- For itinerary requests: Create day-by-day plans with:
  * Venue names and descriptions
  * Accessibility features (elevators, wheelchair access, toilets)
  * Transportation instructions
  * Cost estimates
  * Timing recommendations
  * Why each venue is suitable for the user's needs

{{upper city}} KNOWLEDGE BASE:
Key accessible attractions: {{#each attractions}}{{this}}{{#unless @last}}, {{/unless}}{{/each}}.

Accessible restaurants: {{restaurants}}

Transportation: {{transport}}

Always provide specific, actionable advice based on the user's stated needs.";

const WELCOME_PROMPT: &str = r"🏙️ **Welcome to HK LLM Travel Planner!**

I'm your AI travel assistant specialized in creating accessible {{city}} itineraries for {{audience}}.

**Tell me about your travel plans:**
- Who's traveling with you?
- Any accessibility needs (wheelchair, mobility aids)?
- Dietary preferences or restrictions?
- Budget range per person/day?
- How many days will you be visiting?
- Any specific interests or must-see places?

I'll create a personalized, accessible itinerary just for you! 🌟";

handlebars::handlebars_helper!(upper: |s: str| s.to_uppercase());

pub fn templates<'a>() -> Handlebars<'a> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    // Prompts are plain text, not HTML
    registry.register_escape_fn(no_escape);
    registry.register_helper("upper", Box::new(upper));
    registry
        .register_template_string(&Prompt::Instructions.to_string(), INSTRUCTIONS_PROMPT)
        .expect("Failed to register template");
    registry
        .register_template_string(&Prompt::Welcome.to_string(), WELCOME_PROMPT)
        .expect("Failed to register template");
    registry
}

pub fn render(prompt: Prompt, guide: &CityGuide) -> Result<String> {
    let rendered = templates().render(&prompt.to_string(), guide)?;
    Ok(rendered)
}
