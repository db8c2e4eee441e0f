//! Instruction wording for each task kind.
//!
//! Every function here is pure: identical inputs give identical text. Inputs
//! are inserted verbatim; defaulting and validation happen in
//! [`crate::normalize`] before these are called.

use indoc::indoc;

use crate::task::Coordinate;

/// Default topic for scheme lookups without a query.
pub const DEFAULT_SCHEME_QUERY: &str = "Agricultural subsidies";
/// Reply language when the caller names none.
pub const DEFAULT_LANGUAGE: &str = "English";
/// Number of schemes requested per lookup.
pub const SCHEME_COUNT: usize = 3;

const DISEASE_INSTRUCTION: &str = indoc! {
    "Analyze this plant image.
    1. Identify the crop name.
    2. Identify the specific disease or problem.
    3. Provide a step-by-step actionable solution to cure it."
};

/// Answer a spoken question, replying entirely in `language`.
pub fn render_voice(user_text: &str, language: &str) -> String {
    format!(
        "The farmer asked: '{user_text}'. Answer concisely and helpfully. \
         You MUST reply completely in the {language} language."
    )
}

/// Three-step diagnosis of the attached plant photo.
pub fn render_disease() -> String {
    DISEASE_INSTRUCTION.to_string()
}

/// Soil inference and top-3 crop recommendation for a location.
pub fn render_soil_match(lat: &Coordinate, lng: &Coordinate, has_image: bool) -> String {
    let mut out = format!("I am a farmer at GPS coordinates Lat: {lat}, Lng: {lng}. ");
    if has_image {
        out.push_str(
            "Based on this geographical location's typical climate and the attached soil image, \
             determine the soil type and recommend the top 3 best crops to grow. Explain why.",
        );
    } else {
        out.push_str(
            "Based on this geographical location's typical soil and climate, \
             infer the likely soil type and recommend the top 3 best crops to grow. Explain why.",
        );
    }
    out
}

pub fn render_schemes(query: &str) -> String {
    format!(
        "List {SCHEME_COUNT} specific, real, active government agricultural schemes or subsidies \
         related to: '{query}'. Provide the Name, Category, and Description for each."
    )
}

/// Next-year yield forecast from a serialized history table.
pub fn render_yield_prediction(table_text: &str) -> String {
    let mut out = String::from("Here is the historical data of a farm:\n");
    out.push_str(table_text);
    if !table_text.ends_with('\n') {
        out.push('\n');
    }
    out.push('\n');
    out.push_str(indoc! {
        "Act as a Farm Digital Twin AI. Analyze this data.
        Predict the yield for next year assuming standard rainfall.
        Provide a deep explanation of your prediction and suggest preventative measures."
    });
    out
}
