//! Dinner recommender: a fixed mood × weather decision table.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mood {
    Happy,
    SoSo,
    Gloomy,
    Annoyed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Weather {
    Sunny,
    Rainy,
    Cloudy,
    Snowy,
    Windy,
}

impl Mood {
    /// Dropdown order.
    pub const ALL: [Mood; 4] = [Mood::Happy, Mood::SoSo, Mood::Gloomy, Mood::Annoyed];

    pub fn label(self) -> &'static str {
        match self {
            Mood::Happy => "😊 Feeling good",
            Mood::SoSo => "😐 So-so",
            Mood::Gloomy => "😢 Feeling down",
            Mood::Annoyed => "😠 Annoyed",
        }
    }
}

impl Weather {
    /// Dropdown order.
    pub const ALL: [Weather; 5] = [
        Weather::Sunny,
        Weather::Rainy,
        Weather::Cloudy,
        Weather::Snowy,
        Weather::Windy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Weather::Sunny => "☀️ Sunny",
            Weather::Rainy => "🌧️ Rain",
            Weather::Cloudy => "⛅ Cloudy",
            Weather::Snowy => "❄️ Snow",
            Weather::Windy => "🌬️ Windy",
        }
    }
}

/// Shown when a selection falls outside the table.
pub const FALLBACK_RECOMMENDATION: &str = "Tonight might just be a delivery night 😊";

pub fn recommend(mood: Mood, weather: Weather) -> &'static str {
    match (mood, weather) {
        (Mood::Happy, Weather::Sunny) => "How about grilled pork belly and cold noodles?",
        (Mood::Happy, Weather::Rainy) => "Savory pancakes with rice wine!",
        (Mood::Happy, Weather::Snowy) => "Shabu-shabu is just right!",
        (Mood::Happy, _) => "Pizza or pasta would be great too!",
        (Mood::SoSo, Weather::Rainy) => "Warm ramen with gimbap?",
        (Mood::SoSo, _) => "Try a spicy stir-fried pork set meal.",
        (Mood::Gloomy, _) => "Cheer up with some spicy tteokbokki!",
        (Mood::Annoyed, _) => "Blow off the stress with some meat, any kind you like!",
    }
}

/// Index-based lookup for dropdowns. Out-of-range indices get the fallback.
pub fn recommend_by_index(mood: usize, weather: usize) -> &'static str {
    match (Mood::ALL.get(mood), Weather::ALL.get(weather)) {
        (Some(m), Some(w)) => recommend(*m, *w),
        _ => FALLBACK_RECOMMENDATION,
    }
}
