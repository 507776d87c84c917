//! WMO weather interpretation code labels.

/// Translates a WMO weather interpretation code into a label.
///
/// Pure lookup over the code table published with the Open-Meteo API.
/// Unrecognized codes get a fallback label; this function never fails.
#[must_use]
pub const fn translate_code(code: i64) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown conditions",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_have_labels() {
        assert_eq!(translate_code(0), "Clear sky");
        assert_eq!(translate_code(3), "Overcast");
        assert_eq!(translate_code(95), "Thunderstorm");
    }

    #[test]
    fn unknown_codes_fall_back() {
        assert_eq!(translate_code(-1), "Unknown conditions");
        assert_eq!(translate_code(42), "Unknown conditions");
        assert_eq!(translate_code(1000), "Unknown conditions");
    }
}
