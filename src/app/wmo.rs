// Descriptions follow WMO code table 4677 as published by Open-Meteo.
pub fn classify(code: i32) -> String {
    let description = match code {
        0..=1 => "Clear Sky",
        2..=3 => "Partly Cloudy",
        45 | 48 => "Foggy",
        51 | 53 | 55 => "Drizzle",
        56 | 57 => "Freezing Drizzle",
        61 => "Light Rain",
        63 => "Moderate Rain",
        65 => "Heavy Rain",
        71 => "Light Snow",
        73 => "Moderate Snow",
        75 => "Heavy Snow",
        77 => "Snow Grains",
        80..=82 => "Rain Showers",
        85..=86 => "Snow Showers",
        95..=99 => "Thunderstorm",
        _ => return format!("Unknown, wmo code: {}", code),
    };

    description.to_owned()
}
