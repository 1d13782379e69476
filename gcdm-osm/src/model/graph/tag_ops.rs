use itertools::Itertools;
use std::cmp::Ordering;
use uom::si::f64::{Time, Velocity};
use uom::si::{time, velocity};

/// `highway` tag values that carry general motor traffic
pub const DRIVABLE_HIGHWAYS: [&str; 15] = [
    "motorway",
    "motorway_link",
    "trunk",
    "trunk_link",
    "primary",
    "primary_link",
    "secondary",
    "secondary_link",
    "tertiary",
    "tertiary_link",
    "unclassified",
    "residential",
    "living_street",
    "road",
    "service",
];

/// deals with the various ways that maxspeed tags can appear. handles
/// valid cases such as:
///   - 45        (45 kph)
///   - 45 mph    (72.4203 kph)
///
/// and invalid cases that are documented, such as:
///   - 45;80     (takes the smaller of the two, so, 45 kph)
///
/// unposted or symbolic values ("none", "signals", "national") return None.
///
/// see https://wiki.openstreetmap.org/wiki/Key:maxspeed
pub fn deserialize_speed(s: &str) -> Result<Option<Velocity>, String> {
    let entries = s.split(';').map(str::trim).collect_vec();
    match entries[..] {
        [] => Err(format!(
            "internal error: attempting to unpack empty maxspeed value '{s}'"
        )),
        [entry] => deserialize_speed_entry(entry),
        _ => {
            let speeds = entries
                .iter()
                .map(|e| deserialize_speed_entry(e))
                .collect::<Result<Vec<_>, _>>()?;
            let min = speeds
                .into_iter()
                .flatten()
                .min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Greater));
            Ok(min)
        }
    }
}

fn deserialize_speed_entry(entry: &str) -> Result<Option<Velocity>, String> {
    match entry.split_whitespace().collect_vec()[..] {
        [] => Ok(None),
        ["none"] | ["signals"] | ["variable"] | ["unposted"] | ["unknown"] | ["default"]
        | ["national"] | ["walk"] => Ok(None),
        [compact] if compact.ends_with("mph") => {
            let number = compact.trim_end_matches("mph");
            parse_speed(number, "mph")
        }
        [speed_str] => parse_speed(speed_str, "kph"),
        [speed_str, unit_str] => parse_speed(speed_str, unit_str),
        _ => Err(format!("unexpected maxspeed entry '{entry}'")),
    }
}

fn parse_speed(speed_str: &str, unit_str: &str) -> Result<Option<Velocity>, String> {
    let speed = speed_str
        .parse::<f64>()
        .map_err(|e| format!("speed value {speed_str} not a valid number: {e}"))?;
    if speed <= 0.0 || speed.is_nan() {
        return Ok(None);
    }
    match unit_str {
        "kph" | "km/h" | "kmh" => Ok(Some(Velocity::new::<velocity::kilometer_per_hour>(
            speed,
        ))),
        "mph" => Ok(Some(Velocity::new::<velocity::mile_per_hour>(speed))),
        "knots" => Ok(Some(Velocity::new::<velocity::knot>(speed))),
        _ => Err(format!("unknown speed unit {unit_str} with value {speed}")),
    }
}

/// reads a `duration` tag, which OSM documents as "mm", "hh:mm" or "hh:mm:ss".
/// negative or non-finite components are rejected.
///
/// see https://wiki.openstreetmap.org/wiki/Key:duration
pub fn deserialize_duration(s: &str) -> Result<Time, String> {
    let parts = s
        .trim()
        .split(':')
        .map(|p| {
            p.trim()
                .parse::<f64>()
                .map_err(|e| format!("duration component '{p}' of '{s}' not a number: {e}"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if let Some(bad) = parts.iter().find(|p| !p.is_finite() || **p < 0.0) {
        return Err(format!("duration component {bad} of '{s}' must be a non-negative number"));
    }
    let minutes = match parts[..] {
        [m] => m,
        [h, m] => h * 60.0 + m,
        [h, m, sec] => h * 60.0 + m + sec / 60.0,
        _ => return Err(format!("unexpected duration entry '{s}'")),
    };
    Ok(Time::new::<time::minute>(minutes))
}

/// interprets the `oneway` and `junction` tags of a way.
///
/// # Returns
///
/// (forward allowed, backward allowed)
pub fn travel_directions(oneway: Option<&str>, junction: Option<&str>) -> (bool, bool) {
    match (oneway, junction) {
        (Some("yes") | Some("true") | Some("1"), _) => (true, false),
        (Some("-1") | Some("reverse"), _) => (false, true),
        (Some("no") | Some("false") | Some("0"), _) => (true, true),
        (_, Some("roundabout") | Some("circular")) => (true, false),
        _ => (true, true),
    }
}
