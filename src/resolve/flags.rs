//! Country flag lookup for event locations.
//!
//! Locations are free text typed by an editor (`"Zurich, Switzerland"`,
//! `"Online"`, `"Berlin (Germany)"`). The country is usually the last part,
//! so segments are checked last-first against a table of country names and
//! common aliases. Flags are built from the ISO 3166-1 alpha-2 code as a pair
//! of regional indicator symbols.

/// Shown for virtual, empty, and unrecognised locations.
pub const GLOBE: &str = "🌐";

/// Substrings that mark a location as virtual.
const VIRTUAL_MARKERS: &[&str] = &[
    "online",
    "virtual",
    "remote",
    "webinar",
    "zoom",
    "livestream",
    "live stream",
];

/// Lowercase country names and aliases → ISO 3166-1 alpha-2.
const COUNTRIES: &[(&str, &str)] = &[
    ("argentina", "AR"),
    ("australia", "AU"),
    ("austria", "AT"),
    ("österreich", "AT"),
    ("belgium", "BE"),
    ("brazil", "BR"),
    ("brasil", "BR"),
    ("bulgaria", "BG"),
    ("canada", "CA"),
    ("chile", "CL"),
    ("china", "CN"),
    ("colombia", "CO"),
    ("croatia", "HR"),
    ("czech republic", "CZ"),
    ("czechia", "CZ"),
    ("denmark", "DK"),
    ("egypt", "EG"),
    ("estonia", "EE"),
    ("finland", "FI"),
    ("france", "FR"),
    ("germany", "DE"),
    ("deutschland", "DE"),
    ("greece", "GR"),
    ("hong kong", "HK"),
    ("hungary", "HU"),
    ("iceland", "IS"),
    ("india", "IN"),
    ("indonesia", "ID"),
    ("ireland", "IE"),
    ("israel", "IL"),
    ("italy", "IT"),
    ("italia", "IT"),
    ("japan", "JP"),
    ("kenya", "KE"),
    ("latvia", "LV"),
    ("liechtenstein", "LI"),
    ("lithuania", "LT"),
    ("luxembourg", "LU"),
    ("malaysia", "MY"),
    ("malta", "MT"),
    ("mexico", "MX"),
    ("morocco", "MA"),
    ("netherlands", "NL"),
    ("the netherlands", "NL"),
    ("holland", "NL"),
    ("new zealand", "NZ"),
    ("nigeria", "NG"),
    ("norway", "NO"),
    ("peru", "PE"),
    ("philippines", "PH"),
    ("poland", "PL"),
    ("portugal", "PT"),
    ("romania", "RO"),
    ("serbia", "RS"),
    ("singapore", "SG"),
    ("slovakia", "SK"),
    ("slovenia", "SI"),
    ("south africa", "ZA"),
    ("south korea", "KR"),
    ("korea", "KR"),
    ("spain", "ES"),
    ("españa", "ES"),
    ("sweden", "SE"),
    ("switzerland", "CH"),
    ("schweiz", "CH"),
    ("suisse", "CH"),
    ("svizzera", "CH"),
    ("taiwan", "TW"),
    ("thailand", "TH"),
    ("turkey", "TR"),
    ("türkiye", "TR"),
    ("ukraine", "UA"),
    ("united arab emirates", "AE"),
    ("uae", "AE"),
    ("united kingdom", "GB"),
    ("uk", "GB"),
    ("great britain", "GB"),
    ("england", "GB"),
    ("scotland", "GB"),
    ("wales", "GB"),
    ("united states", "US"),
    ("united states of america", "US"),
    ("usa", "US"),
    ("us", "US"),
    ("vietnam", "VN"),
];

/// Flag emoji for the country named in `location`, or [`GLOBE`].
pub fn country_flag(location: Option<&str>) -> String {
    let Some(location) = location.map(str::trim).filter(|l| !l.is_empty()) else {
        return GLOBE.to_string();
    };
    if is_virtual(location) {
        return GLOBE.to_string();
    }

    location
        .split([',', '(', ')', '/', '|', '·'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .rev()
        .find_map(country_code)
        .map(flag_from_code)
        .unwrap_or_else(|| GLOBE.to_string())
}

/// Whether a location names a virtual venue.
pub fn is_virtual(location: &str) -> bool {
    let lower = location.to_lowercase();
    VIRTUAL_MARKERS.iter().any(|m| lower.contains(m))
}

fn country_code(segment: &str) -> Option<&'static str> {
    let lower = segment.trim_end_matches('.').to_lowercase();
    COUNTRIES
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, code)| *code)
}

/// Regional indicator pair for a two-letter code (`"CH"` → 🇨🇭).
fn flag_from_code(code: &str) -> String {
    code.chars()
        .filter_map(|c| {
            let offset = (c.to_ascii_uppercase() as u32).checked_sub('A' as u32)?;
            char::from_u32(0x1F1E6 + offset)
        })
        .collect()
}
