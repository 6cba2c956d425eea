/// Static metadata for a tracked country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub code: &'static str,
    pub name: &'static str,
    pub flag: &'static str,
}

/// The 27 EU member states the feed reports on.
pub const COUNTRIES: &[Country] = &[
    Country { code: "at", name: "Austria", flag: "🇦🇹" },
    Country { code: "be", name: "Belgium", flag: "🇧🇪" },
    Country { code: "bg", name: "Bulgaria", flag: "🇧🇬" },
    Country { code: "cy", name: "Cyprus", flag: "🇨🇾" },
    Country { code: "cz", name: "Czech Republic", flag: "🇨🇿" },
    Country { code: "de", name: "Germany", flag: "🇩🇪" },
    Country { code: "dk", name: "Denmark", flag: "🇩🇰" },
    Country { code: "ee", name: "Estonia", flag: "🇪🇪" },
    Country { code: "gr", name: "Greece", flag: "🇬🇷" },
    Country { code: "es", name: "Spain", flag: "🇪🇸" },
    Country { code: "fi", name: "Finland", flag: "🇫🇮" },
    Country { code: "fr", name: "France", flag: "🇫🇷" },
    Country { code: "hr", name: "Croatia", flag: "🇭🇷" },
    Country { code: "hu", name: "Hungary", flag: "🇭🇺" },
    Country { code: "ie", name: "Ireland", flag: "🇮🇪" },
    Country { code: "it", name: "Italy", flag: "🇮🇹" },
    Country { code: "lt", name: "Lithuania", flag: "🇱🇹" },
    Country { code: "lu", name: "Luxembourg", flag: "🇱🇺" },
    Country { code: "lv", name: "Latvia", flag: "🇱🇻" },
    Country { code: "mt", name: "Malta", flag: "🇲🇹" },
    Country { code: "nl", name: "Netherlands", flag: "🇳🇱" },
    Country { code: "pl", name: "Poland", flag: "🇵🇱" },
    Country { code: "pt", name: "Portugal", flag: "🇵🇹" },
    Country { code: "ro", name: "Romania", flag: "🇷🇴" },
    Country { code: "se", name: "Sweden", flag: "🇸🇪" },
    Country { code: "si", name: "Slovenia", flag: "🇸🇮" },
    Country { code: "sk", name: "Slovakia", flag: "🇸🇰" },
];

/// Look up a country by code (case-insensitive).
pub fn country(code: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// English name, or the raw code for countries not in the table.
pub fn display_name(code: &str) -> String {
    country(code).map_or_else(|| code.to_string(), |c| c.name.to_string())
}

/// Flag emoji, or an empty string for countries not in the table.
pub fn flag(code: &str) -> &'static str {
    country(code).map_or("", |c| c.flag)
}
