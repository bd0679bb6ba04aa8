/// Core type definitions for the market calendar
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default cap on day-stepping scans
pub const DEFAULT_SCAN_LIMIT: usize = 400;

/// Asset class of a market (equity, fx, metal, crypto or anything else)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AssetClass {
    Equity,
    Fx,
    Metal,
    Crypto,
    Other(String),
}

impl AssetClass {
    pub fn as_str(&self) -> &str {
        match self {
            AssetClass::Equity => "equity",
            AssetClass::Fx => "fx",
            AssetClass::Metal => "metal",
            AssetClass::Crypto => "crypto",
            AssetClass::Other(tag) => tag,
        }
    }

    /// Which trading session rule governs this asset class
    pub fn session_kind(&self) -> SessionKind {
        match self {
            AssetClass::Equity => SessionKind::Equity,
            AssetClass::Fx | AssetClass::Metal => SessionKind::FxMetal,
            AssetClass::Crypto | AssetClass::Other(_) => SessionKind::Continuous,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, AssetClass::Other(_))
    }
}

/// Tags match case-insensitively after trimming, so `"EQUITY"` gets equity
/// rules rather than the always-open fallback an exact match would give.
impl From<&str> for AssetClass {
    fn from(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "equity" => AssetClass::Equity,
            "fx" => AssetClass::Fx,
            "metal" => AssetClass::Metal,
            "crypto" => AssetClass::Crypto,
            _ => AssetClass::Other(tag.to_string()),
        }
    }
}

impl From<String> for AssetClass {
    fn from(tag: String) -> Self {
        AssetClass::from(tag.as_str())
    }
}

impl From<AssetClass> for String {
    fn from(asset: AssetClass) -> Self {
        asset.as_str().to_string()
    }
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session rule families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    /// Regular weekday session with holidays and early closes
    Equity,
    /// Continuous week-long session, closed Friday 17:00 to Sunday 17:00
    FxMetal,
    /// Never closes
    Continuous,
}

/// Calendar data file (TOML)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub sessions: SessionConfig,
    pub holidays: HolidayConfig,
    pub evaluator: EvaluatorConfig,
}

/// Session boundaries as wall-clock times in `timezone`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub timezone: String,
    pub equity_open: String,
    pub equity_close: String,
    pub equity_early_close: String,
    pub fx_metal_boundary: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            timezone: "America/New_York".to_string(),
            equity_open: "09:30".to_string(),
            equity_close: "16:00".to_string(),
            equity_early_close: "13:00".to_string(),
            fx_metal_boundary: "17:00".to_string(),
        }
    }
}

/// Holiday lists; `None` keeps the compiled-in list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HolidayConfig {
    pub equity: Option<Vec<NaiveDate>>,
    pub equity_early_close: Option<Vec<NaiveDate>>,
    pub fx_metal: Option<Vec<NaiveDate>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Max one-day steps in a next-open/next-close search
    pub scan_limit: usize,
    /// Reject unrecognized asset classes instead of treating them as always open
    pub strict_asset_classes: bool,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        EvaluatorConfig {
            scan_limit: DEFAULT_SCAN_LIMIT,
            strict_asset_classes: false,
        }
    }
}

/// Snapshot of a market's state at an instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketStatus {
    pub asset_class: AssetClass,
    pub as_of: String,
    pub is_open: bool,
    pub next_open: Option<String>,
    pub next_close: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_class_parsing() {
        assert_eq!(AssetClass::from("equity"), AssetClass::Equity);
        assert_eq!(AssetClass::from("FX"), AssetClass::Fx);
        assert_eq!(AssetClass::from(" metal "), AssetClass::Metal);
        assert_eq!(AssetClass::from("crypto"), AssetClass::Crypto);
        assert_eq!(
            AssetClass::from("rates"),
            AssetClass::Other("rates".to_string())
        );
    }

    #[test]
    fn test_tags_are_not_exact_match() {
        assert_eq!(AssetClass::from("EQUITY"), AssetClass::Equity);
        assert_eq!(AssetClass::from("Equity\n"), AssetClass::Equity);
        assert!(AssetClass::from("EQUITY").is_recognized());
        // Unknown tags keep their original spelling
        assert_eq!(AssetClass::from("Rates").as_str(), "Rates");
    }

    #[test]
    fn test_session_kind() {
        assert_eq!(AssetClass::Equity.session_kind(), SessionKind::Equity);
        assert_eq!(AssetClass::Fx.session_kind(), SessionKind::FxMetal);
        assert_eq!(AssetClass::Metal.session_kind(), SessionKind::FxMetal);
        assert_eq!(AssetClass::Crypto.session_kind(), SessionKind::Continuous);
        assert_eq!(
            AssetClass::Other("rates".to_string()).session_kind(),
            SessionKind::Continuous
        );
        assert!(!AssetClass::Other("rates".to_string()).is_recognized());
    }

    #[test]
    fn test_status_serializes_asset_class_as_tag() {
        let status = MarketStatus {
            asset_class: AssetClass::Fx,
            as_of: "2023-06-17T16:00:00Z".to_string(),
            is_open: false,
            next_open: Some("2023-06-18T21:00:00Z".to_string()),
            next_close: Some("2023-06-23T21:00:00Z".to_string()),
        };
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["asset_class"], "fx");
        assert_eq!(json["next_open"], "2023-06-18T21:00:00Z");
    }
}
