//! Name normalisation shared by town and audit records.

use std::sync::LazyLock;

use regex::Regex;

static PARENTHESISED: LazyLock<Regex> = LazyLock::new(|| compile(r"\s*\(.*?\)"));
static NEIGHBOURHOOD: LazyLock<Regex> = LazyLock::new(|| compile(r"\((.*?)\)"));

#[expect(
    clippy::expect_used,
    reason = "patterns are string literals exercised by the unit tests"
)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("name pattern should compile")
}

/// Uppercase and trim a name for index lookups.
///
/// # Examples
///
/// ```
/// use walkaudit_core::normalise_name;
///
/// assert_eq!(normalise_name(" Boston "), "BOSTON");
/// ```
#[must_use]
pub fn normalise_name(raw: &str) -> String {
    raw.to_uppercase().trim().to_owned()
}

/// Return the first candidate that is present and non-empty.
///
/// Whitespace-only candidates still win: they are non-empty before
/// normalisation, so a blank `CITY/TOWN` shadows `CITY`.
pub(crate) fn first_non_empty<'a>(
    candidates: impl IntoIterator<Item = Option<&'a str>>,
) -> Option<&'a str> {
    candidates
        .into_iter()
        .flatten()
        .find(|candidate| !candidate.is_empty())
}

/// A `CITY/TOWN` value split into its city and optional neighbourhood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityTown {
    /// The whole value, uppercased and trimmed.
    pub full: String,
    /// The value with every parenthesised group (and the whitespace before
    /// it) removed.
    pub city: String,
    /// Contents of the first parenthesised group, untrimmed.
    pub neighbourhood: Option<String>,
}

impl CityTown {
    /// Split a raw spreadsheet value such as `Boston (Dorchester)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use walkaudit_core::CityTown;
    ///
    /// let parsed = CityTown::parse("Boston (Dorchester)");
    /// assert_eq!(parsed.full, "BOSTON (DORCHESTER)");
    /// assert_eq!(parsed.city, "BOSTON");
    /// assert_eq!(parsed.neighbourhood.as_deref(), Some("DORCHESTER"));
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let full = normalise_name(raw);
        let neighbourhood = NEIGHBOURHOOD
            .captures(&full)
            .and_then(|captures| captures.get(1))
            .map(|group| group.as_str().to_owned());
        let city = PARENTHESISED.replace_all(&full, "").into_owned();
        Self {
            full,
            city,
            neighbourhood,
        }
    }

    /// Whether a parenthesised group was stripped from the value.
    #[must_use]
    pub fn has_neighbourhood(&self) -> bool {
        self.neighbourhood.is_some() && self.city != self.full
    }
}
