//! Maven version ordering and version range selection

use std::cmp::Ordering;
use std::fmt;

use super::ResolutionError;

const SNAPSHOT: &str = "SNAPSHOT";

/// A version string with Maven ordering
///
/// Versions are split into numeric and qualifier items at `.`, `-` and
/// digit/letter transitions. Numbers compare numerically, known qualifiers
/// by release maturity (`alpha < beta < milestone < rc < snapshot < release < sp`)
/// and unknown qualifiers lexically after those.
#[derive(Debug, Clone)]
pub struct MavenVersion {
    raw: String,
    items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Item {
    Number(u64),
    Qualifier(String),
}

impl MavenVersion {
    pub fn parse(raw: &str) -> Self {
        let mut items = Vec::new();
        for token in raw.to_ascii_lowercase().split(['.', '-']) {
            let mut current = String::new();
            for c in token.chars() {
                let switch = current
                    .chars()
                    .last()
                    .is_some_and(|last| last.is_ascii_digit() != c.is_ascii_digit());
                if switch {
                    items.push(Item::from_token(&current));
                    current.clear();
                }
                current.push(c);
            }
            if !current.is_empty() {
                items.push(Item::from_token(&current));
            }
        }
        Self {
            raw: raw.to_string(),
            items,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl Item {
    fn from_token(token: &str) -> Self {
        match token.parse::<u64>() {
            Ok(n) => Item::Number(n),
            Err(_) => Item::Qualifier(token.to_string()),
        }
    }
}

fn qualifier_rank(qualifier: &str) -> usize {
    match qualifier {
        "alpha" | "a" => 0,
        "beta" | "b" => 1,
        "milestone" | "m" => 2,
        "rc" | "cr" => 3,
        "snapshot" => 4,
        "" | "ga" | "final" | "release" => 5,
        "sp" => 6,
        _ => 7,
    }
}

fn compare_qualifiers(a: &str, b: &str) -> Ordering {
    qualifier_rank(a)
        .cmp(&qualifier_rank(b))
        .then_with(|| a.cmp(b))
}

fn compare_items(a: Option<&Item>, b: Option<&Item>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (Some(Item::Number(x)), Some(Item::Number(y))) => x.cmp(y),
        (Some(Item::Number(_)), Some(Item::Qualifier(_))) => Ordering::Greater,
        (Some(Item::Qualifier(_)), Some(Item::Number(_))) => Ordering::Less,
        (Some(Item::Qualifier(x)), Some(Item::Qualifier(y))) => compare_qualifiers(x, y),
        // padding takes the shape of the other side: 0 or the release qualifier
        (None, Some(Item::Number(y))) => 0.cmp(y),
        (Some(Item::Number(x)), None) => x.cmp(&0),
        (None, Some(Item::Qualifier(y))) => compare_qualifiers("", y),
        (Some(Item::Qualifier(x)), None) => compare_qualifiers(x, ""),
    }
}

impl Ord for MavenVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.items.len().max(other.items.len());
        (0..len)
            .map(|i| compare_items(self.items.get(i), other.items.get(i)))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for MavenVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for MavenVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for MavenVersion {}

impl fmt::Display for MavenVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Whether a version refers to a snapshot, floating or timestamped
pub fn is_snapshot(version: &str) -> bool {
    version.ends_with(SNAPSHOT) || split_timestamp(version).is_some()
}

/// The floating version a concrete version belongs to
///
/// `1.0-20070101.120000-1` becomes `1.0-SNAPSHOT`; every other version is
/// its own base version.
pub fn base_version(version: &str) -> String {
    match split_timestamp(version) {
        Some(base) => format!("{base}-{SNAPSHOT}"),
        None => version.to_string(),
    }
}

/// Split `<base>-<yyyyMMdd.HHmmss>-<build>` into its base part
pub(crate) fn split_timestamp(version: &str) -> Option<&str> {
    let (rest, build) = version.rsplit_once('-')?;
    let (base, stamp) = rest.rsplit_once('-')?;
    let (date, time) = stamp.split_once('.')?;

    let digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    let valid = digits(date, 8)
        && digits(time, 6)
        && !build.is_empty()
        && build.bytes().all(|b| b.is_ascii_digit())
        && !base.is_empty();
    valid.then_some(base)
}

/// A requested version: a plain version or a set of ranges
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSpec {
    Exact(String),
    Ranges(Vec<Restriction>),
}

/// One `[lower,upper)` interval of a version range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restriction {
    pub lower: Option<Bound>,
    pub upper: Option<Bound>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bound {
    pub version: MavenVersion,
    pub inclusive: bool,
}

impl Restriction {
    pub fn contains(&self, version: &MavenVersion) -> bool {
        let above = self.lower.as_ref().is_none_or(|bound| match version.cmp(&bound.version) {
            Ordering::Greater => true,
            Ordering::Equal => bound.inclusive,
            Ordering::Less => false,
        });
        let below = self.upper.as_ref().is_none_or(|bound| match version.cmp(&bound.version) {
            Ordering::Less => true,
            Ordering::Equal => bound.inclusive,
            Ordering::Greater => false,
        });
        above && below
    }
}

impl VersionSpec {
    /// Parse a version or a comma separated union of ranges
    ///
    /// ```text
    /// 1.0            exact (soft) version
    /// [1.0]          only 1.0
    /// [1.0,2.0)      1.0 <= v < 2.0
    /// (,1.0],[1.2,)  v <= 1.0 or v >= 1.2
    /// ```
    pub fn parse(spec: &str) -> Result<Self, ResolutionError> {
        let spec = spec.trim();
        let invalid = |reason: &str| ResolutionError::InvalidVersion {
            version: spec.to_string(),
            reason: reason.to_string(),
        };

        if spec.is_empty() {
            return Err(invalid("empty version"));
        }
        if !spec.starts_with(['[', '(']) {
            if spec.contains(['[', ']', '(', ')', ',']) {
                return Err(invalid("unexpected range delimiter"));
            }
            return Ok(VersionSpec::Exact(spec.to_string()));
        }

        let mut restrictions = Vec::new();
        let mut rest = spec;
        while !rest.is_empty() {
            let open = rest.chars().next().ok_or_else(|| invalid("truncated range"))?;
            if open != '[' && open != '(' {
                return Err(invalid("expected '[' or '('"));
            }
            let close = rest
                .find([']', ')'])
                .ok_or_else(|| invalid("unbalanced range"))?;
            let body = &rest[1..close];
            let lower_inclusive = open == '[';
            let upper_inclusive = rest[close..].starts_with(']');
            restrictions.push(parse_restriction(body, lower_inclusive, upper_inclusive).map_err(&invalid)?);

            rest = rest[close + 1..].trim_start();
            if let Some(next) = rest.strip_prefix(',') {
                rest = next.trim_start();
                if rest.is_empty() {
                    return Err(invalid("trailing ','"));
                }
            } else if !rest.is_empty() {
                return Err(invalid("ranges must be separated by ','"));
            }
        }
        Ok(VersionSpec::Ranges(restrictions))
    }

    pub fn contains(&self, version: &MavenVersion) -> bool {
        match self {
            VersionSpec::Exact(exact) => MavenVersion::parse(exact) == *version,
            VersionSpec::Ranges(ranges) => ranges.iter().any(|r| r.contains(version)),
        }
    }

    /// Highest candidate accepted by this spec
    pub fn select<'a>(&self, candidates: impl IntoIterator<Item = &'a str>) -> Option<String> {
        candidates
            .into_iter()
            .map(MavenVersion::parse)
            .filter(|v| self.contains(v))
            .max()
            .map(|v| v.raw)
    }
}

fn parse_restriction(
    body: &str,
    lower_inclusive: bool,
    upper_inclusive: bool,
) -> Result<Restriction, &'static str> {
    let Some((low, high)) = body.split_once(',') else {
        // single version pins both bounds
        let version = body.trim();
        if version.is_empty() || !lower_inclusive || !upper_inclusive {
            return Err("single version ranges must use [v]");
        }
        let bound = Bound {
            version: MavenVersion::parse(version),
            inclusive: true,
        };
        return Ok(Restriction {
            lower: Some(bound.clone()),
            upper: Some(bound),
        });
    };

    if high.contains(',') {
        return Err("too many bounds in range");
    }
    let bound = |text: &str, inclusive: bool| {
        let text = text.trim();
        (!text.is_empty()).then(|| Bound {
            version: MavenVersion::parse(text),
            inclusive,
        })
    };
    let restriction = Restriction {
        lower: bound(low, lower_inclusive),
        upper: bound(high, upper_inclusive),
    };
    if let (Some(lower), Some(upper)) = (&restriction.lower, &restriction.upper) {
        if lower.version > upper.version {
            return Err("lower bound is above upper bound");
        }
    }
    Ok(restriction)
}
