use thiserror::Error;

/// Positional weights for major, minor and patch.
const WEIGHTS: [u64; 3] = [10_000, 100, 1];

/// Largest minor/patch component that cannot spill into the next weight.
pub const MAX_SUBORDINATE_COMPONENT: u64 = 99;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionParseError {
    #[error("invalid version component {component:?} in {version:?}")]
    InvalidComponent { version: String, component: String },

    #[error("{component} component of {version:?} is {value}, above the supported maximum of 99")]
    ComponentOutOfRange {
        version: String,
        component: &'static str,
        value: u64,
    },
}

/// Convert a dotted `major.minor.patch` string into its version key.
///
/// Tokens are paired with the weights 10000/100/1; anything past the third
/// token is ignored and missing trailing tokens contribute nothing. Minor and
/// patch components above 99 are accepted and will alias higher weights, use
/// [`checked_version_to_number`] when that matters.
///
/// # Errors
/// Returns [`VersionParseError::InvalidComponent`] when one of the first three
/// tokens is not a non-negative integer.
pub fn version_to_number(version: &str) -> Result<u64, VersionParseError> {
    weighted_components(version)?
        .into_iter()
        .try_fold(0_u64, |sum, (_, value, weight)| {
            value
                .checked_mul(weight)
                .and_then(|term| sum.checked_add(term))
                .ok_or_else(|| invalid(version, &value.to_string()))
        })
}

/// Same as [`version_to_number`], but rejects minor/patch components that
/// would corrupt the ordering.
///
/// # Errors
/// Returns [`VersionParseError::ComponentOutOfRange`] for a minor or patch
/// component above [`MAX_SUBORDINATE_COMPONENT`], and
/// [`VersionParseError::InvalidComponent`] for non-numeric tokens.
pub fn checked_version_to_number(version: &str) -> Result<u64, VersionParseError> {
    for (name, value, weight) in weighted_components(version)? {
        if weight < WEIGHTS[0] && value > MAX_SUBORDINATE_COMPONENT {
            return Err(VersionParseError::ComponentOutOfRange {
                version: version.to_string(),
                component: name,
                value,
            });
        }
    }
    version_to_number(version)
}

/// Drop a single leading `v` or `V` from a release tag.
#[must_use]
pub fn strip_version_prefix(tag: &str) -> &str {
    tag.strip_prefix(['v', 'V']).unwrap_or(tag)
}

fn weighted_components(version: &str) -> Result<Vec<(&'static str, u64, u64)>, VersionParseError> {
    const NAMES: [&str; 3] = ["major", "minor", "patch"];

    version
        .split('.')
        .zip(WEIGHTS)
        .zip(NAMES)
        .map(|((token, weight), name)| {
            token
                .parse::<u64>()
                .map(|value| (name, value, weight))
                .map_err(|_| invalid(version, token))
        })
        .collect()
}

fn invalid(version: &str, component: &str) -> VersionParseError {
    VersionParseError::InvalidComponent {
        version: version.to_string(),
        component: component.to_string(),
    }
}
