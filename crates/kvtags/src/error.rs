// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error type returned by generated tag-update functions.

use thiserror::Error;

/// Boxed error produced by a service client call.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A tag or untag call failed while reconciling one resource.
///
/// Calls issued before the failing one stay applied; reconciliation is
/// idempotent, so the caller recovers by invoking the update again.
#[derive(Debug, Error)]
pub enum UpdateTagsError {
    /// The call adding (or, for combined-call services, changing) tags failed.
    #[error("error tagging resource ({identifier}): {source}")]
    Tagging {
        /// Identifier of the resource being reconciled.
        identifier: String,
        /// Error returned by the service client.
        #[source]
        source: BoxError,
    },
    /// The call removing tags failed.
    #[error("error untagging resource ({identifier}): {source}")]
    Untagging {
        /// Identifier of the resource being reconciled.
        identifier: String,
        /// Error returned by the service client.
        #[source]
        source: BoxError,
    },
}

impl UpdateTagsError {
    /// Wrap a failed tag call.
    pub fn tagging(identifier: &str, source: impl Into<BoxError>) -> Self {
        Self::Tagging {
            identifier: identifier.to_owned(),
            source: source.into(),
        }
    }

    /// Wrap a failed untag call.
    pub fn untagging(identifier: &str, source: impl Into<BoxError>) -> Self {
        Self::Untagging {
            identifier: identifier.to_owned(),
            source: source.into(),
        }
    }

    /// Identifier of the resource whose reconciliation failed.
    pub fn identifier(&self) -> &str {
        match self {
            Self::Tagging { identifier, .. } | Self::Untagging { identifier, .. } => identifier,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_resource() {
        let err = UpdateTagsError::untagging("arn:aws:acm:cert/1", "throttled");
        assert_eq!(
            err.to_string(),
            "error untagging resource (arn:aws:acm:cert/1): throttled"
        );
        assert_eq!(err.identifier(), "arn:aws:acm:cert/1");
        assert!(std::error::Error::source(&err).is_some());
    }
}
