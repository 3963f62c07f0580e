//! Driver configuration.
//!
//! Most driver methods take their knobs as plain positional arguments —
//! `start_at`, `end_at`, a single index. [`FindConfig`] exists for the
//! handful (`replace`, `replace_reverse`) that take enough optional knobs
//! at once that positional arguments would become error-prone to read at
//! the call site, the same threshold the teacher uses to decide when a
//! type needs `#[bon::bon]` rather than a plain constructor.

#[derive(Debug, Clone, Default)]
pub struct FindConfig {
    pub(crate) start_at: usize,
    pub(crate) end_at: Option<usize>,
    pub(crate) max_matches: Option<usize>,
}

#[bon::bon]
impl FindConfig {
    /// `start_at` defaults to `0`; `end_at` defaults to the input's length;
    /// `max_matches` defaults to unbounded.
    #[builder]
    pub fn new(
        #[builder(default = 0)] start_at: usize,
        end_at: Option<usize>,
        max_matches: Option<usize>,
    ) -> Self {
        FindConfig { start_at, end_at, max_matches }
    }
}

#[cfg(test)]
mod tests {
    use super::FindConfig;

    #[test]
    fn builder_applies_defaults() {
        let c = FindConfig::builder().build();
        assert_eq!(c.start_at, 0);
        assert_eq!(c.end_at, None);
        assert_eq!(c.max_matches, None);
    }

    #[test]
    fn builder_honors_overrides() {
        let c = FindConfig::builder().start_at(2).max_matches(5).build();
        assert_eq!(c.start_at, 2);
        assert_eq!(c.max_matches, Some(5));
    }
}
