/// Options shared by both extraction backends.
#[derive(Clone, Debug, Default)]
pub struct ExtractOptions {
    pub strip_components: usize,
    pub unknown_entries: UnknownEntryPolicy,
    pub preserve_modes: bool,
}

impl ExtractOptions {
    /// Drop the first `n` leading components of every entry name.
    pub fn strip_components(mut self, n: usize) -> Self {
        self.strip_components = n;
        self
    }

    pub fn unknown_entries(mut self, policy: UnknownEntryPolicy) -> Self {
        self.unknown_entries = policy;
        self
    }

    /// Apply unix mode bits from entry headers to extracted files and
    /// directories. No effect on non-unix platforms.
    pub fn preserve_modes(mut self, preserve: bool) -> Self {
        self.preserve_modes = preserve;
        self
    }
}

/// What to do with entry kinds the extractor does not materialize
/// (hardlinks, fifos, devices).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum UnknownEntryPolicy {
    #[default]
    Skip,
    Fail,
}
