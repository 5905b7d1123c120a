use serde::{Deserialize, Serialize};

/// Options forwarded to the transformation engine alongside the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Flags {
    pub prepend: bool,
    pub append: bool,
}

impl Default for Flags {
    fn default() -> Self {
        Self {
            prepend: true,
            append: true,
        }
    }
}

/// Everything a form widget renders.
///
/// `output` is a cached derivation of `input` under the current flags. It only
/// changes when a translate action is applied, so it may lag `input` while a
/// recompute is pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformState {
    pub input: String,
    pub output: String,
    pub prepend: bool,
    pub append: bool,
}

impl TransformState {
    pub fn with_flags(flags: Flags) -> Self {
        Self {
            input: String::new(),
            output: String::new(),
            prepend: flags.prepend,
            append: flags.append,
        }
    }

    pub fn flags(&self) -> Flags {
        Flags {
            prepend: self.prepend,
            append: self.append,
        }
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::with_flags(Flags::default())
    }
}

/// Partial update merged into a [`TransformState`].
///
/// There is no `output` field: the output can only be produced by translating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatePatch {
    pub input: Option<String>,
    pub prepend: Option<bool>,
    pub append: Option<bool>,
}

impl StatePatch {
    pub fn input(text: impl Into<String>) -> Self {
        Self {
            input: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn prepend(value: bool) -> Self {
        Self {
            prepend: Some(value),
            ..Self::default()
        }
    }

    pub fn append(value: bool) -> Self {
        Self {
            append: Some(value),
            ..Self::default()
        }
    }

    /// Returns true when merging this patch into `state` would change nothing.
    pub fn is_noop_for(&self, state: &TransformState) -> bool {
        self.input.as_deref().map_or(true, |v| v == state.input)
            && self.prepend.map_or(true, |v| v == state.prepend)
            && self.append.map_or(true, |v| v == state.append)
    }

    /// Shallow merge. Leaves `output` alone.
    pub fn apply_to(self, state: &mut TransformState) {
        if let Some(input) = self.input {
            state.input = input;
        }
        if let Some(prepend) = self.prepend {
            state.prepend = prepend;
        }
        if let Some(append) = self.append {
            state.append = append;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_has_both_flags_enabled() {
        let state = TransformState::default();
        assert_eq!(state.input, "");
        assert_eq!(state.output, "");
        assert!(state.prepend);
        assert!(state.append);
    }

    #[test]
    fn patch_merges_only_present_fields() {
        let mut state = TransformState {
            input: "thee".into(),
            output: "thou".into(),
            prepend: true,
            append: true,
        };

        StatePatch::append(false).apply_to(&mut state);

        assert_eq!(state.input, "thee");
        assert_eq!(state.output, "thou");
        assert!(state.prepend);
        assert!(!state.append);
    }

    #[test]
    fn noop_detection_compares_each_field() {
        let state = TransformState::default();
        assert!(StatePatch::default().is_noop_for(&state));
        assert!(StatePatch::input("").is_noop_for(&state));
        assert!(StatePatch::prepend(true).is_noop_for(&state));
        assert!(!StatePatch::append(false).is_noop_for(&state));
        assert!(!StatePatch::input("x").is_noop_for(&state));
    }
}
