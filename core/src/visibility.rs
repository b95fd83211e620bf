//! Visibility oracle consulted for heads-up rows.

use steady_types::EntryKey;

/// Answers whether an entry's row currently occupies a user-visible position.
///
/// Implementations are queried synchronously on every heads-up check and are
/// never cached by the gate.
pub trait VisibilityLocationProvider {
    fn is_in_visible_location(&self, entry: EntryKey) -> bool;
}

impl<F> VisibilityLocationProvider for F
where
    F: Fn(EntryKey) -> bool,
{
    fn is_in_visible_location(&self, entry: EntryKey) -> bool {
        self(entry)
    }
}
