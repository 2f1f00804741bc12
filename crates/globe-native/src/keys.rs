// Keyboard mapping for the native front-end, kept free of winit so the host
// tests can include it directly.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Focus the configured marker at this index.
    FocusMarker(usize),
    ClearFocus,
    ToggleTheme,
    Quit,
}

/// Map a typed character to an action. Digits `1`..`9` select markers; a
/// digit beyond the configured markers does nothing.
#[inline]
pub fn action_for_char(key: &str, marker_count: usize) -> Option<KeyAction> {
    match key {
        "d" | "D" => Some(KeyAction::ToggleTheme),
        "q" | "Q" => Some(KeyAction::Quit),
        digit => {
            let n: usize = digit.parse().ok().filter(|n| (1..=9).contains(n))?;
            (n <= marker_count).then_some(KeyAction::FocusMarker(n - 1))
        }
    }
}

