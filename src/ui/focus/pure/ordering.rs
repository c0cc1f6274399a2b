// Tree-order stepping (pure functions over candidate positions)

/// Step through a list of `len` candidates from `current`.
///
/// With no current position the first (forward) or last (backward) candidate is
/// returned. Never returns `current` itself.
pub fn step_in_order(len: usize, current: Option<usize>, forward: bool, wrap: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }

    let Some(current) = current else {
        return Some(if forward { 0 } else { len - 1 });
    };

    if forward {
        if current + 1 < len {
            Some(current + 1)
        } else if wrap && len > 1 {
            Some(0)
        } else {
            None
        }
    } else if current > 0 {
        Some(current - 1)
    } else if wrap && len > 1 {
        Some(len - 1)
    } else {
        None
    }
}

/// Tab navigation always cycles
pub fn tab_target(len: usize, current: Option<usize>, forward: bool) -> Option<usize> {
    step_in_order(len, current, forward, true)
}
