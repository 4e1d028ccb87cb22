use crate::model::Span;

/// Free time on one professional's calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayAvailability {
    /// The weekday is not in the professional's active days (or the
    /// professional is inactive). Not an error: there is simply no
    /// bookable time.
    NotWorking,
    /// Free intervals inside the working window: sorted, pairwise
    /// non-overlapping, possibly empty when the day is fully booked.
    Open(Vec<Span>),
}

impl DayAvailability {
    pub fn into_spans(self) -> Vec<Span> {
        match self {
            DayAvailability::NotWorking => Vec::new(),
            DayAvailability::Open(spans) => spans,
        }
    }
}

/// Merge sorted overlapping/adjacent spans into disjoint spans.
pub fn merge_spans(sorted: &[Span]) -> Vec<Span> {
    let mut merged: Vec<Span> = Vec::new();
    for &span in sorted {
        if let Some(last) = merged.last_mut()
            && span.start <= last.end
        {
            last.end = last.end.max(span.end);
            continue;
        }
        merged.push(span);
    }
    merged
}

/// Subtract `to_remove` (sorted by start) from `base` (sorted, disjoint),
/// splitting base spans around each removed span.
pub fn subtract_spans(base: &[Span], to_remove: &[Span]) -> Vec<Span> {
    let mut result = Vec::new();
    let mut ri = 0;

    for &b in base {
        let mut current_start = b.start;
        let current_end = b.end;

        while ri < to_remove.len() && to_remove[ri].end <= current_start {
            ri += 1;
        }

        let mut j = ri;
        while j < to_remove.len() && to_remove[j].start < current_end {
            let r = &to_remove[j];
            if r.start > current_start {
                result.push(Span::new(current_start, r.start));
            }
            current_start = current_start.max(r.end);
            j += 1;
        }

        if current_start < current_end {
            result.push(Span::new(current_start, current_end));
        }
    }

    result
}

/// The working window minus occupying spans, clamped to the window.
///
/// `occupying` must already be sorted by start (the calendar stores it that
/// way, insertion order preserved on equal starts, so identical inputs give
/// identical output).
pub fn free_within(window: Span, occupying: &[Span]) -> Vec<Span> {
    if occupying.is_empty() {
        return vec![window];
    }
    let clamped: Vec<Span> = occupying
        .iter()
        .filter(|s| s.overlaps(&window))
        .map(|s| Span::new(s.start.max(window.start), s.end.min(window.end)))
        .collect();
    let busy = merge_spans(&clamped);
    subtract_spans(&[window], &busy)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── subtract_spans ────────────────────────────────────

    #[test]
    fn subtract_no_overlap() {
        let base = vec![Span::hm(9, 0, 10, 0), Span::hm(11, 0, 12, 0)];
        let remove = vec![Span::hm(10, 0, 11, 0)];
        assert_eq!(subtract_spans(&base, &remove), base);
    }

    #[test]
    fn subtract_full_overlap() {
        let base = vec![Span::hm(10, 0, 11, 0)];
        let remove = vec![Span::hm(9, 0, 12, 0)];
        assert!(subtract_spans(&base, &remove).is_empty());
    }

    #[test]
    fn subtract_partial_left() {
        let base = vec![Span::hm(10, 0, 12, 0)];
        let remove = vec![Span::hm(9, 0, 11, 0)];
        assert_eq!(subtract_spans(&base, &remove), vec![Span::hm(11, 0, 12, 0)]);
    }

    #[test]
    fn subtract_partial_right() {
        let base = vec![Span::hm(10, 0, 12, 0)];
        let remove = vec![Span::hm(11, 0, 13, 0)];
        assert_eq!(subtract_spans(&base, &remove), vec![Span::hm(10, 0, 11, 0)]);
    }

    #[test]
    fn subtract_middle_punch() {
        let base = vec![Span::hm(9, 0, 18, 0)];
        let remove = vec![Span::hm(12, 0, 13, 0)];
        assert_eq!(
            subtract_spans(&base, &remove),
            vec![Span::hm(9, 0, 12, 0), Span::hm(13, 0, 18, 0)]
        );
    }

    #[test]
    fn subtract_multiple_punches() {
        let base = vec![Span::hm(9, 0, 18, 0)];
        let remove = vec![
            Span::hm(10, 0, 11, 0),
            Span::hm(12, 0, 13, 30),
            Span::hm(16, 0, 17, 0),
        ];
        assert_eq!(
            subtract_spans(&base, &remove),
            vec![
                Span::hm(9, 0, 10, 0),
                Span::hm(11, 0, 12, 0),
                Span::hm(13, 30, 16, 0),
                Span::hm(17, 0, 18, 0),
            ]
        );
    }

    // ── merge_spans ───────────────────────────────────────

    #[test]
    fn merge_overlapping_spans() {
        let spans = vec![
            Span::hm(9, 0, 11, 0),
            Span::hm(10, 0, 12, 0),
            Span::hm(14, 0, 15, 0),
        ];
        assert_eq!(
            merge_spans(&spans),
            vec![Span::hm(9, 0, 12, 0), Span::hm(14, 0, 15, 0)]
        );
    }

    #[test]
    fn merge_adjacent_spans() {
        let spans = vec![Span::hm(9, 0, 10, 0), Span::hm(10, 0, 11, 0)];
        assert_eq!(merge_spans(&spans), vec![Span::hm(9, 0, 11, 0)]);
    }

    // ── free_within ───────────────────────────────────────

    #[test]
    fn free_day_is_whole_window() {
        let window = Span::hm(9, 0, 18, 0);
        assert_eq!(free_within(window, &[]), vec![window]);
    }

    #[test]
    fn booking_splits_window() {
        let window = Span::hm(9, 0, 18, 0);
        let free = free_within(window, &[Span::hm(10, 0, 11, 0)]);
        assert_eq!(free, vec![Span::hm(9, 0, 10, 0), Span::hm(11, 0, 18, 0)]);
    }

    #[test]
    fn fully_booked_day_is_empty() {
        let window = Span::hm(9, 0, 12, 0);
        let free = free_within(window, &[Span::hm(9, 0, 12, 0)]);
        assert!(free.is_empty());
    }

    #[test]
    fn occupying_outside_window_is_ignored() {
        // Can only happen after the window was narrowed; old appointments
        // outside it must not corrupt the result.
        let window = Span::hm(10, 0, 16, 0);
        let free = free_within(window, &[Span::hm(8, 0, 9, 0), Span::hm(12, 0, 13, 0)]);
        assert_eq!(free, vec![Span::hm(10, 0, 12, 0), Span::hm(13, 0, 16, 0)]);
    }

    #[test]
    fn occupying_straddling_window_edge_is_clamped() {
        let window = Span::hm(10, 0, 16, 0);
        let free = free_within(window, &[Span::hm(9, 0, 11, 0)]);
        assert_eq!(free, vec![Span::hm(11, 0, 16, 0)]);
    }

    #[test]
    fn output_sorted_and_disjoint() {
        let window = Span::hm(9, 0, 18, 0);
        let free = free_within(
            window,
            &[Span::hm(9, 30, 10, 0), Span::hm(11, 0, 12, 0), Span::hm(15, 0, 15, 45)],
        );
        for w in free.windows(2) {
            assert!(w[0].end <= w[1].start);
            assert!(!w[0].overlaps(&w[1]));
        }
        for s in &free {
            assert!(s.within(&window));
        }
    }
}
